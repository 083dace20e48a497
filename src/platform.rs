//! # Platform-specific utilities
//!
//! Questo modulo centralizza le differenze tra piattaforme per l'avvio
//! di FFmpeg: nome dell'eseguibile e soppressione della finestra console
//! su Windows.

use std::process::Command;

/// `CREATE_NO_WINDOW` process creation flag
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Platform-specific executable name (`ffmpeg` -> `ffmpeg.exe` on Windows)
pub fn executable_name(base_name: &str) -> String {
    if cfg!(windows) && !base_name.to_ascii_lowercase().ends_with(".exe") {
        format!("{}.exe", base_name)
    } else {
        base_name.to_string()
    }
}

/// Build a command that never pops up a console window
pub fn new_command(program: &str) -> Command {
    #[allow(unused_mut)]
    let mut cmd = Command::new(program);
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    cmd
}

/// System information structure
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os: &'static str,
    pub arch: &'static str,
    pub family: &'static str,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            family: std::env::consts::FAMILY,
        }
    }
}

impl std::fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.os, self.arch, self.family)
    }
}
