//! # Encoder Path Resolver
//!
//! Finds the encoder executable the way the shell would: an explicit path is
//! checked as-is, a bare name is searched in every `PATH` entry.

use crate::error::ConvertError;
use crate::platform;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

const FFMPEG_DOWNLOAD_URL: &str = "https://ffmpeg.org/download.html";

/// Availability probe for the external encoder
#[derive(Debug, Clone)]
pub struct EncoderLocator {
    program: String,
}

impl EncoderLocator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolve the encoder to a path on disk
    pub fn resolve(&self) -> Option<PathBuf> {
        let candidate = Path::new(&self.program);
        if candidate.components().count() > 1 {
            debug!("Checking explicit encoder path: {:?}", candidate);
            return candidate.is_file().then(|| candidate.to_path_buf());
        }

        let resolved = self.find_in_system_path();
        debug!("Resolved {} -> {:?}", self.program, resolved);
        resolved
    }

    /// Find tool in system PATH
    fn find_in_system_path(&self) -> Option<PathBuf> {
        let executable = platform::executable_name(&self.program);
        env::split_paths(&env::var_os("PATH")?)
            .map(|dir| dir.join(&executable))
            .find(|path| path.is_file())
    }

    /// Check if the encoder is available
    pub fn is_available(&self) -> bool {
        self.resolve().is_some()
    }

    /// Get installation instructions for the current platform
    pub fn install_instructions(&self) -> String {
        if cfg!(target_os = "linux") {
            "sudo apt-get install ffmpeg".to_string()
        } else if cfg!(target_os = "macos") {
            "brew install ffmpeg".to_string()
        } else {
            format!("Download: {}", FFMPEG_DOWNLOAD_URL)
        }
    }

    /// Check if the encoder is available and provide installation instructions if not
    pub fn check_with_instructions(&self) -> Result<PathBuf, ConvertError> {
        self.resolve().ok_or_else(|| {
            ConvertError::MissingDependency(format!(
                "{} not found in PATH.\n\
                 Please install FFmpeg and add it to your system PATH.\n  {}",
                self.program,
                self.install_instructions()
            ))
        })
    }
}

impl Default for EncoderLocator {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let locator = EncoderLocator::new("giffy-drop-definitely-not-installed");
        assert!(!locator.is_available());

        let err = locator.check_with_instructions().unwrap_err();
        assert!(matches!(err, ConvertError::MissingDependency(_)));
        assert!(err.to_string().contains(&locator.install_instructions()));
    }

    #[test]
    fn test_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let fake = temp_dir.path().join("ffmpeg-custom");
        std::fs::write(&fake, b"").unwrap();

        let locator = EncoderLocator::new(fake.to_string_lossy());
        assert_eq!(locator.resolve(), Some(fake.clone()));

        let missing = EncoderLocator::new(temp_dir.path().join("nope").to_string_lossy());
        assert!(!missing.is_available());
    }

    #[test]
    fn test_repeated_probe_is_stable() {
        let locator = EncoderLocator::default();
        let first = locator.is_available();
        assert_eq!(locator.is_available(), first);
        assert_eq!(locator.program(), "ffmpeg");
    }
}
