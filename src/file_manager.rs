//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file della pipeline.
//!
//! ## Responsabilità:
//! - Creazione idempotente della cartella di output
//! - Lettura dimensione della GIF finale
//! - Rimozione della palette temporanea
//! - Riconoscimento delle estensioni video supportate
//! - Formattazione human-readable delle dimensioni
//!
//! ## Esempio:
//! ```rust
//! use giffy_drop::file_manager::FileManager;
//!
//! assert_eq!(FileManager::format_size(1536), "1.50 KB");
//! assert_eq!(FileManager::megabytes(10 * 1024 * 1024), 10.0);
//! ```

use std::fs;
use std::io;
use std::path::Path;

/// Manages file operations for a conversion
pub struct FileManager;

impl FileManager {
    /// Create a directory (and parents) if it does not exist yet
    pub fn ensure_dir(path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    /// Size of a regular file, `None` when it does not exist
    pub fn file_size(path: &Path) -> io::Result<Option<u64>> {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => Ok(Some(metadata.len())),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove a file, returning whether anything was deleted
    pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if a file is a video the file picker would offer
    pub fn is_video(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(
                ext_lower.as_str(),
                "mp4" | "mov" | "avi" | "mkv" | "webm" | "m4v"
            )
        } else {
            false
        }
    }

    /// Binary megabytes (bytes / 1024 / 1024)
    pub fn megabytes(size: u64) -> f64 {
        size as f64 / (1024.0 * 1024.0)
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
