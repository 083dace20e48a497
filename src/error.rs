//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore della pipeline di conversione.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti i fallimenti possibili
//! - Fornisce messaggi di errore descrittivi per il log dell'utente
//! - Integra con `thiserror` per automatic error conversion da `std::io::Error`
//!
//! ## Categorie di errori:
//! - `Launch`: FFmpeg non trovato o non avviabile
//! - `EncoderExit`: FFmpeg terminato con exit code diverso da zero
//! - `Filesystem`: Impossibile rimuovere la palette temporanea (solo warning)
//! - `MissingOutput`: FFmpeg ha terminato con successo ma la GIF non esiste
//! - `Validation`: Input del chiamante non valido (width, fps, config)
//! - `MissingDependency`: Encoder assente, con istruzioni di installazione
//! - `Busy`: Una conversione è già in corso
//! - `Io` / `Unexpected`: Qualsiasi altro errore durante l'orchestrazione
//!
//! ## Esempio:
//! ```rust
//! use giffy_drop::error::{ConvertError, Pass};
//!
//! fn check_palette_pass(code: i32) -> Result<(), ConvertError> {
//!     if code != 0 {
//!         return Err(ConvertError::EncoderExit { pass: Pass::Palette, code });
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_palette_pass(0).is_ok());
//! assert!(check_palette_pass(1).is_err());
//! ```

use std::fmt;
use std::path::PathBuf;

/// The two encoder invocations of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Palette,
    Encode,
}

impl Pass {
    /// 1-based position shown in the log banners
    pub fn number(self) -> u8 {
        match self {
            Pass::Palette => 1,
            Pass::Encode => 2,
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Palette => write!(f, "palette generation"),
            Pass::Encode => write!(f, "GIF conversion"),
        }
    }
}

/// Custom error types for GIF conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{pass} failed (exit code {code})")]
    EncoderExit { pass: Pass, code: i32 },

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("Encoder exited successfully but produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("A conversion is already in progress")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ConvertError {
    /// True when the executable could not be started because it does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConvertError::Launch { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
