//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path degli artefatti. Dipende solo dal path
//! di input e dalla config: stessa sorgente, stessi path, a ogni tentativo.

use crate::{config::Config, error::ConvertError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files produced by one conversion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// `<input dir>/output`
    pub output_dir: PathBuf,
    /// Transient palette, deleted when the attempt ends
    pub palette_path: PathBuf,
    /// `<output dir>/<stem>_optimized.gif`, overwritten on every attempt
    pub final_path: PathBuf,
}

impl ArtifactPaths {
    /// Calcola i path degli artefatti per un file di input
    pub fn from_input(input_path: &Path, config: &Config) -> Result<Self, ConvertError> {
        let file_stem = input_path
            .file_stem()
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                ConvertError::Validation(format!("Invalid file name: {}", input_path.display()))
            })?
            .to_string_lossy();

        let parent = input_path.parent().unwrap_or(Path::new(""));
        let output_dir = parent.join(&config.output_dir_name);
        let palette_path = output_dir.join(&config.palette_file_name);
        let final_path = output_dir.join(format!("{}{}.gif", file_stem, config.output_suffix));

        debug!(
            "Artifacts for {}: palette={}, output={}",
            input_path.display(),
            palette_path.display(),
            final_path.display()
        );

        Ok(Self {
            output_dir,
            palette_path,
            final_path,
        })
    }
}
