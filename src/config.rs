//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione della pipeline di conversione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri della pipeline
//! - Fornisce validazione dei parametri
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `encoder`: Nome dell'eseguibile FFmpeg (default: "ffmpeg")
//! - `size_budget_bytes`: Limite dimensione GIF (default: 10 MiB)
//! - `output_dir_name`: Cartella di output accanto all'input (default: "output")
//! - `palette_file_name`: Nome della palette temporanea (default: "palette.png")
//! - `output_suffix`: Suffisso del file GIF finale (default: "_optimized")
//! - `log_channel_capacity`: Capacità del canale dei log (default: 256)
//! - `json_output`: Output JSON per uso programmatico (default: false)
//!
//! ## Esempio:
//! ```rust
//! use giffy_drop::config::Config;
//!
//! let config = Config {
//!     size_budget_bytes: 8 * 1024 * 1024,
//!     ..Default::default()
//! };
//! config.validate()?;
//! # Ok::<(), giffy_drop::ConvertError>(())
//! ```

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 10.0 MB expressed in binary megabytes
pub const DEFAULT_SIZE_BUDGET_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for GIF conversion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Encoder executable name, looked up in PATH
    pub encoder: String,
    /// Size ceiling for the final GIF (inclusive)
    pub size_budget_bytes: u64,
    /// Output directory created next to the input file
    pub output_dir_name: String,
    /// Transient palette file name inside the output directory
    pub palette_file_name: String,
    /// Appended to the input stem to build the GIF name
    pub output_suffix: String,
    /// Bound on buffered log lines between the worker thread and the consumer
    pub log_channel_capacity: usize,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoder: "ffmpeg".to_string(),
            size_budget_bytes: DEFAULT_SIZE_BUDGET_BYTES,
            output_dir_name: "output".to_string(),
            palette_file_name: "palette.png".to_string(),
            output_suffix: "_optimized".to_string(),
            log_channel_capacity: 256,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.encoder.trim().is_empty() {
            return Err(ConvertError::Validation("Encoder name must not be empty".to_string()));
        }

        if self.size_budget_bytes == 0 {
            return Err(ConvertError::Validation("Size budget must be greater than 0".to_string()));
        }

        if self.log_channel_capacity == 0 {
            return Err(ConvertError::Validation(
                "Log channel capacity must be greater than 0".to_string(),
            ));
        }

        for (label, value) in [
            ("Output directory name", &self.output_dir_name),
            ("Palette file name", &self.palette_file_name),
        ] {
            if value.is_empty() || value.contains(['/', '\\']) {
                return Err(ConvertError::Validation(format!(
                    "{} must be a plain file name: {:?}",
                    label, value
                )));
            }
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(ConvertError::Validation(format!(
                "Output suffix must not contain path separators: {:?}",
                self.output_suffix
            )));
        }

        Ok(())
    }

    /// Default config location: `<config dir>/giffy-drop/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("giffy-drop").join("config.json"))
    }

    /// Load configuration from file
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.size_budget_bytes = 0;
        assert!(config.validate().is_err());

        config.size_budget_bytes = DEFAULT_SIZE_BUDGET_BYTES;
        config.log_channel_capacity = 0;
        assert!(config.validate().is_err());

        config.log_channel_capacity = 16;
        config.encoder = "  ".to_string();
        assert!(config.validate().is_err());

        config.encoder = "ffmpeg".to_string();
        config.palette_file_name = "../palette.png".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.encoder, "ffmpeg");
        assert_eq!(config.size_budget_bytes, 10_485_760);
        assert_eq!(config.output_dir_name, "output");
        assert_eq!(config.palette_file_name, "palette.png");
        assert_eq!(config.output_suffix, "_optimized");
        assert!(!config.json_output);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let original_config = Config {
            size_budget_bytes: 8 * 1024 * 1024,
            output_suffix: "_discord".to_string(),
            json_output: true,
            ..Default::default()
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config, original_config);
    }

    #[tokio::test]
    async fn test_missing_file_yields_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::from_file(&temp_dir.path().join("absent.json")).await.unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        tokio::fs::write(&config_path, r#"{ "encoder": "/opt/ffmpeg/bin/ffmpeg" }"#)
            .await
            .unwrap();

        let loaded = Config::from_file(&config_path).await.unwrap();
        assert_eq!(loaded.encoder, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(loaded.size_budget_bytes, DEFAULT_SIZE_BUDGET_BYTES);
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        tokio::fs::write(&config_path, r#"{ "size_budget_bytes": 0 }"#).await.unwrap();

        assert!(Config::from_file(&config_path).await.is_err());
    }
}
