//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per front-end grafici
//! che lanciano `giffy-drop` come processo figlio.
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio conversione (input, output previsto, parametri)
//! - `log`: Una riga del log di conversione, nell'ordine prodotto da FFmpeg
//! - `complete`: Fine conversione con esito e dimensione finale
//! - `error`: Richiesta rifiutata prima di avviare la conversione

use crate::pipeline::PipelineResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio della conversione
    #[serde(rename = "start")]
    Start {
        input: PathBuf,
        output: PathBuf,
        width: String,
        fps: u32,
    },

    /// Riga di log
    #[serde(rename = "log")]
    Log { line: String },

    /// Conversione completata (con successo o meno)
    #[serde(rename = "complete")]
    Complete {
        succeeded: bool,
        output: PathBuf,
        size_bytes: u64,
        size_mb: f64,
        within_budget: bool,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(input: PathBuf, output: PathBuf, width: String, fps: u32) -> Self {
        Self::Start {
            input,
            output,
            width,
            fps,
        }
    }

    pub fn log(line: &str) -> Self {
        Self::Log {
            line: line.to_string(),
        }
    }

    /// Crea un messaggio di completamento dal risultato della pipeline
    pub fn complete(result: &PipelineResult, budget_bytes: u64) -> Self {
        Self::Complete {
            succeeded: result.succeeded,
            output: result.final_path.clone(),
            size_bytes: result.final_size_bytes,
            size_mb: (result.size_megabytes() * 100.0).round() / 100.0,
            within_budget: result.succeeded && result.within_budget(budget_bytes),
        }
    }

    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}
