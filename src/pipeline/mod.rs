//! # Pipeline Module
//!
//! Modulo che separa le responsabilità della conversione in sottomoduli:
//! - `converter`: Orchestratore delle due passate FFmpeg
//! - `request`: Richiesta di conversione, parametri risolti e risultato
//! - `path_resolver`: Calcolo dei path di output e della palette

pub mod converter;
pub mod path_resolver;
pub mod request;

pub use converter::ConversionPipeline;
pub use path_resolver::ArtifactPaths;
pub use request::{ConversionRequest, PipelineResult, ResolvedParameters};
