//! # GiffyDrop Library
//!
//! Converte un video in una GIF animata ottimizzata per restare sotto un
//! limite di dimensione (10 MB), pilotando FFmpeg con il metodo a due passate.
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore della conversione
//! - `profile`: Profili (avatar/banner), frame rate e larghezza tipizzati
//! - `filter`: Costruzione dei filtri FFmpeg
//! - `runner`: Avvio di FFmpeg con streaming dell'output riga per riga
//! - `tool_resolver`: Ricerca di FFmpeg nel PATH
//! - `pipeline`: Orchestratore delle due passate, controllo dimensione e cleanup
//! - `session`: Una conversione alla volta su thread dedicato
//! - `file_manager`, `platform`, `progress`, `json_output`, `utils`: supporto
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use giffy_drop::{Config, ConversionPipeline, ConversionRequest, Profile};
//!
//! let pipeline = ConversionPipeline::new(Config::default());
//! let request = ConversionRequest::new(
//!     "/videos/clip.mp4",
//!     Profile::Avatar.into(),
//!     Profile::Avatar.default_frame_rate(),
//! );
//! let result = pipeline.convert(&request, &mut |line| println!("{}", line));
//! assert!(result.succeeded);
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod filter;
pub mod json_output;
pub mod pipeline;
pub mod platform;
pub mod profile;
pub mod progress;
pub mod runner;
pub mod session;
pub mod tool_resolver;
pub mod utils;

pub use config::Config;
pub use error::ConvertError;
pub use pipeline::{ArtifactPaths, ConversionPipeline, ConversionRequest, PipelineResult};
pub use profile::{FpsPreset, FrameRate, Profile, WidthSelection};
pub use session::{ConversionSession, ConversionSlot};
pub use tool_resolver::EncoderLocator;
