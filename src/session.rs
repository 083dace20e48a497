//! # Conversion Session
//!
//! Runs one conversion at a time off the caller's task.
//!
//! ## Responsabilità:
//! - `ConversionSlot`: stato esplicito `Idle`/`Running`, una sola conversione alla volta
//! - Esecuzione della pipeline su un thread bloccante dedicato (`spawn_blocking`)
//! - Inoltro delle righe di log al consumer tramite canale `mpsc` limitato
//!
//! Il consumer deve continuare a leggere dal canale: se smette, il thread
//! della conversione si blocca e con lui la pipe di FFmpeg.
//!
//! ## Esempio:
//! ```rust,no_run
//! # use giffy_drop::{Config, ConversionPipeline, ConversionRequest, ConversionSession, Profile};
//! # async fn demo() -> anyhow::Result<()> {
//! let session = ConversionSession::new(ConversionPipeline::new(Config::default()));
//! let request = ConversionRequest::new(
//!     "clip.mp4",
//!     Profile::Avatar.into(),
//!     Profile::Avatar.default_frame_rate(),
//! );
//! let events = session.start(request)?;
//! let result = giffy_drop::session::forward_events(events, |line| println!("{}", line)).await;
//! # Ok(())
//! # }
//! ```

use crate::{
    error::ConvertError,
    pipeline::{converter::describe_failure, ArtifactPaths, ConversionPipeline, ConversionRequest, PipelineResult},
    runner::ProcessRunner,
};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Whether a conversion is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Running,
}

/// Single-attempt-in-flight guard shared by everything that can start a conversion
#[derive(Debug, Clone)]
pub struct ConversionSlot {
    state: Arc<Mutex<SlotState>>,
}

impl Default for ConversionSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionSlot {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState::Idle)),
        }
    }

    pub fn state(&self) -> SlotState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_busy(&self) -> bool {
        self.state() == SlotState::Running
    }

    /// Idle -> Running, or `Busy` if another attempt holds the slot.
    /// The slot goes back to Idle when the guard is dropped.
    pub fn try_begin(&self) -> Result<SlotGuard, ConvertError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == SlotState::Running {
            return Err(ConvertError::Busy);
        }
        *state = SlotState::Running;

        Ok(SlotGuard {
            state: Arc::clone(&self.state),
        })
    }
}

/// Holds the slot in `Running` while alive
#[derive(Debug)]
pub struct SlotGuard {
    state: Arc<Mutex<SlotState>>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = SlotState::Idle;
        debug!("Conversion slot released");
    }
}

/// What the consumer receives while a conversion runs
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionEvent {
    Line(String),
    /// Always the last event of a session
    Finished(PipelineResult),
}

/// Pairs a pipeline with the slot that serializes its use
pub struct ConversionSession<R> {
    pipeline: Arc<ConversionPipeline<R>>,
    slot: ConversionSlot,
}

impl<R: ProcessRunner + 'static> ConversionSession<R> {
    pub fn new(pipeline: ConversionPipeline<R>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            slot: ConversionSlot::new(),
        }
    }

    pub fn slot(&self) -> &ConversionSlot {
        &self.slot
    }

    /// Start converting in the background. Must be called inside a Tokio runtime.
    ///
    /// Rejected with [`ConvertError::Validation`] for an invalid config, and with
    /// [`ConvertError::Busy`] while a previous attempt is still running.
    pub fn start(&self, request: ConversionRequest) -> Result<mpsc::Receiver<ConversionEvent>, ConvertError> {
        let config = self.pipeline.config();
        config.validate()?;
        let guard = self.slot.try_begin()?;

        let (tx, rx) = mpsc::channel(config.log_channel_capacity);
        let fallback_path = ArtifactPaths::from_input(&request.input_path, config)
            .map(|paths| paths.final_path)
            .unwrap_or_default();
        let pipeline = Arc::clone(&self.pipeline);

        tokio::spawn(async move {
            let line_tx = tx.clone();
            let worker = tokio::task::spawn_blocking(move || {
                pipeline.convert(&request, &mut |line| {
                    // A vanished consumer must not abort the conversion
                    let _ = line_tx.blocking_send(ConversionEvent::Line(line.to_string()));
                })
            });

            let result = match worker.await {
                Ok(result) => result,
                // Unreachable in release builds, which abort on panic
                Err(e) => {
                    let err = ConvertError::Unexpected(e.to_string());
                    error!("Conversion worker crashed: {}", err);
                    let _ = tx.send(ConversionEvent::Line(describe_failure(&err))).await;
                    PipelineResult::failed(fallback_path)
                }
            };

            // Free the slot first so a consumer reacting to `Finished` can start again
            drop(guard);
            let _ = tx.send(ConversionEvent::Finished(result)).await;
        });

        Ok(rx)
    }
}

/// Drain a session, handing each line to `on_line`; returns the final result
/// or `None` if the worker went away without finishing.
pub async fn forward_events(
    mut events: mpsc::Receiver<ConversionEvent>,
    mut on_line: impl FnMut(&str),
) -> Option<PipelineResult> {
    while let Some(event) = events.recv().await {
        match event {
            ConversionEvent::Line(line) => on_line(&line),
            ConversionEvent::Finished(result) => return Some(result),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::profile::{FrameRate, WidthSelection};
    use std::fs;
    use std::path::Path;
    use std::sync::mpsc as std_mpsc;
    use tempfile::TempDir;

    /// Writes whatever it is asked to write, optionally waiting for a go signal first
    struct GatedRunner {
        gate: Option<Mutex<std_mpsc::Receiver<()>>>,
    }

    impl ProcessRunner for GatedRunner {
        fn run(&self, _program: &str, args: &[String], on_line: &mut dyn FnMut(&str)) -> Result<i32, ConvertError> {
            if let Some(gate) = &self.gate {
                let _ = gate.lock().unwrap().recv();
            }
            on_line("frame=  10 fps=0.0 q=-0.0 size=N/A");
            fs::write(Path::new(args.last().unwrap()), b"GIF89a")?;
            Ok(0)
        }

        fn is_available(&self, _program: &str) -> bool {
            true
        }
    }

    fn request(dir: &TempDir) -> ConversionRequest {
        let input = dir.path().join("clip.mp4");
        fs::write(&input, b"video").unwrap();
        ConversionRequest::new(input, WidthSelection::Source, FrameRate::new(10).unwrap())
    }

    #[test]
    fn test_slot_rejects_second_attempt() {
        let slot = ConversionSlot::new();
        assert_eq!(slot.state(), SlotState::Idle);

        let guard = slot.try_begin().unwrap();
        assert!(slot.is_busy());
        assert!(matches!(slot.try_begin(), Err(ConvertError::Busy)));

        drop(guard);
        assert_eq!(slot.state(), SlotState::Idle);
        assert!(slot.try_begin().is_ok());
    }

    #[tokio::test]
    async fn test_session_streams_lines_then_finishes() {
        let temp_dir = TempDir::new().unwrap();
        let session = ConversionSession::new(ConversionPipeline::with_runner(
            Config::default(),
            GatedRunner { gate: None },
        ));

        let events = session.start(request(&temp_dir)).unwrap();
        let mut lines = Vec::new();
        let result = forward_events(events, |line| lines.push(line.to_string()))
            .await
            .unwrap();

        assert!(result.succeeded);
        assert_eq!(result.final_path, temp_dir.path().join("output").join("clip_optimized.gif"));
        assert_eq!(result.final_size_bytes, 6);
        assert_eq!(lines.iter().filter(|l| l.starts_with("frame=")).count(), 2);
        assert!(lines.iter().any(|l| l == "✓ Conversion complete!"));
        assert!(!session.slot().is_busy());
    }

    #[tokio::test]
    async fn test_session_is_busy_while_running() {
        let temp_dir = TempDir::new().unwrap();
        let (go, gate) = std_mpsc::channel();
        let session = ConversionSession::new(ConversionPipeline::with_runner(
            Config::default(),
            GatedRunner { gate: Some(Mutex::new(gate)) },
        ));

        let events = session.start(request(&temp_dir)).unwrap();
        assert!(session.slot().is_busy());
        assert!(matches!(session.start(request(&temp_dir)), Err(ConvertError::Busy)));

        // One signal per pass
        go.send(()).unwrap();
        go.send(()).unwrap();
        let result = forward_events(events, |_| {}).await.unwrap();

        assert!(result.succeeded);
        assert!(!session.slot().is_busy());
        assert!(session.start(request(&temp_dir)).is_ok());
        go.send(()).unwrap();
        go.send(()).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_starting() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            log_channel_capacity: 0,
            ..Default::default()
        };
        let session = ConversionSession::new(ConversionPipeline::with_runner(config, GatedRunner { gate: None }));

        assert!(matches!(session.start(request(&temp_dir)), Err(ConvertError::Validation(_))));
        assert!(!session.slot().is_busy());
        assert!(!temp_dir.path().join("output").exists());
    }

    #[tokio::test]
    async fn test_small_channel_does_not_lose_lines() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            log_channel_capacity: 1,
            ..Default::default()
        };
        let session = ConversionSession::new(ConversionPipeline::with_runner(config, GatedRunner { gate: None }));

        let events = session.start(request(&temp_dir)).unwrap();
        let mut count = 0;
        let result = forward_events(events, |_| count += 1).await.unwrap();

        assert!(result.succeeded);
        assert!(count > 10);
    }
}
