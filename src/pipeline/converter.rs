//! # Conversion Pipeline
//!
//! Orchestratore della conversione video -> GIF con il metodo a due passate
//! di FFmpeg (palettegen + paletteuse).
//!
//! ## Pipeline:
//! 1. Crea la cartella di output e risolve filtro e path
//! 2. Verifica che l'encoder sia disponibile
//! 3. Passata 1: genera la palette ottimizzata
//! 4. Passata 2: converte in GIF usando la palette
//! 5. Controlla la dimensione finale rispetto al budget
//! 6. Rimuove sempre la palette temporanea, anche in caso di errore
//!
//! `convert` non ritorna mai un errore: ogni fallimento diventa una riga di
//! log più `succeeded = false` nel risultato.

use crate::{
    config::Config,
    error::{ConvertError, Pass},
    file_manager::FileManager,
    pipeline::{ArtifactPaths, ConversionRequest, PipelineResult},
    runner::{ProcessRunner, SystemRunner},
    utils::display_command,
};
use std::io;
use std::time::Instant;
use tracing::{debug, info, warn};

const BANNER_WIDTH: usize = 60;

/// Two-pass GIF converter driving an external encoder
pub struct ConversionPipeline<R = SystemRunner> {
    config: Config,
    runner: R,
}

impl ConversionPipeline<SystemRunner> {
    /// Pipeline backed by real processes
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ProcessRunner> ConversionPipeline<R> {
    pub fn with_runner(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run both passes for `request`, reporting every log line to `on_line`.
    ///
    /// The palette is removed before this returns, whatever the outcome.
    pub fn convert(&self, request: &ConversionRequest, on_line: &mut dyn FnMut(&str)) -> PipelineResult {
        let started = Instant::now();

        on_line(&"=".repeat(BANNER_WIDTH));
        on_line("Starting conversion process...");
        on_line(&"=".repeat(BANNER_WIDTH));

        let paths = match ArtifactPaths::from_input(&request.input_path, &self.config) {
            Ok(paths) => paths,
            Err(e) => {
                on_line(&format!("❌ Unexpected error: {}", e));
                return PipelineResult::failed(Default::default());
            }
        };

        let outcome = self.run_stages(request, &paths, on_line);
        if let Err(ref e) = outcome {
            warn!("Conversion of {} failed: {}", request.input_path.display(), e);
            on_line(&describe_failure(e));
        }

        self.cleanup(&paths, on_line);

        match outcome {
            Ok(final_size_bytes) => {
                info!(
                    "Converted {} in {:.1}s",
                    request.input_path.display(),
                    started.elapsed().as_secs_f64()
                );
                on_line(&"=".repeat(BANNER_WIDTH));
                on_line("✓ Conversion complete!");
                on_line(&format!("Output: {}", paths.final_path.display()));
                on_line(&"=".repeat(BANNER_WIDTH));

                PipelineResult {
                    succeeded: true,
                    final_path: paths.final_path,
                    final_size_bytes,
                }
            }
            Err(_) => PipelineResult::failed(paths.final_path),
        }
    }

    /// Everything between Init and SizeCheck; returns the final GIF size
    fn run_stages(
        &self,
        request: &ConversionRequest,
        paths: &ArtifactPaths,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<u64, ConvertError> {
        FileManager::ensure_dir(&paths.output_dir)?;
        let params = request.parameters();
        debug!("Resolved filter: {}", params.filter_expression);

        if !self.runner.is_available(&self.config.encoder) {
            return Err(ConvertError::Launch {
                program: self.config.encoder.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found in PATH"),
            });
        }

        let input = request.input_path.to_string_lossy();
        let palette = paths.palette_path.to_string_lossy();
        let output = paths.final_path.to_string_lossy();

        let palette_args = crate::args![
            "-i", input,
            "-vf", params.palette_filter(),
            "-y", palette,
        ];
        self.run_pass(Pass::Palette, &palette_args, on_line)?;

        let encode_args = crate::args![
            "-i", input,
            "-i", palette,
            "-lavfi", params.paletteuse_graph(),
            "-y", output,
        ];
        self.run_pass(Pass::Encode, &encode_args, on_line)?;

        self.check_size(paths, on_line)
    }

    fn run_pass(&self, pass: Pass, args: &[String], on_line: &mut dyn FnMut(&str)) -> Result<(), ConvertError> {
        let (banner, done) = match pass {
            Pass::Palette => ("Generating color palette...", "Palette generated successfully"),
            Pass::Encode => ("Converting to GIF...", "GIF generated successfully"),
        };

        on_line(&format!("[Pass {}/2] {}", pass.number(), banner));
        on_line(&format!("Command: {}", display_command(&self.config.encoder, args)));

        let started = Instant::now();
        let code = self.runner.run(&self.config.encoder, args, on_line)?;
        if code != 0 {
            return Err(ConvertError::EncoderExit { pass, code });
        }

        debug!("{} finished in {:.1}s", pass, started.elapsed().as_secs_f64());
        on_line(&format!("✓ {}", done));
        Ok(())
    }

    fn check_size(&self, paths: &ArtifactPaths, on_line: &mut dyn FnMut(&str)) -> Result<u64, ConvertError> {
        let Some(size) = FileManager::file_size(&paths.final_path)? else {
            return Err(ConvertError::MissingOutput(paths.final_path.clone()));
        };

        on_line(&format!("📊 Final size: {:.2} MB", FileManager::megabytes(size)));

        let budget = self.config.size_budget_bytes;
        if size > budget {
            on_line(&format!(
                "⚠ WARNING: File exceeds the {:.2} MB limit.",
                FileManager::megabytes(budget)
            ));
            on_line("   Try lowering FPS or Width for a smaller file.");
        } else {
            on_line("✓ File size is within limits!");
        }

        Ok(size)
    }

    fn cleanup(&self, paths: &ArtifactPaths, on_line: &mut dyn FnMut(&str)) {
        match FileManager::remove_if_exists(&paths.palette_path) {
            Ok(true) => on_line("✓ Temporary files cleaned up"),
            Ok(false) => debug!("No palette left at {}", paths.palette_path.display()),
            Err(e) => {
                let err = ConvertError::Filesystem(format!("{}: {}", paths.palette_path.display(), e));
                warn!("{}", err);
                on_line(&format!("⚠ Warning: Could not remove temporary files: {}", e));
            }
        }
    }
}

pub(crate) fn describe_failure(err: &ConvertError) -> String {
    match err {
        ConvertError::EncoderExit { pass: Pass::Palette, code } => {
            format!("❌ Error: Palette generation failed (exit code {})", code)
        }
        ConvertError::EncoderExit { pass: Pass::Encode, code } => {
            format!("❌ Error: GIF conversion failed (exit code {})", code)
        }
        ConvertError::Launch { program, .. } if err.is_not_found() => {
            format!("❌ Error: {} not found in PATH", program)
        }
        ConvertError::Launch { .. } | ConvertError::MissingOutput(_) => format!("❌ Error: {}", err),
        ConvertError::Unexpected(message) => format!("❌ Unexpected error: {}", message),
        other => format!("❌ Unexpected error: {}", other),
    }
}
