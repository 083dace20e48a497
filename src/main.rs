//! # GiffyDrop - Main Entry Point
//!
//! Questo è il punto di ingresso della CLI.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Caricamento della configurazione
//! - Validazione dell'input prima di avviare FFmpeg
//! - Avvio della conversione e visualizzazione del log (spinner o JSON)
//!
//! ## Exit code:
//! - `0`: GIF generata
//! - `1`: Conversione fallita (dettagli nel log)
//! - `2`: Richiesta rifiutata (file mancante, FFmpeg non installato, ...)
//!
//! ## Esempio di utilizzo:
//! ```bash
//! giffy-drop clip.mp4 --profile banner --fps cinema
//! giffy-drop clip.mp4 --width original --fps 12 --json
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use giffy_drop::{
    file_manager::FileManager,
    json_output::JsonMessage,
    platform::SystemInfo,
    progress::ProgressManager,
    session::forward_events,
    ArtifactPaths, Config, ConversionPipeline, ConversionRequest, ConversionSession, EncoderLocator,
    FrameRate, PipelineResult, Profile, WidthSelection,
};

#[derive(Parser)]
#[command(name = "giffy-drop")]
#[command(about = "Convert a video into a high-quality GIF that fits under a size budget")]
struct Args {
    /// Video file to convert
    #[arg(required_unless_present = "check")]
    input: Option<PathBuf>,

    /// Target profile (avatar: 320px wide, banner: 600px wide)
    #[arg(short, long, value_enum, default_value_t = Profile::Avatar)]
    profile: Profile,

    /// Frame rate: a number or fluid, cinema, balanced, compact, low-weight
    #[arg(short, long)]
    fps: Option<FrameRate>,

    /// Override the profile width (pixels, or "original" to keep the source width)
    #[arg(short, long)]
    width: Option<WidthSelection>,

    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output progress and status as JSON lines
    #[arg(long)]
    json: bool,

    /// Only check whether FFmpeg is available
    #[arg(long)]
    check: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for JSON output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::from_file(&path).await?,
        None => Config::default(),
    };
    config.json_output |= args.json;

    if let Some(ref path) = args.save_config {
        config.save_to_file(path).await?;
        info!("Configuration saved to {}", path.display());
    }

    let locator = EncoderLocator::new(config.encoder.clone());
    if args.check {
        return Ok(check_encoder(&locator));
    }

    let Some(input) = args.input.clone() else {
        return Ok(reject(&config, "No file selected", Some("Please select a video file first.".to_string())));
    };

    // Validate input
    if !input.exists() {
        return Ok(reject(&config, "File not found", Some(format!("{} does not exist", input.display()))));
    }
    if !input.is_file() {
        return Ok(reject(&config, "Not a file", Some(input.display().to_string())));
    }
    if !FileManager::is_video(&input) {
        warn!("{} does not look like a video file, trying anyway", input.display());
    }
    if let Err(e) = locator.check_with_instructions() {
        return Ok(reject(&config, "FFmpeg not found", Some(e.to_string())));
    }

    let width = args.width.unwrap_or_else(|| args.profile.into());
    let frame_rate = args.fps.unwrap_or_else(|| args.profile.default_frame_rate());
    let request = ConversionRequest::new(input, width, frame_rate);

    announce(&config, &request, args.profile)?;

    let session = ConversionSession::new(ConversionPipeline::new(config.clone()));
    let events = session.start(request)?;

    let result = if config.json_output {
        forward_events(events, |line| JsonMessage::log(line).emit()).await
    } else {
        let progress = ProgressManager::spinner("Starting conversion...");
        let result = forward_events(events, |line| progress.log_line(line)).await;
        progress.finish(if result.as_ref().is_some_and(|r| r.succeeded) {
            "Done"
        } else {
            "Failed"
        });
        result
    };

    let result = result.unwrap_or_else(|| {
        warn!("Conversion ended without a result");
        PipelineResult::failed(Default::default())
    });
    Ok(report(&config, &result))
}

/// Print the `--check` report and map it to an exit code
fn check_encoder(locator: &EncoderLocator) -> ExitCode {
    println!("System: {}", SystemInfo::current());
    match locator.check_with_instructions() {
        Ok(path) => {
            println!("✅ {} -> {}", locator.program(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("⚠ WARNING: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Reject the request before anything is spawned
fn reject(config: &Config, message: &str, details: Option<String>) -> ExitCode {
    if config.json_output {
        JsonMessage::error(message.to_string(), details).emit();
    } else {
        eprintln!("❌ {}", message);
        if let Some(details) = details {
            eprintln!("{}", details);
        }
    }
    ExitCode::from(2)
}

fn announce(config: &Config, request: &ConversionRequest, profile: Profile) -> Result<()> {
    let paths = ArtifactPaths::from_input(&request.input_path, config)?;
    if config.json_output {
        JsonMessage::start(
            request.input_path.clone(),
            paths.final_path,
            request.width.to_string(),
            request.frame_rate.get(),
        )
        .emit();
    } else {
        info!("{} ({})", profile, profile.description());
        info!("Resolution: {}, frame rate: {}", request.width, request.frame_rate);
        info!("Output: {}", paths.final_path.display());
    }
    Ok(())
}

fn report(config: &Config, result: &PipelineResult) -> ExitCode {
    if config.json_output {
        JsonMessage::complete(result, config.size_budget_bytes).emit();
    } else if result.succeeded {
        println!(
            "✓ GIF saved: {} ({})",
            result.final_path.display(),
            FileManager::format_size(result.final_size_bytes)
        );
        if !result.within_budget(config.size_budget_bytes) {
            println!(
                "⚠ Larger than {}: try a lower --fps or --width",
                FileManager::format_size(config.size_budget_bytes)
            );
        }
    } else {
        eprintln!("❌ Conversion failed. Check the log above for details.");
    }

    if result.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
