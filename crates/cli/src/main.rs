//! Main entry point for the callscore CLI
//!
//! Scores QoS samples from the command line or from JSON reports produced
//! by a call monitor.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use callscore_quality_core::{EModelScorer, QualityConfig};

mod commands;

/// Perceptual quality (MOS) scoring for call audio and video streams
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file overriding the compiled-in scoring configuration
    #[arg(short, long, global = true, env = "CALLSCORE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score an audio sample with the E-model
    Audio {
        /// Average packet loss as a fraction (0.0-1.0)
        #[arg(long)]
        loss: f64,
        /// Round-trip latency in milliseconds
        #[arg(long)]
        latency: f64,
        /// Print the impairment breakdown
        #[arg(short, long)]
        verbose: bool,
    },
    /// Score a video sample from its achieved bitrate
    Video {
        /// Achieved bitrate in bits per second
        #[arg(long)]
        bitrate: f64,
    },
    /// Score JSON QoS reports (a single object or an array); `-` reads stdin
    Report {
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Print the target bitrate for a resolution
    TargetBitrate {
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<QualityConfig> {
    match path {
        Some(path) => QualityConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(QualityConfig::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let scorer = EModelScorer::new(config)?;

    match cli.command {
        Command::Audio {
            loss,
            latency,
            verbose,
        } => commands::audio::execute(&scorer, loss, latency, verbose),
        Command::Video { bitrate } => commands::video::execute(&scorer, bitrate),
        Command::Report { input } => commands::report::execute(&scorer, &input),
        Command::TargetBitrate { width, height } => {
            commands::target::execute(scorer.config(), width, height)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
