//! CLI command definitions and handlers

mod analyze;
mod init;
mod reset;
mod stats;
mod train;

use crate::config::{load_config, SynthscanConfig};
use crate::detector::Detector;
use crate::loader;
use crate::model::ModelDocument;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Parse a score bound (0-100)
fn parse_score(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if (0.0..=100.0).contains(&v) {
        Ok(v)
    } else {
        Err("score must be between 0 and 100".to_string())
    }
}

/// synthscan - heuristic detector for AI-generated images
#[derive(Parser, Debug)]
#[command(name = "synthscan")]
#[command(
    version,
    about = "Estimate how likely an image is AI generated, from its pixels alone",
    long_about = "synthscan measures edge sharpness, tile repetition, texture, color \
banding, symmetry, noise and compression artifacts, then scores them against \
thresholds that can be recalibrated from your own labeled images.\n\n\
The score is a heuristic signal, not proof.",
    after_help = "\
Examples:
  synthscan analyze photo.jpg                     Score one image
  synthscan analyze images/ --format json         JSON output for scripting
  synthscan analyze a.png b.png --fail-above 70   Exit 1 if any score exceeds 70
  synthscan train --label positive generated/     Add AI-generated examples
  synthscan train --label negative camera/        Add authentic examples
  synthscan stats                                 Show calibration statistics"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    /// Path to a synthscan.toml (default: ./synthscan.toml)
    #[arg(long, global = true, env = "SYNTHSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a synthscan.toml with the default settings
    Init,

    /// Score images
    Analyze {
        /// Image files or directories
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: text, json (default from config, else text)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Model file (default from config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Exit with code 1 if any image scores above this value
        #[arg(long, value_parser = parse_score)]
        fail_above: Option<f64>,
    },

    /// Add labeled images to the corpus and recalibrate the model
    Train {
        /// positive (AI generated) or negative (authentic)
        #[arg(long, short = 'l')]
        label: String,

        /// Image files or directories
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Model file (default from config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Corpus file (default from config)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Show calibration statistics for the stored corpus
    Stats {
        /// Corpus file (default from config)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Model file (default from config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Output format: text, json (default from config, else text)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Restore default thresholds and delete the stored corpus
    Reset {
        /// Model file (default from config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Corpus file (default from config)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Init => init::run(Path::new(".")),

        Commands::Analyze {
            files,
            format,
            output,
            model,
            fail_above,
        } => {
            let format = format.unwrap_or_else(|| config.output.format.clone());
            let model = model.unwrap_or_else(|| config.model_path());
            analyze::run(&files, &format, output.as_deref(), &model, fail_above, &config)
        }

        Commands::Train {
            label,
            files,
            model,
            corpus,
        } => {
            let model = model.unwrap_or_else(|| config.model_path());
            let corpus = corpus.unwrap_or_else(|| config.corpus_path());
            train::run(&label, &files, &model, &corpus, &config)
        }

        Commands::Stats {
            corpus,
            model,
            format,
        } => {
            let format = format.unwrap_or_else(|| config.output.format.clone());
            let model = model.unwrap_or_else(|| config.model_path());
            let corpus = corpus.unwrap_or_else(|| config.corpus_path());
            stats::run(&corpus, &model, &format, &config)
        }

        Commands::Reset { model, corpus } => {
            let model = model.unwrap_or_else(|| config.model_path());
            let corpus = corpus.unwrap_or_else(|| config.corpus_path());
            reset::run(&model, &corpus, &config)
        }
    }
}

/// Load the model at `path`, or start from defaults when it does not exist yet
fn load_detector(path: &Path, config: &SynthscanConfig) -> Result<Detector> {
    if !path.exists() {
        debug!("No model at {}, using default thresholds", path.display());
        return Ok(Detector::new());
    }
    let doc = ModelDocument::read_from(path)
        .with_context(|| format!("Failed to load model {}", path.display()))?;
    Ok(Detector::from_model(doc, config.calibration.max_samples))
}

/// Expand directories (recursively) into the supported image files they
/// contain. Explicit file arguments are kept whatever their extension.
/// Symlinks inside a directory are not followed.
fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && loader::is_supported(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {}: {}", path.display(), e),
            }
        }
    }
    files
}

/// Progress bar for per-image work, hidden when there is a single file
fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    if len < 2 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  "),
    );
    bar.set_message(message);
    bar
}
