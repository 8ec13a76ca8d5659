//! Analyze command - score images against the current model

use super::{collect_inputs, load_detector, progress_bar};
use crate::config::SynthscanConfig;
use crate::loader;
use crate::reporters::{self, AnalysisReport, FileAnalysis, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub fn run(
    inputs: &[PathBuf],
    format: &str,
    output: Option<&Path>,
    model: &Path,
    fail_above: Option<f64>,
    config: &SynthscanConfig,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let detector = load_detector(model, config)?;
    let files = collect_inputs(inputs);
    if files.is_empty() {
        anyhow::bail!("No image files found");
    }

    let bar = progress_bar(files.len(), "Analyzing images...");
    let results: Vec<FileAnalysis> = files
        .par_iter()
        .map(|path| {
            let outcome = match loader::load_sample(path) {
                Ok(sample) => FileAnalysis::analyzed(path.clone(), detector.analyze(&sample)),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    FileAnalysis::failed(path.clone(), e)
                }
            };
            bar.inc(1);
            outcome
        })
        .collect();
    bar.finish_and_clear();

    let report = AnalysisReport::new(results);
    info!(
        "Analyzed {} files ({} failed)",
        report.files.len(),
        report.failed_count()
    );

    let rendered = reporters::render_analysis(&report, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", rendered),
    }

    check_fail_threshold(fail_above, &report);
    Ok(())
}

fn check_fail_threshold(fail_above: Option<f64>, report: &AnalysisReport) {
    if let (Some(threshold), Some(max)) = (fail_above, report.max_score()) {
        if max > threshold {
            eprintln!(
                "Failing: highest score {:.1} is above --fail-above={}",
                max, threshold
            );
            std::process::exit(1);
        }
    }
}
