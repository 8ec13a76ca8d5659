//! Stats command - calibration statistics for the stored corpus

use super::load_detector;
use crate::calibrate::{CalibrationReport, CorpusStore};
use crate::config::SynthscanConfig;
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;

pub fn run(corpus: &Path, model: &Path, format: &str, config: &SynthscanConfig) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let corpus = CorpusStore::with_path(corpus)
        .load_corpus(config.calibration.max_samples)
        .with_context(|| format!("Failed to read corpus {}", corpus.display()))?;
    let thresholds = load_detector(model, config)?.thresholds();

    let report = CalibrationReport::build(&corpus, &thresholds);
    println!("{}", reporters::render_calibration(&report, format)?);
    Ok(())
}
