//! Reset command - default thresholds, empty corpus

use super::load_detector;
use crate::calibrate::CorpusStore;
use crate::config::SynthscanConfig;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn run(model: &Path, corpus: &Path, config: &SynthscanConfig) -> Result<()> {
    // a malformed model is replaced rather than reported
    let detector = load_detector(model, config).unwrap_or_default();
    detector.reset();
    detector
        .model()
        .write_to(model)
        .with_context(|| format!("Failed to write model {}", model.display()))?;
    CorpusStore::with_path(corpus)
        .clear()
        .with_context(|| format!("Failed to delete corpus {}", corpus.display()))?;

    println!("{} Reset to default thresholds", style("✓").green());
    println!("  Model: {}", style(model.display()).cyan());
    println!("  Corpus cleared: {}", style(corpus.display()).cyan());
    Ok(())
}
