//! Train command - add labeled images to the corpus and recalibrate

use super::{collect_inputs, progress_bar};
use crate::calibrate::{CorpusRecord, CorpusStore, Label};
use crate::config::SynthscanConfig;
use crate::detector::Detector;
use crate::features;
use crate::loader;
use anyhow::{Context, Result};
use console::style;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn run(
    label: &str,
    inputs: &[PathBuf],
    model: &Path,
    corpus: &Path,
    config: &SynthscanConfig,
) -> Result<()> {
    let label: Label = label.parse()?;
    let files = collect_inputs(inputs);
    if files.is_empty() {
        anyhow::bail!("No image files found");
    }

    let store = CorpusStore::with_path(corpus);
    let existing = store
        .load_corpus(config.calibration.max_samples)
        .with_context(|| format!("Failed to read corpus {}", corpus.display()))?;
    let detector = Detector::with_corpus(existing);

    let bar = progress_bar(files.len(), "Extracting features...");
    let extracted: Vec<(PathBuf, crate::error::Result<features::FeatureVector>)> = files
        .par_iter()
        .map(|path| {
            let features = loader::load_sample(path).map(|sample| features::extract(&sample));
            bar.inc(1);
            (path.clone(), features)
        })
        .collect();
    bar.finish_and_clear();

    let mut records = Vec::new();
    let mut skipped = 0;
    for (path, result) in extracted {
        match result {
            Ok(features) => records.push(CorpusRecord::new(
                label,
                features,
                Some(path.display().to_string()),
            )),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                eprintln!("{} {}: {}", style("✗").red(), path.display(), e);
                skipped += 1;
            }
        }
    }
    if records.is_empty() {
        anyhow::bail!("None of the {} files could be used for training", skipped);
    }

    // the corpus cap is checked before anything is persisted
    detector.add_batch(records.iter().map(|r| r.features).collect(), label)?;
    store
        .append(&records)
        .with_context(|| format!("Failed to write corpus {}", corpus.display()))?;
    detector
        .model()
        .write_to(model)
        .with_context(|| format!("Failed to write model {}", model.display()))?;

    let stats = detector.training_stats();
    println!(
        "{} Added {} {} samples ({} positive, {} negative)",
        style("✓").green(),
        records.len(),
        label,
        stats.positive_count,
        stats.negative_count
    );
    println!("  Model saved to {}", style(model.display()).cyan());

    let min = config.calibration.min_samples_per_label;
    if !detector.ready_for_training(min) {
        println!(
            "{} Fewer than {} samples per label, thresholds may be unreliable",
            style("!").yellow().bold(),
            min
        );
    }
    Ok(())
}
