//! The detector: current thresholds plus the labeled corpus behind them
//!
//! Scoring reads a snapshot of the thresholds (an `Arc` clone under a read
//! lock). Every corpus mutation, the recalibration that follows it and the
//! threshold swap happen while the corpus mutex is held, so two trainers
//! never interleave and a reader never sees half an update.

use crate::calibrate::{self, CalibrationReport, Label, LabeledCorpus};
use crate::error::Result;
use crate::features::{self, FeatureVector};
use crate::model::{ModelDocument, TrainingStats};
use crate::sample::PixelSample;
use crate::scoring::{self, ScoreResult};
use crate::thresholds::ThresholdConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};

/// Features and score for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub features: FeatureVector,
    pub result: ScoreResult,
}

struct Training {
    corpus: LabeledCorpus,
    stats: TrainingStats,
}

pub struct Detector {
    thresholds: RwLock<Arc<ThresholdConfig>>,
    training: Mutex<Training>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    pub fn new() -> Self {
        Self::with_corpus(LabeledCorpus::default())
    }

    /// Start from default thresholds and an existing corpus, recalibrating
    /// if the corpus already holds both labels.
    pub fn with_corpus(corpus: LabeledCorpus) -> Self {
        let defaults = ThresholdConfig::default();
        let thresholds = calibrate::recalibrate(&corpus, &defaults);
        let stats = TrainingStats {
            positive_count: corpus.len(Label::Positive),
            negative_count: corpus.len(Label::Negative),
            last_update: (thresholds != defaults).then(chrono::Utc::now),
        };
        Self {
            thresholds: RwLock::new(Arc::new(thresholds)),
            training: Mutex::new(Training { corpus, stats }),
        }
    }

    /// Start from a persisted model with an empty corpus
    pub fn from_model(doc: ModelDocument, max_samples: usize) -> Self {
        Self {
            thresholds: RwLock::new(Arc::new(doc.thresholds)),
            training: Mutex::new(Training {
                corpus: LabeledCorpus::new(max_samples),
                stats: doc.training_stats,
            }),
        }
    }

    /// Consistent snapshot of the current thresholds
    pub fn thresholds(&self) -> Arc<ThresholdConfig> {
        self.thresholds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn swap_thresholds(&self, next: ThresholdConfig) {
        *self
            .thresholds
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
    }

    fn training(&self) -> MutexGuard<'_, Training> {
        self.training.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Score an already-extracted feature vector
    pub fn score(&self, features: &FeatureVector) -> ScoreResult {
        scoring::score(features, &self.thresholds())
    }

    /// Extract features from a sample and score them
    pub fn analyze(&self, sample: &PixelSample) -> Analysis {
        let features = features::extract(sample);
        let result = self.score(&features);
        debug!("Scored {}x{} sample: {:.1}", sample.width(), sample.height(), result.score);
        Analysis { features, result }
    }

    /// Append one labeled feature vector and recalibrate.
    ///
    /// On `CorpusFull` neither the corpus nor the thresholds change.
    pub fn add_sample(&self, features: FeatureVector, label: Label) -> Result<()> {
        self.add_batch(vec![features], label)
    }

    /// Analyze every sample, then append them all under one label and
    /// recalibrate once. Fails without side effects if the batch does not
    /// fit under the label's cap.
    pub fn train(&self, samples: &[PixelSample], label: Label) -> Result<usize> {
        let batch: Vec<FeatureVector> = samples.par_iter().map(features::extract).collect();
        let count = batch.len();
        self.add_batch(batch, label)?;
        Ok(count)
    }

    /// Append pre-extracted feature vectors under one label and recalibrate once
    pub fn add_batch(&self, batch: Vec<FeatureVector>, label: Label) -> Result<()> {
        let mut training = self.training();
        let added = batch.len();
        training.corpus.extend(label, batch)?;

        let next = calibrate::recalibrate(&training.corpus, &self.thresholds());
        self.swap_thresholds(next);

        training.stats.positive_count = training.corpus.len(Label::Positive);
        training.stats.negative_count = training.corpus.len(Label::Negative);
        training.stats.last_update = Some(chrono::Utc::now());
        info!(
            "Added {} {} samples ({} positive, {} negative)",
            added, label, training.stats.positive_count, training.stats.negative_count
        );
        Ok(())
    }

    /// Recompute thresholds from the current corpus
    pub fn recalibrate(&self) -> Arc<ThresholdConfig> {
        let training = self.training();
        let next = calibrate::recalibrate(&training.corpus, &self.thresholds());
        self.swap_thresholds(next);
        self.thresholds()
    }

    /// Whether each label holds at least `min` samples
    pub fn ready_for_training(&self, min: usize) -> bool {
        self.training().corpus.ready_for_training(min)
    }

    pub fn training_stats(&self) -> TrainingStats {
        self.training().stats
    }

    pub fn report(&self) -> CalibrationReport {
        let training = self.training();
        CalibrationReport::build(&training.corpus, &self.thresholds())
    }

    /// Snapshot as a model document
    pub fn model(&self) -> ModelDocument {
        let training = self.training();
        ModelDocument::new(*self.thresholds(), training.stats)
    }

    /// Serialize the current thresholds and training counts
    pub fn save(&self) -> Result<String> {
        self.model().to_json()
    }

    /// Replace the thresholds with those of a serialized model.
    ///
    /// Either the whole document validates and is applied, or nothing
    /// changes. The corpus is left as is.
    pub fn load(&self, json: &str) -> Result<TrainingStats> {
        let doc = ModelDocument::from_json(json)?;
        let mut training = self.training();
        self.swap_thresholds(doc.thresholds);
        training.stats = doc.training_stats;
        info!(
            "Loaded model trained on {} positive / {} negative samples",
            doc.training_stats.positive_count, doc.training_stats.negative_count
        );
        Ok(doc.training_stats)
    }

    /// Default thresholds, empty corpus
    pub fn reset(&self) {
        let mut training = self.training();
        training.corpus.clear();
        training.stats = TrainingStats::default();
        self.swap_thresholds(ThresholdConfig::default());
        info!("Detector reset to default thresholds");
    }
}
