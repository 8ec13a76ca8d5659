//! Labeled feature vectors, capped per label

use super::Label;
use crate::error::{DetectError, Result};
use crate::features::FeatureVector;
use crate::thresholds::ThresholdKey;

pub const DEFAULT_MAX_SAMPLES: usize = 1000;

#[derive(Debug, Clone)]
pub struct LabeledCorpus {
    positive: Vec<FeatureVector>,
    negative: Vec<FeatureVector>,
    max_samples: usize,
}

impl Default for LabeledCorpus {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES)
    }
}

impl LabeledCorpus {
    pub fn new(max_samples: usize) -> Self {
        Self {
            positive: Vec::new(),
            negative: Vec::new(),
            max_samples,
        }
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    pub fn samples(&self, label: Label) -> &[FeatureVector] {
        match label {
            Label::Positive => &self.positive,
            Label::Negative => &self.negative,
        }
    }

    pub fn len(&self, label: Label) -> usize {
        self.samples(label).len()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Room left under the cap for `label`
    pub fn remaining(&self, label: Label) -> usize {
        self.max_samples.saturating_sub(self.len(label))
    }

    /// Append one sample, or fail with `CorpusFull` leaving the corpus unchanged.
    pub fn push(&mut self, label: Label, features: FeatureVector) -> Result<()> {
        self.extend(label, std::iter::once(features))
    }

    /// Append a batch. Either every sample fits and all are appended, or
    /// nothing is.
    pub fn extend<I>(&mut self, label: Label, batch: I) -> Result<()>
    where
        I: IntoIterator<Item = FeatureVector>,
    {
        let batch: Vec<FeatureVector> = batch.into_iter().collect();
        if batch.len() > self.remaining(label) {
            return Err(DetectError::CorpusFull {
                label: label.to_string(),
                max: self.max_samples,
            });
        }
        self.samples_mut(label).extend(batch);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.positive.clear();
        self.negative.clear();
    }

    /// Whether each label holds at least `min` samples
    pub fn ready_for_training(&self, min: usize) -> bool {
        self.positive.len() >= min && self.negative.len() >= min
    }

    /// Values of the metric behind `key` across one label
    pub fn metric_values(&self, label: Label, key: ThresholdKey) -> Vec<f64> {
        self.samples(label)
            .iter()
            .map(|f| key.feature_value(f))
            .collect()
    }

    fn samples_mut(&mut self, label: Label) -> &mut Vec<FeatureVector> {
        match label {
            Label::Positive => &mut self.positive,
            Label::Negative => &mut self.negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut corpus = LabeledCorpus::default();
        for _ in 0..DEFAULT_MAX_SAMPLES {
            corpus.push(Label::Positive, FeatureVector::default()).unwrap();
        }
        let err = corpus
            .push(Label::Positive, FeatureVector::default())
            .unwrap_err();
        assert!(matches!(err, DetectError::CorpusFull { max: 1000, .. }));
        assert_eq!(corpus.len(Label::Positive), 1000);
        // the other label is independent
        corpus.push(Label::Negative, FeatureVector::default()).unwrap();
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut corpus = LabeledCorpus::new(3);
        corpus.push(Label::Negative, FeatureVector::default()).unwrap();
        let batch = vec![FeatureVector::default(); 3];
        assert!(corpus.extend(Label::Negative, batch.clone()).is_err());
        assert_eq!(corpus.len(Label::Negative), 1);
        corpus.extend(Label::Negative, batch.into_iter().take(2)).unwrap();
        assert_eq!(corpus.len(Label::Negative), 3);
        assert_eq!(corpus.remaining(Label::Negative), 0);
    }

    #[test]
    fn test_ready_for_training() {
        let mut corpus = LabeledCorpus::default();
        assert!(!corpus.ready_for_training(1));
        corpus.extend(Label::Positive, vec![FeatureVector::default(); 5]).unwrap();
        assert!(!corpus.ready_for_training(5));
        corpus.extend(Label::Negative, vec![FeatureVector::default(); 5]).unwrap();
        assert!(corpus.ready_for_training(5));
        corpus.clear();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_metric_values() {
        let mut f = FeatureVector::default();
        f.colors.unique_colors = 42;
        let mut corpus = LabeledCorpus::default();
        corpus.push(Label::Positive, f).unwrap();
        assert_eq!(
            corpus.metric_values(Label::Positive, ThresholdKey::UniqueColors),
            vec![42.0]
        );
        assert!(corpus
            .metric_values(Label::Negative, ThresholdKey::UniqueColors)
            .is_empty());
    }
}
