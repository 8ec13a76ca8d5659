//! Calibration statistics
//!
//! Summarizes what the corpus says about each label: how many samples,
//! the mean of every metric, how the current thresholds score each label,
//! and which metrics actually separate the two.

use super::{Label, LabeledCorpus, MetricStats};
use crate::features::FeatureVector;
use crate::scoring;
use crate::thresholds::{ThresholdConfig, ThresholdKey};
use serde::Serialize;
use std::fmt;

/// Label means further apart than this are reported as significant
pub const SIGNIFICANT_DIFFERENCE: f64 = 0.1;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
    pub count: usize,
    /// Scores of this label's samples under the current thresholds
    pub score_distribution: Option<MetricStats>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    /// `category.metric` path of the feature metric
    pub key: String,
    pub positive_mean: Option<f64>,
    pub negative_mean: Option<f64>,
    /// Current threshold for the metric; `None` for averageSaturation
    pub threshold: Option<f64>,
}

impl MetricComparison {
    /// Absolute gap between the label means, when both exist
    pub fn difference(&self) -> Option<f64> {
        Some((self.positive_mean? - self.negative_mean?).abs())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationReport {
    pub positive: LabelSummary,
    pub negative: LabelSummary,
    pub metrics: Vec<MetricComparison>,
    /// Keys whose label means differ by more than [`SIGNIFICANT_DIFFERENCE`]
    pub significant: Vec<String>,
    pub thresholds: ThresholdConfig,
}

impl CalibrationReport {
    pub fn build(corpus: &LabeledCorpus, thresholds: &ThresholdConfig) -> Self {
        let summarize = |label: Label| {
            let scores: Vec<f64> = corpus
                .samples(label)
                .iter()
                .map(|f| scoring::score(f, thresholds).score)
                .collect();
            LabelSummary {
                count: corpus.len(label),
                score_distribution: MetricStats::from_values(&scores),
            }
        };

        let mean_of = |label: Label, index: usize| {
            let values: Vec<f64> = corpus
                .samples(label)
                .iter()
                .map(|f| f.metrics()[index].1)
                .collect();
            MetricStats::from_values(&values).map(|s| s.mean)
        };

        let metrics: Vec<MetricComparison> = FeatureVector::default()
            .metrics()
            .iter()
            .enumerate()
            .map(|(index, &(path, _))| MetricComparison {
                key: path.to_string(),
                positive_mean: mean_of(Label::Positive, index),
                negative_mean: mean_of(Label::Negative, index),
                threshold: ThresholdKey::all()
                    .iter()
                    .find(|k| k.metric_path() == path)
                    .map(|&k| thresholds.get(k)),
            })
            .collect();

        let significant = metrics
            .iter()
            .filter(|m| m.difference().is_some_and(|d| d > SIGNIFICANT_DIFFERENCE))
            .map(|m| m.key.clone())
            .collect();

        Self {
            positive: summarize(Label::Positive),
            negative: summarize(Label::Negative),
            metrics,
            significant,
            thresholds: *thresholds,
        }
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for CalibrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calibration Statistics:")?;
        writeln!(f, "  Positive samples: {}", self.positive.count)?;
        writeln!(f, "  Negative samples: {}", self.negative.count)?;

        for (name, summary) in [("positive", &self.positive), ("negative", &self.negative)] {
            if let Some(d) = &summary.score_distribution {
                writeln!(
                    f,
                    "  Scores ({}): min {:.1}, max {:.1}, mean {:.1}, stddev {:.1}",
                    name, d.min, d.max, d.mean, d.stddev
                )?;
            }
        }

        writeln!(
            f,
            "\n  {:<36} {:>10} {:>10} {:>10}",
            "metric", "positive", "negative", "threshold"
        )?;
        for m in &self.metrics {
            writeln!(
                f,
                "  {:<36} {:>10} {:>10} {:>10}",
                m.key,
                fmt_opt(m.positive_mean),
                fmt_opt(m.negative_mean),
                fmt_opt(m.threshold)
            )?;
        }

        if !self.significant.is_empty() {
            writeln!(f, "\n  Significant differences:")?;
            for key in &self.significant {
                writeln!(f, "    {}", key)?;
            }
        }
        Ok(())
    }
}
