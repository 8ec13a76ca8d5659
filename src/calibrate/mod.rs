//! Threshold calibration from labeled examples
//!
//! Labeled feature vectors accumulate in a [`LabeledCorpus`]. Recalibration
//! is closed form: each threshold is moved between the positive and
//! negative means, widened by their spread.
//!
//! ```text
//! uniqueColors: round((μ₊ + μ₋) / 2)
//! fractions:    clamp(0.6·μ₊ + 0.4·μ₋ + 0.5·(σ₊ + σ₋), 0, 1)
//! ```
//!
//! A threshold only moves when both labels hold at least one sample.

mod corpus;
mod recalibrate;
mod report;
mod stats;
mod store;

pub use corpus::{LabeledCorpus, DEFAULT_MAX_SAMPLES};
pub use recalibrate::recalibrate;
pub use report::{CalibrationReport, LabelSummary, MetricComparison, SIGNIFICANT_DIFFERENCE};
pub use stats::MetricStats;
pub use store::{CorpusRecord, CorpusStore};

use crate::error::DetectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum samples per label before recalibration is considered meaningful
pub const DEFAULT_MIN_SAMPLES_PER_LABEL: usize = 5;

/// Ground truth for a training example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Synthetic (AI generated)
    Positive,
    /// Authentic
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            _ => Err(DetectError::InvalidLabel(s.to_string())),
        }
    }
}
