//! Persisted model: the calibrated thresholds plus training counts

use crate::error::{DetectError, Result};
use crate::thresholds::ThresholdConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

fn default_version() -> u32 {
    ModelDocument::VERSION
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrainingStats {
    pub positive_count: usize,
    pub negative_count: usize,
    /// When the thresholds last changed. Always set in a saved model: an
    /// untrained detector is stamped with the save time.
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl TrainingStats {
    pub fn total(&self) -> usize {
        self.positive_count + self.negative_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub training_stats: TrainingStats,
}

impl Default for ModelDocument {
    fn default() -> Self {
        Self::new(ThresholdConfig::default(), TrainingStats::default())
    }
}

impl ModelDocument {
    pub const VERSION: u32 = 1;

    /// Build a document, stamping `lastUpdate` with the current time if the
    /// stats carry none
    pub fn new(thresholds: ThresholdConfig, mut training_stats: TrainingStats) -> Self {
        training_stats.last_update.get_or_insert_with(Utc::now);
        Self {
            version: Self::VERSION,
            thresholds,
            training_stats,
        }
    }

    /// Parse and validate. Any problem is reported as `MalformedModel`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self =
            serde_json::from_str(json).map_err(|e| DetectError::MalformedModel(e.to_string()))?;
        if doc.version != Self::VERSION {
            return Err(DetectError::MalformedModel(format!(
                "unsupported model version {} (expected {})",
                doc.version,
                Self::VERSION
            )));
        }
        doc.thresholds.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DetectError::MalformedModel(e.to_string()))
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let doc = Self::from_json(&content)?;
        debug!("Loaded model from {}", path.display());
        Ok(doc)
    }

    /// Write the document, creating parent directories as needed
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        debug!("Saved model to {}", path.display());
        Ok(())
    }
}
