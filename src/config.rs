//! synthscan.toml configuration
//!
//! ```toml
//! [calibration]
//! max_samples = 1000
//! min_samples_per_label = 5
//!
//! [paths]
//! model = "/path/to/model.json"
//! corpus = "/path/to/corpus.jsonl"
//!
//! [output]
//! format = "text"
//! ```
//!
//! Every key is optional. Paths default to the platform data directory.

use crate::calibrate::{DEFAULT_MAX_SAMPLES, DEFAULT_MIN_SAMPLES_PER_LABEL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILENAME: &str = "synthscan.toml";
pub const MODEL_FILENAME: &str = "model.json";
pub const CORPUS_FILENAME: &str = "corpus.jsonl";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthscanConfig {
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Cap on stored samples per label
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    /// Below this many samples per label, training warns that thresholds are unreliable
    #[serde(default = "default_min_samples")]
    pub min_samples_per_label: usize,
}

fn default_max_samples() -> usize {
    DEFAULT_MAX_SAMPLES
}

fn default_min_samples() -> usize {
    DEFAULT_MIN_SAMPLES_PER_LABEL
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            max_samples: default_max_samples(),
            min_samples_per_label: default_min_samples(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub model: Option<PathBuf>,
    pub corpus: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format (text, json)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// `<data dir>/synthscan`, or `./.synthscan` when the platform has none
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("synthscan"))
        .unwrap_or_else(|| PathBuf::from(".synthscan"))
}

impl SynthscanConfig {
    pub fn model_path(&self) -> PathBuf {
        self.paths
            .model
            .clone()
            .unwrap_or_else(|| data_dir().join(MODEL_FILENAME))
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.paths
            .corpus
            .clone()
            .unwrap_or_else(|| data_dir().join(CORPUS_FILENAME))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Load the configuration.
///
/// Uses `explicit` when given, otherwise `synthscan.toml` in the current
/// directory. A missing or unreadable file falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> SynthscanConfig {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if !path.exists() {
        if explicit.is_some() {
            warn!("Config file {} not found, using defaults", path.display());
        }
        return SynthscanConfig::default();
    }

    match SynthscanConfig::from_file(&path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{:#}, using defaults", e);
            SynthscanConfig::default()
        }
    }
}

/// Written by `synthscan init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# synthscan configuration

[calibration]
# Maximum stored samples per label (positive / negative)
max_samples = 1000

# Training warns until each label has at least this many samples
min_samples_per_label = 5

[paths]
# Where the calibrated model and the labeled corpus live.
# Defaults to the platform data directory (e.g. ~/.local/share/synthscan/)
# model = "model.json"
# corpus = "corpus.jsonl"

[output]
# Default output format (text, json)
format = "text"
"#;
