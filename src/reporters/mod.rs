//! Output reporters for analysis and calibration results
//!
//! - `text` - terminal output with colors
//! - `json` - machine-readable JSON

mod json;
mod text;

use crate::calibrate::CalibrationReport;
use crate::detector::Analysis;
use crate::scoring::Likelihood;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Outcome for one input file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<Likelihood>,
    #[serde(flatten)]
    pub analysis: Option<Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileAnalysis {
    pub fn analyzed(path: PathBuf, analysis: Analysis) -> Self {
        Self {
            path,
            likelihood: Some(analysis.result.likelihood()),
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failed(path: PathBuf, error: impl ToString) -> Self {
        Self {
            path,
            likelihood: None,
            analysis: None,
            error: Some(error.to_string()),
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.analysis.as_ref().map(|a| a.result.score)
    }
}

/// All files from one `analyze` run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub version: String,
    pub generated_at: String,
    pub files: Vec<FileAnalysis>,
}

impl AnalysisReport {
    pub fn new(files: Vec<FileAnalysis>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            files,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }

    pub fn max_score(&self) -> Option<f64> {
        self.files
            .iter()
            .filter_map(FileAnalysis::score)
            .reduce(f64::max)
    }
}

pub fn render_analysis(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_analysis(report),
        OutputFormat::Json => json::render(report),
    }
}

pub fn render_calibration(report: &CalibrationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_calibration(report),
        OutputFormat::Json => json::render(report),
    }
}
