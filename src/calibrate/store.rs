//! Persistent labeled corpus
//!
//! Samples are appended as one JSON record per line, so training runs
//! accumulate across invocations.

use super::{Label, LabeledCorpus};
use crate::error::Result;
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One stored training example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub label: Label,
    pub features: FeatureVector,
    /// Where the sample came from, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub timestamp: String,
}

impl CorpusRecord {
    pub fn new(label: Label, features: FeatureVector, source: Option<String>) -> Self {
        Self {
            label,
            features,
            source,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// JSONL file of [`CorpusRecord`]s
pub struct CorpusStore {
    path: PathBuf,
}

impl CorpusStore {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records, creating the file and its directory as needed
    pub fn append(&self, records: &[CorpusRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            let json = serde_json::to_string(record).map_err(std::io::Error::from)?;
            writeln!(writer, "{}", json)?;
        }
        writer.flush()?;
        debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Read every record. A missing file is an empty corpus; malformed lines
    /// are skipped.
    pub fn load_all(&self) -> Result<Vec<CorpusRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CorpusRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping {} line {}: {}", self.path.display(), n + 1, e),
            }
        }
        Ok(records)
    }

    /// Load records into a fresh corpus. Records beyond a label's cap are
    /// dropped with a warning.
    pub fn load_corpus(&self, max_samples: usize) -> Result<LabeledCorpus> {
        let mut corpus = LabeledCorpus::new(max_samples);
        let mut dropped = 0;
        for record in self.load_all()? {
            if corpus.push(record.label, record.features).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!(
                "{} records in {} exceed the {} samples-per-label cap and were ignored",
                dropped,
                self.path.display(),
                max_samples
            );
        }
        Ok(corpus)
    }

    /// Delete the file; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(label: Label, sharp: f64) -> CorpusRecord {
        let mut f = FeatureVector::default();
        f.patterns.sharp_edges = sharp;
        CorpusRecord::new(label, f, Some("test.png".into()))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::with_path(dir.path().join("none.jsonl"));
        assert!(store.load_all().unwrap().is_empty());
        store.clear().unwrap();
    }

    #[test]
    fn test_append_accumulates() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::with_path(dir.path().join("nested").join("corpus.jsonl"));
        store.append(&[record(Label::Positive, 0.5)]).unwrap();
        store
            .append(&[record(Label::Negative, 0.1), record(Label::Negative, 0.2)])
            .unwrap();

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].label, Label::Positive);
        assert_eq!(records[2].features.patterns.sharp_edges, 0.2);

        let corpus = store.load_corpus(1000).unwrap();
        assert_eq!(corpus.len(Label::Positive), 1);
        assert_eq!(corpus.len(Label::Negative), 2);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.jsonl");
        let good = serde_json::to_string(&record(Label::Positive, 0.3)).unwrap();
        let content = format!("{good}\nnot json\n\n{{\"label\":\"maybe\"}}\n{good}\n");
        std::fs::write(&path, content).unwrap();

        let store = CorpusStore::with_path(&path);
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_load_corpus_respects_cap() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::with_path(dir.path().join("corpus.jsonl"));
        let records: Vec<_> = (0..4).map(|_| record(Label::Negative, 0.0)).collect();
        store.append(&records).unwrap();
        assert_eq!(store.load_corpus(2).unwrap().len(Label::Negative), 2);
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::with_path(dir.path().join("corpus.jsonl"));
        store.append(&[record(Label::Positive, 0.1)]).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }
}
