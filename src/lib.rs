//! synthscan - heuristic detection of AI-generated images
//!
//! The pipeline works on raw RGBA pixels:
//!
//! 1. [`PixelSample`] validates the buffer.
//! 2. [`features::extract`] runs six independent analyzers.
//! 3. [`scoring::score`] compares the metrics with a [`ThresholdConfig`].
//! 4. [`calibrate`] moves the thresholds from labeled examples.
//!
//! [`Detector`] ties these together and owns the mutable state.
//!
//! ```no_run
//! use synthscan::{loader, Detector};
//! use std::path::Path;
//!
//! let detector = Detector::new();
//! let sample = loader::load_sample(Path::new("photo.png"))?;
//! let analysis = detector.analyze(&sample);
//! println!("{:.1} {:?}", analysis.result.score, analysis.result.indicators);
//! # Ok::<(), synthscan::DetectError>(())
//! ```

pub mod calibrate;
pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod features;
pub mod loader;
pub mod model;
pub mod reporters;
pub mod sample;
pub mod scoring;
pub mod thresholds;

pub use calibrate::{CalibrationReport, Label, LabeledCorpus};
pub use detector::{Analysis, Detector};
pub use error::{DetectError, Result};
pub use features::FeatureVector;
pub use model::{ModelDocument, TrainingStats};
pub use sample::PixelSample;
pub use scoring::{Likelihood, ScoreResult};
pub use thresholds::{ThresholdConfig, ThresholdKey};
