//! Library-level detection and calibration scenarios

use synthscan::calibrate::DEFAULT_MAX_SAMPLES;
use synthscan::{
    features, DetectError, Detector, FeatureVector, Label, PixelSample, ThresholdConfig,
    ThresholdKey,
};

fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PixelSample {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = f(x, y);
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    PixelSample::new(width, height, pixels).unwrap()
}

fn gray(size: u32) -> PixelSample {
    from_fn(size, size, |_, _| [128, 128, 128])
}

fn checkerboard(size: u32) -> PixelSample {
    from_fn(size, size, |x, y| if (x + y) % 2 == 0 { [0, 0, 0] } else { [255, 255, 255] })
}

fn noise(size: u32, seed: u32) -> PixelSample {
    let mut state = seed.max(1);
    let mut buf = Vec::new();
    for _ in 0..size * size {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        buf.extend_from_slice(&[state as u8, (state >> 8) as u8, (state >> 16) as u8, 255]);
    }
    PixelSample::new(size, size, buf).unwrap()
}

#[test]
fn uniform_gray_scores_low() {
    let detector = Detector::new();
    let analysis = detector.analyze(&gray(64));

    let f = &analysis.features;
    assert_eq!(f.textures.uniformity, 1.0);
    assert_eq!(f.textures.complexity, 0.0);
    assert_eq!(f.colors.unique_colors, 1);
    assert_eq!(f.symmetry.horizontal_symmetry, 1.0);
    assert_eq!(f.symmetry.vertical_symmetry, 1.0);
    assert!(analysis.result.score < 20.0);
}

#[test]
fn checkerboard_scores_above_uniform() {
    let detector = Detector::new();
    let uniform = detector.analyze(&gray(64)).result.score;
    let analysis = detector.analyze(&checkerboard(64));

    assert!(analysis.features.patterns.sharp_edges > 0.06);
    assert!(analysis
        .result
        .indicators
        .contains(&"Repetitive tile patterns detected".to_string()));
    assert!(analysis.result.score > uniform);
}

#[test]
fn validation_errors() {
    assert!(matches!(
        PixelSample::new(30, 64, vec![0; 30 * 64 * 4]),
        Err(DetectError::InvalidDimensions { width: 30, .. })
    ));
    assert!(matches!(
        PixelSample::new(64, 64, vec![0; 64 * 64 * 4 - 1]),
        Err(DetectError::CorruptBuffer { .. })
    ));
    assert!(matches!(
        PixelSample::validate(64, 64, None),
        Err(DetectError::InvalidSample(_))
    ));
    assert!(matches!("unsure".parse::<Label>(), Err(DetectError::InvalidLabel(_))));
}

#[test]
fn scores_stay_in_range() {
    let detector = Detector::new();
    for seed in 1..6 {
        let analysis = detector.analyze(&noise(60 + seed * 7, seed));
        assert!((0.0..=100.0).contains(&analysis.result.score));
        let f = &analysis.features;
        assert!((f.colors.unique_colors as usize) <= 4096 * 4096);
        assert!((0.0..=1.0).contains(&f.noise.natural_noise));
    }
}

#[test]
fn training_moves_thresholds_and_round_trips() {
    let detector = Detector::new();
    detector
        .train(&[checkerboard(64), checkerboard(96)], Label::Positive)
        .unwrap();
    detector.train(&[noise(64, 3), noise(80, 9)], Label::Negative).unwrap();
    assert_ne!(*detector.thresholds(), ThresholdConfig::default());

    let saved = detector.save().unwrap();
    let restored = Detector::new();
    let stats = restored.load(&saved).unwrap();
    assert_eq!(stats.positive_count, 2);
    assert_eq!(stats.negative_count, 2);
    assert_eq!(*restored.thresholds(), *detector.thresholds());

    let sample = checkerboard(64);
    assert_eq!(
        restored.analyze(&sample).result,
        detector.analyze(&sample).result
    );
}

#[test]
fn recalibration_is_idempotent() {
    let detector = Detector::new();
    detector.add_sample(features::extract(&checkerboard(64)), Label::Positive).unwrap();
    detector.add_sample(features::extract(&gray(64)), Label::Negative).unwrap();
    let first = detector.recalibrate();
    assert_eq!(detector.recalibrate(), first);
}

#[test]
fn unique_colors_threshold_is_rounded_mean() {
    let detector = Detector::new();
    let mut pos = FeatureVector::default();
    pos.colors.unique_colors = 101;
    let mut neg = FeatureVector::default();
    neg.colors.unique_colors = 10;
    detector.add_sample(pos, Label::Positive).unwrap();
    detector.add_sample(neg, Label::Negative).unwrap();
    // (101 + 10) / 2 = 55.5
    assert_eq!(detector.thresholds().get(ThresholdKey::UniqueColors), 56.0);
}

#[test]
fn corpus_rejects_sample_past_the_cap() {
    let detector = Detector::new();
    for _ in 0..DEFAULT_MAX_SAMPLES {
        detector.add_sample(FeatureVector::default(), Label::Negative).unwrap();
    }
    let err = detector
        .add_sample(FeatureVector::default(), Label::Negative)
        .unwrap_err();
    assert!(matches!(err, DetectError::CorpusFull { max: 1000, .. }));
    assert_eq!(detector.training_stats().negative_count, DEFAULT_MAX_SAMPLES);
    assert_eq!(detector.report().negative.count, DEFAULT_MAX_SAMPLES);
}

#[test]
fn malformed_model_is_rejected() {
    let detector = Detector::new();
    for bad in [
        "",
        "[]",
        r#"{"thresholds": {}}"#,
        r#"{"version": 1, "thresholds": {"patterns": {"sharpEdges": 0.1}}}"#,
    ] {
        assert!(matches!(detector.load(bad), Err(DetectError::MalformedModel(_))));
    }
    assert_eq!(*detector.thresholds(), ThresholdConfig::default());
}
