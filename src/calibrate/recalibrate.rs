use super::{Label, LabeledCorpus, MetricStats};
use crate::thresholds::{ThresholdConfig, ThresholdKey};
use tracing::{debug, info};

const POSITIVE_WEIGHT: f64 = 0.6;
const NEGATIVE_WEIGHT: f64 = 0.4;
const SPREAD_WEIGHT: f64 = 0.5;

/// Compute a new threshold set from the corpus.
///
/// Keys whose metric has no sample under one of the labels keep their value
/// from `current`, as do the keys that are not learned from the corpus
/// (see [`ThresholdKey::is_calibrated`]). Deterministic: the same corpus
/// always gives the same thresholds, whatever `current` held for the keys
/// that move.
pub fn recalibrate(corpus: &LabeledCorpus, current: &ThresholdConfig) -> ThresholdConfig {
    let mut next = *current;
    let mut moved = 0;

    for &key in ThresholdKey::all().iter().filter(|k| k.is_calibrated()) {
        let positive = MetricStats::from_values(&corpus.metric_values(Label::Positive, key));
        let negative = MetricStats::from_values(&corpus.metric_values(Label::Negative, key));
        let (Some(pos), Some(neg)) = (positive, negative) else {
            continue;
        };

        let value = blend(key, &pos, &neg);
        debug!(
            "{}: {:.4} -> {:.4} (pos μ={:.4} σ={:.4}, neg μ={:.4} σ={:.4})",
            key,
            current.get(key),
            value,
            pos.mean,
            pos.stddev,
            neg.mean,
            neg.stddev
        );
        next.set(key, value);
        moved += 1;
    }

    if moved > 0 {
        info!(
            "Recalibrated {} thresholds from {} positive / {} negative samples",
            moved,
            corpus.len(Label::Positive),
            corpus.len(Label::Negative)
        );
    }
    next
}

fn blend(key: ThresholdKey, pos: &MetricStats, neg: &MetricStats) -> f64 {
    if key.is_count() {
        ((pos.mean + neg.mean) / 2.0).round()
    } else {
        let spread = SPREAD_WEIGHT * (pos.stddev + neg.stddev);
        (POSITIVE_WEIGHT * pos.mean + NEGATIVE_WEIGHT * neg.mean + spread).clamp(0.0, 1.0)
    }
}
