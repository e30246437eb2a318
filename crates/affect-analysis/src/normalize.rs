//! Observation scoring and the normalization entry point.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use affect_models::{AnalysisMetadata, AnalysisResult, EmotionCategory, EmotionScore, VendorKind};

use crate::extract;
use crate::labels;
use crate::observation::Observation;
use crate::summary;

/// Confidence assigned when no posterior was attached to any observation of
/// a category.
const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Convert a completed-job payload into the shared result schema.
///
/// Pure over the payload: emotions, duration, and summary depend only on
/// `raw`. The metadata `timestamp` defaults to now and is overwritten by the
/// orchestrator at completion; `processing_time_seconds` is left unset here.
pub fn normalize(
    vendor: VendorKind,
    raw: Value,
    source_file: impl Into<String>,
) -> AnalysisResult {
    let observations = extract::observations(vendor, &raw);
    let emotions = score_observations(vendor, &observations);

    let mut metadata = AnalysisMetadata::new(source_file, vendor.display_name());
    metadata.duration_seconds = extract::duration_seconds(vendor, &raw);

    let summary = summary::generate(vendor, &raw);

    AnalysisResult {
        emotions,
        metadata,
        summary: Some(summary),
        raw_response: raw,
    }
}

/// Score a flat observation sequence into ranked per-category emotions.
///
/// Observations are grouped by mapped category in first-encounter order.
/// Weighted scoring applies only when every observation carries a weight;
/// otherwise each observation counts as 1 (a vendor never mixes the two).
/// Group totals are normalized by the grand total so scores sum to 1.0, then
/// sorted descending; the sort is stable, so ties keep encounter order.
pub fn score_observations(vendor: VendorKind, observations: &[Observation]) -> Vec<EmotionScore> {
    if observations.is_empty() {
        debug!(vendor = %vendor, "no emotion observations in payload, using neutral fallback");
        return vec![EmotionScore::neutral_fallback()];
    }

    let weighted = observations.iter().all(|o| o.weight.is_some());

    #[derive(Default)]
    struct Group {
        weight_sum: f64,
        posterior_sum: f64,
        posterior_count: usize,
    }

    let mut order: Vec<EmotionCategory> = Vec::new();
    let mut groups: HashMap<EmotionCategory, Group> = HashMap::new();

    for observation in observations {
        let category = labels::map_label(vendor, &observation.label);
        let group = groups.entry(category).or_insert_with(|| {
            order.push(category);
            Group::default()
        });

        group.weight_sum += if weighted {
            observation.weight.unwrap_or(0.0)
        } else {
            1.0
        };
        if let Some(posterior) = observation.posterior {
            group.posterior_sum += posterior;
            group.posterior_count += 1;
        }
    }

    let total: f64 = groups.values().map(|g| g.weight_sum).sum();

    let mut emotions: Vec<EmotionScore> = order
        .into_iter()
        .map(|category| {
            let group = &groups[&category];
            let score = if total > 0.0 {
                group.weight_sum / total
            } else {
                0.0
            };
            let confidence = if group.posterior_count > 0 {
                group.posterior_sum / group.posterior_count as f64
            } else {
                DEFAULT_CONFIDENCE
            };
            EmotionScore::new(category, score, confidence)
        })
        .collect();

    // Stable: ties keep first-encounter order.
    emotions.sort_by(|a, b| b.score.total_cmp(&a.score));

    emotions
}
