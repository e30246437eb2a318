//! Per-vendor payload traversal.
//!
//! Each vendor buries its per-utterance emotion labels in a different place;
//! these functions flatten them into [`Observation`]s and pull out the timing
//! data the metadata needs. Tolerant of both the bare vendor response and
//! the `results`-wrapped form.

use affect_models::VendorKind;
use serde_json::Value;

use crate::observation::Observation;

/// Extract every emotion observation from a completed-job payload.
pub fn observations(vendor: VendorKind, payload: &Value) -> Vec<Observation> {
    match vendor {
        VendorKind::BehavioralSignals => behavioral_signals_observations(payload),
        VendorKind::HumeAi => hume_observations(payload),
    }
}

/// Media duration: the longest end-time across timed sub-results.
///
/// `None` when the payload carries no timing data; unknown duration is
/// distinct from a zero-length recording.
pub fn duration_seconds(vendor: VendorKind, payload: &Value) -> Option<f64> {
    match vendor {
        VendorKind::BehavioralSignals => behavioral_signals_duration(payload),
        VendorKind::HumeAi => hume_duration(payload),
    }
}

/// Behavioral Signals result records, whether the payload is the bare array
/// or wrapped in a `results` field.
pub(crate) fn behavioral_signals_records(payload: &Value) -> &[Value] {
    payload
        .as_array()
        .or_else(|| payload.get("results").and_then(Value::as_array))
        .map(|records| records.as_slice())
        .unwrap_or(&[])
}

/// Hume prediction entries, whether the payload is the bare array or wrapped
/// under `results.predictions`.
pub(crate) fn hume_predictions(payload: &Value) -> &[Value] {
    payload
        .as_array()
        .or_else(|| payload.pointer("/results/predictions").and_then(Value::as_array))
        .or_else(|| payload.get("predictions").and_then(Value::as_array))
        .map(|predictions| predictions.as_slice())
        .unwrap_or(&[])
}

fn behavioral_signals_observations(payload: &Value) -> Vec<Observation> {
    let mut out = Vec::new();

    for record in behavioral_signals_records(payload) {
        if record.get("task").and_then(Value::as_str) != Some("emotion") {
            continue;
        }
        let Some(label) = record.get("finalLabel").and_then(Value::as_str) else {
            continue;
        };
        let label = label.to_lowercase();

        // The prediction array repeats every candidate label; only the
        // posterior of the winning label counts, and only when positive.
        let posterior = record
            .get("prediction")
            .and_then(Value::as_array)
            .and_then(|candidates| {
                candidates.iter().find_map(|candidate| {
                    let matches = candidate
                        .get("label")
                        .and_then(Value::as_str)
                        .is_some_and(|l| l.eq_ignore_ascii_case(&label));
                    if matches {
                        number(candidate.get("posterior")?)
                    } else {
                        None
                    }
                })
            })
            .filter(|p| *p > 0.0);

        let mut observation = Observation::labeled(label);
        observation.posterior = posterior;
        out.push(observation);
    }

    out
}

fn hume_observations(payload: &Value) -> Vec<Observation> {
    let mut out = Vec::new();

    for prediction in hume_predictions(payload) {
        let Some(models) = prediction.get("models").and_then(Value::as_object) else {
            continue;
        };
        // Speech-based emotions from the language model, speech patterns
        // from prosody.
        for model_name in ["language", "prosody"] {
            let Some(model_predictions) = models
                .get(model_name)
                .and_then(|m| m.get("predictions"))
                .and_then(Value::as_array)
            else {
                continue;
            };
            for model_prediction in model_predictions {
                let Some(emotions) = model_prediction.get("emotions").and_then(Value::as_array)
                else {
                    continue;
                };
                for emotion in emotions {
                    let label = emotion
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown");
                    let score = emotion.get("score").and_then(number).unwrap_or(0.0);
                    out.push(Observation::weighted(label, score).with_posterior(score));
                }
            }
        }
    }

    out
}

fn behavioral_signals_duration(payload: &Value) -> Option<f64> {
    let mut max_end: Option<f64> = None;

    for record in behavioral_signals_records(payload) {
        if record.get("task").and_then(Value::as_str) != Some("asr") {
            continue;
        }
        if let Some(end) = record.get("endTime").and_then(number) {
            if end > 0.0 && max_end.is_none_or(|m| end > m) {
                max_end = Some(end);
            }
        }
    }

    max_end
}

fn hume_duration(payload: &Value) -> Option<f64> {
    let mut max_end: Option<f64> = None;

    for prediction in hume_predictions(payload) {
        let Some(models) = prediction.get("models").and_then(Value::as_object) else {
            continue;
        };
        for model in models.values() {
            let Some(model_predictions) =
                model.get("predictions").and_then(Value::as_array)
            else {
                continue;
            };
            for model_prediction in model_predictions {
                if let Some(end) = model_prediction.pointer("/time/end").and_then(number) {
                    if end > 0.0 && max_end.is_none_or(|m| end > m) {
                        max_end = Some(end);
                    }
                }
            }
        }
    }

    max_end
}

/// Numeric field that some vendors serialize as a string.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
