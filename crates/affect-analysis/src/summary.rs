//! Human-readable summary lines for normalized results.

use std::collections::HashSet;

use serde_json::Value;

use affect_models::VendorKind;

use crate::extract;

/// Build the one-line summary for a completed payload.
pub fn generate(vendor: VendorKind, payload: &Value) -> String {
    match vendor {
        VendorKind::BehavioralSignals => behavioral_signals(payload),
        VendorKind::HumeAi => hume(payload),
    }
}

fn behavioral_signals(payload: &Value) -> String {
    let records = extract::behavioral_signals_records(payload);
    let mut parts = Vec::new();

    let speakers: HashSet<&str> = labels_for_task(records, "diarization").collect();
    if !speakers.is_empty() {
        parts.push(format!("{} speaker(s) detected", speakers.len()));
    }

    let emotions: Vec<String> = labels_for_task(records, "emotion")
        .map(str::to_lowercase)
        .collect();
    if let Some((label, count)) = dominant(emotions.iter().map(String::as_str)) {
        let percentage = count as f64 / emotions.len() as f64 * 100.0;
        parts.push(format!("Primary emotion: {} ({:.0}%)", label, percentage));
    }

    if let Some(fragment) = task_fragment(records, "positivity", "Overall sentiment") {
        parts.push(fragment);
    }
    if let Some(fragment) = task_fragment(records, "engagement", "Engagement") {
        parts.push(fragment);
    }

    let genders: Vec<&str> = labels_for_task(records, "gender").collect();
    if !genders.is_empty() {
        let counted = count_labels(genders.into_iter());
        let fragments: Vec<String> = counted
            .iter()
            .map(|(label, count)| format!("{} {}", count, label))
            .collect();
        parts.push(format!("Gender: {}", fragments.join(", ")));
    }

    if let Some(language) = labels_for_task(records, "language").next() {
        parts.push(format!("Language: {}", language.to_uppercase()));
    }

    if parts.is_empty() {
        "Analysis complete".to_string()
    } else {
        parts.join(" | ")
    }
}

fn hume(payload: &Value) -> String {
    let predictions = extract::hume_predictions(payload);
    if predictions.is_empty() {
        return "No analysis results available".to_string();
    }

    let mut parts = Vec::new();
    let mut models_used: Vec<&str> = Vec::new();
    let mut total_predictions = 0usize;
    let mut top_labels: Vec<&str> = Vec::new();

    for prediction in predictions {
        let Some(models) = prediction.get("models").and_then(Value::as_object) else {
            continue;
        };
        for (name, model) in models {
            if !models_used.contains(&name.as_str()) {
                models_used.push(name.as_str());
            }
            let Some(model_predictions) = model.get("predictions").and_then(Value::as_array)
            else {
                continue;
            };
            total_predictions += model_predictions.len();

            for model_prediction in model_predictions {
                if let Some(top) = top_emotion_name(model_prediction) {
                    top_labels.push(top);
                }
            }
        }
    }

    if !models_used.is_empty() {
        parts.push(format!("Analysis using {} models", models_used.join(", ")));
    }
    if total_predictions > 0 {
        parts.push(format!("{} prediction(s) generated", total_predictions));
    }
    if let Some((label, _)) = dominant(top_labels.into_iter()) {
        parts.push(format!("Dominant emotion: {}", label));
    }

    if parts.is_empty() {
        "Hume AI analysis complete".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Highest-scored emotion name within one model prediction.
fn top_emotion_name(model_prediction: &Value) -> Option<&str> {
    let emotions = model_prediction.get("emotions").and_then(Value::as_array)?;
    emotions
        .iter()
        .max_by(|a, b| {
            let score_a = a.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            let score_b = b.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            score_a.total_cmp(&score_b)
        })
        .map(|emotion| emotion.get("name").and_then(Value::as_str).unwrap_or("Unknown"))
}

fn labels_for_task<'a>(records: &'a [Value], task: &'a str) -> impl Iterator<Item = &'a str> {
    records.iter().filter_map(move |record| {
        if record.get("task").and_then(Value::as_str) == Some(task) {
            record.get("finalLabel").and_then(Value::as_str).filter(|l| !l.is_empty())
        } else {
            None
        }
    })
}

/// `"{prefix}: {dominant label} ({percentage}%)"` for one task kind.
fn task_fragment(records: &[Value], task: &str, prefix: &str) -> Option<String> {
    let labels: Vec<&str> = labels_for_task(records, task).collect();
    let total = labels.len();
    let (label, count) = dominant(labels.into_iter())?;
    let percentage = count as f64 / total as f64 * 100.0;
    Some(format!("{}: {} ({:.0}%)", prefix, label, percentage))
}

/// Count labels preserving first-encounter order.
fn count_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in labels {
        if let Some(entry) = counts.iter_mut().find(|(seen, _)| seen == label) {
            entry.1 += 1;
        } else {
            counts.push((label.to_string(), 1));
        }
    }
    counts
}

/// Most frequent label; ties keep the first-encountered one.
fn dominant<'a>(labels: impl Iterator<Item = &'a str>) -> Option<(String, usize)> {
    count_labels(labels)
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
}
