//! Per-vendor emotion label mapping.

use affect_models::{EmotionCategory, VendorKind};

/// Map a vendor-specific label onto the closed category set.
///
/// Labels with no mapping collapse to [`EmotionCategory::Unknown`]; they are
/// never dropped, so the observation count survives the mapping.
pub fn map_label(vendor: VendorKind, label: &str) -> EmotionCategory {
    match vendor {
        VendorKind::BehavioralSignals => behavioral_signals(label),
        VendorKind::HumeAi => hume(label),
    }
}

/// Behavioral Signals emits lowercase coarse labels.
fn behavioral_signals(label: &str) -> EmotionCategory {
    match label.to_lowercase().as_str() {
        "neutral" | "calm" => EmotionCategory::Neutral,
        "joy" | "happy" | "happiness" => EmotionCategory::Joy,
        "sadness" | "sad" => EmotionCategory::Sadness,
        "anger" | "angry" => EmotionCategory::Anger,
        "fear" | "fearful" => EmotionCategory::Fear,
        "surprise" | "surprised" => EmotionCategory::Surprise,
        "disgust" | "disgusted" => EmotionCategory::Disgust,
        _ => EmotionCategory::Unknown,
    }
}

/// Hume emits capitalized fine-grained labels.
fn hume(label: &str) -> EmotionCategory {
    match label {
        "Joy" | "Happiness" | "Amusement" | "Excitement" | "Satisfaction" | "Relief" => {
            EmotionCategory::Joy
        }
        "Sadness" | "Disappointment" | "Grief" | "Sorrow" => EmotionCategory::Sadness,
        "Anger" | "Rage" | "Annoyance" | "Irritation" | "Frustration" => EmotionCategory::Anger,
        "Fear" | "Anxiety" | "Worry" | "Nervousness" | "Panic" => EmotionCategory::Fear,
        "Surprise" | "Shock" | "Amazement" => EmotionCategory::Surprise,
        "Disgust" | "Contempt" | "Repulsion" => EmotionCategory::Disgust,
        "Neutral" | "Calm" | "Serenity" | "Contentment" => EmotionCategory::Neutral,
        _ => EmotionCategory::Unknown,
    }
}
