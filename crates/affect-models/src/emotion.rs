//! Emotion category and score definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Standard emotion categories shared across all vendors.
///
/// Vendor-specific labels are collapsed onto this closed set during
/// normalization; labels with no mapping land in `Unknown` rather than
/// being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
    Unknown,
}

impl EmotionCategory {
    /// All categories.
    pub const ALL: &'static [EmotionCategory] = &[
        EmotionCategory::Joy,
        EmotionCategory::Sadness,
        EmotionCategory::Anger,
        EmotionCategory::Fear,
        EmotionCategory::Surprise,
        EmotionCategory::Disgust,
        EmotionCategory::Neutral,
        EmotionCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Joy => "joy",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Anger => "anger",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Surprise => "surprise",
            EmotionCategory::Disgust => "disgust",
            EmotionCategory::Neutral => "neutral",
            EmotionCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionCategory {
    type Err = EmotionCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "joy" => Ok(EmotionCategory::Joy),
            "sadness" => Ok(EmotionCategory::Sadness),
            "anger" => Ok(EmotionCategory::Anger),
            "fear" => Ok(EmotionCategory::Fear),
            "surprise" => Ok(EmotionCategory::Surprise),
            "disgust" => Ok(EmotionCategory::Disgust),
            "neutral" => Ok(EmotionCategory::Neutral),
            "unknown" => Ok(EmotionCategory::Unknown),
            _ => Err(EmotionCategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown emotion category: {0}")]
pub struct EmotionCategoryParseError(String);

/// A single emotion with its normalized score and confidence.
///
/// `score` ranks the emotion against its siblings within one result (all
/// scores of a result sum to 1.0); `confidence` is the vendor-reported
/// probability for the underlying observations, both in [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionScore {
    pub category: EmotionCategory,
    pub score: f64,
    pub confidence: f64,
}

impl EmotionScore {
    pub fn new(category: EmotionCategory, score: f64, confidence: f64) -> Self {
        Self {
            category,
            score,
            confidence,
        }
    }

    /// The fallback entry emitted when a payload carries no emotion data.
    pub fn neutral_fallback() -> Self {
        Self {
            category: EmotionCategory::Neutral,
            score: 1.0,
            confidence: 0.5,
        }
    }
}
