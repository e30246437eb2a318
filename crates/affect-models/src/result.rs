//! Normalized analysis result and metadata.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::emotion::EmotionScore;

/// Metadata attached to one analysis result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisMetadata {
    /// File the analysis was run on
    pub source_file: String,
    /// Vendor that produced the raw payload
    pub vendor_name: String,
    /// Media duration in seconds, derived from the longest end-time across
    /// timed sub-results; `None` when the payload carries no timing data
    /// (unknown, not zero-length)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Wall-clock duration of the successful attempt, measured by the
    /// orchestrator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_seconds: Option<f64>,
    /// Completion time
    pub timestamp: DateTime<Utc>,
}

impl AnalysisMetadata {
    pub fn new(source_file: impl Into<String>, vendor_name: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            vendor_name: vendor_name.into(),
            duration_seconds: None,
            processing_time_seconds: None,
            timestamp: Utc::now(),
        }
    }
}

/// Standardized analysis result from any vendor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Emotions ordered by descending score; never empty (a payload with no
    /// emotion data yields the single neutral fallback entry)
    pub emotions: Vec<EmotionScore>,
    /// Analysis metadata
    pub metadata: AnalysisMetadata,
    /// Human-readable summary of the analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Vendor payload retained for audit/debugging, never interpreted
    /// downstream
    pub raw_response: serde_json::Value,
}

impl AnalysisResult {
    /// The emotion with the highest score.
    pub fn primary_emotion(&self) -> Option<&EmotionScore> {
        self.emotions
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::{EmotionCategory, EmotionScore};

    #[test]
    fn primary_emotion_picks_highest_score() {
        let result = AnalysisResult {
            emotions: vec![
                EmotionScore::new(EmotionCategory::Joy, 0.6, 0.8),
                EmotionScore::new(EmotionCategory::Sadness, 0.4, 0.7),
            ],
            metadata: AnalysisMetadata::new("call.mp3", "Behavioral Signals"),
            summary: None,
            raw_response: serde_json::json!({}),
        };

        assert_eq!(
            result.primary_emotion().unwrap().category,
            EmotionCategory::Joy
        );
    }

    #[test]
    fn metadata_serializes_without_absent_fields() {
        let meta = AnalysisMetadata::new("call.mp3", "Hume AI");
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("duration_seconds").is_none());
        assert!(json.get("processing_time_seconds").is_none());
    }
}
