//! Shared data models for the affect analysis backend.
//!
//! This crate provides Serde-serializable types for:
//! - Emotion categories and scores
//! - Normalized analysis results and metadata
//! - Vendor jobs and their status lifecycle
//! - Vendor identification

pub mod emotion;
pub mod job;
pub mod result;
pub mod vendor;

// Re-export common types
pub use emotion::{EmotionCategory, EmotionCategoryParseError, EmotionScore};
pub use job::{Job, JobId, JobStatus};
pub use result::{AnalysisMetadata, AnalysisResult};
pub use vendor::{VendorKind, VendorParseError};
