//! Normalization of vendor emotion-analysis payloads.
//!
//! This crate turns the raw JSON a vendor returns for a completed job into
//! the shared [`AnalysisResult`](affect_models::AnalysisResult) schema:
//! emotion observations are extracted per vendor, mapped onto the closed
//! category set, scored, and accompanied by metadata and a summary line.
//!
//! Everything here is pure over the payload: the same input always yields
//! the same emotions. Wall-clock fields (`timestamp`,
//! `processing_time_seconds`) are owned by the orchestrator.

pub mod extract;
pub mod labels;
pub mod normalize;
pub mod observation;
pub mod summary;

pub use normalize::{normalize, score_observations};
pub use observation::Observation;
