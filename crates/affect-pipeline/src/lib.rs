//! Processing pipeline for emotion analysis.
//!
//! This crate provides:
//! - [`Pipeline`]: retry-wrapped submit → poll → fetch → normalize for one
//!   file
//! - Batch fan-out with a configured concurrency bound
//! - Pipeline configuration

pub mod batch;
pub mod config;
pub mod error;
pub mod pipeline;

pub use batch::ChunkOutcome;
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
