//! Pipeline configuration.

use std::time::Duration;

/// Configuration for the processing pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Sleep between status queries while a job runs
    pub poll_interval: Duration,
    /// Give up polling one job after this much wall-clock time
    pub max_wait: Duration,
    /// Whole-sequence attempts before failing
    pub max_retries: u32,
    /// Sleep between attempts (constant; these are human-timescale
    /// external services, not a high-QPS path)
    pub retry_delay: Duration,
    /// Upper bound on concurrently processed files in a batch
    pub max_concurrent_jobs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600),
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
            max_concurrent_jobs: 4,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            poll_interval: Duration::from_secs(
                std::env::var("AFFECT_POLL_INTERVAL")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            max_wait: Duration::from_secs(
                std::env::var("AFFECT_MAX_WAIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            max_retries: std::env::var("AFFECT_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            retry_delay: Duration::from_secs(
                std::env::var("AFFECT_RETRY_DELAY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            max_concurrent_jobs: std::env::var("AFFECT_MAX_CONCURRENT_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
        }
    }
}
