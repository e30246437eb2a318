//! Retry-wrapped processing pipeline.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{info, warn};

use affect_analysis::normalize;
use affect_client::poll::{poll_until_terminal, PollConfig, PollObserver, TerminalStatus};
use affect_client::{ClientError, ClientResult, Vendor};
use affect_models::{AnalysisResult, Job, JobStatus};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};

/// Drives one file through submit → poll → fetch → normalize, retrying the
/// whole sequence on transient failure.
///
/// Sub-steps are never retried individually; a half-dead job is worthless,
/// so every attempt starts over with a fresh submission.
#[derive(Clone)]
pub struct Pipeline {
    vendor: Arc<dyn Vendor>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(vendor: Arc<dyn Vendor>, config: PipelineConfig) -> Self {
        Self { vendor, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a single file, returning the normalized result.
    pub async fn process(&self, file: &Path) -> PipelineResult<AnalysisResult> {
        self.process_with_observer(file, None).await
    }

    /// Like [`process`](Self::process), with a per-poll progress callback.
    ///
    /// Non-retryable errors (bad input files) fail immediately; retrying
    /// cannot fix them. Everything else is retried up to `max_retries`
    /// times with a constant `retry_delay` between attempts, and the last
    /// cause is wrapped in [`PipelineError::RetriesExhausted`].
    pub async fn process_with_observer(
        &self,
        file: &Path,
        mut observer: Option<PollObserver<'_>>,
    ) -> PipelineResult<AnalysisResult> {
        let poll_config = PollConfig {
            interval: self.config.poll_interval,
            max_wait: self.config.max_wait,
        };

        let mut last_error: Option<ClientError> = None;

        for attempt in 1..=self.config.max_retries {
            info!(
                attempt,
                max_retries = self.config.max_retries,
                "Processing {}",
                file.display()
            );

            match self
                .attempt(file, &poll_config, observer.as_deref_mut())
                .await
            {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() => {
                    warn!("Attempt {} failed: {}", attempt, e);
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
                Err(e) => return Err(PipelineError::Client(e)),
            }
        }

        Err(PipelineError::RetriesExhausted {
            attempts: self.config.max_retries,
            source: last_error.unwrap_or(ClientError::JobFailed {
                message: "no attempts were made".to_string(),
            }),
        })
    }

    /// One full submit → poll → fetch → normalize sequence.
    async fn attempt(
        &self,
        file: &Path,
        poll_config: &PollConfig,
        observer: Option<&mut (dyn FnMut(JobStatus, Duration) + Send + '_)>,
    ) -> ClientResult<AnalysisResult> {
        let started = Instant::now();

        let job_id = self.vendor.submit(file).await?;
        let mut job = Job::new(job_id, file);
        info!(job_id = %job.job_id, "Job submitted");

        match poll_until_terminal(self.vendor.as_ref(), &mut job, poll_config, observer).await? {
            TerminalStatus::Complete => {}
            TerminalStatus::Failed { message } => return Err(ClientError::JobFailed { message }),
            TerminalStatus::TimedOut { waited } => return Err(ClientError::Timeout { waited }),
        }

        let raw = self.vendor.fetch(&job.job_id).await?;
        let mut result = normalize(self.vendor.kind(), raw, file.display().to_string());

        // Accounting covers only this successful attempt; failed attempts
        // are reported via logging, not folded into the metric.
        result.metadata.processing_time_seconds = Some(started.elapsed().as_secs_f64());
        result.metadata.timestamp = Utc::now();

        info!(job_id = %job.job_id, "Successfully processed {}", file.display());
        Ok(result)
    }
}
