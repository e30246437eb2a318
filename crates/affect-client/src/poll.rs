//! Completion polling.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use affect_models::{Job, JobStatus};

use crate::error::{ClientError, ClientResult};
use crate::vendor::Vendor;

/// Polling parameters.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Sleep between status queries. Constant, no backoff growth: these
    /// are minutes-long external jobs, not a throughput-sensitive path
    pub interval: Duration,
    /// Give up after this much elapsed wall-clock time
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600),
        }
    }
}

/// How a polling run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalStatus {
    Complete,
    /// Vendor reported a terminal failure
    Failed { message: String },
    /// Synthesized by the poller; the vendor never reports this
    TimedOut { waited: Duration },
}

impl TerminalStatus {
    pub fn as_job_status(&self) -> JobStatus {
        match self {
            TerminalStatus::Complete => JobStatus::Complete,
            TerminalStatus::Failed { .. } => JobStatus::Error,
            TerminalStatus::TimedOut { .. } => JobStatus::TimedOut,
        }
    }
}

/// Per-query progress callback: `(observed status, elapsed since first poll)`.
pub type PollObserver<'a> = &'a mut (dyn FnMut(JobStatus, Duration) + Send);

/// Query `job` until it reaches a terminal state or `max_wait` elapses.
///
/// The timeout check runs before each query and compares strictly greater,
/// so at exactly `max_wait` one more query is still issued. The observer is
/// invoked synchronously exactly once per issued query, including the final
/// one. A status query that itself fails is not retried here; its error
/// propagates and retry stays with the orchestrator, applied to the whole
/// submit/poll/fetch sequence.
pub async fn poll_until_terminal(
    vendor: &dyn Vendor,
    job: &mut Job,
    config: &PollConfig,
    mut observer: Option<&mut (dyn FnMut(JobStatus, Duration) + Send + '_)>,
) -> ClientResult<TerminalStatus> {
    let started = Instant::now();

    loop {
        let elapsed = started.elapsed();
        if elapsed > config.max_wait {
            job.fail(
                JobStatus::TimedOut,
                format!("no terminal state within {:?}", config.max_wait),
            );
            return Ok(TerminalStatus::TimedOut { waited: elapsed });
        }

        let report = match vendor.status(&job.job_id).await {
            Ok(report) => report,
            Err(e) => {
                job.fail(JobStatus::Error, e.to_string());
                return Err(e);
            }
        };

        job.observe(report.status);
        if let Some(observer) = observer.as_deref_mut() {
            observer(report.status, elapsed);
        }
        debug!(job_id = %job.job_id, status = %report.status, elapsed_secs = elapsed.as_secs_f64(), "polled job");

        match report.status {
            JobStatus::Complete => return Ok(TerminalStatus::Complete),
            JobStatus::Error => {
                let message = report
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string());
                job.fail(JobStatus::Error, message.clone());
                return Ok(TerminalStatus::Failed { message });
            }
            _ => {}
        }

        tokio::time::sleep(config.interval).await;
    }
}
