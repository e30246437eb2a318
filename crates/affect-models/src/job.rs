//! Vendor job types and status lifecycle.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Opaque vendor-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Processing status of a submitted job.
///
/// `TimedOut` is synthesized by the poller when `max_wait` elapses; vendors
/// never report it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Complete,
    Error,
    TimedOut,
}

impl JobStatus {
    /// Whether polling stops at this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Complete | JobStatus::Error | JobStatus::TimedOut
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Complete => "complete",
            JobStatus::Error => "error",
            JobStatus::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One submitted unit of analysis work.
///
/// Created on successful submission; the poller is the only mutator of
/// `status`. A retry never resumes a job, it supersedes it with a new one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Vendor-assigned job ID
    pub job_id: JobId,
    /// File the job was created for
    pub source_file: PathBuf,
    /// Submission time
    pub submitted_at: DateTime<Utc>,
    /// Current status
    pub status: JobStatus,
    /// Message recorded when the job ended in `Error` or `TimedOut`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_error: Option<String>,
}

impl Job {
    pub fn new(job_id: JobId, source_file: impl Into<PathBuf>) -> Self {
        Self {
            job_id,
            source_file: source_file.into(),
            submitted_at: Utc::now(),
            status: JobStatus::Pending,
            terminal_error: None,
        }
    }

    /// Record an observed status.
    pub fn observe(&mut self, status: JobStatus) {
        self.status = status;
    }

    /// Record a terminal failure with its reason.
    pub fn fail(&mut self, status: JobStatus, message: impl Into<String>) {
        self.status = status;
        self.terminal_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Complete.is_terminal());
        assert!(JobStatus::Error.is_terminal());
        assert!(JobStatus::TimedOut.is_terminal());
    }

    #[test]
    fn job_records_terminal_error() {
        let mut job = Job::new(JobId::new("p-42"), "audio/sample.mp3");
        assert_eq!(job.status, JobStatus::Pending);

        job.observe(JobStatus::Processing);
        job.fail(JobStatus::Error, "decoder crashed");

        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.terminal_error.as_deref(), Some("decoder crashed"));
    }
}
