//! Vendor capability trait and dispatch.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use affect_models::{JobId, JobStatus, VendorKind};

use crate::behavioral_signals::BehavioralSignalsClient;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::hume::HumeClient;

/// One status observation for a job.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub status: JobStatus,
    /// Vendor-supplied status message, when present
    pub message: Option<String>,
}

impl StatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn with_message(status: JobStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }
}

/// Capability set every analysis vendor exposes.
///
/// Implementations perform no retries of their own; retry policy lives in
/// one place, the orchestrator, and applies to the whole
/// submit/poll/fetch sequence.
#[async_trait]
pub trait Vendor: Send + Sync {
    /// Which vendor this client talks to.
    fn kind(&self) -> VendorKind;

    /// Upload a media file and return the vendor-assigned job ID.
    ///
    /// The file must exist, be a regular file, and be non-empty; violations
    /// are non-retryable errors.
    async fn submit(&self, file: &Path) -> ClientResult<JobId>;

    /// Query the current status of a job.
    async fn status(&self, job_id: &JobId) -> ClientResult<StatusReport>;

    /// Retrieve the raw result payload of a completed job.
    async fn fetch(&self, job_id: &JobId) -> ClientResult<Value>;

    /// Whether the service is reachable and accepting authenticated
    /// requests.
    async fn healthy(&self) -> bool;
}

/// Build the client for a vendor.
pub fn client_for(kind: VendorKind, config: ClientConfig) -> ClientResult<Box<dyn Vendor>> {
    match kind {
        VendorKind::BehavioralSignals => Ok(Box::new(BehavioralSignalsClient::new(config)?)),
        VendorKind::HumeAi => Ok(Box::new(HumeClient::new(config)?)),
    }
}
