//! Hume AI batch-job client.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use affect_models::{JobId, JobStatus, VendorKind};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::media;
use crate::types::{BatchJobCreated, BatchJobState};
use crate::vendor::{StatusReport, Vendor};

/// Client for the Hume AI batch jobs API.
///
/// Jobs are keyed by a string job ID; status is a string state under
/// `state.status` (`QUEUED`, `IN_PROGRESS`, `COMPLETED`, `FAILED`).
pub struct HumeClient {
    http: Client,
    config: ClientConfig,
}

impl HumeClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().build().map_err(ClientError::Network)?;
        Ok(Self { http, config })
    }

    fn jobs_url(&self) -> String {
        format!("{}/batch/jobs", self.config.base_url)
    }

    /// Per-utterance analysis configuration sent alongside the upload.
    fn analysis_config() -> Value {
        serde_json::json!({
            "language": {"granularity": "utterance"},
            "prosody": {"granularity": "utterance"}
        })
    }
}

#[async_trait]
impl Vendor for HumeClient {
    fn kind(&self) -> VendorKind {
        VendorKind::HumeAi
    }

    async fn submit(&self, file: &Path) -> ClientResult<JobId> {
        media::validate_media_file(file).await?;

        let url = self.jobs_url();
        debug!("Submitting {} to {}", file.display(), url);

        let bytes = tokio::fs::read(file).await?;
        let part = Part::bytes(bytes)
            .file_name(media::file_name(file))
            .mime_str("audio/mpeg")
            .map_err(ClientError::Network)?;
        let form = Form::new()
            .part("file", part)
            .text("json", Self::analysis_config().to_string());

        let response = self
            .http
            .post(&url)
            .header("X-Hume-Api-Key", &self.config.api_key)
            .multipart(form)
            .timeout(self.config.upload_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::SubmissionFailed { status, body });
        }

        let created: BatchJobCreated = response.json().await?;
        match created.job_id {
            Some(job_id) if !job_id.is_empty() => Ok(JobId::new(job_id)),
            _ => Err(ClientError::MalformedResponse(
                "submission response carried no job ID".to_string(),
            )),
        }
    }

    async fn status(&self, job_id: &JobId) -> ClientResult<StatusReport> {
        let url = format!("{}/{}", self.jobs_url(), job_id);

        let response = self
            .http
            .get(&url)
            .header("X-Hume-Api-Key", &self.config.api_key)
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::StatusCheckFailed { status, body });
        }

        let body: BatchJobState = response.json().await?;
        let state = body.state.ok_or_else(|| {
            ClientError::MalformedResponse("status response carried no job state".to_string())
        })?;
        let status_name = state.status.ok_or_else(|| {
            ClientError::MalformedResponse("status response carried no job state".to_string())
        })?;
        let message = state.message;

        let status = match status_name.as_str() {
            "QUEUED" => JobStatus::Pending,
            "IN_PROGRESS" => JobStatus::Processing,
            "COMPLETED" => JobStatus::Complete,
            "FAILED" | "ERROR" => JobStatus::Error,
            other => {
                return Err(ClientError::MalformedResponse(format!(
                    "unknown job state: {}",
                    other
                )));
            }
        };

        Ok(StatusReport { status, message })
    }

    async fn fetch(&self, job_id: &JobId) -> ClientResult<Value> {
        let url = format!("{}/{}/predictions", self.jobs_url(), job_id);
        debug!("Fetching predictions from {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Hume-Api-Key", &self.config.api_key)
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::FetchFailed { status, body });
        }

        Ok(response.json().await?)
    }

    async fn healthy(&self) -> bool {
        match self
            .http
            .get(self.jobs_url())
            .header("X-Hume-Api-Key", &self.config.api_key)
            .timeout(self.config.request_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("Hume AI health check failed: {}", response.status());
                false
            }
            Err(e) => {
                warn!("Hume AI unreachable: {}", e);
                false
            }
        }
    }
}
