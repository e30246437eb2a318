//! Behavioral Signals API client.

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
use crate::types::{ProcessCreated, ProcessState};
use crate::vendor::{StatusReport, Vendor};

/// Client for the Behavioral Signals processing API.
///
/// Jobs are keyed by a numeric process ID; status is a numeric code
/// (0 = pending, 1 = processing, 2 = complete, negative = error).
pub struct BehavioralSignalsClient {
    http: Client,
    config: ClientConfig,
}

impl BehavioralSignalsClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().build().map_err(ClientError::Network)?;
        Ok(Self { http, config })
    }

    fn processes_url(&self) -> String {
        format!(
            "{}/v5/clients/{}/processes",
            self.config.base_url, self.config.client_id
        )
    }

    /// Closed content-type mapping for uploads.
    fn content_type(file: &Path) -> &'static str {
        match file.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("mp3") => "audio/mp3",
            _ => "video/mp4",
        }
    }
}

#[async_trait]
impl Vendor for BehavioralSignalsClient {
    fn kind(&self) -> VendorKind {
        VendorKind::BehavioralSignals
    }

    async fn submit(&self, file: &Path) -> ClientResult<JobId> {
        media::validate_media_file(file).await?;

        let url = format!("{}/audio", self.processes_url());
        debug!("Submitting {} to {}", file.display(), url);

        let bytes = tokio::fs::read(file).await?;
        let part = Part::bytes(bytes)
            .file_name(media::file_name(file))
            .mime_str(Self::content_type(file))
            .map_err(ClientError::Network)?;
        let form = Form::new()
            .part("file", part)
            .text("name", media::file_stem(file))
            .text("embeddings", "true");

        let response = self
            .http
            .post(&url)
            .header("X-Auth-Token", &self.config.api_key)
            .multipart(form)
            .timeout(self.config.upload_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::SubmissionFailed { status, body });
        }

        let created: ProcessCreated = response.json().await?;
        let pid = created.pid.ok_or_else(|| {
            ClientError::MalformedResponse("submission response carried no process ID".to_string())
        })?;

        Ok(JobId::new(pid))
    }

    async fn status(&self, job_id: &JobId) -> ClientResult<StatusReport> {
        let url = format!("{}/{}", self.processes_url(), job_id);

        let response = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.config.api_key)
            .header("accept", "application/json")
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::StatusCheckFailed { status, body });
        }

        let state: ProcessState = response.json().await?;
        let code = state.status.ok_or_else(|| {
            ClientError::MalformedResponse("status response carried no status code".to_string())
        })?;
        let message = state.statusmsg;

        let status = match code {
            0 => JobStatus::Pending,
            1 => JobStatus::Processing,
            2 => JobStatus::Complete,
            code if code < 0 => JobStatus::Error,
            code => {
                return Err(ClientError::MalformedResponse(format!(
                    "unknown status code: {}",
                    code
                )));
            }
        };

        Ok(StatusReport { status, message })
    }

    async fn fetch(&self, job_id: &JobId) -> ClientResult<Value> {
        let url = format!("{}/{}/results", self.processes_url(), job_id);
        debug!("Fetching results from {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.config.api_key)
            .header("accept", "application/json")
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
        let status_url = format!("{}/status", self.config.base_url);
        match self.http.get(&status_url).timeout(self.config.request_timeout).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!("Behavioral Signals status check failed: {}", response.status());
                return false;
            }
            Err(e) => {
                warn!("Behavioral Signals unreachable: {}", e);
                return false;
            }
        }

        // Reachable; now verify the credentials are accepted.
        let auth_url = format!("{}/v5/clients/{}", self.config.base_url, self.config.client_id);
        match self
            .http
            .get(&auth_url)
            .header("X-Auth-Token", &self.config.api_key)
            .timeout(self.config.request_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("Behavioral Signals auth check failed: {}", response.status());
                false
            }
            Err(e) => {
                warn!("Behavioral Signals auth check error: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> ClientConfig {
        let mut config = ClientConfig::for_vendor(VendorKind::BehavioralSignals);
        config.api_key = "test-key".to_string();
        config.client_id = "c-100".to_string();
        config.base_url = base_url;
        config
    }

    fn media_fixture(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn content_type_mapping_is_closed() {
        assert_eq!(
            BehavioralSignalsClient::content_type(Path::new("a.mp3")),
            "audio/mp3"
        );
        assert_eq!(
            BehavioralSignalsClient::content_type(Path::new("a.MP3")),
            "audio/mp3"
        );
        assert_eq!(
            BehavioralSignalsClient::content_type(Path::new("a.mov")),
            "video/mp4"
        );
    }

    #[tokio::test]
    async fn submit_returns_numeric_pid_as_job_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v5/clients/c-100/processes/audio"))
            .and(header("X-Auth-Token", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "pid": 4711,
                    "status": 0,
                    "statusmsg": "queued"
                })),
            )
            .mount(&server)
            .await;

        let client = BehavioralSignalsClient::new(test_config(server.uri())).unwrap();
        let file = media_fixture(b"mp3 bytes");
        let job_id = client.submit(file.path()).await.unwrap();
        assert_eq!(job_id.as_str(), "4711");
    }

    #[tokio::test]
    async fn submit_without_pid_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v5/clients/c-100/processes/audio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 0
            })))
            .mount(&server)
            .await;

        let client = BehavioralSignalsClient::new(test_config(server.uri())).unwrap();
        let file = media_fixture(b"mp3 bytes");
        let err = client.submit(file.path()).await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn submit_http_failure_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v5/clients/c-100/processes/audio"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = BehavioralSignalsClient::new(test_config(server.uri())).unwrap();
        let file = media_fixture(b"mp3 bytes");
        let err = client.submit(file.path()).await.unwrap_err();
        match err {
            ClientError::SubmissionFailed { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_codes_map_to_job_statuses() {
        let cases = [
            (0, JobStatus::Pending),
            (1, JobStatus::Processing),
            (2, JobStatus::Complete),
            (-2, JobStatus::Error),
        ];

        for (code, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v5/clients/c-100/processes/p-7"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "status": code,
                    "statusmsg": "msg"
                })))
                .mount(&server)
                .await;

            let client = BehavioralSignalsClient::new(test_config(server.uri())).unwrap();
            let report = client.status(&JobId::new("p-7")).await.unwrap();
            assert_eq!(report.status, expected, "code {code}");
            assert_eq!(report.message.as_deref(), Some("msg"));
        }
    }

    #[tokio::test]
    async fn fetch_returns_raw_payload() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({
            "results": [{"task": "emotion", "finalLabel": "happy"}]
        });
        Mock::given(method("GET"))
            .and(path("/v5/clients/c-100/processes/p-7/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = BehavioralSignalsClient::new(test_config(server.uri())).unwrap();
        let fetched = client.fetch(&JobId::new("p-7")).await.unwrap();
        assert_eq!(fetched, payload);
    }
}
