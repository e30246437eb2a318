//! Client error types.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("File is empty: {0}")]
    EmptyFile(PathBuf),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Submission failed with status {status}: {body}")]
    SubmissionFailed { status: u16, body: String },

    #[error("Malformed vendor response: {0}")]
    MalformedResponse(String),

    #[error("Status check failed with status {status}: {body}")]
    StatusCheckFailed { status: u16, body: String },

    #[error("Processing failed: {message}")]
    JobFailed { message: String },

    #[error("Processing did not complete within {waited:?}")]
    Timeout { waited: Duration },

    #[error("Failed to get results with status {status}: {body}")]
    FetchFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Whether a fresh submit/poll/fetch attempt could succeed.
    ///
    /// Bad input files cannot be fixed by retrying; everything else is
    /// transient from the orchestrator's point of view.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ClientError::FileNotFound(_) | ClientError::NotAFile(_) | ClientError::EmptyFile(_)
        )
    }
}
