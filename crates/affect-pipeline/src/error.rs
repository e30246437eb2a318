//! Pipeline error types.

use thiserror::Error;

use affect_client::ClientError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every attempt failed; wraps the last underlying cause.
    #[error("Failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// A non-retryable client error; no further attempts were made.
    #[error(transparent)]
    Client(#[from] ClientError),
}
