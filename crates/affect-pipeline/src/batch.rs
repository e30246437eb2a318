//! Bounded-concurrency batch processing.
//!
//! Each file runs its own independent submit → poll → fetch chain; the only
//! thing the chains share is the outbound connection pool, bounded by a
//! semaphore sized from configuration. One chain timing out or failing
//! never aborts its siblings.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use affect_models::AnalysisResult;

use crate::error::PipelineResult;
use crate::pipeline::Pipeline;

/// Result of one chunk within a batch.
///
/// Chunks complete in arbitrary order; `index` is the position the caller
/// submitted the chunk at, and the batch hands outcomes back sorted by it.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub index: usize,
    pub file: PathBuf,
    pub result: PipelineResult<AnalysisResult>,
}

impl Pipeline {
    /// Process several files concurrently, at most
    /// `max_concurrent_jobs` in flight at once.
    pub async fn process_batch(&self, files: Vec<PathBuf>) -> Vec<ChunkOutcome> {
        let batch_id = Uuid::new_v4();
        let total = files.len();
        info!(%batch_id, chunks = total, "Processing batch");

        let semaphore = Arc::new(Semaphore::new(self.config().max_concurrent_jobs));
        let mut tasks = JoinSet::new();

        for (index, file) in files.into_iter().enumerate() {
            let pipeline = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.unwrap();
                let result = pipeline.process(&file).await;
                ChunkOutcome {
                    index,
                    file,
                    result,
                }
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    if let Err(e) = &outcome.result {
                        warn!(%batch_id, chunk = outcome.index, "Chunk failed: {}", e);
                    }
                    outcomes.push(outcome);
                }
                Err(e) => warn!(%batch_id, "Batch task panicked: {}", e),
            }
        }

        // Completion order is arbitrary; hand results back in chunk order.
        outcomes.sort_by_key(|outcome| outcome.index);

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(%batch_id, succeeded = total - failed, failed, "Batch finished");

        outcomes
    }
}
