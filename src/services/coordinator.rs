use crate::error::{MediaSplitterError, Result};
use crate::services::transcoder::Transcoder;
use crate::services::worker::ChunkWorker;
use crate::types::{ChunkPlan, ChunkResult};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

pub struct ChunkCoordinator;

impl ChunkCoordinator {
    /// Runs one worker per planned chunk and waits for all of them.
    ///
    /// Results are matched back to their plan position, so the returned paths
    /// follow plan order whatever order the workers finish in. Siblings of a
    /// failed chunk are not cancelled and their files stay on disk. With
    /// `max_concurrent` unset every worker starts immediately.
    pub async fn run_plan<T: Transcoder + 'static>(
        transcoder: Arc<T>,
        plan: &ChunkPlan,
        input_path: &Path,
        max_concurrent: Option<NonZeroUsize>,
    ) -> Result<Vec<PathBuf>> {
        let count = plan.len();
        if count == 0 {
            return Ok(Vec::new());
        }

        info!(
            "Launching {} chunk workers (limit: {})",
            count,
            max_concurrent.map_or_else(|| "none".to_string(), |n| n.to_string())
        );

        let (tx, mut rx) = mpsc::channel::<(usize, ChunkResult)>(count);
        let semaphore = max_concurrent.map(|n| Arc::new(Semaphore::new(n.get())));

        for (slot, chunk) in plan.chunks.iter().cloned().enumerate() {
            let tx = tx.clone();
            let transcoder = Arc::clone(&transcoder);
            let semaphore = semaphore.clone();
            let input_path = input_path.to_path_buf();

            tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let result =
                    ChunkWorker::extract_chunk(transcoder.as_ref(), &chunk, &input_path).await;
                debug!("Chunk {} finished: ok={}", chunk.index, result.is_ok());
                let _ = tx.send((slot, result)).await;
            });
        }
        // Only worker-held senders remain, so recv ends once every worker is done.
        drop(tx);

        let mut results: Vec<Option<ChunkResult>> = vec![None; count];
        while let Some((slot, result)) = rx.recv().await {
            results[slot] = Some(result);
        }

        Self::collect(plan, results)
    }

    fn collect(plan: &ChunkPlan, results: Vec<Option<ChunkResult>>) -> Result<Vec<PathBuf>> {
        let failures = plan
            .chunks
            .iter()
            .zip(results)
            .filter_map(|(chunk, result)| match result {
                Some(ChunkResult::Ok) => None,
                Some(ChunkResult::Failed(reason)) => Some((chunk, reason)),
                None => Some((
                    chunk,
                    "chunk worker terminated without reporting a result".to_string(),
                )),
            })
            .collect::<Vec<_>>();

        for (chunk, reason) in &failures {
            warn!(
                "Chunk {} ({}) failed: {}",
                chunk.index,
                chunk.output_path.display(),
                reason
            );
        }

        let failed_chunks = failures.len();
        match failures.into_iter().next() {
            Some((chunk, reason)) => Err(MediaSplitterError::ChunkExtraction {
                index: chunk.index,
                output_path: chunk.output_path.clone(),
                reason,
                failed_chunks,
            }),
            None => Ok(plan.output_paths()),
        }
    }
}
