use crate::services::transcoder::Transcoder;
use crate::types::{ChunkResult, ChunkSpec};
use std::path::Path;
use tracing::debug;

pub struct ChunkWorker;

impl ChunkWorker {
    /// Materializes one chunk. Every outcome, including a transcoder that
    /// cannot be launched, is reported through the returned `ChunkResult`.
    pub async fn extract_chunk<T: Transcoder + ?Sized>(
        transcoder: &T,
        chunk: &ChunkSpec,
        input_path: &Path,
    ) -> ChunkResult {
        debug!(
            "Extracting chunk {} at {}s for {}s",
            chunk.index, chunk.start_secs, chunk.duration_secs
        );

        match transcoder.extract(input_path, chunk).await {
            Ok(output) if output.success => ChunkResult::Ok,
            Ok(output) => ChunkResult::Failed(format!(
                "Error splitting file: {}\nOutput: {}",
                output.status, output.output
            )),
            Err(e) => ChunkResult::Failed(format!("Error splitting file: {}", e)),
        }
    }
}
