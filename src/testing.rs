//! Test doubles for the transcoder seam.

use crate::services::transcoder::{ToolOutput, Transcoder};
use crate::types::ChunkSpec;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-process stand-in for ffmpeg.
///
/// - Analysis returns a scripted diagnostic stream (or fails).
/// - Extraction writes a small file at the chunk's output path, unless the
///   chunk index was marked as failing.
/// - Every extraction is recorded, and the peak number of extractions running
///   at the same time is tracked.
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    analysis_output: String,
    analysis_fails: bool,
    unlaunchable_extract: bool,
    failing_chunks: HashSet<u32>,
    delays_ms: HashMap<u32, u64>,
    extracted: Arc<Mutex<Vec<u32>>>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    pub fn new() -> Self {
        Self {
            analysis_output: "  Duration: 00:00:00.00, start: 0.000000\n".to_string(),
            analysis_fails: false,
            unlaunchable_extract: false,
            failing_chunks: HashSet::new(),
            delays_ms: HashMap::new(),
            extracted: Arc::new(Mutex::new(Vec::new())),
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reports the given `HH:MM:SS` duration from analysis.
    pub fn with_duration(self, hh_mm_ss: &str) -> Self {
        self.with_analysis_output(format!(
            "Input #0, mp3, from 'input':\n  Duration: {}.00, start: 0.025057, bitrate: 128 kb/s\n",
            hh_mm_ss
        ))
    }

    pub fn with_analysis_output(mut self, output: impl Into<String>) -> Self {
        self.analysis_output = output.into();
        self
    }

    pub fn with_failing_analysis(mut self) -> Self {
        self.analysis_fails = true;
        self
    }

    pub fn with_unlaunchable_extract(mut self) -> Self {
        self.unlaunchable_extract = true;
        self
    }

    /// Makes extraction of the chunk with this 1-based index exit non-zero.
    pub fn fail_chunk(mut self, index: u32) -> Self {
        self.failing_chunks.insert(index);
        self
    }

    /// Delays extraction of one chunk, to shuffle completion order.
    pub fn delay_chunk(mut self, index: u32, millis: u64) -> Self {
        self.delays_ms.insert(index, millis);
        self
    }

    /// Delays every chunk with an index in `indices`.
    pub fn delay_chunks(mut self, indices: impl IntoIterator<Item = u32>, millis: u64) -> Self {
        for index in indices {
            self.delays_ms.insert(index, millis);
        }
        self
    }

    /// Indices of chunks extracted so far, in completion order.
    pub fn extracted_chunks(&self) -> Vec<u32> {
        self.extracted.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    async fn analyze(&self, _input_path: &Path) -> std::io::Result<ToolOutput> {
        Ok(ToolOutput {
            success: !self.analysis_fails,
            status: if self.analysis_fails {
                "exit status: 1".to_string()
            } else {
                "exit status: 0".to_string()
            },
            output: self.analysis_output.clone(),
        })
    }

    async fn extract(&self, _input_path: &Path, chunk: &ChunkSpec) -> std::io::Result<ToolOutput> {
        if self.unlaunchable_extract {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "mock transcoder not found",
            ));
        }

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays_ms.get(&chunk.index).copied().unwrap_or(5);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let failed = self.failing_chunks.contains(&chunk.index);
        let write_result = if failed {
            Ok(())
        } else {
            tokio::fs::write(&chunk.output_path, format!("chunk {}", chunk.index)).await
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        if let Ok(mut extracted) = self.extracted.lock() {
            extracted.push(chunk.index);
        }
        write_result?;

        Ok(ToolOutput {
            success: !failed,
            status: if failed {
                "exit status: 1".to_string()
            } else {
                "exit status: 0".to_string()
            },
            output: if failed {
                format!("{}: Invalid argument", chunk.output_path.display())
            } else {
                String::new()
            },
        })
    }
}
