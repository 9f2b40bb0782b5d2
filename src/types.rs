use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Which window of the input a request covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanMode {
    /// Split the whole file from the beginning.
    Full,
    /// Start at an arbitrary position in seconds.
    FromOffset {
        start_secs: f64,
        max_chunks: Option<u32>,
    },
    /// Resume at a chunk of the full split (0-based).
    FromIndex {
        start_index: u32,
        max_chunks: Option<u32>,
    },
}

#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub seconds_per_chunk: i64,
    pub create_dir_if_missing: bool,
    pub mode: PlanMode,
}

impl SplitRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        seconds_per_chunk: i64,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            seconds_per_chunk,
            create_dir_if_missing: false,
            mode: PlanMode::Full,
        }
    }

    pub fn create_dir_if_missing(mut self, create: bool) -> Self {
        self.create_dir_if_missing = create;
        self
    }

    pub fn with_mode(mut self, mode: PlanMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A request that passed validation; paths are known to exist.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub seconds_per_chunk: u32,
    pub input_file_name: String,
    pub mode: PlanMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProbe {
    pub total_duration_secs: u64,
    pub input_file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSpec {
    /// 1-based index used in the output file name.
    pub index: u32,
    pub start_secs: f64,
    pub duration_secs: u32,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPlan {
    pub total_duration_secs: u64,
    pub seconds_per_chunk: u32,
    pub chunks: Vec<ChunkSpec>,
}

impl ChunkPlan {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn output_paths(&self) -> Vec<PathBuf> {
        self.chunks.iter().map(|c| c.output_path.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkResult {
    Ok,
    Failed(String),
}

impl ChunkResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ChunkResult::Ok)
    }
}

/// Settings shared by every request run through a splitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Path or name of the ffmpeg binary.
    pub transcoder_path: PathBuf,
    /// Audio codec passed to ffmpeg for each chunk.
    pub audio_codec: String,
    /// Upper bound on simultaneous chunk extractions. `None` launches every chunk at once.
    pub max_concurrent_chunks: Option<NonZeroUsize>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            transcoder_path: PathBuf::from("ffmpeg"),
            audio_codec: "libmp3lame".to_string(),
            max_concurrent_chunks: None,
        }
    }
}

impl SplitConfig {
    pub fn with_transcoder_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcoder_path = path.into();
        self
    }

    pub fn with_audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.audio_codec = codec.into();
        self
    }

    pub fn with_max_concurrent_chunks(mut self, max: Option<NonZeroUsize>) -> Self {
        self.max_concurrent_chunks = max;
        self
    }
}

/// JSON report written by the CLI after planning or splitting.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub input: String,
    pub generated_at: String,
    pub total_duration_secs: u64,
    pub seconds_per_chunk: u32,
    pub chunks: Vec<ChunkSpec>,
    pub completed: bool,
}
