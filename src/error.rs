use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaSplitterError {
    #[error("Invalid chunk length: {seconds} (must be > 0)")]
    InvalidChunkLength { seconds: i64 },

    #[error("Invalid chunk count: must be > 0")]
    InvalidChunkCount,

    #[error("Invalid start offset: {offset} (must be a non-negative number)")]
    InvalidStartOffset { offset: f64 },

    #[error("Output directory not found: {path}: {reason}")]
    OutputDirectoryMissing { path: PathBuf, reason: String },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file not found: {path}")]
    InputFileNotFound { path: PathBuf },

    #[error("Cannot derive stem and extension from input file name: {name}")]
    InvalidInputName { name: String },

    #[error("Transcoder invocation failed: {reason}")]
    ProcessInvocationFailed { reason: String },

    #[error("Could not determine file duration")]
    DurationNotFound,

    #[error("Invalid duration field: {raw:?}")]
    DurationParseError { raw: String },

    #[error("Start position {start_secs}s is beyond file duration {duration_secs}s")]
    StartPositionBeyondDuration { start_secs: f64, duration_secs: u64 },

    #[error("Start chunk index {index} out of range (file has {total} chunks)")]
    StartIndexOutOfRange { index: u32, total: u32 },

    #[error("Error splitting chunk {index} ({}): {reason}", output_path.display())]
    ChunkExtraction {
        index: u32,
        output_path: PathBuf,
        reason: String,
        failed_chunks: usize,
    },
}

impl MediaSplitterError {
    /// Bad request parameters or filesystem preconditions.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidChunkLength { .. }
                | Self::InvalidChunkCount
                | Self::InvalidStartOffset { .. }
                | Self::OutputDirectoryMissing { .. }
                | Self::OutputDirectoryCreateFailed { .. }
                | Self::InputFileNotFound { .. }
        )
    }

    /// Failures while reading the duration out of the transcoder.
    pub fn is_probe(&self) -> bool {
        matches!(
            self,
            Self::ProcessInvocationFailed { .. }
                | Self::DurationNotFound
                | Self::DurationParseError { .. }
        )
    }

    /// The requested window does not fit the probed file.
    pub fn is_plan(&self) -> bool {
        matches!(
            self,
            Self::StartPositionBeyondDuration { .. }
                | Self::StartIndexOutOfRange { .. }
                | Self::InvalidInputName { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MediaSplitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert!(MediaSplitterError::InvalidChunkLength { seconds: 0 }.is_validation());
        assert!(MediaSplitterError::DurationNotFound.is_probe());
        assert!(MediaSplitterError::StartIndexOutOfRange { index: 5, total: 5 }.is_plan());
        assert!(!MediaSplitterError::DurationNotFound.is_validation());
    }

    #[test]
    fn test_chunk_extraction_message() {
        let err = MediaSplitterError::ChunkExtraction {
            index: 3,
            output_path: PathBuf::from("/out/song_0003.mp3"),
            reason: "exit status: 1".to_string(),
            failed_chunks: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("chunk 3"));
        assert!(msg.contains("song_0003.mp3"));
        assert!(msg.contains("exit status: 1"));
    }
}
