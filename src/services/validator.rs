use crate::error::{MediaSplitterError, Result};
use crate::types::{PlanMode, SplitRequest, ValidatedRequest};
use std::path::Path;
use tokio::fs;
use tracing::info;

pub struct ParameterValidator;

impl ParameterValidator {
    /// Checks a request before any probing happens.
    ///
    /// Scalar parameters are checked first so that a bad chunk length never
    /// touches the filesystem. The only side effect is creating the output
    /// directory (one level, never its parents) when the request allows it.
    pub async fn validate(request: &SplitRequest) -> Result<ValidatedRequest> {
        if request.seconds_per_chunk <= 0 {
            return Err(MediaSplitterError::InvalidChunkLength {
                seconds: request.seconds_per_chunk,
            });
        }
        let seconds_per_chunk = u32::try_from(request.seconds_per_chunk).map_err(|_| {
            MediaSplitterError::InvalidChunkLength {
                seconds: request.seconds_per_chunk,
            }
        })?;

        Self::validate_mode(&request.mode)?;

        Self::ensure_output_directory(&request.output_dir, request.create_dir_if_missing).await?;

        let input_file_name = Self::check_input_file(&request.input_path).await?;

        Ok(ValidatedRequest {
            input_path: request.input_path.clone(),
            output_dir: request.output_dir.clone(),
            seconds_per_chunk,
            input_file_name,
            mode: request.mode.clone(),
        })
    }

    fn validate_mode(mode: &PlanMode) -> Result<()> {
        let max_chunks = match mode {
            PlanMode::Full => None,
            PlanMode::FromOffset {
                start_secs,
                max_chunks,
            } => {
                if !start_secs.is_finite() || *start_secs < 0.0 {
                    return Err(MediaSplitterError::InvalidStartOffset {
                        offset: *start_secs,
                    });
                }
                *max_chunks
            }
            PlanMode::FromIndex { max_chunks, .. } => *max_chunks,
        };

        if max_chunks == Some(0) {
            return Err(MediaSplitterError::InvalidChunkCount);
        }
        Ok(())
    }

    async fn ensure_output_directory(output_dir: &Path, create: bool) -> Result<()> {
        match fs::metadata(output_dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(MediaSplitterError::OutputDirectoryMissing {
                path: output_dir.to_path_buf(),
                reason: "not a directory".to_string(),
            }),
            Err(e) if !create => Err(MediaSplitterError::OutputDirectoryMissing {
                path: output_dir.to_path_buf(),
                reason: e.to_string(),
            }),
            Err(_) => {
                fs::create_dir(output_dir).await.map_err(|source| {
                    MediaSplitterError::OutputDirectoryCreateFailed {
                        path: output_dir.to_path_buf(),
                        source,
                    }
                })?;
                info!("Created output directory: {}", output_dir.display());
                Ok(())
            }
        }
    }

    async fn check_input_file(input_path: &Path) -> Result<String> {
        let is_file = fs::metadata(input_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if !is_file {
            return Err(MediaSplitterError::InputFileNotFound {
                path: input_path.to_path_buf(),
            });
        }

        Ok(input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_input(dir: &Path) -> std::path::PathBuf {
        let input = dir.join("track.mp3");
        std::fs::write(&input, b"not really audio").unwrap();
        input
    }

    #[tokio::test]
    async fn test_rejects_non_positive_chunk_length_without_side_effects() {
        let work = tempdir().unwrap();
        let missing_out = work.path().join("out");

        for seconds in [0, -5] {
            let request = SplitRequest::new(work.path().join("nope.mp3"), &missing_out, seconds)
                .create_dir_if_missing(true);
            let err = ParameterValidator::validate(&request).await.unwrap_err();
            assert!(matches!(err, MediaSplitterError::InvalidChunkLength { .. }));
        }

        assert!(!missing_out.exists());
    }

    #[tokio::test]
    async fn test_missing_output_directory() {
        let work = tempdir().unwrap();
        let input = write_input(work.path());
        let request = SplitRequest::new(&input, work.path().join("out"), 30);

        let err = ParameterValidator::validate(&request).await.unwrap_err();
        assert!(matches!(err, MediaSplitterError::OutputDirectoryMissing { .. }));
    }

    #[tokio::test]
    async fn test_creates_single_output_directory() {
        let work = tempdir().unwrap();
        let input = write_input(work.path());
        let out = work.path().join("out");
        let request = SplitRequest::new(&input, &out, 30).create_dir_if_missing(true);

        let validated = ParameterValidator::validate(&request).await.unwrap();
        assert!(out.is_dir());
        assert_eq!(validated.input_file_name, "track.mp3");
        assert_eq!(validated.seconds_per_chunk, 30);
    }

    #[tokio::test]
    async fn test_does_not_create_parent_directories() {
        let work = tempdir().unwrap();
        let input = write_input(work.path());
        let nested = work.path().join("a").join("b");
        let request = SplitRequest::new(&input, &nested, 30).create_dir_if_missing(true);

        let err = ParameterValidator::validate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            MediaSplitterError::OutputDirectoryCreateFailed { .. }
        ));
        assert!(!work.path().join("a").exists());
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let work = tempdir().unwrap();
        let request = SplitRequest::new(work.path().join("missing.mp3"), work.path(), 30);

        let err = ParameterValidator::validate(&request).await.unwrap_err();
        assert!(matches!(err, MediaSplitterError::InputFileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_directory_as_input_is_not_found() {
        let work = tempdir().unwrap();
        let request = SplitRequest::new(work.path(), work.path(), 30);

        let err = ParameterValidator::validate(&request).await.unwrap_err();
        assert!(matches!(err, MediaSplitterError::InputFileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_rejects_bad_mode_parameters() {
        let work = tempdir().unwrap();
        let input = write_input(work.path());

        let negative = SplitRequest::new(&input, work.path(), 30).with_mode(PlanMode::FromOffset {
            start_secs: -1.0,
            max_chunks: None,
        });
        assert!(matches!(
            ParameterValidator::validate(&negative).await.unwrap_err(),
            MediaSplitterError::InvalidStartOffset { .. }
        ));

        let zero_count = SplitRequest::new(&input, work.path(), 30).with_mode(PlanMode::FromIndex {
            start_index: 0,
            max_chunks: Some(0),
        });
        assert!(matches!(
            ParameterValidator::validate(&zero_count).await.unwrap_err(),
            MediaSplitterError::InvalidChunkCount
        ));
    }
}
