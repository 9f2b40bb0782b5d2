use crate::error::{MediaSplitterError, Result};
use crate::services::transcoder::Transcoder;
use crate::types::FileProbe;
use std::path::Path;
use tracing::{debug, info};

const DURATION_PREFIX: &str = "Duration: ";
/// `HH:MM:SS`; fractional seconds after it are ignored.
const DURATION_WIDTH: usize = 8;

pub struct DurationProber;

impl DurationProber {
    pub async fn probe<T: Transcoder + ?Sized>(
        transcoder: &T,
        input_path: &Path,
        input_file_name: &str,
    ) -> Result<FileProbe> {
        let output = transcoder.analyze(input_path).await.map_err(|e| {
            MediaSplitterError::ProcessInvocationFailed {
                reason: format!("Error getting file duration: {}", e),
            }
        })?;

        if !output.success {
            return Err(MediaSplitterError::ProcessInvocationFailed {
                reason: format!("Error getting file duration: {}", output.status),
            });
        }

        let total_duration_secs = Self::parse_duration(&output.output)?;
        info!(
            "Probed '{}': {} seconds",
            input_path.display(),
            total_duration_secs
        );

        Ok(FileProbe {
            total_duration_secs,
            input_file_name: input_file_name.to_string(),
        })
    }

    /// Reads the whole-second duration from a diagnostic line like
    /// `Duration: 00:02:30.15, start: ...`.
    pub fn parse_duration(output: &str) -> Result<u64> {
        let start = output
            .find(DURATION_PREFIX)
            .ok_or(MediaSplitterError::DurationNotFound)?
            + DURATION_PREFIX.len();

        let raw = output
            .get(start..start + DURATION_WIDTH)
            .ok_or_else(|| MediaSplitterError::DurationParseError {
                raw: output[start..].chars().take(DURATION_WIDTH).collect(),
            })?;
        debug!("Raw duration field: {}", raw);

        let parse_error = || MediaSplitterError::DurationParseError {
            raw: raw.to_string(),
        };

        let fields = raw
            .split(':')
            .map(|part| part.parse::<u64>().map_err(|_| parse_error()))
            .collect::<Result<Vec<u64>>>()?;

        match fields.as_slice() {
            [hours, minutes, seconds] => Ok(hours * 3600 + minutes * 60 + seconds),
            _ => Err(parse_error()),
        }
    }
}
