//! The external transcoder behind probing and chunk extraction.

use crate::types::{ChunkSpec, SplitConfig};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Outcome of one transcoder run that managed to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// Human readable exit status, e.g. `exit status: 1`.
    pub status: String,
    /// Combined stdout and stderr text.
    pub output: String,
}

/// A command-line media tool able to analyze an input and cut chunks from it.
///
/// An `Err` means the tool could not be launched at all; a tool that ran and
/// failed reports `success: false` instead.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Runs the tool in analysis-only mode and returns its diagnostic output.
    async fn analyze(&self, input_path: &Path) -> std::io::Result<ToolOutput>;

    /// Writes a single chunk to `chunk.output_path`.
    async fn extract(&self, input_path: &Path, chunk: &ChunkSpec) -> std::io::Result<ToolOutput>;
}

pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
    audio_codec: String,
}

impl FfmpegTranscoder {
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            ffmpeg_path: config.transcoder_path.clone(),
            audio_codec: config.audio_codec.clone(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&SplitConfig::default())
    }

    fn build_analyze_args(input_path: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-f".to_string(),
            "null".to_string(),
            "-".to_string(),
        ]
    }

    fn build_extract_args(&self, input_path: &Path, chunk: &ChunkSpec) -> Vec<String> {
        vec![
            "-y".to_string(), // Overwrite output from earlier runs
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-ss".to_string(),
            format!("{:.6}", chunk.start_secs),
            "-t".to_string(),
            chunk.duration_secs.to_string(),
            "-acodec".to_string(),
            self.audio_codec.clone(),
            chunk.output_path.to_string_lossy().to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>) -> std::io::Result<ToolOutput> {
        debug!("Running {} {}", self.ffmpeg_path.display(), args.join(" "));

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await?;

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ToolOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            output: combined,
        })
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn analyze(&self, input_path: &Path) -> std::io::Result<ToolOutput> {
        self.run(Self::build_analyze_args(input_path)).await
    }

    async fn extract(&self, input_path: &Path, chunk: &ChunkSpec) -> std::io::Result<ToolOutput> {
        self.run(self.build_extract_args(input_path, chunk)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_analyze_args() {
        let args = FfmpegTranscoder::build_analyze_args(Path::new("/in/song.mp3"));
        assert_eq!(args, vec!["-i", "/in/song.mp3", "-f", "null", "-"]);
    }

    #[test]
    fn test_build_extract_args() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let chunk = ChunkSpec {
            index: 2,
            start_secs: 30.0,
            duration_secs: 30,
            output_path: PathBuf::from("/out/song_0002.mp3"),
        };

        let args = transcoder.build_extract_args(Path::new("/in/song.mp3"), &chunk);

        assert_eq!(args[0], "-y");
        assert!(args.windows(2).any(|w| w == ["-ss", "30.000000"]));
        assert!(args.windows(2).any(|w| w == ["-t", "30"]));
        assert!(args.windows(2).any(|w| w == ["-acodec", "libmp3lame"]));
        assert_eq!(args.last().map(String::as_str), Some("/out/song_0002.mp3"));
    }

    #[test]
    fn test_custom_codec() {
        let config = SplitConfig::default().with_audio_codec("aac");
        let transcoder = FfmpegTranscoder::new(&config);
        let chunk = ChunkSpec {
            index: 1,
            start_secs: 12.5,
            duration_secs: 10,
            output_path: PathBuf::from("out_0001.m4a"),
        };

        let args = transcoder.build_extract_args(Path::new("in.m4a"), &chunk);
        assert!(args.contains(&"aac".to_string()));
        assert!(args.contains(&"12.500000".to_string()));
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let config = SplitConfig::default()
            .with_transcoder_path("/nonexistent/bin/ffmpeg-for-media-splitter-tests");
        let transcoder = FfmpegTranscoder::new(&config);

        let result = transcoder.analyze(Path::new("whatever.mp3")).await;
        assert!(result.is_err());
    }
}
