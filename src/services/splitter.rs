use crate::error::{MediaSplitterError, Result};
use crate::services::coordinator::ChunkCoordinator;
use crate::services::planner::ChunkPlanner;
use crate::services::prober::DurationProber;
use crate::services::transcoder::{FfmpegTranscoder, Transcoder};
use crate::services::validator::ParameterValidator;
use crate::types::{ChunkPlan, FileProbe, PlanMode, SplitConfig, SplitRequest, ValidatedRequest};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Entry point tying validation, probing, planning and extraction together.
pub struct MediaSplitter<T: Transcoder + 'static = FfmpegTranscoder> {
    config: SplitConfig,
    transcoder: Arc<T>,
}

impl MediaSplitter<FfmpegTranscoder> {
    pub fn new(config: SplitConfig) -> Self {
        let transcoder = Arc::new(FfmpegTranscoder::new(&config));
        Self { config, transcoder }
    }
}

impl<T: Transcoder + 'static> MediaSplitter<T> {
    pub fn with_transcoder(config: SplitConfig, transcoder: Arc<T>) -> Self {
        Self { config, transcoder }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Splits the whole file into chunks of `seconds_per_chunk`.
    pub async fn split_by_chunks(
        &self,
        seconds_per_chunk: i64,
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        create_dir_if_missing: bool,
    ) -> Result<Vec<PathBuf>> {
        let request = SplitRequest::new(input_path, output_dir, seconds_per_chunk)
            .create_dir_if_missing(create_dir_if_missing);
        self.split(&request).await
    }

    /// Produces up to `max_chunks` chunks starting at `start_secs`.
    pub async fn split_from_offset(
        &self,
        seconds_per_chunk: i64,
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        create_dir_if_missing: bool,
        start_secs: f64,
        max_chunks: Option<u32>,
    ) -> Result<Vec<PathBuf>> {
        let request = SplitRequest::new(input_path, output_dir, seconds_per_chunk)
            .create_dir_if_missing(create_dir_if_missing)
            .with_mode(PlanMode::FromOffset {
                start_secs,
                max_chunks,
            });
        self.split(&request).await
    }

    /// Produces up to `max_chunks` chunks of the full split, starting at the
    /// 0-based chunk `start_index`.
    pub async fn split_from_index(
        &self,
        seconds_per_chunk: i64,
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        create_dir_if_missing: bool,
        start_index: u32,
        max_chunks: Option<u32>,
    ) -> Result<Vec<PathBuf>> {
        let request = SplitRequest::new(input_path, output_dir, seconds_per_chunk)
            .create_dir_if_missing(create_dir_if_missing)
            .with_mode(PlanMode::FromIndex {
                start_index,
                max_chunks,
            });
        self.split(&request).await
    }

    pub async fn split(&self, request: &SplitRequest) -> Result<Vec<PathBuf>> {
        self.split_with_plan(request).await.map(|(_, paths)| paths)
    }

    /// Like `split`, also returning the plan the paths came from.
    pub async fn split_with_plan(
        &self,
        request: &SplitRequest,
    ) -> Result<(ChunkPlan, Vec<PathBuf>)> {
        let (validated, plan) = self.prepare(request).await?;

        let paths = ChunkCoordinator::run_plan(
            Arc::clone(&self.transcoder),
            &plan,
            &validated.input_path,
            self.config.max_concurrent_chunks,
        )
        .await?;

        info!(
            "Successfully split '{}' into {} chunks",
            validated.input_path.display(),
            paths.len()
        );
        Ok((plan, paths))
    }

    /// Validates and probes like `split`, but stops before extracting.
    pub async fn plan(&self, request: &SplitRequest) -> Result<ChunkPlan> {
        self.prepare(request).await.map(|(_, plan)| plan)
    }

    pub async fn probe(&self, input_path: &Path) -> Result<FileProbe> {
        let is_file = tokio::fs::metadata(input_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(MediaSplitterError::InputFileNotFound {
                path: input_path.to_path_buf(),
            });
        }

        let name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        DurationProber::probe(self.transcoder.as_ref(), input_path, &name).await
    }

    async fn prepare(&self, request: &SplitRequest) -> Result<(ValidatedRequest, ChunkPlan)> {
        let validated = ParameterValidator::validate(request).await?;

        let probe = DurationProber::probe(
            self.transcoder.as_ref(),
            &validated.input_path,
            &validated.input_file_name,
        )
        .await?;

        let plan = ChunkPlanner::plan(
            &probe,
            validated.seconds_per_chunk,
            &validated.output_dir,
            &validated.mode,
        )?;

        info!(
            "Planned {} chunks of {}s for '{}' ({}s total)",
            plan.len(),
            validated.seconds_per_chunk,
            probe.input_file_name,
            probe.total_duration_secs
        );

        Ok((validated, plan))
    }
}
