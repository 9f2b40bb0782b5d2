//! # Media Splitter Library
//!
//! Splits a media file into fixed-length chunks by running ffmpeg once per
//! chunk, all chunks concurrently, and returns the chunk paths in order.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use media_splitter::{MediaSplitter, SplitConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let splitter = MediaSplitter::new(SplitConfig::default());
//!
//!     // 30 second chunks, creating ./chunks if needed
//!     let paths = splitter
//!         .split_by_chunks(30, "episode.mp3", "./chunks", true)
//!         .await?;
//!
//!     println!("Created {} chunks", paths.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod testing;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{MediaSplitterError, Result};
pub use services::{
    ChunkCoordinator, ChunkPlanner, ChunkWorker, DurationProber, FfmpegTranscoder, MediaSplitter,
    ParameterValidator, ToolOutput, Transcoder,
};
pub use types::{
    ChunkPlan, ChunkResult, ChunkSpec, FileProbe, PlanMode, SplitConfig, SplitReport,
    SplitRequest, ValidatedRequest,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
