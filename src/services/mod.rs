pub mod coordinator;
pub mod planner;
pub mod prober;
pub mod splitter;
pub mod transcoder;
pub mod validator;
pub mod worker;

pub use coordinator::ChunkCoordinator;
pub use planner::ChunkPlanner;
pub use prober::DurationProber;
pub use splitter::MediaSplitter;
pub use transcoder::{FfmpegTranscoder, ToolOutput, Transcoder};
pub use validator::ParameterValidator;
pub use worker::ChunkWorker;
