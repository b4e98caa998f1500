pub mod orchestrator;
pub mod progress;
pub mod quality;
pub mod video_info;

pub use orchestrator::{build_args, BatchSummary, DownloadRequest, Orchestrator};
pub use quality::Quality;
pub use video_info::VideoInfo;
