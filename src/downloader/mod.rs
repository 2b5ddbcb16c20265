// Downloader module - yt-dlp orchestration layer

pub mod errors;
pub mod fetch;
pub mod filename;
pub mod format_selector;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod probe;
pub mod report;
pub mod tools;
pub mod traits;
pub mod utils;

pub use errors::DownloadError;
pub use models::{
    AudioCodec, DownloadProgress, DownloadRequest, DownloadType, NetworkConfig, Resolution,
    StreamFormat, VideoContainer, VideoInfo, VideoShape,
};
pub use orchestrator::{Downloader, RunOutcome};
pub use traits::FetchBackend;
