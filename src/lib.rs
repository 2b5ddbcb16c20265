pub mod downloader;

pub use downloader::{
    DownloadError, DownloadRequest, DownloadType, Downloader, NetworkConfig, RunOutcome,
};
