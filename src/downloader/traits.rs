// Backend trait seam between the pipeline and yt-dlp

use std::path::Path;

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{DownloadRequest, NetworkConfig, VideoInfo};

/// The two external-tool invocations of one run: metadata probe and fetch.
#[async_trait]
pub trait FetchBackend: Send + Sync {
    /// Name of the backend (for logging)
    fn name(&self) -> &'static str;

    /// Probe the URL for metadata without downloading
    async fn probe(&self, url: &str, network: &NetworkConfig) -> Result<VideoInfo, DownloadError>;

    /// Download and transcode into `output_dir` with the given file stem
    async fn fetch(
        &self,
        request: &DownloadRequest,
        selector: &str,
        output_dir: &Path,
        stem: &str,
        network: &NetworkConfig,
    ) -> Result<(), DownloadError>;
}
