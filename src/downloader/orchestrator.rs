// Orchestrator - the single stateless download operation

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, info};

use super::errors::DownloadError;
use super::models::{DownloadRequest, NetworkConfig, VideoInfo};
use super::traits::FetchBackend;
use super::{fetch, filename, format_selector, output, probe, report, tools};

/// Production backend that shells out to yt-dlp.
pub struct YtDlpBackend {
    ytdlp_path: String,
}

impl YtDlpBackend {
    pub fn new() -> Self {
        Self {
            ytdlp_path: tools::find_ytdlp(),
        }
    }
}

impl Default for YtDlpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchBackend for YtDlpBackend {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn probe(&self, url: &str, network: &NetworkConfig) -> Result<VideoInfo, DownloadError> {
        probe::probe(&self.ytdlp_path, url, network).await
    }

    async fn fetch(
        &self,
        request: &DownloadRequest,
        selector: &str,
        output_dir: &Path,
        stem: &str,
        network: &NetworkConfig,
    ) -> Result<(), DownloadError> {
        fetch::run(&self.ytdlp_path, request, selector, output_dir, stem, network).await
    }
}

/// Outcome of one run: the report string plus whether it succeeded.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: String,
    pub succeeded: bool,
}

/// One-shot downloader. Stateless across runs; every `run` resolves the
/// output directory, probes, fetches and reports independently.
pub struct Downloader {
    backend: Box<dyn FetchBackend>,
    network: NetworkConfig,
    start_dir: Option<PathBuf>,
    output_override: Option<PathBuf>,
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            backend: Box::new(YtDlpBackend::new()),
            network: NetworkConfig::default(),
            start_dir: None,
            output_override: None,
        }
    }

    pub fn with_backend(mut self, backend: Box<dyn FetchBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Where the `output` directory walk starts; defaults to the
    /// current working directory.
    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Skip discovery and write into this directory.
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_override = dir;
        self
    }

    /// Run one download. Every failure is caught here and rendered as
    /// the failure report; nothing escalates past this point.
    pub async fn run(&self, request: &DownloadRequest) -> RunOutcome {
        match self.execute(request).await {
            Ok(report) => RunOutcome {
                report,
                succeeded: true,
            },
            Err(e) => {
                error!("download failed: {e}");
                RunOutcome {
                    report: report::failure(&request.url, &e),
                    succeeded: false,
                }
            }
        }
    }

    async fn execute(&self, request: &DownloadRequest) -> Result<String, DownloadError> {
        let output_dir = self.resolve_output_dir()?;
        info!("output directory: {}", output_dir.display());

        let selector = format_selector::build(request);

        info!("probing metadata via {}", self.backend.name());
        let video_info = self.backend.probe(&request.url, &self.network).await?;
        probe::log_summary(&video_info, request.target_size(), &selector);

        let stem = match &request.custom_filename {
            Some(name) if !name.trim().is_empty() => {
                let stem = filename::sanitize(name.trim());
                info!("using custom filename: {stem}");
                stem
            }
            _ => filename::sanitize(&video_info.title),
        };

        self.backend
            .fetch(request, &selector, &output_dir, &stem, &self.network)
            .await?;

        let expected_ext = request.output_ext();
        let (path, size, actual_ext) =
            match output::locate_download(&output_dir, &stem, request.download_type, expected_ext) {
                Some(path) => {
                    let size = output::file_size(&path);
                    let actual_ext = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("unknown")
                        .to_string();
                    (path, size, actual_ext)
                }
                // The fetch succeeded but the file is not where it was
                // expected; report the predicted path without a size
                None => (
                    output_dir.join(format!("{stem}.{expected_ext}")),
                    None,
                    "unknown".to_string(),
                ),
            };

        info!("saved to {}", path.display());
        Ok(report::success(request, &video_info, &path, size, &actual_ext))
    }

    fn resolve_output_dir(&self) -> Result<PathBuf, DownloadError> {
        if let Some(dir) = &self.output_override {
            fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }
        let start = match &self.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(output::resolve_output_dir(&start)?)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}
