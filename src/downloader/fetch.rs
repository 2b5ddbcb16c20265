// Fetch execution - the one yt-dlp call that downloads and transcodes

use std::path::Path;
use std::process::Stdio;

use lazy_static::lazy_static;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

use super::errors::DownloadError;
use super::models::{DownloadProgress, DownloadRequest, DownloadType, NetworkConfig};
use super::utils;

/// Parse a yt-dlp progress line like
/// `[download]   6.2% of ~ 343.72MiB at  420.30KiB/s ETA 12:32 (frag 29/454)`.
pub fn parse_progress(line: &str) -> Option<DownloadProgress> {
    lazy_static! {
        static ref PROGRESS_RE: Regex = Regex::new(
            r"\[download\]\s+(\d+\.?\d*)%\s+of\s+~?\s*(\d+\.?\d*\s*\w+)\s+at\s+(\d+\.?\d*\s*\w+/s)(?:\s+ETA\s+(\S+))?(?:\s+\(frag\s+(\d+)/(\d+)\))?"
        ).unwrap();
        static ref DEST_RE: Regex = Regex::new(r"\[download\]\s+Destination:\s+(.+)").unwrap();
        static ref MERGE_RE: Regex = Regex::new(r"\[Merger?\]\s+Merging").unwrap();
        static ref ALREADY_RE: Regex = Regex::new(r"has already been downloaded").unwrap();
    }

    if let Some(caps) = PROGRESS_RE.captures(line) {
        let percent: f32 = caps.get(1)?.as_str().parse().ok()?;
        let size = caps.get(2).map(|m| m.as_str()).unwrap_or("?");
        let speed = caps.get(3).map(|m| m.as_str()).unwrap_or("?");
        let eta = caps.get(4).map(|m| m.as_str()).unwrap_or("");
        let frag_current = caps.get(5).map(|m| m.as_str());
        let frag_total = caps.get(6).map(|m| m.as_str());

        let status = if let (Some(fc), Some(ft)) = (frag_current, frag_total) {
            format!("{percent:.1}% of {size} @ {speed} ETA {eta} (frag {fc}/{ft})")
        } else if !eta.is_empty() {
            format!("{percent:.1}% of {size} @ {speed} ETA {eta}")
        } else {
            format!("{percent:.1}% of {size} @ {speed}")
        };

        return Some(DownloadProgress { percent, status });
    }

    if let Some(caps) = DEST_RE.captures(line) {
        let filename = caps.get(1).map(|m| m.as_str()).unwrap_or("file");
        let short_name: String = filename
            .split('/')
            .next_back()
            .unwrap_or(filename)
            .chars()
            .take(50)
            .collect();
        return Some(DownloadProgress {
            percent: 0.0,
            status: format!("starting: {short_name}"),
        });
    }

    if MERGE_RE.is_match(line) {
        return Some(DownloadProgress {
            percent: 99.0,
            status: "merging video and audio".to_string(),
        });
    }

    if ALREADY_RE.is_match(line) {
        return Some(DownloadProgress {
            percent: 100.0,
            status: "file already downloaded".to_string(),
        });
    }

    None
}

/// Build the full yt-dlp argument vector for one fetch.
pub fn build_args(
    request: &DownloadRequest,
    selector: &str,
    output_dir: &Path,
    stem: &str,
    network: &NetworkConfig,
) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        selector.to_string(),
        "--no-playlist".to_string(),
        "--newline".to_string(),
    ];
    args.extend(utils::network_args(network));
    args.push("-P".to_string());
    args.push(output_dir.to_string_lossy().to_string());
    // Default yt-dlp template is "%(title)s [%(id)s].%(ext)s" - pin the
    // sanitized stem instead so the file can be located afterwards
    args.push("-o".to_string());
    args.push(format!("{stem}.%(ext)s"));

    match request.download_type {
        DownloadType::Video => {
            let container = request.video_container.ext();
            args.push("--merge-output-format".to_string());
            args.push(container.to_string());
            // Force the requested container even when the selected
            // streams came down in another one
            args.push("--recode-video".to_string());
            args.push(container.to_string());
        }
        DownloadType::Audio => {
            args.push("-x".to_string());
            args.push("--audio-format".to_string());
            args.push(request.audio_codec.ext().to_string());
            args.push("--audio-quality".to_string());
            args.push(match request.audio_codec {
                super::models::AudioCodec::Mp3 => "320K".to_string(),
                _ => "0".to_string(),
            });
        }
    }

    args.push(request.url.clone());
    args
}

/// Run the fetch, streaming progress lines into the log. Returns once
/// yt-dlp exits; a non-zero exit surfaces the captured stderr.
pub async fn run(
    ytdlp: &str,
    request: &DownloadRequest,
    selector: &str,
    output_dir: &Path,
    stem: &str,
    network: &NetworkConfig,
) -> Result<(), DownloadError> {
    let args = build_args(request, selector, output_dir, stem, network);
    debug!("yt-dlp fetch args: {args:?}");
    info!("starting {} download", request.download_type);

    let mut child = TokioCommand::new(ytdlp)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DownloadError::ToolNotFound(format!("{ytdlp}: {e}")))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| DownloadError::ExecutionError("failed to capture yt-dlp stdout".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| DownloadError::ExecutionError("failed to capture yt-dlp stderr".to_string()))?;

    let stderr_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        let mut collected = Vec::new();
        while let Ok(Some(line)) = lines.next_line().await {
            collected.push(line);
        }
        collected.join("\n")
    });

    let mut lines = BufReader::new(stdout).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(progress) = parse_progress(&line) {
            info!("{}", progress.status);
        } else if line.contains("[ExtractAudio]") || line.contains("[VideoConvertor]") {
            info!("post-processing: {line}");
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| DownloadError::ExecutionError(format!("failed to wait for yt-dlp: {e}")))?;
    let stderr_output = stderr_task.await.unwrap_or_default();

    if status.success() {
        info!("download finished");
        Ok(())
    } else {
        Err(stderr_output.into())
    }
}
