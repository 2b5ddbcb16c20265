// Metadata probe - one `--dump-json` call before the real fetch

use std::collections::BTreeMap;

use tracing::info;

use super::errors::DownloadError;
use super::models::{NetworkConfig, StreamFormat, VideoInfo};
use super::utils;

/// Probe the URL for metadata without downloading anything.
pub async fn probe(
    ytdlp: &str,
    url: &str,
    network: &NetworkConfig,
) -> Result<VideoInfo, DownloadError> {
    let mut args = vec![
        "--dump-json".to_string(),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
    ];
    args.extend(utils::network_args(network));
    args.push(url.to_string());

    let output =
        utils::run_output_with_timeout(ytdlp, &args, utils::probe_timeout_secs(network)).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(stderr.into());
    }

    parse_video_info(&output.stdout)
}

fn parse_video_info(stdout: &[u8]) -> Result<VideoInfo, DownloadError> {
    let json_str = String::from_utf8_lossy(stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| DownloadError::ParseError(format!("invalid probe JSON: {e}")))?;

    let formats = json["formats"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .map(|f| StreamFormat {
                    format_id: f["format_id"].as_str().unwrap_or("unknown").to_string(),
                    ext: f["ext"].as_str().unwrap_or("unknown").to_string(),
                    width: f["width"].as_u64().map(|w| w as u32),
                    height: f["height"].as_u64().map(|h| h as u32),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(VideoInfo {
        title: json["title"].as_str().unwrap_or("Unknown").to_string(),
        uploader: json["uploader"].as_str().unwrap_or("Unknown").to_string(),
        duration_seconds: json["duration"].as_f64().unwrap_or(0.0) as u64,
        width: json["width"].as_u64().map(|w| w as u32),
        height: json["height"].as_u64().map(|h| h as u32),
        formats,
    })
}

/// Log what the probe found and how it lines up with the target size.
pub fn log_summary(info: &VideoInfo, target: (u32, u32), selector: &str) {
    info!("found: {}", info.title);
    info!("uploader: {}", info.uploader);
    let (minutes, seconds) = info.duration_minutes_seconds();
    if info.duration_seconds > 0 {
        info!("duration: {minutes}m{seconds:02}s");
    }
    info!(
        "original size: {}x{}",
        info.width.unwrap_or(0),
        info.height.unwrap_or(0)
    );
    info!("available formats: {}", info.formats.len());

    // Resolution histogram, tallest first
    let mut by_size: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    for f in &info.formats {
        if let (Some(w), Some(h)) = (f.width, f.height) {
            *by_size.entry((h, w)).or_insert(0) += 1;
        }
    }
    for ((h, w), count) in by_size.iter().rev() {
        info!("  {w}x{h}: {count} formats");
    }

    let (tw, th) = target;
    info!("target size: {tw}x{th}");
    let matching = info
        .formats
        .iter()
        .filter(|f| match (f.width, f.height) {
            (Some(w), Some(h)) => w.abs_diff(tw) <= 200 && h.abs_diff(th) <= 200,
            _ => false,
        })
        .take(5);
    for f in matching {
        info!(
            "  candidate id:{} {}x{} {}",
            f.format_id,
            f.width.unwrap_or(0),
            f.height.unwrap_or(0),
            f.ext
        );
    }

    let head: String = selector.chars().take(100).collect();
    info!("format selector: {head}...");
}
