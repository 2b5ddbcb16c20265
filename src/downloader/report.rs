// Result rendering - the strings handed back to the caller

use std::path::Path;

use super::errors::DownloadError;
use super::models::{DownloadRequest, DownloadType, VideoInfo, VideoShape};

/// Render the success report for a finished download.
pub fn success(
    request: &DownloadRequest,
    info: &VideoInfo,
    path: &Path,
    size: Option<String>,
    actual_ext: &str,
) -> String {
    let (type_emoji, type_name) = match request.download_type {
        DownloadType::Audio => ("🎵", "audio"),
        DownloadType::Video => ("🎬", "video"),
    };
    let (minutes, seconds) = info.duration_minutes_seconds();
    let shape_line = match request.shape {
        VideoShape::Short => "📱 Short video",
        VideoShape::Normal => "🖥️ Normal video",
    };
    let (tw, th) = request.target_size();
    let requested_ext = request.output_ext();
    let size_line = size.unwrap_or_else(|| "unknown".to_string());

    format!(
        "{type_emoji} YouTube {type_name} download complete!\n\
         \n\
         📹 Title: {title}\n\
         👤 Uploader: {uploader}\n\
         ⏱️ Duration: {minutes}m{seconds:02}s\n\
         {shape_line}\n\
         📏 Resolution: {resolution} ({tw}x{th})\n\
         📁 Saved to: {path}\n\
         📐 File size: {size_line}\n\
         📦 Format: {requested_ext} (actual: {actual_ext})\n\
         ✅ Status: download succeeded",
        title = info.title,
        uploader = info.uploader,
        resolution = request.resolution.label(),
        path = path.display(),
    )
}

/// Render the failure report. Every error funnels through here.
pub fn failure(url: &str, error: &DownloadError) -> String {
    format!(
        "❌ YouTube download error\n\
         \n\
         🔗 URL: {url}\n\
         💥 Error: {error}\n\
         \n\
         Please check:\n\
         • the URL is correct\n\
         • your internet connection\n\
         • yt-dlp is installed and up to date\n\
         • the video is still available"
    )
}
