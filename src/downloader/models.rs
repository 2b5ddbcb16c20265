// Common data models for the downloader

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What to fetch from the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DownloadType {
    /// Full video stream, merged with its audio track
    #[default]
    Video,
    /// Audio track only, converted by the extract-audio post-processor
    Audio,
}

impl fmt::Display for DownloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// Orientation of the requested video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoShape {
    /// Landscape upload
    #[default]
    Normal,
    /// Vertical short - target width and height are swapped
    Short,
}

impl fmt::Display for VideoShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// Target resolution for video downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Resolution {
    #[value(name = "1080p")]
    #[serde(rename = "1080p")]
    P1080,
    #[default]
    #[value(name = "720p")]
    #[serde(rename = "720p")]
    P720,
    #[value(name = "480p")]
    #[serde(rename = "480p")]
    P480,
    #[value(name = "360p")]
    #[serde(rename = "360p")]
    P360,
}

impl Resolution {
    /// Landscape pixel size for this resolution
    pub fn pixels(&self) -> (u32, u32) {
        match self {
            Self::P1080 => (1920, 1080),
            Self::P720 => (1280, 720),
            Self::P480 => (854, 480),
            Self::P360 => (640, 360),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Container for video downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoContainer {
    #[default]
    Mp4,
    Webm,
    Mkv,
}

impl VideoContainer {
    pub fn ext(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
            Self::Mkv => "mkv",
        }
    }
}

impl fmt::Display for VideoContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ext())
    }
}

/// Codec for audio extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    #[default]
    Mp3,
    M4a,
    Opus,
    Wav,
}

impl AudioCodec {
    pub fn ext(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Opus => "opus",
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ext())
    }
}

/// One download request - transient, held only for a single invocation
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub download_type: DownloadType,
    pub shape: VideoShape,
    pub resolution: Resolution,
    pub video_container: VideoContainer,
    pub audio_codec: AudioCodec,
    /// Output filename override, sanitized before use
    pub custom_filename: Option<String>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            download_type: DownloadType::default(),
            shape: VideoShape::default(),
            resolution: Resolution::default(),
            video_container: VideoContainer::default(),
            audio_codec: AudioCodec::default(),
            custom_filename: None,
        }
    }

    /// Target pixel size, width/height swapped for shorts
    pub fn target_size(&self) -> (u32, u32) {
        let (w, h) = self.resolution.pixels();
        match self.shape {
            VideoShape::Normal => (w, h),
            VideoShape::Short => (h, w),
        }
    }

    /// Extension the finished file is expected to carry
    pub fn output_ext(&self) -> &'static str {
        match self.download_type {
            DownloadType::Video => self.video_container.ext(),
            DownloadType::Audio => self.audio_codec.ext(),
        }
    }
}

/// One stream offered by the remote, as reported by the probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamFormat {
    pub format_id: String,
    pub ext: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Video metadata returned by the probe call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub uploader: String,
    pub duration_seconds: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub formats: Vec<StreamFormat>,
}

impl VideoInfo {
    pub fn duration_minutes_seconds(&self) -> (u64, u64) {
        (self.duration_seconds / 60, self.duration_seconds % 60)
    }
}

/// Download progress information parsed from yt-dlp output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadProgress {
    pub percent: f32,
    pub status: String,
}

/// Network options forwarded to yt-dlp
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// SOCKS5/HTTP proxy URL (e.g. "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Socket timeout in seconds
    pub timeout: Option<u32>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
        }
    }
}

impl NetworkConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_swaps_target_size() {
        let mut request = DownloadRequest::new("https://youtu.be/abc");
        request.resolution = Resolution::P720;
        assert_eq!(request.target_size(), (1280, 720));

        request.shape = VideoShape::Short;
        assert_eq!(request.target_size(), (720, 1280));
    }

    #[test]
    fn output_ext_follows_download_type() {
        let mut request = DownloadRequest::new("https://youtu.be/abc");
        request.video_container = VideoContainer::Mkv;
        request.audio_codec = AudioCodec::Opus;
        assert_eq!(request.output_ext(), "mkv");

        request.download_type = DownloadType::Audio;
        assert_eq!(request.output_ext(), "opus");
    }

    #[test]
    fn resolution_defaults_to_720p() {
        assert_eq!(Resolution::default().pixels(), (1280, 720));
        assert_eq!(Resolution::default().label(), "720p");
    }
}
