use std::path::PathBuf;

use clap::Parser;

use ytgrab::downloader::models::{
    AudioCodec, DownloadRequest, DownloadType, NetworkConfig, Resolution, VideoContainer,
    VideoShape,
};

/// Download a YouTube video, or extract its audio, with yt-dlp.
///
/// The finished file lands in the nearest `output` directory found by
/// walking up from the working directory (created there if none exists),
/// unless --output-dir says otherwise.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Video URL to download.
    pub url: String,

    /// What to fetch: the full video or just its audio track.
    #[arg(short = 't', long, value_enum, default_value_t = DownloadType::Video)]
    pub download_type: DownloadType,

    /// Orientation of the target: a landscape video or a vertical short.
    #[arg(long, value_enum, default_value_t = VideoShape::Normal)]
    pub shape: VideoShape,

    /// Target resolution for video downloads.
    #[arg(short, long, value_enum, default_value_t = Resolution::P720)]
    pub resolution: Resolution,

    /// Container for video downloads.
    #[arg(long = "video-format", value_enum, default_value_t = VideoContainer::Mp4)]
    pub video_format: VideoContainer,

    /// Codec for audio extraction.
    #[arg(long = "audio-format", value_enum, default_value_t = AudioCodec::Mp3)]
    pub audio_format: AudioCodec,

    /// Output filename override (sanitized before use).
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Explicit output directory (skips the `output` folder discovery).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// SOCKS5/HTTP proxy URL forwarded to yt-dlp.
    #[arg(long)]
    pub proxy: Option<String>,

    /// Socket timeout in seconds forwarded to yt-dlp.
    #[arg(long, default_value_t = 30)]
    pub socket_timeout: u32,
}

impl Cli {
    pub fn to_request(&self) -> DownloadRequest {
        DownloadRequest {
            url: self.url.clone(),
            download_type: self.download_type,
            shape: self.shape,
            resolution: self.resolution,
            video_container: self.video_format,
            audio_codec: self.audio_format,
            custom_filename: self.filename.clone(),
        }
    }

    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig::default()
            .with_proxy(self.proxy.clone())
            .with_timeout(self.socket_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_input_schema() {
        let cli = Cli::parse_from(["ytgrab", "https://youtu.be/abc"]);
        let request = cli.to_request();
        assert_eq!(request.download_type, DownloadType::Video);
        assert_eq!(request.shape, VideoShape::Normal);
        assert_eq!(request.resolution, Resolution::P720);
        assert_eq!(request.video_container, VideoContainer::Mp4);
        assert_eq!(request.audio_codec, AudioCodec::Mp3);
        assert!(request.custom_filename.is_none());
        assert_eq!(cli.network_config().timeout, Some(30));
    }

    #[test]
    fn enumerated_flags_parse_their_labels() {
        let cli = Cli::parse_from([
            "ytgrab",
            "https://youtu.be/abc",
            "-t",
            "audio",
            "--shape",
            "short",
            "-r",
            "1080p",
            "--video-format",
            "mkv",
            "--audio-format",
            "opus",
            "--filename",
            "my clip",
        ]);
        let request = cli.to_request();
        assert_eq!(request.download_type, DownloadType::Audio);
        assert_eq!(request.shape, VideoShape::Short);
        assert_eq!(request.resolution, Resolution::P1080);
        assert_eq!(request.video_container, VideoContainer::Mkv);
        assert_eq!(request.audio_codec, AudioCodec::Opus);
        assert_eq!(request.custom_filename.as_deref(), Some("my clip"));
    }

    #[test]
    fn proxy_and_timeout_feed_network_config() {
        let cli = Cli::parse_from([
            "ytgrab",
            "https://youtu.be/abc",
            "--proxy",
            "socks5://127.0.0.1:1080",
            "--socket-timeout",
            "15",
        ]);
        let net = cli.network_config();
        assert_eq!(net.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(net.timeout, Some(15));
    }
}
