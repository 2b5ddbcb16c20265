// Format-selector construction
//
// Turns the enumerated request preferences into the yt-dlp `-f` query
// string. Video selection matches by target pixel size in tiers:
// exact size, slightly larger, slightly smaller, then height-only
// fallbacks down to plain `best`.

use super::models::{AudioCodec, DownloadRequest, DownloadType};

/// Build the yt-dlp format selector for a request.
pub fn build(request: &DownloadRequest) -> String {
    match request.download_type {
        DownloadType::Audio => audio_selector(request.audio_codec),
        DownloadType::Video => {
            let (w, h) = request.target_size();
            video_selector(w, h, request.video_container.ext())
        }
    }
}

fn audio_selector(codec: AudioCodec) -> String {
    match codec {
        // mp3 is produced by the post-processor; m4a is the preferred source
        AudioCodec::Mp3 => "bestaudio[ext=m4a]/bestaudio/best".to_string(),
        other => format!("bestaudio[ext={}]/bestaudio/best", other.ext()),
    }
}

fn video_selector(w: u32, h: u32, ext: &str) -> String {
    let tiers = [
        // exact size
        format!("bestvideo[width={w}][height={h}][ext={ext}]+bestaudio[ext=m4a]"),
        format!("bestvideo[width={w}][height={h}]+bestaudio"),
        // same or slightly larger
        format!(
            "bestvideo[width>={w}][height>={h}][width<={}][height<={}][ext={ext}]+bestaudio[ext=m4a]",
            w + 100,
            h + 100
        ),
        format!(
            "bestvideo[width>={w}][height>={h}][width<={}][height<={}]+bestaudio",
            w + 100,
            h + 100
        ),
        // slightly smaller
        format!(
            "bestvideo[width<={w}][height<={h}][width>={}][height>={}][ext={ext}]+bestaudio[ext=m4a]",
            w.saturating_sub(200),
            h.saturating_sub(200)
        ),
        format!(
            "bestvideo[width<={w}][height<={h}][width>={}][height>={}]+bestaudio",
            w.saturating_sub(200),
            h.saturating_sub(200)
        ),
        // height-only fallbacks
        format!("bestvideo[height={h}][ext={ext}]+bestaudio"),
        format!(
            "bestvideo[height<={h}][height>={}][ext={ext}]+bestaudio",
            h.saturating_sub(200)
        ),
        format!("bestvideo[height<={h}][ext={ext}]+bestaudio"),
        format!("best[ext={ext}]"),
        "best".to_string(),
    ];
    tiers.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::models::{Resolution, VideoContainer, VideoShape};

    fn video_request(resolution: Resolution, shape: VideoShape) -> DownloadRequest {
        let mut request = DownloadRequest::new("https://youtu.be/abc");
        request.resolution = resolution;
        request.shape = shape;
        request
    }

    #[test]
    fn audio_mp3_prefers_m4a_source() {
        let mut request = DownloadRequest::new("https://youtu.be/abc");
        request.download_type = DownloadType::Audio;
        assert_eq!(build(&request), "bestaudio[ext=m4a]/bestaudio/best");
    }

    #[test]
    fn audio_other_codecs_prefer_their_own_ext() {
        let mut request = DownloadRequest::new("https://youtu.be/abc");
        request.download_type = DownloadType::Audio;
        request.audio_codec = AudioCodec::Opus;
        assert_eq!(build(&request), "bestaudio[ext=opus]/bestaudio/best");
    }

    #[test]
    fn video_selector_starts_with_exact_size() {
        let selector = build(&video_request(Resolution::P720, VideoShape::Normal));
        assert!(selector
            .starts_with("bestvideo[width=1280][height=720][ext=mp4]+bestaudio[ext=m4a]/"));
    }

    #[test]
    fn video_selector_ends_with_plain_best() {
        let selector = build(&video_request(Resolution::P1080, VideoShape::Normal));
        assert!(selector.ends_with("/best[ext=mp4]/best"));
    }

    #[test]
    fn short_swaps_dimensions_in_selector() {
        let selector = build(&video_request(Resolution::P720, VideoShape::Short));
        assert!(selector.starts_with("bestvideo[width=720][height=1280]"));
        assert!(selector.contains("[width<=820][height<=1380]"));
    }

    #[test]
    fn selector_contains_no_whitespace() {
        for resolution in [
            Resolution::P1080,
            Resolution::P720,
            Resolution::P480,
            Resolution::P360,
        ] {
            for shape in [VideoShape::Normal, VideoShape::Short] {
                let selector = build(&video_request(resolution, shape));
                assert!(!selector.chars().any(char::is_whitespace), "{selector}");
            }
        }
    }

    #[test]
    fn container_ext_flows_through_every_tier() {
        let mut request = video_request(Resolution::P480, VideoShape::Normal);
        request.video_container = VideoContainer::Webm;
        let selector = build(&request);
        assert!(selector.contains("[ext=webm]"));
        assert!(!selector.contains("[ext=mp4]"));
    }

    #[test]
    fn smaller_tier_uses_200px_margin() {
        let selector = build(&video_request(Resolution::P360, VideoShape::Normal));
        // 640x360 target: smaller tier floors at 440x160
        assert!(selector.contains("[width<=640][height<=360][width>=440][height>=160]"));
    }
}
