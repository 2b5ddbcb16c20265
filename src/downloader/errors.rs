// Error types for the downloader

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network timeout while talking to the remote host
    #[error("network timeout: the remote host is not responding")]
    NetworkTimeout,

    /// The request was refused upstream (429, bot detection, throttling)
    #[error("the request was blocked upstream (throttling or bot detection); try again later or use a proxy")]
    BlockedUpstream,

    /// yt-dlp (or its ffmpeg dependency) is not installed
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The URL was rejected by yt-dlp
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The probe JSON could not be parsed
    #[error("parse error: {0}")]
    ParseError(String),

    /// yt-dlp exited with a failure status
    #[error("execution error: {0}")]
    ExecutionError(String),

    /// Filesystem failure while preparing or inspecting the output directory
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unknown(String),
}

// Classify raw yt-dlp stderr into the taxonomy above
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        let lower = s.to_lowercase();

        if (lower.contains("timeout") || lower.contains("timed out"))
            && (lower.contains("youtube.com") || lower.contains("googlevideo"))
        {
            return Self::BlockedUpstream;
        }

        if lower.contains("timeout") || lower.contains("timed out") {
            return Self::NetworkTimeout;
        }

        if lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("bot")
            || lower.contains("blocked")
        {
            return Self::BlockedUpstream;
        }

        if lower.contains("not found")
            || lower.contains("no such file")
            || lower.contains("command not found")
        {
            return Self::ToolNotFound(s);
        }

        if lower.contains("invalid url") || lower.contains("unsupported url") {
            return Self::InvalidUrl(s);
        }

        if lower.contains("json") || lower.contains("parse") {
            return Self::ParseError(s);
        }

        Self::Unknown(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_youtube_timeout_as_blocked() {
        let err: DownloadError =
            "Read timed out while fetching https://www.youtube.com/watch".to_string().into();
        assert!(matches!(err, DownloadError::BlockedUpstream));
    }

    #[test]
    fn classifies_plain_timeout() {
        let err: DownloadError = "Timed out after 30s".to_string().into();
        assert!(matches!(err, DownloadError::NetworkTimeout));
    }

    #[test]
    fn classifies_rate_limit() {
        let err: DownloadError = "HTTP Error 429: Too Many Requests".to_string().into();
        assert!(matches!(err, DownloadError::BlockedUpstream));
    }

    #[test]
    fn classifies_missing_tool() {
        let err: DownloadError = "yt-dlp: command not found".to_string().into();
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[test]
    fn classifies_unsupported_url() {
        let err: DownloadError =
            "ERROR: Unsupported URL: ftp://example.org/clip".to_string().into();
        assert!(matches!(err, DownloadError::InvalidUrl(_)));
    }

    #[test]
    fn everything_else_is_unknown() {
        let err: DownloadError = "ffmpeg exited with code 1".to_string().into();
        assert!(matches!(err, DownloadError::Unknown(_)));
    }
}
