// External tool discovery

use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resolved information about the yt-dlp installation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub path: String,
    pub version: Option<String>,
    pub is_available: bool,
}

/// Find the yt-dlp executable.
///
/// Order: `YTDLP_PATH` env override, common install paths, `which`,
/// then a bare `yt-dlp` and hope it is on PATH.
pub fn find_ytdlp() -> String {
    if let Ok(path) = std::env::var("YTDLP_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            debug!("using yt-dlp from YTDLP_PATH: {trimmed}");
            return trimmed.to_string();
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if std::path::Path::new(path).exists() {
            return path.to_string();
        }
    }

    if let Ok(output) = Command::new("which").arg("yt-dlp").output() {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    "yt-dlp".to_string()
}

/// Probe the resolved yt-dlp binary for availability and version.
pub fn probe_ytdlp() -> ToolInfo {
    let path = find_ytdlp();
    let version = match Command::new(&path).arg("--version").output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        _ => None,
    };

    ToolInfo {
        name: "yt-dlp".to_string(),
        path,
        is_available: version.is_some(),
        version,
    }
}
