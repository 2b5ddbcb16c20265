// Output directory discovery and downloaded-file location

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::models::DownloadType;

// Extensions yt-dlp may leave behind when the post-processor picks a
// different container than the one requested
const AUDIO_EXTS: &[&str] = &["mp3", "m4a", "opus", "wav", "aac"];
const VIDEO_EXTS: &[&str] = &["mp4", "webm", "mkv", "avi", "mov"];

/// Find the output directory by walking up from `start` looking for a
/// child directory named `output`. When no ancestor has one, an `output`
/// directory is created under `start`.
pub fn resolve_output_dir(start: &Path) -> io::Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join("output");
        if candidate.is_dir() {
            debug!("using output directory {}", candidate.display());
            return Ok(candidate);
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    let fallback = start.join("output");
    fs::create_dir_all(&fallback)?;
    debug!("created output directory {}", fallback.display());
    Ok(fallback)
}

/// Locate the file yt-dlp wrote for `stem`. The expected extension is
/// tried first; when the post-processor produced something else, the
/// directory is scanned for the stem with a per-type extension allowlist.
pub fn locate_download(
    dir: &Path,
    stem: &str,
    download_type: DownloadType,
    expected_ext: &str,
) -> Option<PathBuf> {
    let expected = dir.join(format!("{stem}.{expected_ext}"));
    if expected.is_file() {
        return Some(expected);
    }

    let allowed = match download_type {
        DownloadType::Audio => AUDIO_EXTS,
        DownloadType::Video => VIDEO_EXTS,
    };

    for entry in fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map_or(false, |s| s == stem);
        let ext_allowed = path.extension().and_then(|e| e.to_str()).map_or(false, |e| {
            let lower = e.to_ascii_lowercase();
            allowed.contains(&lower.as_str())
        });
        if stem_matches && ext_allowed {
            return Some(path);
        }
    }
    None
}

/// File size of `path`, rendered for the report.
pub fn file_size(path: &Path) -> Option<String> {
    fs::metadata(path).ok().map(|m| format_size(m.len()))
}

/// Render a byte count the way the report shows it: MB above 1 MiB, KB below.
pub fn format_size(bytes: u64) -> String {
    if bytes > 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_output_dir_in_ancestor() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("output");
        fs::create_dir(&output).unwrap();
        let nested = root.path().join("plugins").join("fetcher");
        fs::create_dir_all(&nested).unwrap();

        let resolved = resolve_output_dir(&nested).unwrap();
        assert_eq!(resolved, output);
    }

    #[test]
    fn creates_output_dir_when_none_found() {
        let root = tempfile::tempdir().unwrap();
        let start = root.path().join("work");
        fs::create_dir(&start).unwrap();

        // The walk can escape the tempdir, so a host with an `output`
        // directory up the tree may satisfy discovery instead
        let resolved = resolve_output_dir(&start).unwrap();
        assert!(resolved.is_dir());
        assert_eq!(resolved.file_name().unwrap(), "output");
    }

    #[test]
    fn locates_expected_extension_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("clip.mp4"), b"x").unwrap();
        fs::write(dir.path().join("clip.webm"), b"x").unwrap();

        let found = locate_download(dir.path(), "clip", DownloadType::Video, "mp4").unwrap();
        assert_eq!(found, dir.path().join("clip.mp4"));
    }

    #[test]
    fn falls_back_to_allowlisted_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("song.m4a"), b"x").unwrap();

        let found = locate_download(dir.path(), "song", DownloadType::Audio, "mp3").unwrap();
        assert_eq!(found, dir.path().join("song.m4a"));
    }

    #[test]
    fn ignores_other_stems_and_types() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other.mp3"), b"x").unwrap();
        fs::write(dir.path().join("song.txt"), b"x").unwrap();

        assert!(locate_download(dir.path(), "song", DownloadType::Audio, "mp3").is_none());
    }

    #[test]
    fn renders_sizes_in_kb_and_mb() {
        assert_eq!(format_size(512), "0.5 KB");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
