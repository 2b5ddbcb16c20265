// Filename sanitization for downloaded media

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Characters rejected by at least one of the supported filesystems
    static ref FORBIDDEN_RE: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    static ref UNDERSCORE_RUN_RE: Regex = Regex::new(r"_+").unwrap();
}

/// Make a video title or user-supplied name safe to use as a file stem.
///
/// Forbidden characters become `_`, runs of `_` collapse to one, and
/// leading/trailing spaces and dots are trimmed.
pub fn sanitize(name: &str) -> String {
    let replaced = FORBIDDEN_RE.replace_all(name, "_");
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&replaced, "_");
    collapsed.trim_matches(|c| c == ' ' || c == '.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_forbidden_characters() {
        assert_eq!(sanitize(r#"a<b>c:d"e"#), "a_b_c_d_e");
        assert_eq!(sanitize(r"path\to/file"), "path_to_file");
        assert_eq!(sanitize("what?really*"), "what_really_");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(sanitize("a///b"), "a_b");
        assert_eq!(sanitize("a__b___c"), "a_b_c");
        assert_eq!(sanitize(r#"<<>>title"#), "_title");
    }

    #[test]
    fn trims_spaces_and_dots() {
        assert_eq!(sanitize("  .hidden.  "), "hidden");
        assert_eq!(sanitize("name..."), "name");
    }

    #[test]
    fn leaves_safe_names_alone() {
        assert_eq!(sanitize("My Video (Official) [HD]"), "My Video (Official) [HD]");
        assert_eq!(sanitize("日本語タイトル"), "日本語タイトル");
    }
}
