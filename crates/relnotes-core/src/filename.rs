//! Changelog naming conventions shared by every hosting adapter.
//!
//! [`is_changelog_filename`] recognizes conventional changelog file names and
//! [`compare_changelog_file_path`] is the single total order used to choose
//! between several of them. Adapters must not reimplement either.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static CHANGELOG_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:update|change|release)(?:s|[ _-]?(?:log|history))",
        r"|history|news|recent[ _-]?changes?",
        r")(?:\.[^.]+)?$",
    ))
    .expect("changelog filename pattern is valid")
});

/// Whether `file_name` (a basename, not a path) looks like a changelog.
pub fn is_changelog_filename(file_name: &str) -> bool {
    CHANGELOG_FILENAME.is_match(file_name)
}

/// Final segment of a `/`-separated repository path.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Total order over candidate changelog paths; the minimum is the preferred file.
///
/// Precedence, first difference wins:
/// 1. fewer path segments
/// 2. canonical name: `changelog`, `changes`, `history`, `releases`, `news`, others
/// 3. Markdown extension before anything else
/// 4. case-insensitive path
/// 5. byte-wise path
pub fn compare_changelog_file_path(a: &str, b: &str) -> Ordering {
    depth(a)
        .cmp(&depth(b))
        .then_with(|| name_rank(a).cmp(&name_rank(b)))
        .then_with(|| extension_rank(a).cmp(&extension_rank(b)))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn depth(path: &str) -> usize {
    path.trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .count()
}

fn split_stem(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

fn name_rank(path: &str) -> u8 {
    let (stem, _) = split_stem(basename(path));
    let normalized: String = stem
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();
    match normalized.as_str() {
        "changelog" => 0,
        "changes" => 1,
        "history" | "changehistory" => 2,
        "releases" | "releaselog" | "releasehistory" => 3,
        "news" => 4,
        _ => 5,
    }
}

fn extension_rank(path: &str) -> u8 {
    match split_stem(basename(path)).1 {
        Some(ext) if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") => 0,
        _ => 1,
    }
}
