use regex::Regex;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;
use crate::local_files::FileSystem;

/// Names eligible for renumbering: `ex`, digits, `.py`, anchored, any case.
pub const CANDIDATE_PATTERN: &str = r"(?i)^ex(\d+)\.py$";

fn candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CANDIDATE_PATTERN).expect("candidate pattern is a valid regex"))
}

/// Whether a file name is a renumbering candidate.
///
/// Other Python files (`readme.py`, `ex1_old.py`, `test_ex1.py`) are not.
pub fn is_candidate(name: &str) -> bool {
    candidate_regex().is_match(name)
}

/// Sort names case-insensitively. Names equal ignoring case fall back to
/// byte order so the result does not depend on listing order.
pub fn sort_candidates(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// List the direct entries of `dir` that are candidates, in sequence order.
///
/// Not recursive. Names that are not valid UTF-8 never match.
pub fn discover(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs
        .list(dir)?
        .iter()
        .filter_map(|entry| entry.name())
        .filter(|name| is_candidate(name))
        .map(str::to_string)
        .collect();

    sort_candidates(&mut names);
    Ok(names)
}
