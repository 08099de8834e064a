//! Passage splitting.

/// Split a passage into paragraphs, one per non-empty line.
///
/// Lines are trimmed; blank lines are dropped. An empty or whitespace-only
/// passage yields an empty vector, which callers treat as an error.
pub fn split_paragraphs(passage: &str) -> Vec<&str> {
    passage
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
