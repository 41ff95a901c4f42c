//! Documentation topics: metadata read from `<docs root>/<id>/index.md`.
//!
//! Only three things are pulled out of the markdown: the first H1, the first `> Source:` line,
//! and the line under `## Quick Reference`. All are optional.

use regex::Regex;
use std::sync::LazyLock;

/// Stored quick-reference snippets are clamped to this many characters.
pub const QUICK_REF_MAX: usize = 100;

static SOURCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*Sources?:\s*([^\n]+)").expect("valid regex"));
static QUICK_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## Quick Reference\n\n([^\n]+)").expect("valid regex"));

/// One documentation topic. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocRecord {
    /// Containing directory name.
    pub id: String,
    pub title: String,
    /// First listed source; additional `|`-separated sources are dropped.
    pub source: String,
    pub quick_ref: String,
}

impl DocRecord {
    pub fn parse(id: impl Into<String>, content: &str) -> Self {
        Self {
            id: id.into(),
            title: title(content),
            source: source(content),
            quick_ref: quick_ref(content),
        }
    }
}

fn title(content: &str) -> String {
    content
        .split('\n')
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches(['#', ' ']).trim().to_string())
        .unwrap_or_default()
}

fn source(content: &str) -> String {
    SOURCE_REGEX
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split('|').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default()
}

fn quick_ref(content: &str) -> String {
    QUICK_REF_REGEX
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().chars().take(QUICK_REF_MAX).collect())
        .unwrap_or_default()
}
