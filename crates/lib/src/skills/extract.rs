//! Secondary fields derived from a skill description: error codes, short description, triggers.
//!
//! All functions here are pure functions of the description string.

use regex::Regex;
use std::sync::LazyLock;

/// Marker separating the prose description from its comma-separated trigger keywords.
pub const TRIGGERS_MARKER: &str = "Triggers:";

static ERROR_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"E[0-9]{4}").expect("valid regex"));
static CRITICAL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CRITICAL:\s*").expect("valid regex"));
static USE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Use (?:for|when)\s+").expect("valid regex"));

/// Every `E` + four digits, left to right, duplicates kept.
pub fn error_codes(description: &str) -> Vec<String> {
    ERROR_CODE_REGEX
        .find_iter(description)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First sentence of the text before `Triggers:`, without a leading `CRITICAL:` / `Use for` / `Use when`.
///
/// Everything after the first remaining period is dropped, abbreviations included
/// ("e.g. foo" becomes "e").
pub fn short_description(description: &str) -> String {
    let head = match description.find(TRIGGERS_MARKER) {
        Some(i) => &description[..i],
        None => description,
    };
    let head = head.trim_start();
    let head = CRITICAL_PREFIX_REGEX.replace(head, "");
    let head = USE_PREFIX_REGEX.replace(&head, "");
    let head = head.trim();
    let head = head.strip_suffix('.').unwrap_or(head);
    head.split('.').next().unwrap_or_default().to_string()
}

/// Comma-separated keywords after `Triggers:`, trimmed, empties dropped.
pub fn triggers(description: &str) -> Vec<String> {
    let Some(i) = description.find(TRIGGERS_MARKER) else {
        return Vec::new();
    };
    description[i + TRIGGERS_MARKER.len()..]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
