//! YAML frontmatter: the `---`-delimited block at the very start of a SKILL.md.
//!
//! The block is parsed into a loose `serde_yaml::Value` and then read key by key, so an odd
//! shape (a number where a string was expected, unknown keys) degrades to defaults instead of
//! rejecting the whole document.

use serde_yaml::Value;

const MARKER: &str = "---";

/// Recognized frontmatter fields. Absent keys stay `None` / `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_invocable: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("no frontmatter block at start of document")]
    Missing,
    #[error("frontmatter block has no closing `---`")]
    Unterminated,
    #[error("could not parse YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("frontmatter is not a mapping")]
    NotMapping,
}

/// Return the text between the opening `---` line and the next `\n---`.
pub fn extract_block(content: &str) -> Result<&str, FrontmatterError> {
    let rest = content
        .strip_prefix(MARKER)
        .and_then(|r| r.strip_prefix('\n'))
        .ok_or(FrontmatterError::Missing)?;
    if rest.starts_with(MARKER) {
        return Ok("");
    }
    let end = rest
        .find(&format!("\n{}", MARKER))
        .ok_or(FrontmatterError::Unterminated)?;
    Ok(&rest[..end])
}

/// Parse the frontmatter of `content`. An empty block is valid and yields defaults.
pub fn parse(content: &str) -> Result<Frontmatter, FrontmatterError> {
    let block = extract_block(content)?;
    let value: Value = serde_yaml::from_str(block)?;
    let map = match value {
        Value::Null => return Ok(Frontmatter::default()),
        Value::Mapping(m) => m,
        _ => return Err(FrontmatterError::NotMapping),
    };

    let mut fm = Frontmatter::default();
    if let Some(v) = map.get("name") {
        fm.name = scalar_string(v);
    }
    if let Some(v) = map.get("description") {
        fm.description = scalar_string(v);
    }
    if let Some(v) = map.get("user-invocable") {
        fm.user_invocable = flag(v);
    }
    Ok(fm)
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            log::debug!("ignoring non-scalar frontmatter value: {:?}", other);
            None
        }
    }
}

fn flag(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
