//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `./reindex.json`) and environment. Every field
//! has a default, so a missing file yields the stock `rust-docs` layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Indexer config: where documents live, what they are called, and where the index goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexConfig {
    /// Input root (default "./rust-docs"). Each immediate subdirectory may hold a doc index file.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Skills subtree (default "rust-skills"). Relative paths are resolved against `docs_dir`.
    #[serde(default = "default_skills_dir")]
    pub skills_dir: PathBuf,

    /// File name of a skill's metadata document (default "SKILL.md").
    #[serde(default = "default_skill_file")]
    pub skill_file: String,

    /// File name of a topic's index document (default "index.md").
    #[serde(default = "default_doc_file")]
    pub doc_file: String,

    /// Generated document (default "./CLAUDE.md"). Fully overwritten on each run.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Top-level heading of the generated document.
    #[serde(default = "default_title")]
    pub title: String,

    /// Ordered classification rules. When absent, the built-in rule list is used.
    #[serde(default)]
    pub categories: Option<Vec<CategoryRuleConfig>>,

    /// Category for skills no rule matches (default "Meta & Utilities").
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
}

/// One (category, pattern) rule. Patterns are regexes matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRuleConfig {
    pub name: String,
    pub pattern: String,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./rust-docs")
}

fn default_skills_dir() -> PathBuf {
    PathBuf::from("rust-skills")
}

fn default_skill_file() -> String {
    "SKILL.md".to_string()
}

fn default_doc_file() -> String {
    "index.md".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("./CLAUDE.md")
}

fn default_title() -> String {
    "Rust Development - Documentation Index".to_string()
}

fn default_fallback_category() -> String {
    "Meta & Utilities".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            skills_dir: default_skills_dir(),
            skill_file: default_skill_file(),
            doc_file: default_doc_file(),
            output: default_output(),
            title: default_title(),
            categories: None,
            fallback_category: default_fallback_category(),
        }
    }
}

impl IndexConfig {
    /// Resolve the skills root: `skills_dir` if absolute, otherwise joined onto `docs_dir`.
    pub fn resolve_skills_dir(&self) -> PathBuf {
        if self.skills_dir.is_absolute() {
            self.skills_dir.clone()
        } else {
            self.docs_dir.join(&self.skills_dir)
        }
    }
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("REINDEX_CONFIG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("reindex.json"))
}

/// Load config from the given path (or REINDEX_CONFIG_PATH, or ./reindex.json). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(IndexConfig, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = read_config(&path)?;
    Ok((config, path))
}

fn read_config(path: &Path) -> Result<IndexConfig> {
    if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        return Ok(IndexConfig::default());
    }
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing config from {}", path.display()))
}
