//! Generation pipeline: scan -> parse -> classify -> render -> write.
//!
//! `build_index` is pure over a `DocumentSource`; `generate` and `check` bind it to the
//! filesystem. The output is rendered fully in memory and replaces the previous file via
//! a temp file + rename, so a failed run never leaves a partial document.

use std::path::Path;

use crate::config::IndexConfig;
use crate::docs::DocRecord;
use crate::error::{IndexError, Warning};
use crate::render::{self, Layout};
use crate::scan;
use crate::skills::{Classifier, SkillRecord};
use crate::source::{DocumentSource, FsSource};

/// Result of one run: the records, the rendered document, and a per-category summary.
#[derive(Debug, Clone)]
pub struct Generation {
    pub skills: Vec<SkillRecord>,
    pub docs: Vec<DocRecord>,
    /// Non-empty categories in presentation order with their skill counts.
    pub categories: Vec<(String, usize)>,
    pub warnings: Vec<Warning>,
    pub document: String,
}

/// Outcome of comparing a fresh render with the document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Scan `source` per `config` and render the index. Fails only when the docs root is absent,
/// the root cannot be listed, or a category pattern is invalid.
pub fn build_index(
    source: &dyn DocumentSource,
    config: &IndexConfig,
) -> Result<Generation, IndexError> {
    if !source.exists(&config.docs_dir) {
        return Err(IndexError::MissingRoot(config.docs_dir.clone()));
    }
    let classifier = Classifier::from_config(config)?;

    let skills = scan::scan_skills(source, config)?;
    let docs = scan::scan_docs(source, config)?;
    log::debug!(
        "scanned {} skills and {} docs",
        skills.records.len(),
        docs.records.len()
    );

    let layout = Layout::from_config(config);
    let document = render::render_index(&layout, &skills.records, &docs.records, &classifier);
    let categories = classifier
        .categorize(&skills.records)
        .into_iter()
        .map(|c| (c.name, c.skills.len()))
        .collect();

    let mut warnings = skills.warnings;
    warnings.extend(docs.warnings);

    Ok(Generation {
        skills: skills.records,
        docs: docs.records,
        categories,
        warnings,
        document,
    })
}

/// Build from the filesystem and overwrite `config.output`. Nothing is written on error.
pub fn generate(config: &IndexConfig) -> Result<Generation, IndexError> {
    let generation = build_index(&FsSource, config)?;
    write_atomic(&config.output, &generation.document)?;
    log::info!("wrote {}", config.output.display());
    Ok(generation)
}

/// Build from the filesystem and compare with `config.output` without writing.
pub fn check(config: &IndexConfig) -> Result<(Generation, CheckStatus), IndexError> {
    let generation = build_index(&FsSource, config)?;
    let status = match std::fs::read(&config.output) {
        Ok(existing) if existing == generation.document.as_bytes() => CheckStatus::UpToDate,
        Ok(_) => CheckStatus::Stale,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckStatus::Missing,
        Err(e) => return Err(IndexError::io(&config.output, e)),
    };
    Ok((generation, status))
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), IndexError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    let temp_path = dir.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    if let Err(e) = std::fs::write(&temp_path, contents) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(IndexError::io(&temp_path, e));
    }
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(IndexError::io(path, e));
    }
    Ok(())
}
