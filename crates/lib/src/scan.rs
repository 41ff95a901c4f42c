//! Document scanner: find `<root>/<dir>/<file>` one level down and build records from them.
//!
//! Only immediate subdirectories are considered. Results are ordered by directory name so
//! rendering is deterministic regardless of how the source enumerates entries.

use std::path::{Path, PathBuf};

use crate::config::IndexConfig;
use crate::docs::DocRecord;
use crate::error::{IndexError, Warning};
use crate::skills::SkillRecord;
use crate::source::DocumentSource;

/// A document found by the scanner: its directory name, path, and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub id: String,
    pub path: PathBuf,
    pub text: String,
}

/// Records from one scan plus any per-document warnings.
#[derive(Debug, Clone)]
pub struct Scan<T> {
    pub records: Vec<T>,
    pub warnings: Vec<Warning>,
}

/// Read `<root>/<name>/<file_name>` for every immediate subdirectory `name`, sorted by name.
/// Subdirectories without the file are skipped; unreadable files become warnings.
pub fn find_documents(
    source: &dyn DocumentSource,
    root: &Path,
    file_name: &str,
    skip: impl Fn(&str) -> bool,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<RawDocument>, IndexError> {
    let mut names = source.subdirs(root)?;
    names.sort();
    let mut out = Vec::new();
    for name in names {
        if skip(&name) {
            continue;
        }
        let path = root.join(&name).join(file_name);
        match source.read(&path) {
            Ok(Some(text)) => out.push(RawDocument { id: name, path, text }),
            Ok(None) => {}
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                let message = match e {
                    IndexError::Io { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                warnings.push(Warning::new(&path, message));
            }
        }
    }
    Ok(out)
}

/// Scan `<skills root>/*/<skill_file>`. A skill with a bad header is still indexed, with
/// default fields, and a warning is recorded.
pub fn scan_skills(
    source: &dyn DocumentSource,
    config: &IndexConfig,
) -> Result<Scan<SkillRecord>, IndexError> {
    let mut warnings = Vec::new();
    let root = config.resolve_skills_dir();
    let docs = find_documents(source, &root, &config.skill_file, |_| false, &mut warnings)?;
    let mut records = Vec::with_capacity(docs.len());
    for doc in docs {
        let (record, err) = SkillRecord::parse(doc.id, &doc.text);
        if let Some(e) = err {
            log::warn!("could not parse frontmatter in {}: {}", doc.path.display(), e);
            warnings.push(Warning::new(&doc.path, e.to_string()));
        }
        records.push(record);
    }
    Ok(Scan { records, warnings })
}

/// Scan `<docs root>/*/<doc_file>`, excluding the skills subtree.
pub fn scan_docs(
    source: &dyn DocumentSource,
    config: &IndexConfig,
) -> Result<Scan<DocRecord>, IndexError> {
    let mut warnings = Vec::new();
    let skills_root = config.resolve_skills_dir();
    let is_skills_dir = |name: &str| config.docs_dir.join(name) == skills_root;
    let docs = find_documents(
        source,
        &config.docs_dir,
        &config.doc_file,
        is_skills_dir,
        &mut warnings,
    )?;
    let records = docs
        .into_iter()
        .map(|doc| DocRecord::parse(doc.id, &doc.text))
        .collect();
    Ok(Scan { records, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("rust-docs/tokio/index.md", "# Tokio")
            .with_file("rust-docs/axum/index.md", "# Axum")
            .with_file("rust-docs/serde/README.md", "# not an index")
            .with_file("rust-docs/rust-skills/index.md", "# skills root index")
            .with_file("rust-docs/rust-skills/m02/SKILL.md", "---\nname: two\n---\n")
            .with_file("rust-docs/rust-skills/m01/SKILL.md", "---\ndescription: one\n---\n")
            .with_file("rust-docs/rust-skills/m03/SKILL.md", "no header here")
            .with_file("rust-docs/rust-skills/m01/deep/SKILL.md", "---\nname: nested\n---\n")
            .with_dir("rust-docs/rust-skills/empty")
    }

    #[test]
    fn skills_sorted_and_one_level_only() {
        let scan = scan_skills(&source(), &IndexConfig::default()).unwrap();
        let ids: Vec<_> = scan.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["m01", "m02", "m03"]);
        assert_eq!(scan.records[1].name, "two");
    }

    #[test]
    fn bad_header_is_warned_but_kept() {
        let scan = scan_skills(&source(), &IndexConfig::default()).unwrap();
        assert_eq!(scan.warnings.len(), 1);
        assert!(scan.warnings[0].path.ends_with("m03/SKILL.md"));
        let m03 = &scan.records[2];
        assert_eq!(m03.name, "m03");
        assert_eq!(m03.description, "");
    }

    #[test]
    fn docs_exclude_skills_subtree() {
        let scan = scan_docs(&source(), &IndexConfig::default()).unwrap();
        let ids: Vec<_> = scan.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["axum", "tokio"]);
        assert!(scan.warnings.is_empty());
    }

    struct UnreadableSource;

    impl DocumentSource for UnreadableSource {
        fn exists(&self, _dir: &Path) -> bool {
            true
        }

        fn subdirs(&self, _dir: &Path) -> Result<Vec<String>, IndexError> {
            Ok(vec!["locked".to_string()])
        }

        fn read(&self, path: &Path) -> Result<Option<String>, IndexError> {
            Err(IndexError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            })
        }
    }

    #[test]
    fn unreadable_document_warns_once_without_repeating_path() {
        let scan = scan_docs(&UnreadableSource, &IndexConfig::default()).unwrap();
        assert!(scan.records.is_empty());
        assert_eq!(scan.warnings.len(), 1);
        let w = &scan.warnings[0];
        assert!(w.path.ends_with("locked/index.md"));
        assert_eq!(w.message, "permission denied");
        assert_eq!(w.to_string().matches("locked/index.md").count(), 1);
    }

    #[test]
    fn missing_skills_dir_is_empty() {
        let src = MemorySource::new().with_file("rust-docs/tokio/index.md", "# Tokio");
        let scan = scan_skills(&src, &IndexConfig::default()).unwrap();
        assert!(scan.records.is_empty());
    }
}
