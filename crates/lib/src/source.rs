//! Document sources: where the scanner finds directories and reads document text.
//!
//! `FsSource` is the real filesystem; `MemorySource` is an in-memory tree used by tests so the
//! whole pipeline can run without touching disk.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use crate::error::IndexError;

/// Read-only view of a directory tree of documents.
pub trait DocumentSource {
    /// True if `dir` exists as a directory.
    fn exists(&self, dir: &Path) -> bool;

    /// Names of the immediate subdirectories of `dir`, in any order. A missing `dir` yields none.
    fn subdirs(&self, dir: &Path) -> Result<Vec<String>, IndexError>;

    /// Full text of the file at `path`, or `None` when there is no such file.
    fn read(&self, path: &Path) -> Result<Option<String>, IndexError>;
}

/// Filesystem-backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn subdirs(&self, dir: &Path) -> Result<Vec<String>, IndexError> {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(IndexError::io(dir, e)),
        };
        let mut out = Vec::new();
        for entry in read_dir.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            out.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(out)
    }

    fn read(&self, path: &Path) -> Result<Option<String>, IndexError> {
        if !path.is_file() {
            return Ok(None);
        }
        match std::fs::read_to_string(path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IndexError::io(path, e)),
        }
    }
}

/// In-memory source: a map of file path -> text. Directories are implied by file paths
/// and can also be added explicitly (for empty directories).
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file. Parent directories become visible automatically.
    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dirs.insert(normalize(path.as_ref()));
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), text.into());
    }

    fn all_dirs(&self) -> BTreeSet<PathBuf> {
        let mut out = self.dirs.clone();
        for p in self.files.keys().chain(self.dirs.iter()) {
            let mut cur = p.parent();
            while let Some(d) = cur {
                if d.as_os_str().is_empty() {
                    break;
                }
                out.insert(d.to_path_buf());
                cur = d.parent();
            }
        }
        out
    }
}

impl DocumentSource for MemorySource {
    fn exists(&self, dir: &Path) -> bool {
        self.all_dirs().contains(&normalize(dir))
    }

    fn subdirs(&self, dir: &Path) -> Result<Vec<String>, IndexError> {
        let dir = normalize(dir);
        let names: BTreeSet<String> = self
            .all_dirs()
            .iter()
            .filter(|d| d.parent() == Some(dir.as_path()))
            .filter_map(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        Ok(names.into_iter().collect())
    }

    fn read(&self, path: &Path) -> Result<Option<String>, IndexError> {
        Ok(self.files.get(&normalize(path)).cloned())
    }
}

/// Drop `.` components so "./docs/a" and "docs/a" name the same entry.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
