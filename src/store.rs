//! File fetch/write primitives over a directory.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::asset::File;
use crate::error::Result;

/// Reads stored files by glob pattern. An empty result is not an error.
pub trait FileFetcher {
    fn fetch_by_pattern(&self, pattern: &str) -> Result<Vec<File>>;
}

pub trait FileWriter {
    fn write_files(&self, files: &[File]) -> Result<()>;
}

/// A directory holding persisted assets. File names are relative to `root`
/// and always use `/` as separator.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl FileFetcher for DiskStore {
    fn fetch_by_pattern(&self, pattern: &str) -> Result<Vec<File>> {
        let full = format!(
            "{}/{}",
            Pattern::escape(&self.root.to_string_lossy()),
            pattern
        );

        let mut files = vec![];
        for entry in glob::glob(&full)? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }
            let Some(filename) = self.relative_name(&path) else {
                continue;
            };
            files.push(File::new(filename, fs::read(&path)?));
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename));

        tracing::debug!("Fetched {} files matching {}", files.len(), pattern);
        Ok(files)
    }
}

impl FileWriter for DiskStore {
    fn write_files(&self, files: &[File]) -> Result<()> {
        for file in files {
            let path = self.root.join(&file.filename);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.data)?;
            tracing::debug!("Wrote {}", path.display());
        }
        Ok(())
    }
}
