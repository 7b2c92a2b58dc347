//! Working tree operations

use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    repo_dir_name: String,
}

impl Workspace {
    pub fn new(path: Box<Path>, repo_dir_name: String) -> Self {
        Workspace {
            path,
            repo_dir_name,
        }
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    /// Read a file's bytes; a missing file reads as empty.
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        if !full_path.exists() {
            return Ok(Bytes::new());
        }

        let content = std::fs::read(&full_path)
            .with_context(|| format!("unable to read file {}", full_path.display()))?;
        Ok(content.into())
    }

    /// Create or overwrite a file.
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("unable to create parent directories for {}", full_path.display())
            })?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("unable to write file {}", full_path.display()))
    }

    /// Delete a file if it is present.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.exists() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("unable to remove file {}", full_path.display()))?;
        }

        Ok(())
    }

    /// Top-level regular files, excluding anything named after the
    /// repository directory.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = std::fs::read_dir(self.path.as_ref())
            .with_context(|| format!("unable to list directory {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| self.check_if_not_ignored_path(&entry.path()))
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn check_if_not_ignored_path(&self, path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?.to_string_lossy();
        if name.contains(&self.repo_dir_name) {
            return None;
        }
        Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
    }
}
