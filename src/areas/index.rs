//! Staging index
//!
//! The index is the set of paths that will participate in the next commit,
//! persisted as one `<path>:<fingerprint>` line per entry. The fingerprint
//! is the blob snapshot taken when the path was staged; status and diff
//! compare the working tree against it. Lines are trimmed on read and empty
//! lines skipped. A line with no separator (an index written by an older
//! build) loads as a path without a snapshot.

use crate::artifacts::objects::fingerprint::Fingerprint;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Index {
    path: Box<Path>,
    entries: BTreeMap<PathBuf, Option<Fingerprint>>,
}

impl Index {
    pub fn load(path: Box<Path>) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("unable to read index at {}", path.display()))?;

            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line.split_once(':') {
                    Some((entry_path, fingerprint)) => entries.insert(
                        PathBuf::from(entry_path),
                        Some(Fingerprint::try_parse(fingerprint)?),
                    ),
                    None => entries.insert(PathBuf::from(line), None),
                };
            }
        }

        Ok(Index { path, entries })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let content: String = self
            .entries
            .iter()
            .map(|(path, snapshot)| match snapshot {
                Some(fingerprint) => format!("{}:{}\n", path.display(), fingerprint),
                None => format!("{}\n", path.display()),
            })
            .collect();

        std::fs::write(&self.path, content)
            .with_context(|| format!("unable to write index at {}", self.path.display()))
    }

    /// Record a path with its staged blob snapshot.
    pub fn stage(&mut self, path: PathBuf, snapshot: Fingerprint) {
        self.entries.insert(path, Some(snapshot));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Staged paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }

    pub fn entries(&self) -> &BTreeMap<PathBuf, Option<Fingerprint>> {
        &self.entries
    }

    pub fn snapshot(&self, path: &Path) -> Option<&Fingerprint> {
        self.entries.get(path).and_then(|snapshot| snapshot.as_ref())
    }
}
