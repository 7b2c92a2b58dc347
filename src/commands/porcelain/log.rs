use crate::areas::repository::Repository;
use crate::artifacts::log::LogEntry;
use std::collections::HashSet;

impl Repository {
    /// Walk the current branch's history from the tip, newest first,
    /// emitting up to `limit` records; zero means unlimited.
    pub fn log(&self, limit: usize) -> anyhow::Result<Vec<LogEntry>> {
        let head = self.refs().read_head()?;

        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut current = head.tip;

        while let Some(fingerprint) = current {
            if limit != 0 && entries.len() == limit {
                break;
            }
            if !seen.insert(fingerprint.clone()) {
                anyhow::bail!("cycle detected in commit history at {}", fingerprint);
            }

            let commit = self.database().load_commit(&fingerprint)?;
            entries.push(LogEntry {
                id: fingerprint,
                timestamp: commit.timestamp().to_string(),
                message: commit.message().to_string(),
                merged_from: commit.merged_parent().cloned(),
            });
            current = commit.parent().cloned();
        }

        Ok(entries)
    }
}
