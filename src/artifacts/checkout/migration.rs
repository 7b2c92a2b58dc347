//! Working-tree reconciliation between two snapshots
//!
//! A `Migration` is the plan that turns the working tree of one manifest
//! into that of another: paths present only in the outgoing manifest are
//! removed, every target path is (re)written from its blob. Files tracked
//! by neither manifest are never touched. Removals are applied before
//! writes.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::fingerprint::Fingerprint;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Migration {
    removals: Vec<PathBuf>,
    writes: Vec<(PathBuf, Fingerprint)>,
}

impl Migration {
    /// Plan the transition from `current` to `target`.
    pub fn between(
        current: &BTreeMap<PathBuf, Fingerprint>,
        target: &BTreeMap<PathBuf, Fingerprint>,
    ) -> Self {
        let removals = current
            .keys()
            .filter(|path| !target.contains_key(*path))
            .cloned()
            .collect();
        let writes = target
            .iter()
            .map(|(path, fingerprint)| (path.clone(), fingerprint.clone()))
            .collect();

        Migration { removals, writes }
    }

    /// Apply the plan: deletions first, then blob materialization.
    pub fn apply(&self, workspace: &Workspace, database: &Database) -> anyhow::Result<()> {
        for path in &self.removals {
            workspace.remove_file(path)?;
        }

        for (path, fingerprint) in &self.writes {
            let content = database.get(fingerprint)?;
            workspace.write_file(path, &content)?;
        }

        Ok(())
    }

    pub fn removals(&self) -> &[PathBuf] {
        &self.removals
    }

    pub fn writes(&self) -> &[(PathBuf, Fingerprint)] {
        &self.writes
    }
}
