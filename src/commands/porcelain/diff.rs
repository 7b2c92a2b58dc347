use crate::areas::repository::Repository;
use crate::artifacts::diff::{DiffReport, diff_file};
use crate::artifacts::objects::fingerprint::Fingerprint;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::PathBuf;

impl Repository {
    /// Produce a diff listing for one of four pairings:
    ///
    /// - no options — working tree vs the staged snapshots
    /// - `--staged` / `--cached` — staged snapshots vs the last commit
    /// - one fingerprint — working tree vs that commit
    /// - two fingerprints — commit vs commit
    pub fn diff(
        &self,
        option1: Option<&str>,
        option2: Option<&str>,
    ) -> anyhow::Result<DiffReport> {
        match (option1, option2) {
            (None, None) => self.diff_working_tree(),
            (Some("--staged") | Some("--cached"), None) => self.diff_staged(),
            (Some(commit), None) => self.diff_against_commit(commit),
            (Some(old), Some(new)) => self.diff_commits(old, new),
            (None, Some(_)) => anyhow::bail!("a second diff option requires a first"),
        }
    }

    /// Each staged path's on-disk bytes against its staged blob.
    fn diff_working_tree(&self) -> anyhow::Result<DiffReport> {
        let index = self.load_index()?;

        let mut report = DiffReport::default();
        for (path, snapshot) in index.entries() {
            let old = self.database().get_or_empty(snapshot.as_ref())?;
            let new = self.workspace().read_file(path)?;
            report.push(diff_file(path, &old, &new));
        }

        Ok(report)
    }

    /// Each staged path's blob against the last commit's version.
    fn diff_staged(&self) -> anyhow::Result<DiffReport> {
        let head = self.refs().read_head()?;
        let head_manifest = self.database().manifest_of(head.tip.as_ref())?;
        let index = self.load_index()?;

        let mut report = DiffReport::default();
        for (path, snapshot) in index.entries() {
            let old = match head_manifest.get(path) {
                Some(fingerprint) => self.database().get(fingerprint)?,
                None => Bytes::new(),
            };
            let new = self.database().get_or_empty(snapshot.as_ref())?;
            report.push(diff_file(path, &old, &new));
        }

        Ok(report)
    }

    /// A commit's snapshot against the working tree, covering the union of
    /// the commit's manifest and the staged paths.
    fn diff_against_commit(&self, raw: &str) -> anyhow::Result<DiffReport> {
        let commit = self.database().load_commit(&Fingerprint::try_parse(raw)?)?;
        let manifest = commit.manifest_map();
        let index = self.load_index()?;

        let paths: BTreeSet<PathBuf> = manifest
            .keys()
            .cloned()
            .chain(index.paths().cloned())
            .collect();

        let mut report = DiffReport::default();
        for path in paths {
            let old = self.database().get_or_empty(manifest.get(&path))?;
            let new = self.workspace().read_file(&path)?;
            report.push(diff_file(&path, &old, &new));
        }

        Ok(report)
    }

    /// One commit's snapshot against another's, over the union of their
    /// manifests.
    fn diff_commits(&self, old_raw: &str, new_raw: &str) -> anyhow::Result<DiffReport> {
        let old_manifest = self
            .database()
            .load_commit(&Fingerprint::try_parse(old_raw)?)?
            .manifest_map();
        let new_manifest = self
            .database()
            .load_commit(&Fingerprint::try_parse(new_raw)?)?
            .manifest_map();

        let paths: BTreeSet<PathBuf> = old_manifest
            .keys()
            .chain(new_manifest.keys())
            .cloned()
            .collect();

        let mut report = DiffReport::default();
        for path in paths {
            let old = self.database().get_or_empty(old_manifest.get(&path))?;
            let new = self.database().get_or_empty(new_manifest.get(&path))?;
            report.push(diff_file(&path, &old, &new));
        }

        Ok(report)
    }
}
