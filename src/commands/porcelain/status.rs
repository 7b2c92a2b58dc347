use crate::areas::repository::Repository;
use crate::artifacts::objects::fingerprint::Fingerprint;
use crate::artifacts::status::StatusReport;
use std::collections::BTreeSet;

impl Repository {
    /// Report the current branch, merge-in-progress state, and the staged,
    /// modified, and untracked path sets.
    pub fn status(&self) -> anyhow::Result<StatusReport> {
        let head = self.refs().read_head()?;
        let index = self.load_index()?;
        let merge_state = self.refs().read_merge_state()?;
        let head_manifest = self.database().manifest_of(head.tip.as_ref())?;

        let staged: BTreeSet<_> = index.paths().cloned().collect();

        let mut modified = BTreeSet::new();
        for (path, snapshot) in index.entries() {
            // compared against the snapshot taken at staging time; entries
            // from an older index format carry none and are skipped
            if let Some(snapshot) = snapshot {
                let on_disk = self.workspace().read_file(path)?;
                if Fingerprint::of(&on_disk) != *snapshot {
                    modified.insert(path.clone());
                }
            }
        }

        let mut untracked = BTreeSet::new();
        for path in self.workspace().list_files()? {
            if !index.contains(&path) && !head_manifest.contains_key(&path) {
                untracked.insert(path);
            }
        }

        Ok(StatusReport {
            branch: head.branch,
            merging: merge_state.map(|state| state.merging),
            staged,
            modified,
            untracked,
        })
    }
}
