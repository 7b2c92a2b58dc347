use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::fingerprint::Fingerprint;
use crate::errors::RepoError;

/// Report returned by a successful `commit`.
#[derive(Debug)]
pub struct CommitReport {
    pub id: Fingerprint,
    pub message: String,
    /// Branch whose conflicted merge this commit concluded, if any.
    pub merged_branch: Option<BranchName>,
}

impl Repository {
    /// Turn the staged set into a new commit on the current branch.
    ///
    /// Writes are ordered blobs → commit object → branch/HEAD → index
    /// clear → merge-state clear, so a crash can strand at most an
    /// unreferenced object or a stale index, never a dangling reference.
    pub fn commit(&self, message: &str) -> anyhow::Result<CommitReport> {
        let mut index = self.load_index()?;
        if index.is_empty() {
            return Err(RepoError::EmptyCommit.into());
        }

        // every staged path must still be on disk before anything mutates
        for path in index.paths() {
            if !self.workspace().exists(path) {
                return Err(RepoError::PathNotFound(path.clone()).into());
            }
        }

        let head = self.refs().read_head()?;
        let mut branches = self.refs().load_branches()?;
        let merge_state = self.refs().read_merge_state()?;

        // snapshot the staged files as they are right now; `put` is
        // idempotent, so re-storing an unchanged blob is free
        let mut manifest = Vec::new();
        for path in index.paths() {
            let content = self.workspace().read_file(path)?;
            let fingerprint = self.database().put(&content)?;
            manifest.push((path.clone(), fingerprint));
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let merged_parent = merge_state.as_ref().map(|state| state.target.clone());
        let commit = Commit::new(
            message.to_string(),
            timestamp,
            head.tip.clone(),
            merged_parent,
            manifest,
        );
        self.database().store_commit(&commit)?;

        branches.insert(head.branch.clone(), Some(commit.id().clone()));
        self.refs().save_branches(&branches)?;
        self.refs().write_head(&head.branch, Some(commit.id()))?;

        index.clear();
        index.save()?;
        self.refs().clear_merge_state()?;

        Ok(CommitReport {
            id: commit.id().clone(),
            message: message.to_string(),
            merged_branch: merge_state.map(|state| state.merging),
        })
    }
}
