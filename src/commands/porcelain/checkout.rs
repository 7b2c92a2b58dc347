use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::RepoError;

/// How a checkout concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    AlreadyOn(BranchName),
    Switched(BranchName),
}

impl Repository {
    /// Switch to a branch: reconcile the working tree from the current
    /// HEAD snapshot to the target snapshot, then rebind HEAD. Refused
    /// while the index is non-empty; untracked files are never touched.
    pub fn checkout(&self, target: &str) -> anyhow::Result<CheckoutOutcome> {
        let index = self.load_index()?;
        if !index.is_empty() {
            return Err(RepoError::DirtyIndex.into());
        }

        let target = BranchName::try_parse(target)?;
        let branches = self.refs().load_branches()?;
        let Some(target_tip) = branches.get(&target).cloned() else {
            return Err(RepoError::UnknownBranch(target.to_string()).into());
        };

        let head = self.refs().read_head()?;
        let current_manifest = self.database().manifest_of(head.tip.as_ref())?;
        let target_manifest = self.database().manifest_of(target_tip.as_ref())?;

        Migration::between(&current_manifest, &target_manifest)
            .apply(self.workspace(), self.database())?;

        self.refs().write_head(&target, target_tip.as_ref())?;

        if head.branch == target {
            Ok(CheckoutOutcome::AlreadyOn(target))
        } else {
            Ok(CheckoutOutcome::Switched(target))
        }
    }
}
