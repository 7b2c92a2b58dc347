use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepoError;

/// Report returned by a successful branch creation.
#[derive(Debug)]
pub struct BranchReport {
    pub name: BranchName,
}

/// One row of the branch listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: BranchName,
    pub is_current: bool,
}

impl Repository {
    /// Create a branch pointing at the current HEAD tip.
    pub fn branch(&self, name: &str) -> anyhow::Result<BranchReport> {
        let name = BranchName::try_parse(name)?;

        let mut branches = self.refs().load_branches()?;
        if branches.contains_key(&name) {
            return Err(RepoError::BranchExists(name.to_string()).into());
        }

        let head = self.refs().read_head()?;
        branches.insert(name.clone(), head.tip);
        self.refs().save_branches(&branches)?;

        Ok(BranchReport { name })
    }

    /// Enumerate branches in name order, marking the current one.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchInfo>> {
        let head = self.refs().read_head()?;

        Ok(self
            .refs()
            .load_branches()?
            .into_keys()
            .map(|name| BranchInfo {
                is_current: name == head.branch,
                name,
            })
            .collect())
    }
}
