use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepoError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Report returned by a successful `init`.
#[derive(Debug)]
pub struct InitReport {
    pub root: PathBuf,
}

impl Repository {
    /// Create the repository scaffolding: the objects directory, a branch
    /// table holding `master` with an empty tip, a HEAD bound to it, and an
    /// empty index.
    pub fn init(&self) -> anyhow::Result<InitReport> {
        if self.repo_path().exists() {
            return Err(RepoError::AlreadyInitialized.into());
        }

        std::fs::create_dir_all(self.database().objects_path())
            .context("failed to create objects directory")?;

        let master = BranchName::default_branch();
        let mut branches = BTreeMap::new();
        branches.insert(master.clone(), None);
        self.refs().save_branches(&branches)?;
        self.refs().write_head(&master, None)?;

        self.load_index()?.save()?;

        Ok(InitReport {
            root: self.path().to_path_buf(),
        })
    }
}
