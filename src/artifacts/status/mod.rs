//! Status report types

use crate::artifacts::branch::branch_name::BranchName;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Snapshot of the repository state as `status` reports it.
///
/// A staged path is *modified* when its working-tree bytes differ from the
/// blob snapshot taken when it was staged. *Untracked* covers top-level
/// files captured by neither the index nor the current HEAD commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: BranchName,
    /// Branch being merged in, when a conflicted merge is in progress.
    pub merging: Option<BranchName>,
    pub staged: BTreeSet<PathBuf>,
    pub modified: BTreeSet<PathBuf>,
    pub untracked: BTreeSet<PathBuf>,
}
