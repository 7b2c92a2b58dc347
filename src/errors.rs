//! Error taxonomy for repository operations.
//!
//! Every precondition is checked before the first on-disk mutation, and each
//! refusal is a typed variant here so the CLI can render a short message and
//! tests can match on it. Plain I/O failures travel as `anyhow` errors with
//! context attached at the call site.

use crate::artifacts::objects::fingerprint::Fingerprint;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("repository already initialized")]
    AlreadyInitialized,
    #[error("not a minigit repository (missing '{0}')")]
    NotInitialized(String),
    #[error("path '{}' not found", .0.display())]
    PathNotFound(PathBuf),
    #[error("path '{}' cannot be staged: ':' and ',' are not representable", .0.display())]
    UnsupportedPath(PathBuf),
    #[error("no changes staged for commit")]
    EmptyCommit,
    #[error("unknown branch '{0}'")]
    UnknownBranch(String),
    #[error("branch '{0}' already exists")]
    BranchExists(String),
    #[error("cannot merge a branch into itself")]
    SelfMerge,
    #[error("staged changes present; commit them first")]
    DirtyIndex,
    #[error("branches have no common history")]
    UnrelatedHistories,
    #[error("object {0} is missing or unreadable")]
    CorruptObject(Fingerprint),
}
