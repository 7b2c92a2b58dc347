//! Repository handle
//!
//! A `Repository` is a value bound to a root directory, composing the
//! object database, reference store, and working tree. Operations load
//! references and the index when they start and persist before returning;
//! nothing is cached across calls, so the filesystem stays the single
//! source of truth.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::RepoError;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Repository directory name.
pub const REPO_DIR: &str = ".minigit";

/// Object database directory name.
const DATABASE_DIR: &str = "objects";

/// Index file name.
const INDEX_FILE: &str = "index";

pub struct Repository {
    path: Box<Path>,
    database: Database,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    /// Bind to a root directory without requiring a repository to exist;
    /// `init` starts from here.
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("unable to resolve path {}", path.display()))?;
        let repo_path = path.join(REPO_DIR);

        Ok(Repository {
            database: Database::new(repo_path.join(DATABASE_DIR).into_boxed_path()),
            refs: Refs::new(repo_path.into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path(), REPO_DIR.to_string()),
            path: path.into_boxed_path(),
        })
    }

    /// Open an existing repository; every operation except `init` starts
    /// here.
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let repository = Self::new(path)?;

        if !repository.repo_path().exists() {
            return Err(RepoError::NotInitialized(REPO_DIR.to_string()).into());
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo_path(&self) -> PathBuf {
        self.path.join(REPO_DIR)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn load_index(&self) -> anyhow::Result<Index> {
        Index::load(self.repo_path().join(INDEX_FILE).into_boxed_path())
    }
}
