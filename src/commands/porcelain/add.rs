use crate::areas::repository::Repository;
use crate::artifacts::objects::fingerprint::Fingerprint;
use crate::errors::RepoError;
use std::path::{Path, PathBuf};

/// Report returned by a successful `add`.
#[derive(Debug)]
pub struct AddReport {
    pub path: PathBuf,
    pub fingerprint: Fingerprint,
}

impl Repository {
    /// Stage a file: snapshot its bytes into the object store, then record
    /// the path with that snapshot in the index. A missing path leaves the
    /// index untouched.
    pub fn add(&self, path: &Path) -> anyhow::Result<AddReport> {
        if !self.workspace().exists(path) {
            return Err(RepoError::PathNotFound(path.to_path_buf()).into());
        }

        // the manifest encoding cannot represent these characters
        let encoded = path.to_string_lossy();
        if encoded.contains(':') || encoded.contains(',') {
            return Err(RepoError::UnsupportedPath(path.to_path_buf()).into());
        }

        let content = self.workspace().read_file(path)?;
        // the blob write precedes the index write, so the index never names
        // a snapshot that was not stored
        let fingerprint = self.database().put(&content)?;

        let mut index = self.load_index()?;
        index.stage(path.to_path_buf(), fingerprint.clone());
        index.save()?;

        Ok(AddReport {
            path: path.to_path_buf(),
            fingerprint,
        })
    }
}
