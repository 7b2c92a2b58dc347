//! Content-addressed object store
//!
//! Objects live under `objects/<fingerprint>` as raw bytes: blob content
//! verbatim, commit records as their textual encoding. Writes are idempotent
//! (storing bytes that are already present is a no-op) and durable before
//! any reference is updated, so no reference can ever name an object that
//! was not written first.
//!
//! ## Storage Format
//!
//! - Path: `.minigit/objects/<40-hex-fingerprint>`
//! - Content: the object's bytes, uncompressed

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::fingerprint::Fingerprint;
use crate::errors::RepoError;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use fake::rand;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Object store rooted at the `objects/` directory.
#[derive(Debug, new)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a byte string, returning its fingerprint.
    pub fn put(&self, content: &[u8]) -> anyhow::Result<Fingerprint> {
        let fingerprint = Fingerprint::of(content);
        self.write_if_absent(&fingerprint, content)?;
        Ok(fingerprint)
    }

    /// Load an object's bytes. A referenced fingerprint with no object
    /// behind it is store corruption.
    pub fn get(&self, fingerprint: &Fingerprint) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(fingerprint.as_ref());

        if !object_path.exists() {
            return Err(RepoError::CorruptObject(fingerprint.clone()).into());
        }

        let content = std::fs::read(&object_path).with_context(|| {
            format!("unable to read object file {}", object_path.display())
        })?;
        Ok(content.into())
    }

    /// Blob bytes behind an absent-able fingerprint; absent reads as empty.
    pub fn get_or_empty(&self, fingerprint: Option<&Fingerprint>) -> anyhow::Result<Bytes> {
        match fingerprint {
            Some(fingerprint) => self.get(fingerprint),
            None => Ok(Bytes::new()),
        }
    }

    /// Store a commit record under its id.
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        self.write_if_absent(commit.id(), &commit.serialize())
    }

    /// Load and decode a commit record.
    pub fn load_commit(&self, fingerprint: &Fingerprint) -> anyhow::Result<Commit> {
        let content = self.get(fingerprint)?;
        Commit::deserialize(fingerprint.clone(), &content)
            .context(RepoError::CorruptObject(fingerprint.clone()))
    }

    /// Manifest of an optional tip; an empty tip has an empty manifest.
    pub fn manifest_of(
        &self,
        tip: Option<&Fingerprint>,
    ) -> anyhow::Result<BTreeMap<PathBuf, Fingerprint>> {
        match tip {
            Some(fingerprint) => Ok(self.load_commit(fingerprint)?.manifest_map()),
            None => Ok(BTreeMap::new()),
        }
    }

    fn write_if_absent(&self, fingerprint: &Fingerprint, content: &[u8]) -> anyhow::Result<()> {
        let object_path = self.path.join(fingerprint.as_ref());

        if object_path.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(&self.path).with_context(|| {
            format!("unable to create objects directory {}", self.path.display())
        })?;
        self.write_object(&object_path, content)
    }

    fn write_object(&self, object_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(content).with_context(|| {
            format!("unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).with_context(|| {
            format!("unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
