//! Commit records and their on-disk codec
//!
//! A commit is a snapshot of the working tree plus metadata. On disk it is a
//! single text object, one field per line:
//!
//! ```text
//! message:<message>
//! timestamp:<YYYY-MM-DD HH:MM:SS>
//! parent:<fingerprint-or-empty>
//! merge:<fingerprint>
//! files:<path>:<fp>,<path>:<fp>
//! ```
//!
//! Lines are classified by prefix and unknown lines are ignored, so the
//! format can grow without breaking older readers. The `merge:` line is
//! present only on commits that record a merged-in tip. The format does not
//! quote or escape, which is why paths containing `:` or `,` are refused at
//! staging time.
//!
//! A commit's id is the fingerprint of
//! `message || timestamp || parent || merge || blobFp₁ … blobFpₙ`
//! in manifest order, absent fields contributing the empty string. Folding
//! the merged-in tip into the id keeps a merge commit distinguishable from a
//! plain commit of the same content.

use crate::artifacts::objects::fingerprint::Fingerprint;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::PathBuf;

const MESSAGE_PREFIX: &str = "message:";
const TIMESTAMP_PREFIX: &str = "timestamp:";
const PARENT_PREFIX: &str = "parent:";
const MERGE_PREFIX: &str = "merge:";
const FILES_PREFIX: &str = "files:";

/// An immutable commit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    id: Fingerprint,
    message: String,
    timestamp: String,
    parent: Option<Fingerprint>,
    merged_parent: Option<Fingerprint>,
    /// `(path, blob fingerprint)` pairs in stored order.
    manifest: Vec<(PathBuf, Fingerprint)>,
}

impl Commit {
    /// Create a commit, deriving its id from the other fields.
    pub fn new(
        message: String,
        timestamp: String,
        parent: Option<Fingerprint>,
        merged_parent: Option<Fingerprint>,
        manifest: Vec<(PathBuf, Fingerprint)>,
    ) -> Self {
        let id = Self::derive_id(
            &message,
            &timestamp,
            parent.as_ref(),
            merged_parent.as_ref(),
            &manifest,
        );
        Commit {
            id,
            message,
            timestamp,
            parent,
            merged_parent,
            manifest,
        }
    }

    fn derive_id(
        message: &str,
        timestamp: &str,
        parent: Option<&Fingerprint>,
        merged_parent: Option<&Fingerprint>,
        manifest: &[(PathBuf, Fingerprint)],
    ) -> Fingerprint {
        let mut content = String::new();
        content.push_str(message);
        content.push_str(timestamp);
        if let Some(parent) = parent {
            content.push_str(parent.as_ref());
        }
        if let Some(merged_parent) = merged_parent {
            content.push_str(merged_parent.as_ref());
        }
        for (_, fingerprint) in manifest {
            content.push_str(fingerprint.as_ref());
        }
        Fingerprint::of(content.as_bytes())
    }

    pub fn id(&self) -> &Fingerprint {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn parent(&self) -> Option<&Fingerprint> {
        self.parent.as_ref()
    }

    pub fn merged_parent(&self) -> Option<&Fingerprint> {
        self.merged_parent.as_ref()
    }

    pub fn manifest(&self) -> &[(PathBuf, Fingerprint)] {
        &self.manifest
    }

    /// The manifest as a map, for set-wise operations (checkout, merge).
    pub fn manifest_map(&self) -> BTreeMap<PathBuf, Fingerprint> {
        self.manifest.iter().cloned().collect()
    }

    /// Encode the commit as its stored text.
    pub fn serialize(&self) -> Bytes {
        let mut lines = Vec::new();

        lines.push(format!("{}{}", MESSAGE_PREFIX, self.message));
        lines.push(format!("{}{}", TIMESTAMP_PREFIX, self.timestamp));
        lines.push(format!(
            "{}{}",
            PARENT_PREFIX,
            self.parent.as_ref().map(AsRef::as_ref).unwrap_or("")
        ));
        if let Some(merged_parent) = &self.merged_parent {
            lines.push(format!("{}{}", MERGE_PREFIX, merged_parent));
        }

        let entries = self
            .manifest
            .iter()
            .map(|(path, fingerprint)| format!("{}:{}", path.display(), fingerprint))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(format!("{}{}", FILES_PREFIX, entries));

        let mut content = lines.join("\n");
        content.push('\n');
        Bytes::from(content)
    }

    /// Decode a stored commit. The id is the store key the content was read
    /// from, not re-derived, so records written by other builds stay valid.
    pub fn deserialize(id: Fingerprint, content: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(content).context("commit object is not valid UTF-8")?;

        let mut message = String::new();
        let mut timestamp = String::new();
        let mut parent = None;
        let mut merged_parent = None;
        let mut manifest = Vec::new();

        for line in content.lines() {
            if let Some(value) = line.strip_prefix(MESSAGE_PREFIX) {
                message = value.to_string();
            } else if let Some(value) = line.strip_prefix(TIMESTAMP_PREFIX) {
                timestamp = value.to_string();
            } else if let Some(value) = line.strip_prefix(PARENT_PREFIX) {
                parent =
                    Fingerprint::try_parse_optional(value).context("invalid parent fingerprint")?;
            } else if let Some(value) = line.strip_prefix(MERGE_PREFIX) {
                merged_parent =
                    Fingerprint::try_parse_optional(value).context("invalid merge fingerprint")?;
            } else if let Some(value) = line.strip_prefix(FILES_PREFIX) {
                manifest = Self::parse_manifest(value)?;
            }
            // anything else is a field this build does not know; skip it
        }

        Ok(Commit {
            id,
            message,
            timestamp,
            parent,
            merged_parent,
            manifest,
        })
    }

    fn parse_manifest(value: &str) -> anyhow::Result<Vec<(PathBuf, Fingerprint)>> {
        if value.is_empty() {
            return Ok(Vec::new());
        }

        value
            .split(',')
            .map(|entry| {
                let (path, fingerprint) = entry
                    .split_once(':')
                    .with_context(|| format!("malformed manifest entry '{entry}'"))?;
                Ok((PathBuf::from(path), Fingerprint::try_parse(fingerprint)?))
            })
            .collect()
    }
}
