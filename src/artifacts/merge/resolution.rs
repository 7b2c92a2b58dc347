//! Three-way, file-level merge resolution
//!
//! Each path present in any of the three manifests (base, current, target)
//! resolves independently. With `b`, `c`, `t` the blob fingerprints (absent
//! when the path is missing on that side):
//!
//! | condition        | decision                           |
//! |------------------|------------------------------------|
//! | `c == t`         | keep `c` (absent when both absent) |
//! | `b == t, b != c` | keep `c` (kept or deleted)         |
//! | `b == c, b != t` | take `t` (written or deleted)      |
//! | otherwise        | conflict                           |
//!
//! The first row covers identical additions and double deletions; the last
//! covers every disagreement, including add/add and change/delete.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::fingerprint::Fingerprint;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// What the merge does with one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// Keep the current side's snapshot.
    Keep(Fingerprint),
    /// Take the target side's snapshot.
    Take(Fingerprint),
    /// The path ends up absent.
    Remove,
    /// Both sides changed the path in different ways.
    Conflict {
        current: Option<Fingerprint>,
        target: Option<Fingerprint>,
    },
}

/// Resolve every path across the three manifests.
pub fn resolve(
    base: &BTreeMap<PathBuf, Fingerprint>,
    current: &BTreeMap<PathBuf, Fingerprint>,
    target: &BTreeMap<PathBuf, Fingerprint>,
) -> BTreeMap<PathBuf, PathResolution> {
    let paths: BTreeSet<&PathBuf> = base
        .keys()
        .chain(current.keys())
        .chain(target.keys())
        .collect();

    paths
        .into_iter()
        .map(|path| {
            let b = base.get(path);
            let c = current.get(path);
            let t = target.get(path);

            let resolution = if c == t {
                match c {
                    Some(fingerprint) => PathResolution::Keep(fingerprint.clone()),
                    None => PathResolution::Remove,
                }
            } else if b == t {
                // only the current side changed
                match c {
                    Some(fingerprint) => PathResolution::Keep(fingerprint.clone()),
                    None => PathResolution::Remove,
                }
            } else if b == c {
                // only the target side changed
                match t {
                    Some(fingerprint) => PathResolution::Take(fingerprint.clone()),
                    None => PathResolution::Remove,
                }
            } else {
                PathResolution::Conflict {
                    current: c.cloned(),
                    target: t.cloned(),
                }
            };

            (path.clone(), resolution)
        })
        .collect()
}

/// Render the working-tree body for a conflicting path.
///
/// Each side keeps its own bytes, gaining a final newline only when it is
/// non-empty and not already newline-terminated, so the closing marker
/// always starts a fresh line.
pub fn render_conflict(
    current_branch: &BranchName,
    source_branch: &BranchName,
    current: &[u8],
    target: &[u8],
) -> Bytes {
    let mut body = Vec::new();

    body.extend_from_slice(format!("<<<<<<< HEAD ({current_branch})\n").as_bytes());
    push_side(&mut body, current);
    body.extend_from_slice(b"=======\n");
    push_side(&mut body, target);
    body.extend_from_slice(format!(">>>>>>> {source_branch}\n").as_bytes());

    body.into()
}

fn push_side(body: &mut Vec<u8>, side: &[u8]) {
    body.extend_from_slice(side);
    if !side.is_empty() && !side.ends_with(b"\n") {
        body.push(b'\n');
    }
}
