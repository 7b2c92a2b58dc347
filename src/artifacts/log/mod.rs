//! Log entry types

use crate::artifacts::objects::fingerprint::Fingerprint;

/// One record of the linear history walk, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: Fingerprint,
    pub timestamp: String,
    pub message: String,
    /// Tip that was merged in, for commits that record one.
    pub merged_from: Option<Fingerprint>,
}
