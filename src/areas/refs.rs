//! Reference store: HEAD, the branch table, and merge state
//!
//! All three are small line-oriented text files under the repository
//! directory:
//!
//! - `HEAD` — a single `branch:tip` line; the tip is empty until the first
//!   commit. Whenever both are loaded, the tip equals the branch table's
//!   entry for that branch.
//! - `refs/branches` — one `name:tip` line per branch, name-sorted. A
//!   missing or empty file loads as a `master` branch with an empty tip.
//! - `MERGE_HEAD` — present only while a conflicted merge is in progress;
//!   records the merged branch and both tips.
//!
//! Trailing whitespace is trimmed on read everywhere.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::fingerprint::Fingerprint;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::Path;

const HEAD_FILE: &str = "HEAD";
const BRANCHES_FILE: &str = "branches";
const REFS_DIR: &str = "refs";
const MERGE_FILE: &str = "MERGE_HEAD";

const MERGING_PREFIX: &str = "merging:";
const MERGE_HEAD_PREFIX: &str = "head:";
const MERGE_TARGET_PREFIX: &str = "target:";

/// The current branch and its tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub branch: BranchName,
    pub tip: Option<Fingerprint>,
}

/// State of a merge awaiting conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeState {
    pub merging: BranchName,
    pub head: Fingerprint,
    pub target: Fingerprint,
}

/// Reference manager rooted at the repository directory.
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        let (branch, tip) = content
            .split_once(':')
            .with_context(|| format!("malformed HEAD content '{content}'"))?;

        Ok(Head {
            branch: BranchName::try_parse(branch)?,
            tip: Fingerprint::try_parse_optional(tip)?,
        })
    }

    pub fn write_head(
        &self,
        branch: &BranchName,
        tip: Option<&Fingerprint>,
    ) -> anyhow::Result<()> {
        let content = format!("{}:{}", branch, tip.map(AsRef::as_ref).unwrap_or(""));
        std::fs::write(self.head_path(), content)
            .with_context(|| format!("unable to write HEAD at {}", self.head_path().display()))
    }

    /// Load the branch table, seeding the default branch when the file is
    /// missing or empty.
    pub fn load_branches(&self) -> anyhow::Result<BTreeMap<BranchName, Option<Fingerprint>>> {
        let mut branches = BTreeMap::new();
        let branches_path = self.branches_path();

        if branches_path.exists() {
            let content = std::fs::read_to_string(&branches_path).with_context(|| {
                format!("unable to read branch table at {}", branches_path.display())
            })?;

            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let (name, tip) = line
                    .split_once(':')
                    .with_context(|| format!("malformed branch record '{line}'"))?;
                branches.insert(
                    BranchName::try_parse(name)?,
                    Fingerprint::try_parse_optional(tip)?,
                );
            }
        }

        if branches.is_empty() {
            branches.insert(BranchName::default_branch(), None);
        }

        Ok(branches)
    }

    pub fn save_branches(
        &self,
        branches: &BTreeMap<BranchName, Option<Fingerprint>>,
    ) -> anyhow::Result<()> {
        let refs_path = self.refs_path();
        std::fs::create_dir_all(&refs_path).with_context(|| {
            format!("unable to create refs directory {}", refs_path.display())
        })?;

        let content: String = branches
            .iter()
            .map(|(name, tip)| {
                format!("{}:{}\n", name, tip.as_ref().map(AsRef::as_ref).unwrap_or(""))
            })
            .collect();

        std::fs::write(self.branches_path(), content).with_context(|| {
            format!(
                "unable to write branch table at {}",
                self.branches_path().display()
            )
        })
    }

    /// Merge state, if a conflicted merge is in progress.
    pub fn read_merge_state(&self) -> anyhow::Result<Option<MergeState>> {
        let merge_path = self.merge_path();
        if !merge_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&merge_path)
            .with_context(|| format!("unable to read {}", merge_path.display()))?;

        let mut merging = None;
        let mut head = None;
        let mut target = None;

        for line in content.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix(MERGING_PREFIX) {
                merging = Some(BranchName::try_parse(value)?);
            } else if let Some(value) = line.strip_prefix(MERGE_HEAD_PREFIX) {
                head = Some(Fingerprint::try_parse(value)?);
            } else if let Some(value) = line.strip_prefix(MERGE_TARGET_PREFIX) {
                target = Some(Fingerprint::try_parse(value)?);
            }
        }

        match (merging, head, target) {
            (Some(merging), Some(head), Some(target)) => Ok(Some(MergeState {
                merging,
                head,
                target,
            })),
            _ => anyhow::bail!("malformed merge state at {}", merge_path.display()),
        }
    }

    pub fn write_merge_state(&self, state: &MergeState) -> anyhow::Result<()> {
        let content = format!(
            "{}{}\n{}{}\n{}{}\n",
            MERGING_PREFIX,
            state.merging,
            MERGE_HEAD_PREFIX,
            state.head,
            MERGE_TARGET_PREFIX,
            state.target
        );
        std::fs::write(self.merge_path(), content)
            .with_context(|| format!("unable to write {}", self.merge_path().display()))
    }

    pub fn clear_merge_state(&self) -> anyhow::Result<()> {
        let merge_path = self.merge_path();
        if merge_path.exists() {
            std::fs::remove_file(&merge_path)
                .with_context(|| format!("unable to remove {}", merge_path.display()))?;
        }
        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_FILE).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join(REFS_DIR).into_boxed_path()
    }

    pub fn branches_path(&self) -> Box<Path> {
        self.refs_path().join(BRANCHES_FILE).into_boxed_path()
    }

    pub fn merge_path(&self) -> Box<Path> {
        self.path.join(MERGE_FILE).into_boxed_path()
    }
}
