use crate::areas::index::Index;
use crate::areas::refs::MergeState;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::ancestry::Ancestry;
use crate::artifacts::merge::debug_log;
use crate::artifacts::merge::resolution::{self, PathResolution};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::fingerprint::Fingerprint;
use crate::errors::RepoError;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How a merge concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// One or both tips are empty; there is nothing to reconcile.
    NothingToMerge,
    /// The target is already part of the current history.
    AlreadyUpToDate,
    /// The current branch was advanced to the target tip; no commit was
    /// created.
    FastForwarded(Fingerprint),
    /// A three-way merge resolved cleanly into a new commit.
    Clean(Fingerprint),
    /// Conflicting paths were materialized with markers and staged;
    /// merge state awaits the resolving commit.
    Conflicted { paths: Vec<PathBuf> },
}

impl Repository {
    /// Merge a branch into the current one.
    ///
    /// Preconditions: the branch exists, differs from the current one, and
    /// the index is empty. The empty-tip and ancestor cases short-circuit;
    /// everything else is a file-level three-way merge against the common
    /// ancestor, refused when the histories share none.
    pub fn merge(&self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        let source = BranchName::try_parse(branch_name)?;
        let branches = self.refs().load_branches()?;
        let Some(target_tip) = branches.get(&source).cloned() else {
            return Err(RepoError::UnknownBranch(source.to_string()).into());
        };

        let head = self.refs().read_head()?;
        if source == head.branch {
            return Err(RepoError::SelfMerge.into());
        }

        let index = self.load_index()?;
        if !index.is_empty() {
            return Err(RepoError::DirtyIndex.into());
        }

        match (head.tip.clone(), target_tip) {
            (_, None) => Ok(MergeOutcome::NothingToMerge),
            (None, Some(target)) => self.fast_forward(&head.branch, branches, None, target),
            (Some(current), Some(target)) => {
                let ancestry = self.ancestry();

                if ancestry.is_ancestor(&current, &target)? {
                    debug_log!("merge: {} already reachable from {}", target, current);
                    return Ok(MergeOutcome::AlreadyUpToDate);
                }
                if ancestry.is_ancestor(&target, &current)? {
                    debug_log!("merge: fast-forwarding {} to {}", head.branch, target);
                    return self.fast_forward(&head.branch, branches, Some(&current), target);
                }

                let Some(ancestor) = ancestry.common_ancestor(&current, &target)? else {
                    return Err(RepoError::UnrelatedHistories.into());
                };
                debug_log!("merge: three-way against ancestor {}", ancestor);

                self.three_way(head.branch, branches, index, source, ancestor, current, target)
            }
        }
    }

    fn ancestry(
        &self,
    ) -> Ancestry<impl Fn(&Fingerprint) -> anyhow::Result<Option<Fingerprint>> + '_> {
        Ancestry::new(|fingerprint: &Fingerprint| {
            Ok(self.database().load_commit(fingerprint)?.parent().cloned())
        })
    }

    /// Advance the current branch to the target tip and materialize its
    /// snapshot; no commit is created.
    fn fast_forward(
        &self,
        branch: &BranchName,
        mut branches: BTreeMap<BranchName, Option<Fingerprint>>,
        current_tip: Option<&Fingerprint>,
        target_tip: Fingerprint,
    ) -> anyhow::Result<MergeOutcome> {
        let current_manifest = self.database().manifest_of(current_tip)?;
        let target_manifest = self.database().manifest_of(Some(&target_tip))?;

        Migration::between(&current_manifest, &target_manifest)
            .apply(self.workspace(), self.database())?;

        branches.insert(branch.clone(), Some(target_tip.clone()));
        self.refs().save_branches(&branches)?;
        self.refs().write_head(branch, Some(&target_tip))?;

        Ok(MergeOutcome::FastForwarded(target_tip))
    }

    #[allow(clippy::too_many_arguments)]
    fn three_way(
        &self,
        current_branch: BranchName,
        mut branches: BTreeMap<BranchName, Option<Fingerprint>>,
        mut index: Index,
        source: BranchName,
        ancestor: Fingerprint,
        current_tip: Fingerprint,
        target_tip: Fingerprint,
    ) -> anyhow::Result<MergeOutcome> {
        let base = self.database().manifest_of(Some(&ancestor))?;
        let current = self.database().manifest_of(Some(&current_tip))?;
        let target = self.database().manifest_of(Some(&target_tip))?;

        let resolutions = resolution::resolve(&base, &current, &target);

        let mut conflicts = Vec::new();
        let mut manifest = Vec::new();
        for (path, decision) in &resolutions {
            match decision {
                PathResolution::Keep(fingerprint) | PathResolution::Take(fingerprint) => {
                    manifest.push((path.clone(), fingerprint.clone()));
                }
                PathResolution::Remove => {}
                PathResolution::Conflict { .. } => conflicts.push(path.clone()),
            }
        }

        // materialize every decision; conflicting paths get marker bodies
        for (path, decision) in &resolutions {
            match decision {
                PathResolution::Keep(fingerprint) | PathResolution::Take(fingerprint) => {
                    let content = self.database().get(fingerprint)?;
                    self.workspace().write_file(path, &content)?;
                }
                PathResolution::Remove => self.workspace().remove_file(path)?,
                PathResolution::Conflict { current, target } => {
                    let current_content = self.database().get_or_empty(current.as_ref())?;
                    let target_content = self.database().get_or_empty(target.as_ref())?;
                    let body = resolution::render_conflict(
                        &current_branch,
                        &source,
                        &current_content,
                        &target_content,
                    );
                    self.workspace().write_file(path, &body)?;
                }
            }
        }

        if conflicts.is_empty() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            let message = format!("Merge branch '{}' into {}", source, current_branch);
            let commit = Commit::new(
                message,
                timestamp,
                Some(current_tip),
                Some(target_tip),
                manifest,
            );
            self.database().store_commit(&commit)?;

            branches.insert(current_branch.clone(), Some(commit.id().clone()));
            self.refs().save_branches(&branches)?;
            self.refs().write_head(&current_branch, Some(commit.id()))?;
            self.refs().clear_merge_state()?;

            Ok(MergeOutcome::Clean(commit.id().clone()))
        } else {
            // stage every merged path still on disk, then persist the merge
            // state so the resolving commit can pick it up
            for path in resolutions.keys() {
                if self.workspace().exists(path) {
                    let content = self.workspace().read_file(path)?;
                    let fingerprint = self.database().put(&content)?;
                    index.stage(path.clone(), fingerprint);
                }
            }
            index.save()?;

            self.refs().write_merge_state(&MergeState {
                merging: source,
                head: current_tip,
                target: target_tip,
            })?;

            Ok(MergeOutcome::Conflicted { paths: conflicts })
        }
    }
}
