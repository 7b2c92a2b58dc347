//! Ancestry queries over the commit graph
//!
//! Commits store a single parent, so every history walk is linear and the
//! common ancestor of two tips is well-defined: build the ancestor set of
//! one tip, walk the other's chain, and the first shared fingerprint wins.
//!
//! The engine is generic over a parent-loader function, which keeps the
//! algorithms independent of the on-disk store and lets the tests run over
//! an in-memory graph.

use crate::artifacts::objects::fingerprint::Fingerprint;
use std::collections::HashSet;

/// Resolves ancestry questions through a parent-loader function.
///
/// The loader takes a commit fingerprint and returns its parent, or `None`
/// for a root commit.
pub struct Ancestry<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&Fingerprint) -> anyhow::Result<Option<Fingerprint>>,
{
    parent_of: ParentLoaderFn,
}

impl<ParentLoaderFn> Ancestry<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&Fingerprint) -> anyhow::Result<Option<Fingerprint>>,
{
    pub fn new(parent_of: ParentLoaderFn) -> Self {
        Self { parent_of }
    }

    /// The linear walk from `tip` back to the root, inclusive.
    pub fn chain(&self, tip: &Fingerprint) -> anyhow::Result<Vec<Fingerprint>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(tip.clone());

        while let Some(commit) = current {
            // a revisited commit means the stored graph has a cycle
            if !seen.insert(commit.clone()) {
                anyhow::bail!("cycle detected in commit history at {}", commit);
            }
            current = (self.parent_of)(&commit)?;
            chain.push(commit);
        }

        Ok(chain)
    }

    /// Fingerprints reachable from `tip`, including `tip` itself.
    pub fn ancestor_set(&self, tip: &Fingerprint) -> anyhow::Result<HashSet<Fingerprint>> {
        Ok(self.chain(tip)?.into_iter().collect())
    }

    /// Whether `candidate` appears on the walk from `child`.
    pub fn is_ancestor(
        &self,
        child: &Fingerprint,
        candidate: &Fingerprint,
    ) -> anyhow::Result<bool> {
        let mut seen = HashSet::new();
        let mut current = Some(child.clone());

        while let Some(commit) = current {
            if &commit == candidate {
                return Ok(true);
            }
            if !seen.insert(commit.clone()) {
                anyhow::bail!("cycle detected in commit history at {}", commit);
            }
            current = (self.parent_of)(&commit)?;
        }

        Ok(false)
    }

    /// First commit on `b`'s history that is also reachable from `a`;
    /// `None` when the histories are unrelated.
    pub fn common_ancestor(
        &self,
        a: &Fingerprint,
        b: &Fingerprint,
    ) -> anyhow::Result<Option<Fingerprint>> {
        let reachable_from_a = self.ancestor_set(a)?;

        let mut seen = HashSet::new();
        let mut current = Some(b.clone());

        while let Some(commit) = current {
            if reachable_from_a.contains(&commit) {
                return Ok(Some(commit));
            }
            if !seen.insert(commit.clone()) {
                anyhow::bail!("cycle detected in commit history at {}", commit);
            }
            current = (self.parent_of)(&commit)?;
        }

        Ok(None)
    }
}
