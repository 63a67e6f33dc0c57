//! Staging area
//!
//! Holds what the next commit will record:
//!
//! - `baseline`: the snapshot being built, seeded from the active commit
//! - `pending_add`: paths whose working-file content goes into the next commit
//! - `pending_remove`: tracked paths the next commit will drop
//!
//! The two pending sets are disjoint. Only the paths are kept; blob content
//! is read from the working directory when the commit is made.

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingArea {
    baseline: Snapshot,
    pending_add: BTreeSet<PathBuf>,
    pending_remove: BTreeSet<PathBuf>,
}

impl StagingArea {
    /// A staging area with nothing pending on top of `baseline`.
    pub fn fresh(baseline: Snapshot) -> Self {
        StagingArea {
            baseline,
            pending_add: BTreeSet::new(),
            pending_remove: BTreeSet::new(),
        }
    }

    pub(crate) fn from_parts(
        baseline: Snapshot,
        pending_add: BTreeSet<PathBuf>,
        pending_remove: BTreeSet<PathBuf>,
    ) -> Self {
        StagingArea {
            baseline,
            pending_add,
            pending_remove,
        }
    }

    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    pub fn pending_add(&self) -> &BTreeSet<PathBuf> {
        &self.pending_add
    }

    pub fn pending_remove(&self) -> &BTreeSet<PathBuf> {
        &self.pending_remove
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending_add.is_empty() || !self.pending_remove.is_empty()
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.pending_add.contains(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.pending_remove.contains(path)
    }

    /// Whether the next commit would carry `path` (baseline or pending add).
    pub fn tracks(&self, path: &Path) -> bool {
        self.baseline.contains_key(path) || self.pending_add.contains(path)
    }

    /// Cancel a pending removal, putting back the entry the active commit had.
    pub fn withdraw_removal(&mut self, path: &Path, head_entry: Option<&ObjectId>) {
        if self.pending_remove.remove(path)
            && let Some(oid) = head_entry
        {
            self.baseline.insert(path.to_path_buf(), oid.clone());
        }
    }

    pub fn withdraw_addition(&mut self, path: &Path) -> bool {
        self.pending_add.remove(path)
    }

    pub fn stage_addition(&mut self, path: PathBuf) {
        self.pending_remove.remove(&path);
        self.pending_add.insert(path);
    }

    pub fn stage_removal(&mut self, path: PathBuf) {
        self.pending_add.remove(&path);
        self.baseline.remove(&path);
        self.pending_remove.insert(path);
    }

    /// The snapshot the next commit records, given the digests of the
    /// pending additions.
    pub fn next_snapshot(&self, added: impl IntoIterator<Item = (PathBuf, ObjectId)>) -> Snapshot {
        let mut snapshot = self.baseline.clone();

        for path in &self.pending_remove {
            snapshot.remove(path);
        }
        snapshot.extend(added);

        snapshot
    }
}
