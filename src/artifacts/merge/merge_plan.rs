//! Per-file merge reconciliation
//!
//! Every path present in the split point, the active tip or the target tip is
//! classified by the first matching rule:
//!
//! 1. in all three, unchanged in active, changed in target: take target
//! 2. only in target: take target
//! 3. in split, unchanged in active, gone from target: remove
//! 4. in active and target with different content: conflict
//! 5. in split, gone from target, changed in active: conflict
//!
//! Paths matching no rule keep the active version.

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMerge {
    /// Check out the target's blob and stage it for addition
    TakeTarget(ObjectId),
    /// Delete from the working directory and stage for removal
    Remove,
    /// Write both sides with conflict markers; `None` is an absent side
    Conflict {
        active: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    files: BTreeMap<PathBuf, FileMerge>,
}

impl MergePlan {
    /// Classify every path of the three snapshots.
    ///
    /// `same_content` decides whether two blobs hold equal bytes.
    pub fn classify<F>(
        split: &Snapshot,
        active: &Snapshot,
        target: &Snapshot,
        mut same_content: F,
    ) -> anyhow::Result<Self>
    where
        F: FnMut(&ObjectId, &ObjectId) -> anyhow::Result<bool>,
    {
        let paths = split
            .keys()
            .chain(active.keys())
            .chain(target.keys())
            .collect::<BTreeSet<_>>();

        let mut files = BTreeMap::new();
        for path in paths {
            let s = split.get(path);
            let a = active.get(path);
            let t = target.get(path);

            if let Some(action) = Self::classify_file(s, a, t, &mut same_content)? {
                files.insert(path.clone(), action);
            }
        }

        Ok(MergePlan { files })
    }

    fn classify_file<F>(
        split: Option<&ObjectId>,
        active: Option<&ObjectId>,
        target: Option<&ObjectId>,
        same_content: &mut F,
    ) -> anyhow::Result<Option<FileMerge>>
    where
        F: FnMut(&ObjectId, &ObjectId) -> anyhow::Result<bool>,
    {
        let action = match (split, active, target) {
            (Some(s), Some(a), Some(t)) if same_content(a, s)? && !same_content(t, s)? => {
                Some(FileMerge::TakeTarget(t.clone()))
            }
            (None, None, Some(t)) => Some(FileMerge::TakeTarget(t.clone())),
            (Some(s), Some(a), None) if same_content(a, s)? => Some(FileMerge::Remove),
            (_, Some(a), Some(t)) if !same_content(a, t)? => Some(FileMerge::Conflict {
                active: Some(a.clone()),
                target: Some(t.clone()),
            }),
            (Some(s), Some(a), None) if !same_content(a, s)? => Some(FileMerge::Conflict {
                active: Some(a.clone()),
                target: None,
            }),
            _ => None,
        };

        Ok(action)
    }

    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &FileMerge)> {
        self.files.iter()
    }

    pub fn has_conflicts(&self) -> bool {
        self.files
            .values()
            .any(|action| matches!(action, FileMerge::Conflict { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
