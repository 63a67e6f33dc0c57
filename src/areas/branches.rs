//! Branch table
//!
//! Maps every branch name to the commit at its tip. Iteration is always in
//! name order, which is also the order commit-ID resolution and the history
//! listings walk branches in.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchTable {
    branches: BTreeMap<BranchName, ObjectId>,
}

impl BranchTable {
    pub fn new() -> Self {
        BranchTable::default()
    }

    pub fn tip(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.branches.contains_key(name)
    }

    pub fn create(&mut self, name: BranchName, tip: ObjectId) -> Result<(), RepositoryError> {
        if self.contains(&name) {
            return Err(RepositoryError::BranchAlreadyExists);
        }

        self.branches.insert(name, tip);
        Ok(())
    }

    /// Drop the pointer only; commits stay in the store.
    pub fn remove(&mut self, name: &BranchName) -> Result<ObjectId, RepositoryError> {
        self.branches
            .remove(name)
            .ok_or(RepositoryError::BranchDoesNotExist)
    }

    /// Move (or create) `name` to point at `tip`.
    pub fn set_tip(&mut self, name: BranchName, tip: ObjectId) {
        self.branches.insert(name, tip);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &BranchName> {
        self.branches.keys()
    }

    pub(crate) fn len(&self) -> usize {
        self.branches.len()
    }
}

impl FromIterator<(BranchName, ObjectId)> for BranchTable {
    fn from_iter<T: IntoIterator<Item = (BranchName, ObjectId)>>(iter: T) -> Self {
        BranchTable {
            branches: iter.into_iter().collect(),
        }
    }
}
