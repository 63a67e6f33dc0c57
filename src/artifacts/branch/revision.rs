use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

/// A commit ID as typed by the user: either the full 40 characters or an
/// abbreviation of them.
///
/// Resolution only considers commits reachable from some branch. Branches
/// are searched in name order and each history from tip to root; the first
/// commit that matches wins, even if the abbreviation is ambiguous.
#[derive(Debug, Clone)]
pub struct Revision(String);

impl Revision {
    pub fn new(raw: impl Into<String>) -> Self {
        Revision(raw.into().to_ascii_lowercase())
    }

    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        for (_, tip) in repository.state().branches.iter() {
            for commit in RevList::new(repository.database(), tip.clone()) {
                let commit = commit?;
                if commit.object_id().matches(&self.0) {
                    return Ok(commit.object_id().clone());
                }
            }
        }

        Err(RepositoryError::NoSuchCommit.into())
    }
}
