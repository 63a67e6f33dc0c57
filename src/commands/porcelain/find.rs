use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// Print the ID of every commit whose message is exactly `message`.
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for (_, tip) in self.state().branches.iter() {
            for commit in RevList::new(self.database(), tip.clone()) {
                let commit = commit?;

                // the rest of this history was walked from another branch
                if !seen.insert(commit.object_id().clone()) {
                    break;
                }
                if commit.message() == message {
                    found.push(commit.object_id().clone());
                }
            }
        }

        if found.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        let mut writer = self.writer();
        for oid in found {
            writeln!(writer, "{oid}")?;
        }

        Ok(())
    }
}
