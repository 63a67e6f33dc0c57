use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Restore `file` as the active commit has it.
    pub fn checkout_file(&mut self, file: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        self.restore_file(&head, file)
    }

    /// Restore `file` as the commit named by `commit_id` (full or abbreviated)
    /// has it.
    pub fn checkout_file_from_commit(&mut self, commit_id: &str, file: &str) -> anyhow::Result<()> {
        let commit_oid = Revision::new(commit_id).resolve(self)?;
        let commit = self.database().load_commit(&commit_oid)?;

        self.restore_file(&commit, file)
    }

    /// Switch the working directory and staging area to `name`'s tip.
    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch =
            BranchName::try_parse(name.to_string()).map_err(|_| RepositoryError::NoSuchBranch)?;
        let target_oid = self
            .state()
            .branches
            .tip(&branch)
            .ok_or(RepositoryError::NoSuchBranch)?
            .clone();

        if &branch == self.active_branch() {
            return Err(RepositoryError::AlreadyOnBranch.into());
        }

        self.move_to(&target_oid)?;
        self.state_mut().active_branch = branch;

        Ok(())
    }

    /// Rewrite the working directory from the active commit to `target_oid`
    /// and start a fresh staging area there. Branch pointers are untouched.
    pub(crate) fn move_to(&mut self, target_oid: &ObjectId) -> anyhow::Result<()> {
        let current = self.head_commit()?;
        let target = self.database().load_commit(target_oid)?;

        Migration::new(self, current.snapshot(), target.snapshot()).apply()?;
        self.state_mut().staging = StagingArea::fresh(target.into_snapshot());

        Ok(())
    }

    fn restore_file(&self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(file).ok_or(RepositoryError::FileNotInCommit)?;
        let blob_oid = commit
            .blob_oid(&path)
            .ok_or(RepositoryError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())
    }
}
