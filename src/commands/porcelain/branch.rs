use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// New branch at the active tip. The active branch does not change.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())?;
        let head = self.head_oid()?.clone();

        self.state_mut().branches.create(branch, head)?;

        Ok(())
    }

    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchDoesNotExist)?;

        if !self.state().branches.contains(&branch) {
            return Err(RepositoryError::BranchDoesNotExist.into());
        }
        if &branch == self.active_branch() {
            return Err(RepositoryError::CannotRemoveCurrentBranch.into());
        }

        self.state_mut().branches.remove(&branch)?;

        Ok(())
    }
}
