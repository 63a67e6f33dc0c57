use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::RepositoryError;

impl Repository {
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(file).ok_or(RepositoryError::NoReasonToRemove)?;
        let tracked = self.head_commit()?.tracks(&path);
        let staged = self.state().staging.is_staged_for_addition(&path);

        if !tracked && !staged {
            return Err(RepositoryError::NoReasonToRemove.into());
        }

        if tracked {
            self.workspace().remove_file(&path)?;
            self.state_mut().staging.stage_removal(path);
        } else {
            self.state_mut().staging.withdraw_addition(&path);
        }

        Ok(())
    }
}
