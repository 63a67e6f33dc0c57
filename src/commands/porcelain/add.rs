use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(file).ok_or(RepositoryError::FileDoesNotExist)?;
        if !self.workspace().is_file(&path) {
            return Err(RepositoryError::FileDoesNotExist.into());
        }

        let head = self.head_commit()?;
        let oid = ObjectId::hash(self.workspace().read_file(&path)?);
        let head_entry = head.blob_oid(&path);

        let staging = &mut self.state_mut().staging;
        staging.withdraw_removal(&path, head_entry);

        if head_entry == Some(&oid) {
            // identical to the committed version: nothing to stage
            staging.withdraw_addition(&path);
        } else {
            staging.stage_addition(path);
        }

        Ok(())
    }
}
