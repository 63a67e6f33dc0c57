use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.finalize(message)?;

        Ok(())
    }

    /// Turn the staging area into a commit on the active branch.
    ///
    /// Every staged file is read before anything is stored or any state
    /// changes.
    pub(crate) fn finalize(&mut self, message: &str) -> anyhow::Result<Commit> {
        if message.is_empty() {
            return Err(RepositoryError::EmptyCommitMessage.into());
        }

        let staging = &self.state().staging;
        if !staging.has_pending_changes() {
            return Err(RepositoryError::NoChangesAdded.into());
        }

        let workspace = self.workspace();
        let blobs = staging
            .pending_add()
            .iter()
            .map(|path| -> anyhow::Result<Blob> {
                if !workspace.is_file(path) {
                    return Err(RepositoryError::FileDoesNotExist.into());
                }
                Ok(Blob::new(path.clone(), workspace.read_file(path)?))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let added = blobs
            .iter()
            .map(|blob| Ok((blob.source_path().to_path_buf(), self.database().put_blob(blob)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let commit = Commit::new_with_timestamp(
            message.to_string(),
            Some(self.head_oid()?.clone()),
            staging.next_snapshot(added),
            self.commit_time(),
        );

        // an identical ID already stored wins; continue from that record
        let commit = if self.database().store(&commit)? {
            commit
        } else {
            self.database().load_commit(commit.object_id())?
        };

        let state = self.state_mut();
        state
            .branches
            .set_tip(state.active_branch.clone(), commit.object_id().clone());
        state.staging = StagingArea::fresh(commit.snapshot().clone());

        Ok(commit)
    }
}
