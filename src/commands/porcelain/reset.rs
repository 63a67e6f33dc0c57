use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;

impl Repository {
    /// Move the active branch to `commit_id`, restoring its files.
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let commit_oid = Revision::new(commit_id).resolve(self)?;

        self.move_to(&commit_oid)?;

        let state = self.state_mut();
        state.branches.set_tip(state.active_branch.clone(), commit_oid);

        Ok(())
    }
}
