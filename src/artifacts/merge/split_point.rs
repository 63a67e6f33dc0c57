use crate::areas::database::Database;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;

/// Finds the split point of two branches: the most recent commit on the
/// target's history that is also in the active branch's history.
///
/// Commits have a single parent, so walking the target's chain and stopping
/// at the first commit the active side can reach is enough.
#[derive(Debug, Clone, Copy)]
pub struct SplitPointFinder<'r> {
    database: &'r Database,
}

impl<'r> SplitPointFinder<'r> {
    pub fn new(database: &'r Database) -> Self {
        SplitPointFinder { database }
    }

    pub fn find(&self, active_tip: &ObjectId, target_tip: &ObjectId) -> anyhow::Result<ObjectId> {
        let active_ancestors = self.database.ancestors(active_tip)?;
        debug_log!(
            "active tip {} has {} ancestors",
            active_tip.to_short_oid(),
            active_ancestors.len()
        );

        for commit in RevList::new(self.database, target_tip.clone()) {
            let commit = commit?;
            let commit_oid = commit.object_id();

            if active_ancestors.contains(commit_oid) {
                debug_log!("split point found at {}", commit_oid.to_short_oid());
                return Ok(commit_oid.clone());
            }
            debug_log!("{} is not shared, moving on", commit_oid.to_short_oid());
        }

        // every history ends at the single root commit, so this means corruption
        anyhow::bail!(
            "No common ancestor between {} and {}",
            active_tip,
            target_tip
        )
    }
}
