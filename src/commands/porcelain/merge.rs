use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::untracked_in_the_way;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::merge_plan::{FileMerge, MergePlan};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::path::PathBuf;

impl Repository {
    /// Merge `branch` into the active branch.
    ///
    /// Precondition failures leave everything untouched. A conflicted merge
    /// keeps the staged results of the other files and makes no commit.
    pub fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        if self.state().staging.has_pending_changes() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let branch = BranchName::try_parse(branch.to_string())
            .map_err(|_| RepositoryError::BranchDoesNotExist)?;
        let target_oid = self
            .state()
            .branches
            .tip(&branch)
            .ok_or(RepositoryError::BranchDoesNotExist)?
            .clone();

        if &branch == self.active_branch() {
            return Err(RepositoryError::MergeWithSelf.into());
        }

        let target = self.database().load_commit(&target_oid)?;
        untracked_in_the_way(self, target.snapshot())?;

        let active_oid = self.head_oid()?.clone();
        let split_oid = SplitPointFinder::new(self.database()).find(&active_oid, &target_oid)?;

        if split_oid == target_oid {
            return Ok(MergeOutcome::AlreadyMerged);
        }

        if split_oid == active_oid {
            self.move_to(&target_oid)?;
            let state = self.state_mut();
            state.branches.set_tip(state.active_branch.clone(), target_oid);

            return Ok(MergeOutcome::FastForwarded);
        }

        let split = self.database().load_commit(&split_oid)?;
        let active = self.database().load_commit(&active_oid)?;
        let plan = MergePlan::classify(
            split.snapshot(),
            active.snapshot(),
            target.snapshot(),
            |left, right| self.database().content_equals(left, right),
        )?;

        self.apply_merge_plan(&plan)?;

        if plan.has_conflicts() {
            return Ok(MergeOutcome::Conflicted);
        }

        let message = format!("Merged {} with {}.", branch, self.active_branch());
        let commit = self.finalize(&message)?;

        Ok(MergeOutcome::Merged(commit))
    }

    /// Write every file the plan touches, then stage the clean results.
    fn apply_merge_plan(&mut self, plan: &MergePlan) -> anyhow::Result<()> {
        let database = self.database();
        let load = |oid: &Option<ObjectId>| -> anyhow::Result<Option<Bytes>> {
            oid.as_ref()
                .map(|oid| database.load_blob(oid).map(|blob| blob.content().clone()))
                .transpose()
        };

        // all blobs are read before the working directory changes
        let mut writes = Vec::<(PathBuf, Option<Bytes>)>::new();
        for (path, action) in plan.files() {
            let content = match action {
                FileMerge::TakeTarget(oid) => Some(database.load_blob(oid)?.content().clone()),
                FileMerge::Remove => None,
                FileMerge::Conflict { active, target } => Some(conflict_content(
                    load(active)?.as_deref(),
                    load(target)?.as_deref(),
                )),
            };
            writes.push((path.clone(), content));
        }

        // removals first, so a written file may take the place of a directory
        for (path, _) in writes.iter().filter(|(_, content)| content.is_none()) {
            self.workspace().remove_file(path)?;
        }
        for (path, content) in &writes {
            if let Some(content) = content {
                self.workspace().write_file(path, content)?;
            }
        }

        let staging = &mut self.state_mut().staging;
        for (path, action) in plan.files() {
            match action {
                FileMerge::TakeTarget(_) => staging.stage_addition(path.clone()),
                FileMerge::Remove => staging.stage_removal(path.clone()),
                FileMerge::Conflict { .. } => {}
            }
        }

        Ok(())
    }
}
