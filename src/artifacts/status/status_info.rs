use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use colored::Colorize;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) active_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let state = self.repository.state();
        let staging = &state.staging;
        let workspace = self.repository.workspace();

        let working_files = workspace.list_files()?.into_iter().collect::<FileSet>();
        let mut workspace_changeset = ChangeSet::new();

        // tracked files not touched by `add`: compare against the baseline blob
        for (path, oid) in staging.baseline() {
            if staging.is_staged_for_addition(path) {
                continue;
            }

            if !working_files.contains(path) {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &ObjectId::hash(workspace.read_file(path)?) != oid {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        // staged content is read at commit time, so only a deletion can diverge
        for path in staging.pending_add() {
            if !working_files.contains(path) {
                workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            }
        }

        let untracked_files = working_files
            .into_iter()
            .filter(|path| !staging.tracks(path))
            .collect::<FileSet>();

        Ok(StatusInfo {
            branches: state.branches.names().cloned().collect(),
            active_branch: state.active_branch.clone(),
            staged_files: staging.pending_add().clone(),
            removed_files: staging.pending_remove().clone(),
            workspace_changeset,
            untracked_files,
        })
    }
}

impl StatusInfo {
    pub fn print(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.active_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for file in &self.staged_files {
            writeln!(writer, "{}", file.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for file in &self.removed_files {
            writeln!(writer, "{}", file.display().to_string().red())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (file, change) in &self.workspace_changeset {
            writeln!(writer, "{} {}", file.display(), change)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for file in &self.untracked_files {
            writeln!(writer, "{}", file.display())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
