use crate::areas::database::Database;
use crate::areas::state::{RepositoryState, StateFile};
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::RepositoryConfig;
use crate::errors::RepositoryError;
use anyhow::Context;
use chrono::NaiveDateTime;
use std::cell::{RefCell, RefMut};

pub struct Repository {
    config: RepositoryConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    state_file: StateFile,
    state: RepositoryState,
}

impl Repository {
    /// Open the repository rooted at the configured work tree.
    ///
    /// Fails with [`RepositoryError::NotInitialized`] when there is no state
    /// record to load.
    pub fn open(config: RepositoryConfig, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let state_file = Self::state_file_for(&config);
        if !state_file.exists() {
            return Err(RepositoryError::NotInitialized.into());
        }

        let state = state_file.load()?;
        Ok(Self::assemble(config, writer, state_file, state))
    }

    pub(crate) fn assemble(
        config: RepositoryConfig,
        writer: Box<dyn std::io::Write>,
        state_file: StateFile,
        state: RepositoryState,
    ) -> Self {
        let gitlet_dir = config.gitlet_dir();

        Repository {
            database: Database::new(gitlet_dir.into_boxed_path()),
            workspace: Workspace::new(config.work_tree().to_path_buf().into_boxed_path()),
            writer: RefCell::new(writer),
            config,
            state_file,
            state,
        }
    }

    pub(crate) fn state_file_for(config: &RepositoryConfig) -> StateFile {
        StateFile::new(config.gitlet_dir().join("state").into_boxed_path())
    }

    /// Write the in-memory state back to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.state_file.save(&self.state)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut RepositoryState {
        &mut self.state
    }

    pub fn active_branch(&self) -> &BranchName {
        &self.state.active_branch
    }

    /// Tip of the active branch.
    pub fn head_oid(&self) -> anyhow::Result<&ObjectId> {
        self.state
            .branches
            .tip(&self.state.active_branch)
            .with_context(|| format!("Active branch {} has no tip", self.state.active_branch))
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.load_commit(self.head_oid()?)
    }

    pub fn commit_time(&self) -> NaiveDateTime {
        self.config.commit_time_or_now()
    }
}
