use crate::areas::branches::BranchTable;
use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::areas::state::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object::Object;
use crate::config::RepositoryConfig;
use crate::errors::RepositoryError;
use anyhow::Context;

impl Repository {
    /// Create `.gitlet` in the work tree with a root commit on `master`.
    pub fn init(config: RepositoryConfig, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let state_file = Self::state_file_for(&config);
        if state_file.exists() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        let database = Database::new(config.gitlet_dir().into_boxed_path());
        for dir in [database.objects_path(), database.commits_path()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let root = Commit::initial(config.commit_time_or_now());
        database.store(&root)?;

        let master = BranchName::default_branch();
        let state = RepositoryState {
            active_branch: master.clone(),
            branches: BranchTable::from_iter([(master, root.object_id().clone())]),
            staging: StagingArea::fresh(Snapshot::new()),
        };
        state_file.save(&state)?;

        Ok(Self::assemble(config, writer, state_file, state))
    }
}
