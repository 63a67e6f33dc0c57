use chrono::{Local, NaiveDateTime};
use derive_new::new;
use std::path::{Path, PathBuf};

use crate::artifacts::objects::commit::TIMESTAMP_FORMAT;

/// Name of the directory holding all repository data inside the work tree
pub const GITLET_DIR: &str = ".gitlet";

/// Environment variable pinning the timestamp stamped on new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

/// Everything the engine needs to know about its surroundings.
///
/// The engine never looks at the process environment itself; the binary builds
/// this once and hands it to [`crate::areas::repository::Repository`].
#[derive(Debug, Clone, new)]
pub struct RepositoryConfig {
    /// Root of the working directory
    work_tree: PathBuf,
    /// Fixed time for new commits; `None` means "now"
    commit_time: Option<NaiveDateTime>,
}

impl RepositoryConfig {
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    pub fn gitlet_dir(&self) -> PathBuf {
        self.work_tree.join(GITLET_DIR)
    }

    pub fn commit_time(&self) -> Option<NaiveDateTime> {
        self.commit_time
    }

    /// Timestamp for a commit created now.
    pub fn commit_time_or_now(&self) -> NaiveDateTime {
        self.commit_time
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Build a config for `work_tree`, reading the commit time from `raw_date`
    /// (the value of [`COMMIT_DATE_ENV`], if set).
    pub fn from_raw_parts(work_tree: PathBuf, raw_date: Option<String>) -> anyhow::Result<Self> {
        let commit_time = raw_date
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|e| {
                    anyhow::anyhow!("{COMMIT_DATE_ENV} must look like 2024-01-31 12:00:00: {e}")
                })
            })
            .transpose()?;

        Ok(Self::new(work_tree, commit_time))
    }
}
