use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Snapshot;
use crate::errors::RepositoryError;
use anyhow::bail;
use std::path::{Path, PathBuf};

/// Plan for replacing the files of `current` with the files of `target`.
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files to write, with their blobs
    writes: &'r Snapshot,
    /// Files tracked by the current snapshot that the target drops
    deletes: Vec<PathBuf>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &Snapshot, target: &'r Snapshot) -> Self {
        let deletes = current
            .keys()
            .filter(|path| !target.contains_key(path.as_path()))
            .cloned()
            .collect();

        Migration {
            repository,
            writes: target,
            deletes,
        }
    }

    /// Refuse the migration if a working file the staging baseline does not
    /// know about would be overwritten or removed.
    pub fn check_untracked(&self) -> anyhow::Result<()> {
        untracked_in_the_way(self.repository, self.writes)
    }

    /// Refuse the migration if an incoming file would land on, or below, a
    /// working file that survives the deletes.
    fn check_layout(&self) -> anyhow::Result<()> {
        let working = self.repository.workspace().list_files()?;
        let remaining = working
            .iter()
            .filter(|path| !self.deletes.contains(path) && !self.writes.contains_key(*path))
            .collect::<Vec<_>>();

        for incoming in self.writes.keys() {
            if let Some(blocker) = remaining.iter().find(|path| nested(path, incoming)) {
                bail!("Cannot write {:?}: {:?} is in the way", incoming, blocker);
            }
        }

        Ok(())
    }

    /// Check, then rewrite the working directory.
    ///
    /// Nothing on disk changes until every check has passed and every blob
    /// has been loaded. Deletes run before writes so that a file can replace
    /// a directory and the other way round.
    pub fn apply(self) -> anyhow::Result<()> {
        self.check_untracked()?;
        self.check_layout()?;

        let database = self.repository.database();
        let blobs = self
            .writes
            .iter()
            .map(|(path, oid)| Ok((path.as_path(), database.load_blob(oid)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let workspace = self.repository.workspace();
        for path in &self.deletes {
            workspace.remove_file(path)?;
        }
        for (path, blob) in blobs {
            workspace.write_file(path, blob.content())?;
        }

        Ok(())
    }
}

/// Fail if some working file absent from the staging baseline sits where
/// `incoming` puts a file, below one of its files, or at one of their
/// parent directories.
pub fn untracked_in_the_way(repository: &Repository, incoming: &Snapshot) -> anyhow::Result<()> {
    let baseline = repository.state().staging.baseline();

    let blocked = repository
        .workspace()
        .list_files()?
        .iter()
        .filter(|path| !baseline.contains_key(path.as_path()))
        .any(|path| incoming.keys().any(|target| nested(path, target)));

    if blocked {
        return Err(RepositoryError::UntrackedFileInTheWay.into());
    }

    Ok(())
}

/// Whether the two paths are equal or one lies inside the other.
fn nested(left: &Path, right: &Path) -> bool {
    left.starts_with(right) || right.starts_with(left)
}
