use crate::config::GITLET_DIR;
use anyhow::{Context, bail};
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [GITLET_DIR, ".", ".."];

/// The user's working directory.
///
/// Every path handed in or out is relative to the work-tree root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Key for a file named on the command line, relative to the work tree.
    ///
    /// `None` for names that cannot be tracked: anything reaching outside the
    /// work tree or into `.gitlet`, and names holding a line break.
    pub fn normalize(file: &str) -> Option<PathBuf> {
        if file.contains('\n') {
            return None;
        }

        let mut path = PathBuf::new();
        for component in Path::new(file).components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => path.push(name),
                Component::RootDir | Component::Prefix(_) | Component::ParentDir => return None,
            }
        }

        let in_repository_data = path
            .components()
            .next()
            .is_some_and(|first| first.as_os_str() == GITLET_DIR);
        if path.as_os_str().is_empty() || in_repository_data {
            return None;
        }

        Some(path)
    }

    /// All plain files under the work tree, sorted, repository data excluded.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path(), &self.path))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .map(PathBuf::from)
                    .with_context(|| format!("{:?} escapes the work tree", entry.path()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path, root: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };

        relative.components().any(|component| {
            if let Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Truncate-and-replace `file_path`, creating missing parent directories.
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_dir() {
            self.remove_empty_tree(file_path)?;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent of: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete `file_path` if present, along with the directories it leaves
    /// empty. A missing file is not an error.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
            self.prune_empty_parents(file_path)?;
        }

        Ok(())
    }

    fn prune_empty_parents(&self, file_path: &Path) -> anyhow::Result<()> {
        for parent in file_path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }

            let dir = self.path.join(parent);
            let is_empty = std::fs::read_dir(&dir)
                .with_context(|| format!("Failed to list directory: {:?}", parent))?
                .next()
                .is_none();
            if !is_empty {
                break;
            }

            std::fs::remove_dir(&dir)
                .with_context(|| format!("Failed to remove directory: {:?}", parent))?;
        }

        Ok(())
    }

    /// Remove a directory that holds no files, only (possibly nested) empty
    /// directories. Anything else is left in place and reported.
    fn remove_empty_tree(&self, dir_path: &Path) -> anyhow::Result<()> {
        for entry in WalkDir::new(self.path.join(dir_path)).contents_first(true) {
            let entry = entry.with_context(|| format!("Failed to walk directory: {:?}", dir_path))?;
            if !entry.file_type().is_dir() {
                bail!("{:?} is in the way of file {:?}", entry.path(), dir_path);
            }

            std::fs::remove_dir(entry.path())
                .with_context(|| format!("Failed to remove directory: {:?}", entry.path()))?;
        }

        Ok(())
    }
}
