//! Porcelain commands (user-facing operations)
//!
//! Each command is an `impl Repository` block working on the loaded state;
//! the caller saves the state once the command returns.
//!
//! ## Commands
//!
//! - `init`: Create a repository with its root commit
//! - `add` / `rm`: Stage files for addition or removal
//! - `commit`: Record the staging area as a new commit
//! - `log` / `global-log`: Show commit history
//! - `find`: Look up commits by message
//! - `status`: Show branches, staged files and working tree changes
//! - `checkout`: Restore files or switch branches
//! - `branch` / `rm-branch`: Create or delete branch pointers
//! - `reset`: Move the active branch to another commit
//! - `merge`: Three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
