//! Error taxonomy
//!
//! Two families of failures flow out of the engine:
//!
//! - [`RepositoryError`]: expected, user-facing failures. Each variant renders
//!   as the exact message shown to the user and always aborts the operation
//!   before any state is mutated.
//! - [`DatabaseError`]: unexpected store failures (missing or corrupted
//!   records). Everything else unexpected (I/O, malformed state) travels as a
//!   plain `anyhow::Error` with context attached.
//!
//! A merge that stops on conflicts is not an error at all; see
//! [`crate::artifacts::merge::MergeOutcome`].

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Not in an initialized gitlet directory.")]
    NotInitialized,
    #[error("A gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("File does not exist.")]
    FileDoesNotExist,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No changes added to the commit.")]
    NoChangesAdded,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedFileInTheWay,
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,
    #[error("A branch with that name does not exist.")]
    BranchDoesNotExist,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("Invalid branch name.")]
    InvalidBranchName,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
}

impl RepositoryError {
    /// Process exit status used when this error ends a command.
    pub fn exit_code(&self) -> i32 {
        match self {
            RepositoryError::IncorrectOperands => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    #[error("{object_type} {oid} not found in the object database")]
    NotFound { object_type: ObjectType, oid: ObjectId },
    #[error("{object_type} {expected} is corrupted: stored content hashes to {actual}")]
    DigestMismatch {
        object_type: ObjectType,
        expected: ObjectId,
        actual: ObjectId,
    },
}
