//! Three-way merge
//!
//! - `split_point`: latest common ancestor of the two branch tips
//! - `merge_plan`: per-file reconciliation against the split point
//! - `conflict`: conflict-marker rendering
//!
//! ## Debug Logging
//!
//! The split-point search can trace its walk to stderr. Build with the
//! `debug_merge` feature to enable it:
//!
//! ```toml
//! [features]
//! debug_merge = []
//! ```

use crate::artifacts::objects::commit::Commit;

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod conflict;
pub mod merge_plan;
pub mod split_point;

/// How a merge ended.
///
/// A conflicted merge is not an error: the non-conflicting changes stay
/// staged, the conflicting files hold both versions, and no commit is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already part of the active branch's history
    AlreadyMerged,
    /// The active branch was behind and now points at the given tip
    FastForwarded,
    /// A merge commit was created
    Merged(Commit),
    /// At least one file conflicted
    Conflicted,
}

impl MergeOutcome {
    /// Line shown to the user, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            MergeOutcome::AlreadyMerged => Some("Given branch is an ancestor of the current branch."),
            MergeOutcome::FastForwarded => Some("Current branch fast-forwarded."),
            MergeOutcome::Merged(_) => None,
            MergeOutcome::Conflicted => Some("Encountered a merge conflict."),
        }
    }
}
