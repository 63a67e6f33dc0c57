//! Moving the working directory from one snapshot to another
//!
//! Used by branch checkout, reset and fast-forward merges. A migration is
//! checked for untracked files in the way before anything on disk changes.

pub mod migration;
