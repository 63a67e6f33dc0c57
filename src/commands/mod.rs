//! Command implementations
//!
//! - `porcelain`: the user-facing commands (add, commit, log, merge, ...)

pub mod porcelain;
