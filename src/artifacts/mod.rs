//! Data structures and algorithms
//!
//! - `branch`: Branch names and commit ID resolution
//! - `checkout`: Working directory migrations and the untracked-file guard
//! - `log`: Commit history traversal
//! - `merge`: Split point search and file reconciliation
//! - `objects`: Blob and commit records
//! - `state`: State file format
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod log;
pub mod merge;
pub mod objects;
pub mod state;
pub mod status;
