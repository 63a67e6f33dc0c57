//! Working tree status inspection
//!
//! Compares the working directory against the staging area.
//!
//! ## Components
//!
//! - `file_change`: categories of unstaged changes
//! - `status_info`: status collection and its five report sections

pub mod file_change;
pub mod status_info;
