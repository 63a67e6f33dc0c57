//! Core repository components
//!
//! This module contains the building blocks of a repository:
//!
//! - `database`: Object database for blobs and commits
//! - `workspace`: Working directory file system operations
//! - `branches`: Branch name to tip mapping
//! - `staging`: Staging area for the next commit
//! - `state`: Persisted record of branches and staging area
//! - `repository`: High-level repository operations and coordination

pub mod branches;
pub mod database;
pub mod repository;
pub mod staging;
pub mod state;
pub mod workspace;
