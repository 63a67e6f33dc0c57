//! Stored object types and operations
//!
//! Two kinds of records live in the object database, each identified by a
//! SHA-1 digest rendered as 40 hex characters:
//!
//! - **Blob**: a file's raw bytes, identified by the digest of those bytes
//! - **Commit**: message, parent, timestamp and a full path→blob snapshot,
//!   identified by the digest of message, parent and timestamp only
//!
//! Both are serialized with an explicit `<type> <size>\0<body>` framing.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
