//! Repository state file format
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "GLET" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Branch count (4 bytes)
//!
//! Active branch: name
//! Branches:      (name, 20-byte tip) * branch count
//! Baseline:      count (4 bytes), then (20-byte blob, path) * count
//! Pending adds:  count (4 bytes), then path * count
//! Pending rms:   count (4 bytes), then path * count
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! Names and paths are written as a 2-byte length followed by UTF-8 bytes.
//! All integers are big-endian.

pub mod checksum;
pub mod state_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the state header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying state files
pub const SIGNATURE: &str = "GLET";

/// State file format version
pub const VERSION: u32 = 1;
