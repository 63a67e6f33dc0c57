//! Commit object
//!
//! A commit is an immutable snapshot of every tracked path plus the metadata
//! needed to walk history:
//! - Commit message
//! - Parent commit ID (absent only for the root commit)
//! - Timestamp with one-second resolution
//! - Snapshot mapping each tracked path to a blob ID
//!
//! The commit ID is the digest of `message ++ parent ++ timestamp`. The
//! snapshot does not take part in it, so two commits with the same message
//! and parent made within the same second share an ID.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! timestamp <yyyy-mm-dd hh:mm:ss>
//! blob <blob-sha> <path>
//! blob <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{NaiveDateTime, SubsecRound};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Timestamp layout used for hashing, storage and display
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Tracked paths of a commit mapped to their blob IDs
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    parent: Option<ObjectId>,
    timestamp: NaiveDateTime,
    snapshot: Snapshot,
    oid: ObjectId,
}

impl Commit {
    /// Create a commit with a specific timestamp
    ///
    /// Sub-second precision is dropped so that the stored form hashes to the
    /// same ID as the in-memory one.
    pub fn new_with_timestamp(
        message: String,
        parent: Option<ObjectId>,
        snapshot: Snapshot,
        timestamp: NaiveDateTime,
    ) -> Self {
        let timestamp = timestamp.trunc_subsecs(0);
        let oid = Self::compute_oid(&message, parent.as_ref(), &timestamp);

        Commit {
            message,
            parent,
            timestamp,
            snapshot,
            oid,
        }
    }

    /// The root commit every repository starts from
    pub fn initial(timestamp: NaiveDateTime) -> Self {
        Self::new_with_timestamp(
            INITIAL_COMMIT_MESSAGE.to_string(),
            None,
            Snapshot::new(),
            timestamp,
        )
    }

    fn compute_oid(message: &str, parent: Option<&ObjectId>, timestamp: &NaiveDateTime) -> ObjectId {
        let parent = parent.map(|oid| oid.as_ref()).unwrap_or_default();

        ObjectId::hash(format!(
            "{message}{parent}{}",
            timestamp.format(TIMESTAMP_FORMAT)
        ))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.snapshot.contains_key(path)
    }

    pub fn blob_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("timestamp {}", self.readable_timestamp()));
        for (path, blob_oid) in &self.snapshot {
            let path = path
                .to_str()
                .with_context(|| format!("Non UTF-8 path {:?}", path))?;
            object_content.push(format!("blob {} {}", blob_oid.as_ref(), path));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        Ok(frame(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        // header lines are never empty, so the first blank line ends them
        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut timestamp = None;
        let mut snapshot = Snapshot::new();

        for line in headers.lines() {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(raw_timestamp) = line.strip_prefix("timestamp ") {
                timestamp = Some(
                    NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT)
                        .context("Invalid commit object: invalid timestamp")?,
                );
            } else if let Some(entry) = line.strip_prefix("blob ") {
                let (blob_oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid blob line")?;
                snapshot.insert(
                    PathBuf::from(path),
                    ObjectId::try_parse(blob_oid.to_string())?,
                );
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Self::new_with_timestamp(
            message.to_string(),
            parent,
            snapshot,
            timestamp,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }
}
