//! Object database
//!
//! Content-addressed, append-only storage for the two record kinds:
//!
//! - `objects/`: blobs keyed by the digest of their bytes
//! - `commits/`: commits keyed by their commit ID
//!
//! Writes are all-or-nothing per record (temp file + rename) and skipped when
//! a record with the same ID already exists. Reads re-derive the ID from the
//! stored content and refuse records that no longer match their key.

use crate::errors::DatabaseError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::collections::HashSet;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    /// Path to the repository data directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> PathBuf {
        self.path.join("objects")
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join("commits")
    }

    fn store_path(&self, object_type: ObjectType) -> PathBuf {
        match object_type {
            ObjectType::Blob => self.objects_path(),
            ObjectType::Commit => self.commits_path(),
        }
    }

    fn record_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.store_path(object_type).join(object_id.to_path())
    }

    /// Persist `object` unless a record with its ID already exists.
    ///
    /// Returns whether anything was written.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<bool> {
        let object_path = self
            .store_path(object.object_type())
            .join(object.object_path());

        // records are immutable: the first one written under an ID wins
        if object_path.exists() {
            return Ok(false);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object.serialize()?)?;

        Ok(true)
    }

    /// Store a blob and hand back its ID
    pub fn put_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        self.store(blob)?;
        Ok(blob.object_id().clone())
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;
        let blob = Blob::deserialize(reader)
            .with_context(|| format!("Unable to decode blob {}", object_id))?;

        Self::verify(ObjectType::Blob, object_id, blob.object_id())?;
        Ok(blob)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        let commit = Commit::deserialize(reader)
            .with_context(|| format!("Unable to decode commit {}", object_id))?;

        Self::verify(ObjectType::Commit, object_id, commit.object_id())?;
        Ok(commit)
    }

    /// Compare two blobs byte for byte.
    ///
    /// Equal IDs are still loaded and compared; the digest is not trusted on
    /// its own.
    pub fn content_equals(&self, left: &ObjectId, right: &ObjectId) -> anyhow::Result<bool> {
        let left = self.load_blob(left)?;
        let right = self.load_blob(right)?;

        Ok(left.content() == right.content())
    }

    /// Every commit ID reachable from `start` through parent links, `start`
    /// included.
    pub fn ancestors(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut current = Some(start.clone());

        while let Some(commit_oid) = current {
            // a repeated ID means the chain loops back on itself; stop there
            if !ancestors.insert(commit_oid.clone()) {
                break;
            }
            current = self.load_commit(&commit_oid)?.parent().cloned();
        }

        Ok(ancestors)
    }

    fn verify(
        object_type: ObjectType,
        expected: &ObjectId,
        actual: &ObjectId,
    ) -> anyhow::Result<()> {
        if expected != actual {
            return Err(DatabaseError::DigestMismatch {
                object_type,
                expected: expected.clone(),
                actual: actual.clone(),
            }
            .into());
        }

        Ok(())
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.record_path(expected_type, object_id);
        if !object_path.exists() {
            return Err(DatabaseError::NotFound {
                object_type: expected_type,
                oid: object_id.clone(),
            }
            .into());
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {} but a {} was expected",
                object_id,
                object_type,
                expected_type
            );
        }

        let body_len = object_reader.get_ref().len() - object_reader.position() as usize;
        if body_len != size {
            anyhow::bail!(
                "Object {} is truncated: expected {} bytes, found {}",
                object_id,
                size,
                body_len
            );
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all().context(format!(
            "Unable to flush object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
