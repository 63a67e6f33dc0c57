//! Blob object
//!
//! A blob is the stored copy of one file's bytes. Its identity is the SHA-1 of
//! the raw bytes alone, so two files with identical content share one record
//! no matter which path they came from. The path that produced the record
//! first is kept for information only.
//!
//! ## Format
//!
//! On disk: `blob <size>\0path <source path>\n<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Working-tree path the content was read from
    source_path: PathBuf,
    /// Raw file content
    content: Bytes,
    /// Digest of `content`
    oid: ObjectId,
}

impl Blob {
    pub fn new(source_path: PathBuf, content: Bytes) -> Self {
        let oid = ObjectId::hash(&content);

        Blob {
            source_path,
            content,
            oid,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let source_path = self
            .source_path
            .to_str()
            .with_context(|| format!("Non UTF-8 path {:?}", self.source_path))?;

        let mut body = format!("path {source_path}\n").into_bytes();
        body.extend_from_slice(&self.content);

        Ok(frame(self.object_type(), &body))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut path_line = String::new();
        reader
            .read_line(&mut path_line)
            .context("Invalid blob object: unreadable path line")?;
        let source_path = path_line
            .strip_suffix('\n')
            .and_then(|line| line.strip_prefix("path "))
            .context("Invalid blob object: invalid path line")?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(PathBuf::from(source_path), Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }
}
