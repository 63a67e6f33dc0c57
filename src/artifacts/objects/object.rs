use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Rebuild the record from its body; the `<type> <size>\0` header has
    /// already been consumed.
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Identity under which the record is stored
    fn object_id(&self) -> &ObjectId;

    fn object_path(&self) -> PathBuf {
        self.object_id().to_path()
    }
}

/// Frame `body` with the `<type> <size>\0` header.
pub(crate) fn frame(object_type: ObjectType, body: &[u8]) -> Bytes {
    let mut framed = object_type.header(body.len()).into_bytes();
    framed.extend_from_slice(body);

    Bytes::from(framed)
}
