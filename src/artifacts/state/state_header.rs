use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::state::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StateHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) branch_count: u32,
}

impl StateHeader {
    pub(crate) fn current(branch_count: u32) -> Self {
        StateHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
            branch_count,
        }
    }

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        if self.marker != SIGNATURE {
            return Err(anyhow!("Invalid state file signature"));
        }

        if self.version != VERSION {
            return Err(anyhow!("Unsupported state file version: {}", self.version));
        }

        Ok(())
    }
}

impl Packable for StateHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.branch_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StateHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader
            .read_exact(&mut marker)
            .map_err(|_| anyhow!("Invalid header size"))?;

        let marker = String::from_utf8(marker.to_vec())
            .map_err(|_| anyhow!("Invalid marker in state header"))?;
        let version = reader.read_u32::<byteorder::NetworkEndian>()?;
        let branch_count = reader.read_u32::<byteorder::NetworkEndian>()?;

        Ok(StateHeader {
            marker,
            version,
            branch_count,
        })
    }
}
