use crate::artifacts::state::CHECKSUM_SIZE;
use anyhow::anyhow;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Wraps a state file, hashing every byte that passes through it.
#[derive(Debug)]
pub struct Checksum<F> {
    file: F,
    digest: Sha1,
}

impl<F> Checksum<F> {
    pub(crate) fn new(file: F) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn into_inner(self) -> F {
        self.file
    }
}

impl<F: Read> Checksum<F> {
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading state"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub(crate) fn read_u16(&mut self) -> anyhow::Result<u16> {
        Ok(NetworkEndian::read_u16(&self.read(2)?))
    }

    pub(crate) fn read_u32(&mut self) -> anyhow::Result<u32> {
        Ok(NetworkEndian::read_u32(&self.read(4)?))
    }

    /// Length-prefixed UTF-8 string
    pub(crate) fn read_str(&mut self) -> anyhow::Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read(len)?;

        String::from_utf8(bytes.to_vec()).map_err(|_| anyhow!("Invalid UTF-8 in state file"))
    }

    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.file
            .read_exact(&mut expected_checksum)
            .map_err(|_| anyhow!("State file is missing its checksum"))?;

        let actual_checksum = self.digest.clone().finalize();
        let actual_checksum = actual_checksum.as_slice();

        if expected_checksum != actual_checksum {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        let mut trailing = [0u8; 1];
        if self.file.read(&mut trailing)? != 0 {
            return Err(anyhow!("Unexpected data after state checksum"));
        }

        Ok(())
    }
}

impl<F: Write> Checksum<F> {
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_u16(&mut self, value: u16) -> anyhow::Result<()> {
        let mut buffer = [0u8; 2];
        NetworkEndian::write_u16(&mut buffer, value);
        self.write(&buffer)
    }

    pub(crate) fn write_u32(&mut self, value: u32) -> anyhow::Result<()> {
        let mut buffer = [0u8; 4];
        NetworkEndian::write_u32(&mut buffer, value);
        self.write(&buffer)
    }

    pub(crate) fn write_str(&mut self, value: &str) -> anyhow::Result<()> {
        let len = u16::try_from(value.len())
            .map_err(|_| anyhow!("Name too long for state file: {}", value))?;

        self.write_u16(len)?;
        self.write(value.as_bytes())
    }

    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to state file"))?;

        Ok(())
    }
}
