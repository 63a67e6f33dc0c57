//! Persisted repository state
//!
//! Branch table, active branch and staging area travel together as a single
//! record at `.gitlet/state`. A command loads it once, works on the in-memory
//! copy and writes it back once at the end; the write replaces the file
//! atomically so a crash leaves either the old or the new state.

use crate::areas::branches::BranchTable;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::HEADER_SIZE;
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::state_header::StateHeader;
use anyhow::Context;
use fake::rand;
use std::collections::BTreeSet;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub active_branch: BranchName,
    pub branches: BranchTable,
    pub staging: StagingArea,
}

#[derive(Debug)]
pub struct StateFile {
    /// Path to the state file (typically `.gitlet/state`)
    path: Box<Path>,
}

impl StateFile {
    pub fn new(path: Box<Path>) -> Self {
        StateFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> anyhow::Result<RepositoryState> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Unable to open state file {}", self.path.display()))?;

        Self::decode(BufReader::new(file))
            .with_context(|| format!("Corrupted state file {}", self.path.display()))
    }

    pub fn save(&self, state: &RepositoryState) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .context(format!("Invalid state path {}", self.path.display()))?;
        let temp_path = dir.join(format!("tmp-state-{}", rand::random::<u32>()));

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open state file {}", temp_path.display()))?;

        let mut writer = BufWriter::new(file);
        Self::encode(state, &mut writer)?;
        writer
            .into_inner()
            .map_err(|e| e.into_error())?
            .sync_all()
            .with_context(|| format!("Unable to flush state file {}", temp_path.display()))?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to rename state file to {}", self.path.display()))?;

        Ok(())
    }

    fn encode(state: &RepositoryState, file: impl Write) -> anyhow::Result<()> {
        let mut writer = Checksum::new(file);

        let branch_count = u32::try_from(state.branches.len()).context("Too many branches")?;
        writer.write(&StateHeader::current(branch_count).serialize()?)?;

        writer.write_str(state.active_branch.as_ref())?;
        for (name, tip) in state.branches.iter() {
            writer.write_str(name.as_ref())?;
            Self::write_oid(&mut writer, tip)?;
        }

        let baseline = state.staging.baseline();
        writer.write_u32(u32::try_from(baseline.len()).context("Too many tracked files")?)?;
        for (path, oid) in baseline {
            Self::write_oid(&mut writer, oid)?;
            writer.write_str(Self::path_str(path)?)?;
        }

        Self::write_paths(&mut writer, state.staging.pending_add())?;
        Self::write_paths(&mut writer, state.staging.pending_remove())?;

        writer.write_checksum()?;
        writer.into_inner().flush()?;

        Ok(())
    }

    fn decode(file: impl Read) -> anyhow::Result<RepositoryState> {
        let mut reader = Checksum::new(file);

        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = StateHeader::deserialize(std::io::Cursor::new(header_bytes))?;
        header.validate()?;

        let active_branch = BranchName::try_parse(reader.read_str()?)?;
        let branches = (0..header.branch_count)
            .map(|_| {
                let name = BranchName::try_parse(reader.read_str()?)?;
                let tip = Self::read_oid(&mut reader)?;
                Ok((name, tip))
            })
            .collect::<anyhow::Result<BranchTable>>()?;

        if !branches.contains(&active_branch) {
            anyhow::bail!("Active branch {} has no tip", active_branch);
        }

        let baseline_count = reader.read_u32()?;
        let baseline = (0..baseline_count)
            .map(|_| {
                let oid = Self::read_oid(&mut reader)?;
                let path = PathBuf::from(reader.read_str()?);
                Ok((path, oid))
            })
            .collect::<anyhow::Result<Snapshot>>()?;

        let pending_add = Self::read_paths(&mut reader)?;
        let pending_remove = Self::read_paths(&mut reader)?;

        reader.verify()?;

        Ok(RepositoryState {
            active_branch,
            branches,
            staging: StagingArea::from_parts(baseline, pending_add, pending_remove),
        })
    }

    fn write_oid(writer: &mut Checksum<impl Write>, oid: &ObjectId) -> anyhow::Result<()> {
        let mut raw = Vec::with_capacity(20);
        oid.write_h40_to(&mut raw)?;
        writer.write(&raw)
    }

    fn read_oid(reader: &mut Checksum<impl Read>) -> anyhow::Result<ObjectId> {
        let raw = reader.read(20)?;
        ObjectId::read_h40_from(&mut raw.as_ref())
    }

    fn path_str(path: &Path) -> anyhow::Result<&str> {
        path.to_str()
            .with_context(|| format!("Non UTF-8 path {:?}", path))
    }

    fn write_paths(
        writer: &mut Checksum<impl Write>,
        paths: &BTreeSet<PathBuf>,
    ) -> anyhow::Result<()> {
        writer.write_u32(u32::try_from(paths.len()).context("Too many staged files")?)?;
        for path in paths {
            writer.write_str(Self::path_str(path)?)?;
        }

        Ok(())
    }

    fn read_paths(reader: &mut Checksum<impl Read>) -> anyhow::Result<BTreeSet<PathBuf>> {
        let count = reader.read_u32()?;

        (0..count)
            .map(|_| Ok(PathBuf::from(reader.read_str()?)))
            .collect()
    }
}
