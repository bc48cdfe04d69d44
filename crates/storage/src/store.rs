// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk resume snapshots, one file per parent run.
//!
//! Files live at `<root>/multijob.resume.<run>.snapshot`. A file exists only
//! while its run is active and configured to survive restarts.

use crate::snapshot::{ResumeSnapshot, SnapshotError};
use mj_core::{ParentRunId, RegistrySnapshot};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "multijob.resume.";
const FILE_SUFFIX: &str = ".snapshot";

/// A snapshot file found by [`ResumeStateStore::scan`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub run_number: u64,
    pub path: PathBuf,
}

/// Extract the run number from a snapshot file name.
pub fn parse_run_number(file_name: &str) -> Option<u64> {
    file_name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?.parse().ok()
}

/// Resume snapshot files under one parent job's storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeStateStore {
    root: PathBuf,
}

impl ResumeStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot path for run `number`
    pub fn path_for(&self, number: u64) -> PathBuf {
        self.root.join(format!("{FILE_PREFIX}{number}{FILE_SUFFIX}"))
    }

    fn tmp_path_for(&self, number: u64) -> PathBuf {
        self.path_for(number).with_extension("snapshot.tmp")
    }

    /// Write the full registry of `parent`, logging and swallowing failures.
    pub fn persist(&self, parent: &ParentRunId, snapshot: RegistrySnapshot) {
        let snapshot = ResumeSnapshot::new(parent.clone(), snapshot);
        if let Err(e) = self.try_persist(&snapshot) {
            tracing::warn!(
                run = %parent,
                path = %self.path_for(parent.number).display(),
                error = %e,
                "failed to write resume snapshot"
            );
        }
    }

    /// Write `snapshot` atomically: temp file, fsync, rename.
    pub fn try_persist(&self, snapshot: &ResumeSnapshot) -> Result<PathBuf, SnapshotError> {
        let path = self.path_for(snapshot.parent.number);
        let tmp = self.tmp_path_for(snapshot.parent.number);
        let bytes = snapshot.to_json()?;

        fs::create_dir_all(&self.root)?;
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &path)?;

        tracing::debug!(
            run = %snapshot.parent,
            revision = snapshot.revision,
            records = snapshot.records.len(),
            path = %path.display(),
            "resume snapshot written"
        );
        Ok(path)
    }

    /// Remove the snapshot of run `number`, logging and swallowing failures.
    pub fn delete(&self, number: u64) {
        if let Err(e) = self.try_delete(number) {
            tracing::warn!(
                run = number,
                path = %self.path_for(number).display(),
                error = %e,
                "failed to delete resume snapshot"
            );
        }
    }

    /// Remove the snapshot of run `number` and any leftover temp file.
    ///
    /// Returns whether a snapshot existed. A missing file is not an error.
    pub fn try_delete(&self, number: u64) -> Result<bool, SnapshotError> {
        remove_if_exists(&self.tmp_path_for(number))?;
        let existed = remove_if_exists(&self.path_for(number))?;
        if existed {
            tracing::debug!(run = number, "resume snapshot deleted");
        }
        Ok(existed)
    }

    /// Read the snapshot of run `number`, if one exists.
    pub fn load(&self, number: u64) -> Result<Option<ResumeSnapshot>, SnapshotError> {
        let bytes = match fs::read(self.path_for(number)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = ResumeSnapshot::from_json(&bytes)?;
        if snapshot.parent.number != number {
            return Err(SnapshotError::InvalidFormat(format!(
                "file for run {} holds run {}",
                number, snapshot.parent
            )));
        }
        Ok(Some(snapshot))
    }

    /// List snapshot files under the root, ordered by run number.
    ///
    /// A missing root yields an empty list.
    pub fn scan(&self) -> Result<Vec<SnapshotEntry>, SnapshotError> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for entry in dir {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(run_number) = name.to_str().and_then(parse_run_number) {
                entries.push(SnapshotEntry { run_number, path: entry.path() });
            }
        }
        entries.sort_by_key(|e| e.run_number);
        Ok(entries)
    }
}

fn remove_if_exists(path: &Path) -> Result<bool, SnapshotError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
