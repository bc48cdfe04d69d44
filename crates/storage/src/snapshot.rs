// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resume snapshot format.
//!
//! A snapshot is the full registry of an active parent run at one revision,
//! plus the run's identity. It is enough to rebuild the registry after a
//! restart.

use chrono::{DateTime, Utc};
use mj_core::{compute_overall, Aggregate, ParentRunId, RegistrySnapshot, SubBuildRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current snapshot schema version
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur in snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),
}

/// The registry of one parent run at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSnapshot {
    /// Schema version
    #[serde(rename = "v")]
    pub version: u32,
    /// Run the records belong to
    pub parent: ParentRunId,
    /// Registry revision the records reflect
    pub revision: u64,
    /// Records in report order
    pub records: Vec<SubBuildRecord>,
    /// When this snapshot was created
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(rename = "v")]
    version: Option<u32>,
}

impl ResumeSnapshot {
    pub fn new(parent: ParentRunId, snapshot: RegistrySnapshot) -> Self {
        Self {
            version: CURRENT_SNAPSHOT_VERSION,
            parent,
            revision: snapshot.revision,
            records: snapshot.records,
            created_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Parse a snapshot, rejecting missing or unknown schema versions.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let probe: VersionProbe = serde_json::from_slice(bytes)?;
        match probe.version {
            Some(CURRENT_SNAPSHOT_VERSION) => Ok(serde_json::from_slice(bytes)?),
            Some(v) => Err(SnapshotError::InvalidFormat(format!(
                "unsupported version {} (expected {})",
                v, CURRENT_SNAPSHOT_VERSION
            ))),
            None => Err(SnapshotError::InvalidFormat("missing version field".to_string())),
        }
    }

    /// Result the run would finish with if it finished now
    pub fn aggregate(&self) -> Aggregate {
        compute_overall(&self.records)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
