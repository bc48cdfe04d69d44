// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run registry of child execution records.
//!
//! The registry is owned by exactly one parent run. Reporters on any thread
//! call [`SubBuildRegistry::upsert`]; readers take a [`RegistrySnapshot`],
//! which is a copy and never changes afterwards.
//!
//! A single `IndexMap` serves as both the ordered sequence and the keyed
//! index: inserting an existing key replaces the value in place, so a
//! re-reported child keeps the position of its first report.

use crate::severity::SeverityTier;
use crate::sub_build::{SubBuildKey, SubBuildRecord};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced to callers of the registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid record: {0} has neither a job name nor a build number")]
    InvalidRecord(String),
    #[error("registry is sealed: parent run has already finished")]
    Sealed,
}

/// Result of a successful upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Position of the record in the ordered sequence
    pub position: usize,
    /// True if an earlier record under the same key was replaced
    pub replaced: bool,
    /// Registry revision after this upsert
    pub revision: u64,
}

/// Point-in-time copy of the registry contents.
///
/// `revision` increases by one with every upsert, so two snapshots of the
/// same registry can be ordered even if they were taken on different threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub revision: u64,
    pub records: Vec<SubBuildRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    records: IndexMap<SubBuildKey, SubBuildRecord>,
    revision: u64,
    sealed: bool,
}

impl Inner {
    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot { revision: self.revision, records: self.records.values().cloned().collect() }
    }
}

/// Ordered, keyed collection of child execution records for one parent run
#[derive(Debug, Default)]
pub struct SubBuildRegistry {
    /// Records of the previous parent run, consulted for carry-forward
    history: Arc<Vec<SubBuildRecord>>,
    inner: Mutex<Inner>,
}

impl SubBuildRegistry {
    /// Empty registry with no previous run to carry timestamps from
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry that carries timestamps forward from `previous`
    pub fn with_history(previous: Vec<SubBuildRecord>) -> Self {
        Self { history: Arc::new(previous), inner: Mutex::new(Inner::default()) }
    }

    /// Rebuild a registry from a persisted snapshot, preserving record order.
    ///
    /// Records are taken as stored: timestamps were already carried forward
    /// when they were first reported. Records without a valid key are
    /// dropped. The revision continues from the snapshot's, so later
    /// snapshots of the restored registry are never older than it.
    pub fn restore(snapshot: RegistrySnapshot, previous: Vec<SubBuildRecord>) -> Self {
        let RegistrySnapshot { revision, records } = snapshot;
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            match record.key() {
                Some(key) => {
                    map.insert(key, record);
                }
                None => tracing::warn!(record = %record, "dropping unkeyed record from snapshot"),
            }
        }
        Self {
            history: Arc::new(previous),
            inner: Mutex::new(Inner { records: map, revision, sealed: false }),
        }
    }

    /// Store a reported outcome.
    ///
    /// Timestamps are seeded from the matching record of the previous run
    /// (if any), then the success or failure timestamp is set to
    /// `completed_at_ms` according to the record's result. An existing record
    /// under the same key is replaced in place; otherwise the record is
    /// appended.
    pub fn upsert(
        &self,
        mut record: SubBuildRecord,
        completed_at_ms: u64,
    ) -> Result<UpsertOutcome, RegistryError> {
        let key = record.key().ok_or_else(|| RegistryError::InvalidRecord(record.to_string()))?;
        self.carry_forward(&mut record, completed_at_ms);

        let mut inner = self.inner.lock();
        if inner.sealed {
            return Err(RegistryError::Sealed);
        }
        let (position, previous) = inner.records.insert_full(key.clone(), record);
        inner.revision += 1;
        let outcome = UpsertOutcome { position, replaced: previous.is_some(), revision: inner.revision };
        drop(inner);

        tracing::debug!(
            key = %key,
            position = outcome.position,
            replaced = outcome.replaced,
            revision = outcome.revision,
            "sub-build recorded"
        );
        Ok(outcome)
    }

    /// Copy of the current ordered records with the revision they reflect
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.lock().snapshot()
    }

    /// Copy of the current ordered records
    pub fn records(&self) -> Vec<SubBuildRecord> {
        self.snapshot().records
    }

    /// Current record stored under `key`
    pub fn get(&self, key: &SubBuildKey) -> Option<SubBuildRecord> {
        self.inner.lock().records.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    /// Make the registry read-only. Later upserts fail with [`RegistryError::Sealed`].
    ///
    /// Returns the final snapshot.
    pub fn seal(&self) -> RegistrySnapshot {
        let mut inner = self.inner.lock();
        inner.sealed = true;
        inner.snapshot()
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.lock().sealed
    }

    fn carry_forward(&self, record: &mut SubBuildRecord, completed_at_ms: u64) {
        // Last match in the previous run's order wins
        let Some(previous) = self.history.iter().rev().find(|p| record.matches_previous(p)) else {
            tracing::trace!(job = %record.job_name, "no previous record to carry forward");
            return;
        };
        tracing::trace!(
            job = %record.job_name,
            from = %previous.parent,
            "carrying timestamps forward"
        );

        record.success_timestamp_ms = previous.success_timestamp_ms;
        record.failure_timestamp_ms = previous.failure_timestamp_ms;
        match record.result {
            SeverityTier::Success => record.success_timestamp_ms = Some(completed_at_ms),
            SeverityTier::Failure => record.failure_timestamp_ms = Some(completed_at_ms),
            SeverityTier::Unstable | SeverityTier::Aborted => {}
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
