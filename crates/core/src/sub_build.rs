// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child execution records.

use crate::run::ParentRunId;
use crate::severity::SeverityTier;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Opaque reference to a child execution, resolved by the host scheduler.
    ///
    /// The core never dereferences a handle; it only stores it and hands it
    /// back to the host (e.g. when cancelling a child).
    pub struct SubBuildHandle;
}

/// Registry key of a child execution within one parent run.
///
/// Phase `"a1"` with job `"b"` and phase `"a"` with job `"1b"` are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubBuildKey {
    pub phase: Option<String>,
    pub job: String,
    pub build_number: u64,
}

impl fmt::Display for SubBuildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.phase {
            Some(phase) => write!(f, "{}/{}#{}", phase, self.job, self.build_number),
            None => write!(f, "{}#{}", self.job, self.build_number),
        }
    }
}

/// Outcome of one child execution, reported by the host scheduler.
///
/// Everything except the two timestamps is fixed at report time. The
/// timestamps are carried forward from the previous parent run by the
/// registry when the record is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubBuildRecord {
    pub parent: ParentRunId,
    pub job_name: String,
    /// Assigned by the host scheduler; 0 means unassigned.
    pub build_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    pub result: SeverityTier,
    /// Child is being retried; excluded from aggregation.
    #[serde(default)]
    pub retry: bool,
    /// Child was aborted by a user; excluded from aggregation.
    #[serde(default)]
    pub aborted: bool,
    #[serde(default)]
    pub handle: SubBuildHandle,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_timestamp_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_timestamp_ms: Option<u64>,
}

impl SubBuildRecord {
    pub fn new(
        parent: ParentRunId,
        job_name: impl Into<String>,
        build_number: u64,
        result: SeverityTier,
    ) -> Self {
        Self {
            parent,
            job_name: job_name.into(),
            build_number,
            phase_name: None,
            result,
            retry: false,
            aborted: false,
            handle: SubBuildHandle::default(),
            icon: String::new(),
            duration: String::new(),
            url: String::new(),
            success_timestamp_ms: None,
            failure_timestamp_ms: None,
        }
    }

    crate::setters! {
        into {
            handle: SubBuildHandle,
            icon: String,
            duration: String,
            url: String,
        }
        set {
            retry: bool,
            aborted: bool,
        }
        option {
            phase_name: String,
        }
    }

    /// Registry key, or `None` when neither the job name nor the build
    /// number identifies the child.
    pub fn key(&self) -> Option<SubBuildKey> {
        if self.job_name.trim().is_empty() && self.build_number == 0 {
            return None;
        }
        Some(SubBuildKey {
            phase: self.phase_name.clone(),
            job: self.job_name.clone(),
            build_number: self.build_number,
        })
    }

    /// Whether this record counts toward the parent's aggregate result.
    pub fn is_qualifying(&self) -> bool {
        !self.retry && !self.aborted
    }

    /// Whether `previous` (from an earlier parent run) describes the same
    /// logical child.
    ///
    /// Job names must match. Phases are compared only when both records
    /// carry one; a missing phase on either side matches any phase.
    pub fn matches_previous(&self, previous: &SubBuildRecord) -> bool {
        if self.job_name != previous.job_name {
            return false;
        }
        match (&self.phase_name, &previous.phase_name) {
            (Some(current), Some(prior)) => current == prior,
            _ => true,
        }
    }
}

impl fmt::Display for SubBuildRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} ({}) of {}", self.job_name, self.build_number, self.result, self.parent)
    }
}

#[cfg(test)]
#[path = "sub_build_tests.rs"]
mod tests;
