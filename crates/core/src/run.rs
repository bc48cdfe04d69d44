// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parent run identity and lifecycle state.

use crate::severity::SeverityTier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one parent run: the parent job's name and its run number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParentRunId {
    pub job: String,
    pub number: u64,
}

impl ParentRunId {
    pub fn new(job: impl Into<String>, number: u64) -> Self {
        Self { job: job.into(), number }
    }
}

impl fmt::Display for ParentRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.job, self.number)
    }
}

/// Lifecycle of a parent run.
///
/// `Running` is initial; every other state is terminal and is entered exactly
/// once, when the run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    Success,
    Unstable,
    Failure,
    Aborted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

impl From<SeverityTier> for RunState {
    fn from(tier: SeverityTier) -> Self {
        match tier {
            SeverityTier::Success => RunState::Success,
            SeverityTier::Unstable => RunState::Unstable,
            SeverityTier::Failure => RunState::Failure,
            SeverityTier::Aborted => RunState::Aborted,
        }
    }
}

crate::simple_display! {
    RunState {
        Running => "running",
        Success => "success",
        Unstable => "unstable",
        Failure => "failure",
        Aborted => "aborted",
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
