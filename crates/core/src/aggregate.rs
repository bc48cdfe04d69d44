// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Severity cascade that folds child results into one parent result.

use crate::severity::SeverityTier;
use crate::sub_build::SubBuildRecord;
use serde::{Deserialize, Serialize};

/// Overall result of a parent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub tier: SeverityTier,
    /// A resume marker should be attached to the finished run.
    pub resume_eligible: bool,
}

impl Aggregate {
    pub const SUCCESS: Aggregate = Aggregate { tier: SeverityTier::Success, resume_eligible: false };
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::SUCCESS
    }
}

/// Compute the parent result from its child records.
///
/// Only qualifying records (neither `retry` nor `aborted`) are considered.
/// The worst qualifying tier decides:
///
/// | worst      | tier     | resume |
/// |------------|----------|--------|
/// | ABORTED    | ABORTED  | yes    |
/// | FAILURE    | FAILURE  | yes    |
/// | UNSTABLE   | UNSTABLE | no     |
/// | none/other | SUCCESS  | no     |
pub fn compute_overall<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a SubBuildRecord>,
{
    let worst = records
        .into_iter()
        .filter(|r| r.is_qualifying())
        .map(|r| r.result)
        .max()
        .unwrap_or(SeverityTier::Success);

    if worst.is_worse_than(SeverityTier::Failure) {
        Aggregate { tier: SeverityTier::Aborted, resume_eligible: true }
    } else if worst.is_worse_than(SeverityTier::Unstable) {
        Aggregate { tier: SeverityTier::Failure, resume_eligible: true }
    } else if worst.is_worse_than(SeverityTier::Success) {
        Aggregate { tier: SeverityTier::Unstable, resume_eligible: false }
    } else {
        Aggregate::SUCCESS
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
