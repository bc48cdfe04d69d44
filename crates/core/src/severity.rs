// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome severity tiers.

use serde::{Deserialize, Serialize};

/// Outcome of a child execution or of a whole parent run.
///
/// Variants are declared in ascending badness, so the derived `Ord`
/// compares by rank: `Success < Unstable < Failure < Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityTier {
    Success,
    Unstable,
    Failure,
    Aborted,
}

impl SeverityTier {
    /// All tiers in ascending order of badness.
    pub const ALL: [SeverityTier; 4] =
        [SeverityTier::Success, SeverityTier::Unstable, SeverityTier::Failure, SeverityTier::Aborted];

    /// True if `self` ranks strictly worse than `other`.
    pub fn is_worse_than(self, other: SeverityTier) -> bool {
        self > other
    }
}

crate::simple_display! {
    SeverityTier {
        Success => "SUCCESS",
        Unstable => "UNSTABLE",
        Failure => "FAILURE",
        Aborted => "ABORTED",
    }
}

#[cfg(test)]
#[path = "severity_tests.rs"]
mod tests;
