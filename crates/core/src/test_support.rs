// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ParentRunId, SeverityTier, SubBuildRecord};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for records and tiers.
pub mod strategies {
    use crate::{ParentRunId, SeverityTier, SubBuildRecord};
    use proptest::prelude::*;

    pub fn arb_tier() -> impl Strategy<Value = SeverityTier> {
        prop::sample::select(SeverityTier::ALL.to_vec())
    }

    /// Records drawn from a small key space so that collisions are common.
    pub fn arb_record() -> impl Strategy<Value = SubBuildRecord> {
        (
            prop::option::of(prop_oneof![Just("build"), Just("test"), Just("deploy")]),
            prop_oneof![Just("compile"), Just("unit"), Just("ship")],
            1u64..4,
            arb_tier(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(phase, job, number, tier, retry, aborted)| {
                let record = SubBuildRecord::new(ParentRunId::new("multijob", 1), job, number, tier)
                    .retry(retry)
                    .aborted(aborted);
                match phase {
                    Some(phase) => record.phase_name(phase),
                    None => record,
                }
            })
    }
}

// ── Record factory functions ────────────────────────────────────────────────

pub fn parent_run(number: u64) -> ParentRunId {
    ParentRunId::new("multijob", number)
}

/// A qualifying record in `phase` for run #1 of the test parent job.
pub fn record(phase: &str, job: &str, build_number: u64, result: SeverityTier) -> SubBuildRecord {
    SubBuildRecord::new(parent_run(1), job, build_number, result)
        .phase_name(phase)
        .handle(format!("{}/{}", job, build_number))
        .url(format!("job/{}/{}/", job, build_number))
}

pub fn success(phase: &str, job: &str, build_number: u64) -> SubBuildRecord {
    record(phase, job, build_number, SeverityTier::Success)
}

pub fn failure(phase: &str, job: &str, build_number: u64) -> SubBuildRecord {
    record(phase, job, build_number, SeverityTier::Failure)
}
