// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mj-core: sub-build tracking and result aggregation for multi-phase builds

pub mod macros;

pub mod aggregate;
pub mod clock;
pub mod id;
pub mod registry;
pub mod resume;
pub mod run;
pub mod severity;
pub mod sub_build;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aggregate::{compute_overall, Aggregate};
pub use clock::{Clock, FakeClock, SystemClock};
pub use registry::{RegistryError, RegistrySnapshot, SubBuildRegistry, UpsertOutcome};
pub use resume::{Cause, ResumeMarker, ResumeRequest, RunContext};
pub use run::{ParentRunId, RunState};
pub use severity::SeverityTier;
pub use sub_build::{SubBuildHandle, SubBuildKey, SubBuildRecord};
