// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Resume snapshot storage for multi-phase parent runs

mod snapshot;
mod store;
mod writer;

pub use snapshot::{ResumeSnapshot, SnapshotError, CURRENT_SNAPSHOT_VERSION};
pub use store::{parse_run_number, ResumeStateStore, SnapshotEntry};
pub use writer::SnapshotWriter;
