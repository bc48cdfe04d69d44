// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Host scheduler capabilities consumed by the orchestration engine

pub mod host;
pub mod traced;

pub use host::{HostAdapter, HostError};
pub use traced::TracedHostAdapter;

#[cfg(any(test, feature = "test-support"))]
pub use host::{FakeHostAdapter, HostCall};
