// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Orchestration of one multi-phase parent run: sub-build reporting,
//! final result, resume marker and resume trigger

mod config;
mod controller;
pub mod env;
mod error;
mod resume;

pub use config::{ControllerConfig, ProjectConfig, PROJECT_CONFIG_FILE};
pub use controller::OrchestrationController;
pub use error::{ConfigError, ControllerError};
pub use resume::trigger_resume;
