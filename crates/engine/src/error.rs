// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use mj_adapters::HostError;
use mj_core::{ParentRunId, RegistryError, RunState};
use mj_storage::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::OrchestrationController`]
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{run} is not running (state: {state})")]
    NotRunning { run: ParentRunId, state: RunState },
    #[error("record belongs to {actual}, not {expected}")]
    WrongRun { expected: ParentRunId, actual: ParentRunId },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("host error: {0}")]
    Host(#[from] HostError),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("no resume snapshot for run #{0}")]
    NoSnapshot(u64),
}

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not determine state directory (set MJ_STATE_DIR or HOME)")]
    NoStateDir,
}
