// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller configuration.
//!
//! Resolution order for each setting: environment, then `multijob.toml`,
//! then the built-in default.

use crate::env;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "multijob.toml";

/// Settings read from `multijob.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Keep a resume snapshot while a run is active
    pub survive_restart: Option<bool>,
    /// Directory holding the parent job's resume snapshots
    pub storage_root: Option<PathBuf>,
}

impl ProjectConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&content, path)
    }

    /// Load `multijob.toml` from `dir`; a missing file yields the defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(PROJECT_CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no project config, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

/// Settings for one [`crate::OrchestrationController`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Write a resume snapshot after every report while the run is active
    pub survive_restart: bool,
    /// Directory holding the parent job's resume snapshots
    pub storage_root: PathBuf,
}

impl ControllerConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self { survive_restart: false, storage_root: storage_root.into() }
    }

    mj_core::setters! {
        into {
            storage_root: PathBuf,
        }
        set {
            survive_restart: bool,
        }
    }

    /// Combine environment overrides, `project` and defaults.
    pub fn resolve(project: &ProjectConfig) -> Result<Self, ConfigError> {
        let storage_root = match env::state_dir_override().or_else(|| project.storage_root.clone()) {
            Some(root) => root,
            None => env::default_state_dir().ok_or(ConfigError::NoStateDir)?,
        };
        let survive_restart =
            env::survive_restart().or(project.survive_restart).unwrap_or(false);
        Ok(Self { survive_restart, storage_root })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
