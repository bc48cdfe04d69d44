// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;

/// Storage root override
pub fn state_dir_override() -> Option<PathBuf> {
    std::env::var("MJ_STATE_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Default storage root: XDG_STATE_HOME/multijob > ~/.local/state/multijob
pub fn default_state_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("multijob"));
        }
    }
    dirs::home_dir().map(|home| home.join(".local/state/multijob"))
}

/// Whether runs keep a resume snapshot (`MJ_SURVIVE_RESTART`).
///
/// Unrecognized values are ignored with a warning.
pub fn survive_restart() -> Option<bool> {
    let value = std::env::var("MJ_SURVIVE_RESTART").ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        "" => None,
        other => {
            tracing::warn!(value = other, "ignoring unrecognized MJ_SURVIVE_RESTART");
            None
        }
    }
}

/// Log filter for the CLI (`MJ_LOG`), in `EnvFilter` syntax
pub fn log_filter() -> Option<String> {
    std::env::var("MJ_LOG").ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
