//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn mj_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn mj_resume_help_shows_subcommands() {
    cli()
        .args(&["resume", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("aggregate");
}

#[test]
fn mj_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn mj_without_command_fails_with_usage() {
    cli().fails().stderr_has("Usage:");
}
