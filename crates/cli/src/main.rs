// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mj - inspect resume snapshots of multi-phase parent runs

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::resume;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mj", version, about = "Multi-phase build orchestration tools")]
struct Cli {
    /// Storage root of the parent job (default: from multijob.toml or MJ_STATE_DIR)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect pending resume snapshots
    Resume(resume::ResumeArgs),
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = mj_engine::env::log_filter()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => {
            let project = mj_engine::ProjectConfig::load_from_dir(&std::env::current_dir()?)?;
            mj_engine::ControllerConfig::resolve(&project)?.storage_root
        }
    };

    match cli.command {
        Commands::Resume(args) => resume::handle(args.command, &root, cli.output),
    }
}
