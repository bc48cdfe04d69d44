// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mj resume` - Inspect pending resume snapshots

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use mj_core::{Aggregate, ParentRunId, SeverityTier};
use mj_storage::{ResumeSnapshot, ResumeStateStore};

use crate::output::{format_or_json, table, OutputFormat};

#[derive(Args)]
pub struct ResumeArgs {
    #[command(subcommand)]
    pub command: ResumeCommand,
}

#[derive(Subcommand)]
pub enum ResumeCommand {
    /// List runs that left a resume snapshot behind
    List,
    /// Show the sub-builds recorded in a run's snapshot
    Show {
        /// Parent run number
        run: u64,
    },
    /// Show the result a run's snapshot would finish with
    Aggregate {
        /// Parent run number
        run: u64,
    },
}

/// One row of `mj resume list`
#[derive(Debug, Serialize)]
pub(crate) struct PendingRun {
    run: ParentRunId,
    revision: u64,
    records: usize,
    tier: SeverityTier,
    created_at: String,
}

impl From<&ResumeSnapshot> for PendingRun {
    fn from(snapshot: &ResumeSnapshot) -> Self {
        Self {
            run: snapshot.parent.clone(),
            revision: snapshot.revision,
            records: snapshot.records.len(),
            tier: snapshot.aggregate().tier,
            created_at: snapshot.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AggregateReport<'a> {
    run: &'a ParentRunId,
    #[serde(flatten)]
    aggregate: Aggregate,
}

pub fn handle(command: ResumeCommand, root: &Path, format: OutputFormat) -> Result<()> {
    let store = ResumeStateStore::new(root);
    let out = match command {
        ResumeCommand::List => render_list(&pending_runs(&store)?, format)?,
        ResumeCommand::Show { run } => render_show(&load(&store, run)?, format)?,
        ResumeCommand::Aggregate { run } => render_aggregate(&load(&store, run)?, format)?,
    };
    println!("{}", out);
    Ok(())
}

/// Load every readable snapshot under the store; unreadable ones are skipped.
pub(crate) fn pending_runs(store: &ResumeStateStore) -> Result<Vec<PendingRun>> {
    let entries = store
        .scan()
        .with_context(|| format!("failed to scan {}", store.root().display()))?;

    let mut runs = Vec::with_capacity(entries.len());
    for entry in entries {
        match store.load(entry.run_number) {
            Ok(Some(snapshot)) => runs.push(PendingRun::from(&snapshot)),
            Ok(None) => {}
            Err(e) => tracing::warn!(
                path = %entry.path.display(),
                error = %e,
                "skipping unreadable resume snapshot"
            ),
        }
    }
    Ok(runs)
}

fn load(store: &ResumeStateStore, run: u64) -> Result<ResumeSnapshot> {
    store
        .load(run)
        .with_context(|| format!("failed to read {}", store.path_for(run).display()))?
        .with_context(|| format!("no resume snapshot for run #{} in {}", run, store.root().display()))
}

pub(crate) fn render_list(runs: &[PendingRun], format: OutputFormat) -> Result<String> {
    format_or_json(format, runs, || {
        if runs.is_empty() {
            return "No pending resume snapshots".to_string();
        }
        let rows: Vec<Vec<String>> = runs
            .iter()
            .map(|r| {
                vec![
                    r.run.number.to_string(),
                    r.run.job.clone(),
                    r.records.to_string(),
                    r.revision.to_string(),
                    r.tier.to_string(),
                    r.created_at.clone(),
                ]
            })
            .collect();
        table(&["RUN", "JOB", "RECORDS", "REVISION", "TIER", "CREATED"], &rows)
    })
}

pub(crate) fn render_show(snapshot: &ResumeSnapshot, format: OutputFormat) -> Result<String> {
    format_or_json(format, snapshot, || {
        let header = format!(
            "{} (revision {}, {} records)",
            snapshot.parent,
            snapshot.revision,
            snapshot.records.len()
        );
        if snapshot.records.is_empty() {
            return header;
        }

        let rows: Vec<Vec<String>> = snapshot
            .records
            .iter()
            .map(|r| {
                let mut flags = Vec::new();
                if r.retry {
                    flags.push("retry");
                }
                if r.aborted {
                    flags.push("aborted");
                }
                vec![
                    r.phase_name.clone().unwrap_or_else(|| "-".to_string()),
                    r.job_name.clone(),
                    r.build_number.to_string(),
                    r.result.to_string(),
                    if flags.is_empty() { "-".to_string() } else { flags.join(",") },
                    if r.duration.is_empty() { "-".to_string() } else { r.duration.clone() },
                ]
            })
            .collect();
        format!(
            "{}\n\n{}",
            header,
            table(&["PHASE", "JOB", "BUILD", "RESULT", "FLAGS", "DURATION"], &rows)
        )
    })
}

pub(crate) fn render_aggregate(snapshot: &ResumeSnapshot, format: OutputFormat) -> Result<String> {
    let report = AggregateReport { run: &snapshot.parent, aggregate: snapshot.aggregate() };
    format_or_json(format, &report, || {
        if report.aggregate.resume_eligible {
            format!("{}: {} (resume eligible)", report.run, report.aggregate.tier)
        } else {
            format!("{}: {}", report.run, report.aggregate.tier)
        }
    })
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
