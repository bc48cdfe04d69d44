// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestration controller for one parent run.
//!
//! The controller is `RUNNING` from [`OrchestrationController::start`] until
//! [`OrchestrationController::finish`], which performs the single transition
//! to a terminal state. While running, child outcomes stream in through
//! [`OrchestrationController::report_sub_build`] from any thread.
//!
//! Persistence is handed off to one [`SnapshotWriter`] per run, so reporters
//! never wait on disk I/O.

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use mj_adapters::HostAdapter;
use mj_core::{
    compute_overall, Clock, ParentRunId, RegistryError, RegistrySnapshot, ResumeMarker, RunState,
    SeverityTier, SubBuildHandle, SubBuildRecord, SubBuildRegistry, UpsertOutcome,
};
use mj_storage::{ResumeStateStore, SnapshotWriter};
use parking_lot::Mutex;

/// Drives one parent run from start to its terminal result
pub struct OrchestrationController<H: HostAdapter, C: Clock> {
    run: ParentRunId,
    config: ControllerConfig,
    registry: SubBuildRegistry,
    writer: SnapshotWriter,
    state: Mutex<RunState>,
    host: H,
    clock: C,
}

impl<H: HostAdapter, C: Clock> OrchestrationController<H, C> {
    /// Begin a parent run with an empty registry.
    ///
    /// `previous` holds the records of the same job's previous run; their
    /// timestamps are carried forward into matching records of this run.
    /// Must be called from within a Tokio runtime.
    pub fn start(
        config: ControllerConfig,
        run: ParentRunId,
        previous: Vec<SubBuildRecord>,
        host: H,
        clock: C,
    ) -> Self {
        tracing::info!(
            run = %run,
            survive_restart = config.survive_restart,
            history = previous.len(),
            "parent run started"
        );
        Self::with_registry(config, run, SubBuildRegistry::with_history(previous), host, clock)
    }

    /// Resume a parent run from its snapshot after a restart.
    ///
    /// The registry is rebuilt with the snapshot's records in their original
    /// order and the controller is `RUNNING` again. Must be called from
    /// within a Tokio runtime.
    pub fn recover(
        config: ControllerConfig,
        run_number: u64,
        previous: Vec<SubBuildRecord>,
        host: H,
        clock: C,
    ) -> Result<Self, ControllerError> {
        let store = ResumeStateStore::new(&config.storage_root);
        let snapshot = store.load(run_number)?.ok_or(ControllerError::NoSnapshot(run_number))?;

        tracing::info!(
            run = %snapshot.parent,
            revision = snapshot.revision,
            records = snapshot.records.len(),
            "parent run recovered from snapshot"
        );
        let registry = SubBuildRegistry::restore(
            RegistrySnapshot { revision: snapshot.revision, records: snapshot.records },
            previous,
        );
        Ok(Self::with_registry(config, snapshot.parent, registry, host, clock))
    }

    fn with_registry(
        config: ControllerConfig,
        run: ParentRunId,
        registry: SubBuildRegistry,
        host: H,
        clock: C,
    ) -> Self {
        let store = ResumeStateStore::new(&config.storage_root);
        let writer = SnapshotWriter::spawn(store, run.clone());
        Self { run, config, registry, writer, state: Mutex::new(RunState::Running), host, clock }
    }

    pub fn run(&self) -> &ParentRunId {
        &self.run
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        *self.state.lock()
    }

    /// Current records in report order. Available at any time, also after
    /// the run has finished.
    pub fn ordered_sub_builds(&self) -> Vec<SubBuildRecord> {
        self.registry.records()
    }

    /// Store a child outcome and queue a snapshot write if the run survives
    /// restarts.
    ///
    /// Safe to call concurrently from any thread while the run is `RUNNING`.
    pub fn report_sub_build(
        &self,
        record: SubBuildRecord,
    ) -> Result<UpsertOutcome, ControllerError> {
        if record.parent != self.run {
            return Err(ControllerError::WrongRun {
                expected: self.run.clone(),
                actual: record.parent,
            });
        }

        let outcome = match self.registry.upsert(record, self.clock.epoch_ms()) {
            Ok(outcome) => outcome,
            Err(RegistryError::Sealed) => return Err(self.not_running()),
            Err(e) => {
                tracing::warn!(run = %self.run, error = %e, "rejected sub-build report");
                return Err(e.into());
            }
        };

        if self.config.survive_restart {
            self.writer.persist(self.registry.snapshot());
        }
        Ok(outcome)
    }

    /// Ask the host to stop a running child.
    ///
    /// The child's abort still arrives later as a report with `aborted` set.
    pub async fn cancel_sub_build(&self, handle: &SubBuildHandle) -> Result<(), ControllerError> {
        if self.state().is_terminal() {
            return Err(self.not_running());
        }
        tracing::info!(run = %self.run, handle = %handle, "cancelling sub-build");
        self.host.cancel(handle).await?;
        Ok(())
    }

    /// Complete the run and return its terminal tier.
    ///
    /// Seals the registry, computes the aggregate and enters the terminal
    /// state in one step, then queues the snapshot delete behind any pending
    /// writes. A resume marker is attached afterwards when the aggregate is
    /// resume-eligible. A failure to attach the marker is logged; it does
    /// not change the result.
    ///
    /// The run is terminal and its delete queued before the first await, so
    /// dropping this future early still settles the run.
    pub async fn finish(&self) -> Result<SeverityTier, ControllerError> {
        let (last, aggregate) = {
            let mut state = self.state.lock();
            if state.is_terminal() || self.registry.is_sealed() {
                return Err(ControllerError::NotRunning { run: self.run.clone(), state: *state });
            }
            let last = self.registry.seal();
            let aggregate = compute_overall(&last.records);
            *state = RunState::from(aggregate.tier);
            (last, aggregate)
        };
        let deleted = self.writer.delete();

        if aggregate.resume_eligible {
            let marker = ResumeMarker { run: self.run.clone(), tier: aggregate.tier };
            match self.host.attach_marker(&self.run, marker).await {
                Ok(()) => tracing::info!(run = %self.run, tier = %aggregate.tier, "resume marker attached"),
                Err(e) => tracing::warn!(run = %self.run, error = %e, "failed to attach resume marker"),
            }
        }

        deleted.await;

        tracing::info!(
            run = %self.run,
            tier = %aggregate.tier,
            records = last.records.len(),
            "parent run finished"
        );
        Ok(aggregate.tier)
    }

    fn not_running(&self) -> ControllerError {
        ControllerError::NotRunning { run: self.run.clone(), state: self.state() }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
