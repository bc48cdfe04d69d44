// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single writer task per parent run.
//!
//! Reporters hand registry snapshots to the writer over a channel and return
//! immediately. The writer applies them in order on a blocking thread,
//! skipping any snapshot whose revision is not newer than the last one
//! handled, so the file never moves backwards when two reporters race
//! between upsert and hand-off.
//!
//! [`SnapshotWriter::delete`] is queued behind pending writes. After it the
//! writer stops; later snapshots are dropped.

use crate::store::ResumeStateStore;
use mj_core::{ParentRunId, RegistrySnapshot};
use std::future::Future;
use tokio::sync::{mpsc, oneshot};

enum Command {
    Persist(RegistrySnapshot),
    Flush(oneshot::Sender<()>),
    Delete(oneshot::Sender<()>),
}

/// Handle to the snapshot writer task of one parent run
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    parent: ParentRunId,
    tx: mpsc::UnboundedSender<Command>,
}

impl SnapshotWriter {
    /// Start the writer task. Must be called from within a Tokio runtime.
    pub fn spawn(store: ResumeStateStore, parent: ParentRunId) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, parent.clone(), rx));
        Self { parent, tx }
    }

    pub fn parent(&self) -> &ParentRunId {
        &self.parent
    }

    /// Queue a snapshot for writing. Never blocks.
    pub fn persist(&self, snapshot: RegistrySnapshot) {
        let revision = snapshot.revision;
        if self.tx.send(Command::Persist(snapshot)).is_err() {
            tracing::debug!(run = %self.parent, revision, "writer stopped, snapshot dropped");
        }
    }

    /// Wait until every snapshot queued so far has been handled.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Delete the run's snapshot after pending writes and stop the writer.
    ///
    /// The delete is queued when this is called, not when the returned future
    /// is first polled; dropping the future does not cancel it. The future
    /// resolves once the file is gone (or the delete failed and was logged).
    pub fn delete(&self) -> impl Future<Output = ()> + Send + 'static {
        let (ack, done) = oneshot::channel();
        let queued = self.tx.send(Command::Delete(ack)).is_ok();
        async move {
            if queued {
                let _ = done.await;
            }
        }
    }
}

async fn run(
    store: ResumeStateStore,
    parent: ParentRunId,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut last_revision: Option<u64> = None;

    while let Some(command) = rx.recv().await {
        match command {
            Command::Persist(snapshot) => {
                if last_revision.is_some_and(|last| snapshot.revision <= last) {
                    tracing::trace!(run = %parent, revision = snapshot.revision, "skipping stale snapshot");
                    continue;
                }
                last_revision = Some(snapshot.revision);

                let store = store.clone();
                let run = parent.clone();
                if let Err(e) =
                    tokio::task::spawn_blocking(move || store.persist(&run, snapshot)).await
                {
                    tracing::error!(run = %parent, error = %e, "snapshot write task failed");
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
            Command::Delete(ack) => {
                let store = store.clone();
                let number = parent.number;
                if let Err(e) = tokio::task::spawn_blocking(move || store.delete(number)).await {
                    tracing::error!(run = %parent, error = %e, "snapshot delete task failed");
                }
                let _ = ack.send(());
                break;
            }
        }
    }
    tracing::trace!(run = %parent, "snapshot writer stopped");
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
