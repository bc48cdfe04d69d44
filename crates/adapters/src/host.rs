// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capabilities the host scheduler exposes to a parent run.

use async_trait::async_trait;
use mj_core::{ParentRunId, ResumeMarker, ResumeRequest, SubBuildHandle};
use thiserror::Error;

/// Errors from host operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("rejected by host: {0}")]
    Rejected(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("host unavailable: {0}")]
    Unavailable(String),
}

/// Adapter for the host scheduler that launches child executions and queues
/// parent runs.
#[async_trait]
pub trait HostAdapter: Clone + Send + Sync + 'static {
    /// Queue a parent job run with the given causes and parameters
    async fn submit(&self, request: ResumeRequest) -> Result<(), HostError>;

    /// Stop a running child execution
    async fn cancel(&self, handle: &SubBuildHandle) -> Result<(), HostError>;

    /// Attach a resume marker to a finished parent run
    async fn attach_marker(&self, run: &ParentRunId, marker: ResumeMarker)
        -> Result<(), HostError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{HostAdapter, HostError};
    use async_trait::async_trait;
    use mj_core::{ParentRunId, ResumeMarker, ResumeRequest, SubBuildHandle};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded host call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum HostCall {
        Submit(ResumeRequest),
        Cancel(SubBuildHandle),
        AttachMarker { run: ParentRunId, marker: ResumeMarker },
    }

    #[derive(Default)]
    struct FakeHostState {
        calls: Vec<HostCall>,
        submit_error: Option<HostError>,
        cancel_error: Option<HostError>,
        attach_error: Option<HostError>,
        attach_hangs: bool,
    }

    /// Fake host adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeHostAdapter {
        inner: Arc<Mutex<FakeHostState>>,
    }

    impl FakeHostAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every later `submit` fail with `error`
        pub fn fail_submit(&self, error: HostError) {
            self.inner.lock().submit_error = Some(error);
        }

        /// Make every later `cancel` fail with `error`
        pub fn fail_cancel(&self, error: HostError) {
            self.inner.lock().cancel_error = Some(error);
        }

        /// Make every later `attach_marker` fail with `error`
        pub fn fail_attach(&self, error: HostError) {
            self.inner.lock().attach_error = Some(error);
        }

        /// Make every later `attach_marker` record its call and never complete
        pub fn hang_attach(&self) {
            self.inner.lock().attach_hangs = true;
        }

        /// Get all recorded calls, including failed ones
        pub fn calls(&self) -> Vec<HostCall> {
            self.inner.lock().calls.clone()
        }

        pub fn submissions(&self) -> Vec<ResumeRequest> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    HostCall::Submit(request) => Some(request),
                    _ => None,
                })
                .collect()
        }

        pub fn cancelled(&self) -> Vec<SubBuildHandle> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    HostCall::Cancel(handle) => Some(handle),
                    _ => None,
                })
                .collect()
        }

        pub fn markers(&self) -> Vec<ResumeMarker> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    HostCall::AttachMarker { marker, .. } => Some(marker),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl HostAdapter for FakeHostAdapter {
        async fn submit(&self, request: ResumeRequest) -> Result<(), HostError> {
            let mut inner = self.inner.lock();
            inner.calls.push(HostCall::Submit(request));
            inner.submit_error.clone().map_or(Ok(()), Err)
        }

        async fn cancel(&self, handle: &SubBuildHandle) -> Result<(), HostError> {
            let mut inner = self.inner.lock();
            inner.calls.push(HostCall::Cancel(handle.clone()));
            inner.cancel_error.clone().map_or(Ok(()), Err)
        }

        async fn attach_marker(
            &self,
            run: &ParentRunId,
            marker: ResumeMarker,
        ) -> Result<(), HostError> {
            let (result, hangs) = {
                let mut inner = self.inner.lock();
                inner.calls.push(HostCall::AttachMarker { run: run.clone(), marker });
                (inner.attach_error.clone().map_or(Ok(()), Err), inner.attach_hangs)
            };
            if hangs {
                std::future::pending::<()>().await;
            }
            result
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHostAdapter, HostCall};

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
