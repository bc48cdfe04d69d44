// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::host::{HostAdapter, HostError};
use async_trait::async_trait;
use mj_core::{ParentRunId, ResumeMarker, ResumeRequest, SubBuildHandle};
use tracing::Instrument;

/// Wrapper that adds tracing to any HostAdapter
#[derive(Clone)]
pub struct TracedHostAdapter<H> {
    inner: H,
}

impl<H> TracedHostAdapter<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<H: HostAdapter> HostAdapter for TracedHostAdapter<H> {
    async fn submit(&self, request: ResumeRequest) -> Result<(), HostError> {
        let span = tracing::info_span!("host.submit", job = %request.job, from = %request.resume_from);
        async {
            tracing::info!(
                causes = request.causes.len(),
                parameters = request.parameters.len(),
                "submitting"
            );
            let start = std::time::Instant::now();
            let result = self.inner.submit(request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "submitted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "submit failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn cancel(&self, handle: &SubBuildHandle) -> Result<(), HostError> {
        let span = tracing::info_span!("host.cancel", handle = %handle);
        async {
            let result = self.inner.cancel(handle).await;
            // Cancelling a child that already finished is often acceptable
            match &result {
                Ok(()) => tracing::info!("cancelled"),
                Err(e) => tracing::warn!(error = %e, "cancel failed (may be expected)"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn attach_marker(
        &self,
        run: &ParentRunId,
        marker: ResumeMarker,
    ) -> Result<(), HostError> {
        let span = tracing::info_span!("host.attach_marker", run = %run, tier = %marker.tier);
        async {
            let result = self.inner.attach_marker(run, marker).await;
            match &result {
                Ok(()) => tracing::debug!("attached"),
                Err(e) => tracing::error!(error = %e, "attach failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
