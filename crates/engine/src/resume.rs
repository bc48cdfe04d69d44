// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resubmission of a finished parent run.

use crate::error::ControllerError;
use mj_adapters::HostAdapter;
use mj_core::{ResumeRequest, RunContext};

/// Resubmit the parent job of `ctx` through the host.
///
/// The request carries the run's causes with exactly one user-initiated
/// cause (attributed to `triggered_by`), a resumed cause naming the run,
/// the original parameters and zero delay. Returns the submitted request.
pub async fn trigger_resume<H: HostAdapter>(
    host: &H,
    ctx: &RunContext,
    triggered_by: Option<&str>,
) -> Result<ResumeRequest, ControllerError> {
    let request = ResumeRequest::for_run(ctx, triggered_by);
    tracing::info!(
        run = %ctx.id,
        user = triggered_by.unwrap_or("anonymous"),
        parameters = request.parameters.len(),
        "resuming parent run"
    );
    host.submit(request.clone()).await?;
    Ok(request)
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
