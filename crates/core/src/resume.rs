// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resume bundle: the causes and parameters a resumed parent run is
//! resubmitted with, and the marker attached to a run that may be resumed.

use crate::run::ParentRunId;
use crate::severity::SeverityTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Why a parent run was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cause {
    /// Started by a person. `user` is `None` for anonymous triggers.
    UserInitiated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<String>,
    },
    /// Started by another job's run.
    Upstream { job: String, number: u64 },
    Timer,
    ScmChange,
    /// Resubmission of an earlier, unsuccessful run.
    Resumed { from: ParentRunId },
    Other { description: String },
}

impl Cause {
    pub fn user(name: impl Into<String>) -> Self {
        Cause::UserInitiated { user: Some(name.into()) }
    }

    pub fn is_user_initiated(&self) -> bool {
        matches!(self, Cause::UserInitiated { .. })
    }

    pub fn is_resumed(&self) -> bool {
        matches!(self, Cause::Resumed { .. })
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::UserInitiated { user: Some(user) } => write!(f, "started by user {}", user),
            Cause::UserInitiated { user: None } => write!(f, "started by anonymous user"),
            Cause::Upstream { job, number } => write!(f, "started by upstream {} #{}", job, number),
            Cause::Timer => write!(f, "started by timer"),
            Cause::ScmChange => write!(f, "started by SCM change"),
            Cause::Resumed { from } => write!(f, "resumed from {}", from),
            Cause::Other { description } => f.write_str(description),
        }
    }
}

/// What the host knows about a finished parent run when a resume is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub id: ParentRunId,
    #[serde(default)]
    pub causes: Vec<Cause>,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl RunContext {
    pub fn new(id: ParentRunId) -> Self {
        Self { id, causes: Vec::new(), parameters: BTreeMap::new() }
    }

    crate::setters! {
        set {
            causes: Vec<Cause>,
            parameters: BTreeMap<String, String>,
        }
    }
}

/// Bundle handed to the host scheduler to resubmit a parent job.
///
/// Built with [`ResumeRequest::for_run`]. The causes always contain exactly
/// one user-initiated cause and end with exactly one [`Cause::Resumed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRequest {
    /// Parent job to resubmit
    pub job: String,
    /// Run being resumed; the resumed run reads its registry
    pub resume_from: ParentRunId,
    pub causes: Vec<Cause>,
    pub parameters: BTreeMap<String, String>,
    /// Additional queue delay; always zero for resumes
    pub delay: Duration,
}

impl ResumeRequest {
    /// Build the resubmission bundle for `ctx`.
    ///
    /// The first user-initiated cause is replaced in place by one attributed
    /// to `triggered_by`; further user-initiated causes and any earlier
    /// resumed causes are dropped. If the run had no user-initiated cause,
    /// one is appended. A resumed cause naming `ctx.id` comes last.
    pub fn for_run(ctx: &RunContext, triggered_by: Option<&str>) -> Self {
        let user = Cause::UserInitiated { user: triggered_by.map(str::to_string) };
        let mut causes = Vec::with_capacity(ctx.causes.len() + 2);
        let mut user_placed = false;

        for cause in &ctx.causes {
            if cause.is_user_initiated() {
                if !user_placed {
                    causes.push(user.clone());
                    user_placed = true;
                }
            } else if !cause.is_resumed() {
                causes.push(cause.clone());
            }
        }
        if !user_placed {
            causes.push(user);
        }
        causes.push(Cause::Resumed { from: ctx.id.clone() });

        Self {
            job: ctx.id.job.clone(),
            resume_from: ctx.id.clone(),
            causes,
            parameters: ctx.parameters.clone(),
            delay: Duration::ZERO,
        }
    }
}

/// Marker attached to a finished parent run that may be resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMarker {
    /// Run the marker re-triggers
    pub run: ParentRunId,
    /// Terminal tier the run finished with
    pub tier: SeverityTier,
}

impl fmt::Display for ResumeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resume {} ({})", self.run, self.tier)
    }
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
