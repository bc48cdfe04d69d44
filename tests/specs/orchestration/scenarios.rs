//! End-to-end parent run scenarios
//!
//! Phases report through the controller; the final tier, resume marker and
//! snapshot file are checked after `finish()`.

use crate::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn unstable_phase_yields_unstable_without_marker() {
    let job = Job::new();
    let run = job.start(1, Vec::new());

    run.report_sub_build(success("A", "compile", 1)).unwrap();
    run.report_sub_build(record("B", "unit", 1, SeverityTier::Unstable)).unwrap();
    run.report_sub_build(success("C", "ship", 1)).unwrap();
    job.wait_for_revision(1, 3).await;

    assert_eq!(run.finish().await.unwrap(), SeverityTier::Unstable);
    assert_eq!(run.state(), RunState::Unstable);
    assert!(job.host.markers().is_empty());
    assert!(!job.snapshot_path(1).exists());
}

#[tokio::test]
async fn failed_phase_yields_failure_with_marker() {
    let job = Job::new();
    let run = job.start(1, Vec::new());

    run.report_sub_build(success("A", "compile", 1)).unwrap();
    run.report_sub_build(failure("B", "unit", 1)).unwrap();
    run.report_sub_build(success("C", "ship", 1)).unwrap();
    job.wait_for_revision(1, 3).await;
    assert!(job.snapshot_path(1).exists());

    assert_eq!(run.finish().await.unwrap(), SeverityTier::Failure);
    assert_eq!(run.state(), RunState::Failure);
    assert_eq!(
        job.host.markers(),
        vec![ResumeMarker { run: parent_run(1), tier: SeverityTier::Failure }]
    );
    assert!(!job.snapshot_path(1).exists());
}

#[tokio::test]
async fn rerun_of_failed_child_replaces_it_in_place() {
    let job = Job::new();
    let run = job.start(1, Vec::new());

    run.report_sub_build(failure("A", "compile", 1).retry(true)).unwrap();
    run.report_sub_build(success("B", "unit", 1)).unwrap();
    run.report_sub_build(success("A", "compile", 1)).unwrap();

    let jobs: Vec<_> = run.ordered_sub_builds().into_iter().map(|r| r.job_name).collect();
    assert_eq!(jobs, vec!["compile", "unit"]);
    assert_eq!(run.finish().await.unwrap(), SeverityTier::Success);
}

#[tokio::test]
async fn user_aborted_child_is_ignored() {
    let job = Job::new();
    let run = job.start(1, Vec::new());

    let handle = mj_core::SubBuildHandle::from_string("unit/1");
    run.cancel_sub_build(&handle).await.unwrap();
    run.report_sub_build(record("B", "unit", 1, SeverityTier::Aborted).aborted(true)).unwrap();
    run.report_sub_build(success("A", "compile", 1)).unwrap();

    assert_eq!(job.host.cancelled(), vec![handle]);
    assert_eq!(run.finish().await.unwrap(), SeverityTier::Success);
    assert!(job.host.markers().is_empty());
}

#[test]
fn children_report_from_their_own_threads() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let job = Job::new();
    let run = Arc::new(runtime.block_on(async { job.start(1, Vec::new()) }));

    let threads: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|phase| {
            let run = run.clone();
            std::thread::spawn(move || {
                for n in 1..=10 {
                    let tier = if phase == "B" && n == 10 {
                        SeverityTier::Failure
                    } else {
                        SeverityTier::Success
                    };
                    run.report_sub_build(record(phase, "child", n, tier)).unwrap();
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    assert_eq!(run.ordered_sub_builds().len(), 30);
    let tier = runtime.block_on(async {
        job.wait_for_revision(1, 30).await;
        run.finish().await.unwrap()
    });
    assert_eq!(tier, SeverityTier::Failure);
    assert!(!job.snapshot_path(1).exists());
}
