//! Restart recovery from resume snapshots

use crate::prelude::*;

#[tokio::test]
async fn interrupted_run_resumes_where_it_stopped() {
    let job = Job::new();
    {
        let run = job.start(3, Vec::new());
        run.report_sub_build(in_run(success("A", "compile", 1), 3)).unwrap();
        run.report_sub_build(in_run(failure("B", "unit", 1), 3)).unwrap();
        job.wait_for_revision(3, 2).await;
        // Dropped without finish: the process went away
    }
    assert_eq!(job.store().scan().unwrap().len(), 1);

    let run = job.recover(3);
    assert_eq!(run.state(), RunState::Running);
    let jobs: Vec<_> = run.ordered_sub_builds().into_iter().map(|r| r.job_name).collect();
    assert_eq!(jobs, vec!["compile", "unit"]);

    run.report_sub_build(in_run(success("B", "unit", 1), 3)).unwrap();
    run.report_sub_build(in_run(success("C", "ship", 1), 3)).unwrap();
    job.wait_for_revision(3, 4).await;

    assert_eq!(run.finish().await.unwrap(), SeverityTier::Success);
    assert!(job.store().scan().unwrap().is_empty());
}

#[tokio::test]
async fn recovered_run_keeps_carried_timestamps() {
    let job = Job::new();
    let mut prior = in_run(failure("B", "unit", 1), 2);
    prior.failure_timestamp_ms = Some(42);
    {
        let run = job.start(3, vec![prior]);
        run.report_sub_build(in_run(success("B", "unit", 2), 3)).unwrap();
        job.wait_for_revision(3, 1).await;
    }

    let run = job.recover(3);
    let record = &run.ordered_sub_builds()[0];
    assert_eq!(record.failure_timestamp_ms, Some(42));
    assert!(record.success_timestamp_ms.is_some());
}

#[tokio::test]
async fn only_unfinished_runs_leave_snapshots() {
    let job = Job::new();

    let finished = job.start(1, Vec::new());
    finished.report_sub_build(in_run(failure("A", "compile", 1), 1)).unwrap();
    finished.finish().await.unwrap();

    {
        let crashed = job.start(2, Vec::new());
        crashed.report_sub_build(in_run(success("A", "compile", 1), 2)).unwrap();
        job.wait_for_revision(2, 1).await;
    }

    let runs: Vec<u64> = job.store().scan().unwrap().into_iter().map(|e| e.run_number).collect();
    assert_eq!(runs, vec![2]);
}

#[tokio::test]
async fn unwritable_root_does_not_affect_the_result() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"").unwrap();

    let host = FakeHostAdapter::new();
    let run = OrchestrationController::start(
        ControllerConfig::new(&blocker).survive_restart(true),
        parent_run(1),
        Vec::new(),
        host.clone(),
        FakeClock::new(),
    );
    run.report_sub_build(failure("A", "compile", 1)).unwrap();

    assert_eq!(run.finish().await.unwrap(), SeverityTier::Failure);
    assert_eq!(host.markers().len(), 1);
}
