//! Resuming a failed parent run through the host

use crate::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

#[tokio::test]
async fn failed_run_is_resubmitted_with_original_parameters() {
    let job = Job::new();
    let run = job.start(8, Vec::new());
    run.report_sub_build(in_run(failure("deploy", "ship", 1), 8)).unwrap();
    assert_eq!(run.finish().await.unwrap(), SeverityTier::Failure);

    let marker = job.host.markers().pop().unwrap();
    let ctx = RunContext::new(marker.run.clone())
        .causes(vec![Cause::ScmChange, Cause::user("alice")])
        .parameters(BTreeMap::from([("ENV".to_string(), "prod".to_string())]));

    let request = trigger_resume(&job.host, &ctx, Some("bob")).await.unwrap();

    assert_eq!(job.host.submissions(), vec![request.clone()]);
    assert_eq!(request.job, "multijob");
    assert_eq!(request.resume_from, parent_run(8));
    assert_eq!(
        request.causes,
        vec![Cause::ScmChange, Cause::user("bob"), Cause::Resumed { from: parent_run(8) }]
    );
    assert_eq!(request.parameters, ctx.parameters);
    assert_eq!(request.delay, Duration::ZERO);
}

#[tokio::test]
async fn resumed_run_reads_the_failed_runs_registry() {
    let job = Job::new();
    let first = job.start(8, Vec::new());
    first.report_sub_build(in_run(success("build", "compile", 1), 8)).unwrap();
    first.report_sub_build(in_run(failure("deploy", "ship", 1), 8)).unwrap();
    first.finish().await.unwrap();

    let request =
        trigger_resume(&job.host, &RunContext::new(parent_run(8)), None).await.unwrap();
    assert_eq!(request.resume_from, parent_run(8));

    // The host starts run #9, handing it the registry of the run it resumes
    let resumed = job.start(9, first.ordered_sub_builds());
    resumed.report_sub_build(in_run(success("deploy", "ship", 2), 9)).unwrap();
    assert_eq!(resumed.finish().await.unwrap(), SeverityTier::Success);
}

#[tokio::test]
async fn traced_host_passes_submissions_and_refusals_through() {
    let host = FakeHostAdapter::new();
    let traced = TracedHostAdapter::new(host.clone());
    let ctx = RunContext::new(parent_run(4)).causes(vec![Cause::Timer]);

    let request = trigger_resume(&traced, &ctx, Some("carol")).await.unwrap();
    assert_eq!(host.submissions(), vec![request]);

    host.fail_submit(HostError::Unavailable("queue offline".to_string()));
    let err = trigger_resume(&traced, &ctx, Some("carol")).await.unwrap_err();
    assert!(matches!(err, mj_engine::ControllerError::Host(HostError::Unavailable(_))));
    assert_eq!(host.submissions().len(), 1);
}
