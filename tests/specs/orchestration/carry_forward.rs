//! Timestamp carry-forward between consecutive runs of the same job

use crate::prelude::*;
use std::time::Duration;

#[tokio::test]
async fn last_failure_survives_a_later_success() {
    let job = Job::new();

    // Timestamps are only recorded for children the previous run also had
    let seed = vec![in_run(success("build", "compile", 9), 0), in_run(success("test", "unit", 9), 0)];
    let first = job.start(1, seed);
    first.report_sub_build(in_run(success("build", "compile", 10), 1)).unwrap();
    first.report_sub_build(in_run(failure("test", "unit", 10), 1)).unwrap();
    first.finish().await.unwrap();
    let failed_at = job.clock.epoch_ms();
    let history = first.ordered_sub_builds();

    job.clock.advance(Duration::from_secs(3600));
    let second = job.start(2, history);
    second.report_sub_build(in_run(success("build", "compile", 11), 2)).unwrap();
    second.report_sub_build(in_run(success("test", "unit", 11), 2)).unwrap();

    let records = second.ordered_sub_builds();
    let unit = &records[1];
    assert_eq!(unit.failure_timestamp_ms, Some(failed_at));
    assert_eq!(unit.success_timestamp_ms, Some(job.clock.epoch_ms()));

    let compile = &records[0];
    assert_eq!(compile.success_timestamp_ms, Some(job.clock.epoch_ms()));
    assert_eq!(compile.failure_timestamp_ms, None);
}

#[tokio::test]
async fn renamed_job_starts_without_history() {
    let job = Job::new();

    let first = job.start(1, Vec::new());
    first.report_sub_build(in_run(failure("test", "unit", 1), 1)).unwrap();
    first.finish().await.unwrap();

    let second = job.start(2, first.ordered_sub_builds());
    second.report_sub_build(in_run(success("test", "unit-tests", 2), 2)).unwrap();

    let record = &second.ordered_sub_builds()[0];
    assert_eq!(record.failure_timestamp_ms, None);
    assert_eq!(record.success_timestamp_ms, None);
}
