//! `mj resume` specs
//!
//! Snapshots written by a live controller are visible to the CLI until the
//! run finishes.

use crate::prelude::*;

async fn interrupted_run(job: &Job, number: u64) {
    let controller = job.start(number, Vec::new());
    controller.report_sub_build(in_run(success("build", "compile", 1), number)).unwrap();
    controller.report_sub_build(in_run(failure("test", "unit", 1), number)).unwrap();
    job.wait_for_revision(number, 2).await;
}

#[tokio::test]
async fn list_shows_interrupted_runs() {
    let job = Job::new();
    interrupted_run(&job, 7).await;
    interrupted_run(&job, 3).await;

    let out = cli().args(&["resume", "list", "--root"]).args(&[job.root().to_str().unwrap()]).passes();
    let lines: Vec<&str> = out.stdout.lines().collect();
    assert!(lines[0].starts_with("RUN"));
    assert!(lines[1].starts_with("3 "));
    assert!(lines[2].starts_with("7 "));
    assert!(lines[1].contains("FAILURE"));
}

#[tokio::test]
async fn list_is_empty_after_finish() {
    let job = Job::new();
    let controller = job.start(4, Vec::new());
    controller.report_sub_build(in_run(failure("test", "unit", 1), 4)).unwrap();
    job.wait_for_revision(4, 1).await;
    controller.finish().await.unwrap();

    cli()
        .args(&["resume", "list", "--root", job.root().to_str().unwrap()])
        .passes()
        .stdout_eq("No pending resume snapshots");
}

#[tokio::test]
async fn show_prints_records_in_report_order() {
    let job = Job::new();
    interrupted_run(&job, 5).await;

    cli()
        .args(&["resume", "show", "5", "--root", job.root().to_str().unwrap()])
        .passes()
        .stdout_has("multijob #5 (revision 2, 2 records)")
        .stdout_has("build  compile  1      SUCCESS")
        .stdout_has("test   unit     1      FAILURE");
}

#[tokio::test]
async fn show_json_output() {
    let job = Job::new();
    interrupted_run(&job, 5).await;

    let out = cli()
        .args(&["resume", "show", "5", "-o", "json", "--root", job.root().to_str().unwrap()])
        .passes();
    let value = out.json();
    assert_eq!(value["v"], 1);
    assert_eq!(value["parent"]["number"], 5);
    assert_eq!(value["records"][1]["job_name"], "unit");
}

#[tokio::test]
async fn aggregate_reports_resume_eligibility() {
    let job = Job::new();
    interrupted_run(&job, 5).await;

    cli()
        .args(&["resume", "aggregate", "5", "--root", job.root().to_str().unwrap()])
        .passes()
        .stdout_eq("multijob #5: FAILURE (resume eligible)");
}

#[test]
fn show_missing_run_fails() {
    let job = Job::new();
    cli()
        .args(&["resume", "show", "9", "--root", job.root().to_str().unwrap()])
        .fails()
        .stderr_has("no resume snapshot for run #9");
}

#[test]
fn root_defaults_to_state_dir_env() {
    let job = Job::new();
    job.store()
        .try_persist(&mj_storage::ResumeSnapshot::new(
            parent_run(2),
            mj_core::RegistrySnapshot { revision: 1, records: vec![success("build", "compile", 1)] },
        ))
        .unwrap();

    cli()
        .args(&["resume", "aggregate", "2"])
        .env("MJ_STATE_DIR", job.root())
        .passes()
        .stdout_eq("multijob #2: SUCCESS");
}

#[test]
fn root_read_from_project_config() {
    let job = Job::new();
    let project = tempfile::tempdir().unwrap();
    std::fs::write(
        project.path().join("multijob.toml"),
        format!("storage_root = {:?}\n", job.root().to_str().unwrap()),
    )
    .unwrap();

    cli()
        .args(&["resume", "list"])
        .pwd(project.path())
        .passes()
        .stdout_eq("No pending resume snapshots");
}

#[test]
fn invalid_project_config_fails() {
    let project = tempfile::tempdir().unwrap();
    std::fs::write(project.path().join("multijob.toml"), "phases = 3\n").unwrap();

    cli()
        .args(&["resume", "list"])
        .pwd(project.path())
        .fails()
        .stderr_has("invalid config in");
}
