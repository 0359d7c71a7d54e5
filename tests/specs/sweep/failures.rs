//! Failure paths: nothing is deleted without an archive, and deletion stops
//! at the first error.

use crate::prelude::*;

fn sweep(scratch: &Scratch) -> CliBuilder {
    cli().args(&["sweep", "--export-dir", &scratch.export_arg()])
}

#[test]
fn deletion_stops_at_first_failure() {
    let hub = Hub::start()
        .with_jobs(&[idle("a1", "first", 400), idle("b2", "second", 450), idle("c3", "third", 500)])
        .delete_fails("b2");
    let scratch = Scratch::new();

    sweep(&scratch)
        .against(&hub)
        .stdin("Y\n")
        .code(1)
        .stdout_has("Deleting Job 'second'")
        .stdout_lacks("Deleting Job 'third'")
        .stderr_has("deleting job 'second' failed")
        .stderr_has("job is locked");

    assert_eq!(hub.deleted_ids(), vec!["a1", "b2"]);
    // Later candidates stay archived
    assert_eq!(scratch.archived_files(), vec!["first.zip", "second.zip", "third.zip"]);
}

#[test]
fn export_failure_aborts_before_prompt_and_deletes() {
    let hub = Hub::start()
        .with_jobs(&[idle("a1", "first", 400), idle("b2", "second", 450)])
        .export_fails("b2");
    let scratch = Scratch::new();

    let run = sweep(&scratch)
        .against(&hub)
        .stdin("Y\n")
        .code(1)
        .stderr_has("exporting job 'second' failed");

    assert!(!run.stderr().contains("Do you want"));
    assert!(hub.deleted_ids().is_empty());
    // Earlier archives are kept
    assert_eq!(scratch.archived_files(), vec!["first.zip"]);
}

#[test]
fn unusable_export_dir_fails_before_any_request() {
    let hub = Hub::start().with_jobs(&[idle("a1", "etl", 400)]);
    let scratch = Scratch::new();
    std::fs::write(scratch.export_dir(), "not a directory").unwrap();

    sweep(&scratch).against(&hub).code(1).stderr_has("cannot create export directory");

    assert_eq!(hub.request_count(), 0);
}

#[test]
fn rejected_login_fails_without_exporting() {
    let hub = Hub::rejecting_login();
    let scratch = Scratch::new();

    sweep(&scratch).against(&hub).fails().stderr_has("HTTP 401");

    assert!(scratch.run_dirs().is_empty());
}

#[test]
fn listing_error_is_reported() {
    let hub = Hub::start();
    let scratch = Scratch::new();

    // No listing mock mounted: the hub answers 404
    sweep(&scratch).against(&hub).code(1).stderr_has("list jobs returned HTTP 404");
}
