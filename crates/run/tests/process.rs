#![cfg(unix)]

use std::fs;

use lumpr_run::{RunError, run_lumprem, run_process};

#[test]
fn child_runs_in_workdir() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_process::<&str>("pwd", dir.path(), &[]).unwrap();
    let reported = fs::canonicalize(out.stdout.trim()).unwrap();
    assert_eq!(reported, fs::canonicalize(dir.path()).unwrap());
}

#[test]
fn lumprem_receives_deck_and_output_names() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_lumprem("cat", dir.path(), "lr1").unwrap();
    assert_eq!(out.stdout, "lr_lr1.in\nlr_lr1.out\n");
}

#[test]
fn failing_program_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_process("sh", dir.path(), &["echo boom >&2", "exit 3"]).unwrap_err();
    match err {
        RunError::ExternalProcessFailed { code, stderr, .. } => {
            assert_eq!(code, Some(3));
            assert_eq!(stderr, "boom");
        }
        other => panic!("expected ExternalProcessFailed, got {other:?}"),
    }
}
