mod common;

use common::{expected, file, snapshot, write_tree};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Run the binary with the config pointed at a file that does not exist, so the
/// user's own config never leaks into a test.
fn run(cfg_dir: &Path, args: &[&dyn AsRef<std::ffi::OsStr>]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("fs_move");
    let mut cmd = Command::new(me);
    cmd.env("FS_MOVE_CONFIG", cfg_dir.join("absent.xml"));
    for a in args {
        cmd.arg(*a);
    }
    cmd.output().expect("spawn binary")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn moves_file_and_exits_zero() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.txt");
    let dst = td.path().join("b.txt");
    fs::write(&src, "hello").unwrap();

    let out = run(td.path(), &[&src, &dst]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
}

#[test]
fn existing_destination_exits_2_with_message() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::create_dir(&src).unwrap();
    fs::create_dir(&dst).unwrap();

    let out = run(td.path(), &[&src, &dst]);
    assert_eq!(out.status.code(), Some(2));
    assert!(
        stderr(&out).contains("error: Destination directory already exists"),
        "stderr: {}",
        stderr(&out)
    );
    assert!(src.exists());
}

#[test]
fn missing_source_exits_3() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &[&td.path().join("nope"), &td.path().join("dst")]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("error: Source path not found"));
}

#[test]
fn merge_flag_merges_multiple_sources_into_one_destination() {
    let td = tempdir().unwrap();
    let a = td.path().join("a");
    let b = td.path().join("b");
    let dst = td.path().join("dst");
    write_tree(&a, &[("one.txt", file("1"))]).unwrap();
    write_tree(&b, &[("two.txt", file("2"))]).unwrap();

    let out = run(td.path(), &[&"--merge", &a, &b, &dst]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        snapshot(&dst),
        expected(&[("one.txt", file("1")), ("two.txt", file("2"))])
    );
    assert!(!a.exists() && !b.exists());
}

#[test]
fn second_source_conflict_stops_the_run() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    let dst = td.path().join("dst.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();

    let out = run(td.path(), &[&a, &b, &dst]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(fs::read_to_string(&dst).unwrap(), "a");
    assert!(b.exists());
}

#[test]
fn overwrite_and_purge_flags_are_honoured() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    write_tree(&src, &[("x.txt", file("x"))]).unwrap();
    fs::write(&dst, "a file").unwrap();

    let out = run(td.path(), &[&"--merge", &"--purge", &src, &dst]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read_to_string(&dst).unwrap(), "a file");
    assert!(!src.exists());

    write_tree(&src, &[("x.txt", file("x"))]).unwrap();
    let out = run(td.path(), &[&"--overwrite", &src, &dst]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(snapshot(&dst), expected(&[("x.txt", file("x"))]));
}

#[test]
fn single_path_is_a_usage_error() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &[&td.path().join("only")]);
    assert!(!out.status.success());
}

#[test]
fn json_logs_are_one_object_per_line() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.txt");
    let dst = td.path().join("b.txt");
    fs::write(&src, "x").unwrap();

    let out = run(td.path(), &[&"--json", &"--log-level", &"debug", &src, &dst]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let mut saw_completed = false;
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let v: serde_json::Value = serde_json::from_str(line).expect("json log line");
        assert!(v.get("level").is_some(), "missing level: {line}");
        if v["fields"]["message"] == "Move completed" {
            saw_completed = true;
        }
    }
    assert!(saw_completed, "stdout: {stdout}");
}

#[test]
fn log_file_receives_events() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = base.join("a.txt");
    let dst = base.join("b.txt");
    let log = base.join("logs").join("fs_move.log");
    fs::write(&src, "x").unwrap();

    let out = run(&base, &[&"--log-file", &log, &src, &dst]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let contents = fs::read_to_string(&log).expect("log file written");
    assert!(contents.contains("Move completed"), "log: {contents}");
}

#[test]
fn print_config_reports_env_override() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &[&"--print-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("FS_MOVE_CONFIG"), "stdout: {stdout}");
    assert!(stdout.contains("absent.xml"), "stdout: {stdout}");
}
