//! CLI integration tests
//!
//! These tests run the built binary and check:
//! - Argument parsing, help and version output
//! - Exit codes for fatal manifest and classification errors
//! - A complete run with stand-in generator and echo executables

mod support;

use serial_test::serial;
use std::fs;
use std::process::{Command, Output};
use support::project::MARKED_HEADER;
use support::{get_automoc_binary, Project};

fn run_automoc(project: &Project, generator: &str, extra: &[&str]) -> Output {
    Command::new(get_automoc_binary())
        .arg(project.output())
        .arg(&project.src)
        .arg(&project.build)
        .arg(generator)
        .arg("true")
        .args(extra)
        .env_remove("VERBOSE")
        .env_remove("AUTOMOC_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .env("AUTOMOC_TOUCH_DELAY_MS", "10")
        .output()
        .expect("Failed to execute automoc")
}

#[test]
fn test_cli_help() {
    let output = Command::new(get_automoc_binary())
        .arg("--help")
        .output()
        .expect("Failed to execute automoc");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("automoc"));
    assert!(stdout.contains("OUTPUT_FILE"));
    assert!(stdout.contains("--touch"));
}

#[test]
fn test_cli_short_help() {
    let output = Command::new(get_automoc_binary())
        .arg("-h")
        .output()
        .expect("Failed to execute automoc");
    assert!(output.status.success());
}

#[test]
fn test_cli_version() {
    let output = Command::new(get_automoc_binary())
        .arg("--version")
        .output()
        .expect("Failed to execute automoc");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_missing_arguments() {
    let output = Command::new(get_automoc_binary())
        .args(["/tmp/out.cpp", "/tmp"])
        .output()
        .expect("Failed to execute automoc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_cli_malformed_manifest() {
    let project = Project::new();
    fs::write(project.manifest(), "SOURCES\n/x.cpp\n").unwrap();

    let output = run_automoc(&project, "true", &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("automoc: "));
    assert!(stderr.contains("SOURCES:"));
    assert!(!project.output().exists());
}

#[test]
fn test_cli_missing_header() {
    let project = Project::new();
    project.source("baz.cpp", "#include \"moc_baz.cpp\"\n");
    project.write_manifest(&["baz.cpp"], "");

    let output = run_automoc(&project, "true", &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("includes the moc file \"moc_baz.cpp\""));
    assert!(!project.output().exists());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_cli_complete_run_and_touch() {
    let project = Project::new();
    project.source("bar.h", MARKED_HEADER);
    project.source("bar.cpp", "#include \"bar.h\"\n");
    project.write_manifest(&["bar.cpp"], "-DFOO");
    support::project::set_old(&project.manifest());

    let output = run_automoc(&project, "true", &["--touch"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        project.read_output(),
        "/* This file is autogenerated, do not edit\n-DFOO\n*/\n#include \"moc_bar.cpp\"\n"
    );
    assert!(
        support::project::mtime(&project.manifest())
            > filetime::FileTime::from_unix_time(1_000_000, 0)
    );
}

#[cfg(unix)]
#[test]
#[serial]
fn test_cli_generator_failure_exit_code() {
    let project = Project::new();
    project.source("bar.h", MARKED_HEADER);
    project.write_manifest(&["bar.h"], "");

    let output = run_automoc(&project, "false", &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!project.output().exists());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_cli_generator_not_found() {
    let project = Project::new();
    project.source("bar.h", MARKED_HEADER);
    project.write_manifest(&["bar.h"], "");

    let output = run_automoc(&project, "/definitely/not/moc", &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start"));
}
