mod common;

use common::{Entry, descriptor, write_zip};
use std::process::Command;
use tempfile::TempDir;

fn eargv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_eargv"))
}

#[test]
fn converts_archive() {
    let dir = TempDir::new().unwrap();
    let ear = dir.path().join("app.ear");
    let out = dir.path().join("gv.json");
    let xml = descriptor(&[("host", "localhost"), ("port", "8080")]);
    write_zip(&ear, &[Entry::deflated("TIBCO.xml", xml.as_bytes())]);

    let status = eargv()
        .current_dir(dir.path())
        .arg("--ear")
        .arg(&ear)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(status.status.success());
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "{\n  \"host\" : \"localhost\",\n  \"port\" : \"8080\"\n}\n"
    );
    assert!(!dir.path().join("TIBCO.xml").exists());
    assert!(String::from_utf8_lossy(&status.stderr).contains("Done"));
}

#[test]
fn missing_flags_print_usage() {
    let dir = TempDir::new().unwrap();

    for args in [
        vec!["--ear", "app.ear"],
        vec!["-o", "gv.json"],
        vec!["--ear", "", "-o", "gv.json"],
        vec![],
    ] {
        let output = eargv().current_dir(dir.path()).args(&args).output().unwrap();

        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    }
    assert!(!dir.path().join("gv.json").exists());
}

#[test]
fn missing_entry_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let ear = dir.path().join("app.ear");
    let out = dir.path().join("gv.json");
    write_zip(&ear, &[Entry::stored("other.xml", b"<x/>")]);

    let output = eargv()
        .arg("--ear")
        .arg(&ear)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unable to find TIBCO.xml"));
    assert!(!out.exists());
}

#[test]
fn corrupt_archive_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let ear = dir.path().join("app.ear");
    std::fs::write(&ear, b"PK but not really").unwrap();

    let output = eargv()
        .arg("--ear")
        .arg(&ear)
        .arg("-o")
        .arg(dir.path().join("gv.json"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!dir.path().join("gv.json").exists());
}

#[test]
fn oversized_entry_exits_with_logged_error() {
    let dir = TempDir::new().unwrap();
    let ear = dir.path().join("app.ear");
    let xml = descriptor(&[("host", "localhost")]);
    write_zip(
        &ear,
        &[Entry {
            compressed_size: Some(0xFFFF_FFF0),
            ..Entry::stored("TIBCO.xml", xml.as_bytes())
        }],
    );

    let output = eargv()
        .arg("--ear")
        .arg(&ear)
        .arg("-o")
        .arg(dir.path().join("gv.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("lies outside the archive"));
    assert!(!dir.path().join("gv.json").exists());
}
