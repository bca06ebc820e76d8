use std::fs;
use std::io;

use subcli::config::{load_manifest, save_manifest};
use subcli::{Error, HelpTopic, Manifest, Program, SubCli};
use tempfile::TempDir;

#[test]
fn test_load_manifest_expands_placeholders() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subcli.yaml");
    fs::write(
        &path,
        r#"
name: demo
version: ${SUBCLI_MANIFEST_TEST_UNSET:-dev}
description: Demo tool
topics:
  - command: paths
    short: where files live
    help: Files live in the data directory.
"#,
    )
    .unwrap();

    let manifest = load_manifest(&path).unwrap();
    assert_eq!(manifest.program, Program::new("demo", "dev", "Demo tool"));
    assert_eq!(manifest.topics.len(), 1);
    assert_eq!(manifest.topics[0].command, "paths");
}

#[test]
fn test_manifest_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("subcli.yaml");
    let manifest = Manifest {
        program: Program::new("tool", "1.0", "A tool"),
        topics: vec![HelpTopic::new("env", "environment", "env help")],
    };
    save_manifest(&manifest, &path).unwrap();
    assert_eq!(load_manifest(&path).unwrap(), manifest);
}

#[test]
fn test_missing_manifest_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = load_manifest(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.yaml"));
}

#[test]
fn test_invalid_manifest_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "topics: 3\n").unwrap();
    assert!(load_manifest(&path).is_err());
}

#[test]
fn test_cli_from_manifest_lists_topics() {
    let manifest = Manifest {
        program: Program::new("tool", "1.0", "A tool"),
        topics: vec![HelpTopic::new("env", "environment", "env help")],
    };
    let cli = SubCli::from_manifest(manifest).with_output(io::sink());
    assert_eq!(cli.program().name, "tool");
    assert!(cli.registry().topic("env").is_some());
    assert!(cli.registry().command("version").is_some());
}

#[test]
fn test_cli_from_missing_manifest_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    match SubCli::from_manifest_file(&path) {
        Err(Error::Manifest(err)) => assert!(format!("{err:#}").contains("absent.yaml")),
        other => panic!("unexpected result: {other:?}"),
    }
}
