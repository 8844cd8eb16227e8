//! Runs the `dyn-advisor` binary against a temporary graph repository.

use std::path::Path;
use std::process::{Command, Output};

fn advisor(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dyn-advisor"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("GRAPH_REPO_PATH", dir.join("graphs"))
        .env("DOCS_PATH", dir.join("docs"))
        .env("ALLOW_EXECUTION", "false")
        .env("DYNAMO_CLI_PATH", "")
        .env("LOG_LEVEL", "WARNING")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn sample_repo(dir: &Path) {
    let graphs = dir.join("graphs");
    std::fs::create_dir_all(graphs.join("walls")).unwrap();
    std::fs::write(
        graphs.join("rectangle.dyn"),
        r#"{"Name": "Rectangle Creator", "Description": "Creates rectangles", "Category": "Geometry",
            "Nodes": [{"Id": "1", "Name": "Rectangle.ByWidthLength", "ConcreteType": "DSFunction"}],
            "Connectors": []}"#,
    )
    .unwrap();
    std::fs::write(
        graphs.join("walls/tags.dyn"),
        r#"{"Name": "Wall Tags", "Category": "Annotation", "Nodes": [], "Connectors": []}"#,
    )
    .unwrap();
    std::fs::write(graphs.join("walls/broken.dyn"), "{ not json").unwrap();
}

#[test]
fn test_index_reports_count() {
    let dir = tempfile::tempdir().unwrap();
    sample_repo(dir.path());
    let output = advisor(dir.path(), &["index"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("✓ Indexed 2 Dynamo graphs"));
    assert!(out.contains("Rectangle Creator (1 nodes)"));
}

#[test]
fn test_recommend_prints_ranked_results() {
    let dir = tempfile::tempdir().unwrap();
    sample_repo(dir.path());
    let output = advisor(dir.path(), &["recommend", "rectangle", "--explain"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("1. Rectangle Creator (score: "));
    assert!(out.contains("Detailed explanation:"));
    assert!(!out.contains("Wall Tags"));
}

#[test]
fn test_recommend_run_is_blocked_when_disabled() {
    let dir = tempfile::tempdir().unwrap();
    sample_repo(dir.path());
    let output = advisor(dir.path(), &["recommend", "wall", "--run"]);
    let out = stdout(&output);
    assert!(out.contains("EXECUTION REQUEST"));
    assert!(out.contains("Execution is disabled. Set ALLOW_EXECUTION=true"));
}

#[test]
fn test_recommend_on_empty_repo() {
    let dir = tempfile::tempdir().unwrap();
    let output = advisor(dir.path(), &["recommend", "wall"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No graphs found in"));
}

#[test]
fn test_execute_unknown_graph_lists_available() {
    let dir = tempfile::tempdir().unwrap();
    sample_repo(dir.path());
    let output = advisor(dir.path(), &["execute", "Stair Builder"]);
    let out = stdout(&output);
    assert!(out.contains("Graph 'Stair Builder' not found"));
    assert!(out.contains("Available graphs: Rectangle Creator, Wall Tags"));
}

#[test]
fn test_execute_without_run_prints_hint() {
    let dir = tempfile::tempdir().unwrap();
    sample_repo(dir.path());
    let out = stdout(&advisor(dir.path(), &["execute", "wall tags"]));
    assert!(out.contains("Graph: Wall Tags"));
    assert!(out.contains("Description: N/A"));
    assert!(out.contains("Add --run flag"));
}

#[test]
fn test_status_reports_safe_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout(&advisor(dir.path(), &["status"]));
    assert!(out.contains("Execution allowed: false"));
    assert!(out.contains("Dynamo CLI path: (not set)"));
    assert!(out.contains("✓ Execution is DISABLED (safe)"));
}
