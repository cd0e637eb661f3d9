//! Integration tests for the `sb` CLI.
//!
//! Each test points `sb` at a temp data directory, runs it as a subprocess,
//! and verifies stdout and/or the stored files.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `sb` against `dir` (data dir and config home), returning (stdout, stderr, success).
fn run_sb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_sb"))
        .arg("--data-dir")
        .arg(dir.join("data"))
        .args(args)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("SITEBOARD_DATA_DIR")
        .env_remove("SITEBOARD_LOG")
        .output()
        .expect("failed to run sb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `sb` expecting success, return stdout.
fn run_sb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_sb(dir, args);
    if !success {
        panic!(
            "sb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn run_sb_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = args.to_vec();
    full.push("--json");
    let out = run_sb_ok(dir, &full);
    serde_json::from_str(&out).unwrap()
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[test]
fn test_login_and_whoami() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_sb_ok(tmp.path(), &["whoami"]), "Not logged in.\n");

    run_sb_ok(tmp.path(), &["login", "amy"]);
    assert_eq!(run_sb_ok(tmp.path(), &["whoami"]), "amy\n");
    assert_eq!(
        fs::read_to_string(tmp.path().join("data/nickname.json")).unwrap(),
        "amy"
    );
}

#[test]
fn test_login_blank_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_sb(tmp.path(), &["login", "   "]);
    assert!(!success);
    assert!(stderr.contains("please enter a name"));
}

// ---------------------------------------------------------------------------
// Project list
// ---------------------------------------------------------------------------

#[test]
fn test_projects_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_sb_ok(tmp.path(), &["projects"]), "No projects.\n");
}

#[test]
fn test_create_and_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_sb_ok(tmp.path(), &["create", "  Alpha  "]);
    assert!(out.starts_with("Created local-project-"));
    run_sb_ok(tmp.path(), &["create", "Beta"]);

    let parsed = run_sb_json(tmp.path(), &["projects"]);
    let projects = parsed["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "Alpha");
    assert_eq!(projects[1]["name"], "Beta");
    assert!(projects[0]["id"].as_str().unwrap().starts_with("local-project-"));
}

#[test]
fn test_create_blank_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_sb(tmp.path(), &["create", "  "]);
    assert!(!success);
    assert!(stderr.contains("please enter a project name"));
    assert!(!tmp.path().join("data/allCustomers.json").exists());
}

#[test]
fn test_projects_shows_nickname() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["login", "amy"]);
    let out = run_sb_ok(tmp.path(), &["projects"]);
    assert!(out.starts_with("Signed in as amy\n"));
}

#[test]
fn test_clear() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["create", "Alpha"]);
    let out = run_sb_ok(tmp.path(), &["clear"]);
    assert_eq!(out, "Cleared 1 project(s).\n");
    assert!(!tmp.path().join("data/allCustomers.json").exists());
    assert!(!tmp.path().join("data/localProjects.json").exists());
    assert_eq!(run_sb_ok(tmp.path(), &["projects"]), "No projects.\n");
}

// ---------------------------------------------------------------------------
// Project detail
// ---------------------------------------------------------------------------

#[test]
fn test_show_sample() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_sb_ok(tmp.path(), &["show", "1"]);
    assert!(out.contains("Backend API system (sample)"));
    assert!(out.contains("created: 2025-01-01"));
}

#[test]
fn test_show_unknown_falls_back_to_template() {
    let tmp = tempfile::TempDir::new().unwrap();
    let parsed = run_sb_json(tmp.path(), &["show", "does-not-exist"]);
    assert_eq!(parsed["origin"], "template");
    assert_eq!(parsed["project"]["id"], "template-1");
    assert_eq!(parsed["project"]["tasks"].as_array().unwrap().len(), 2);
}

#[test]
fn test_task_add_and_edit() {
    let tmp = tempfile::TempDir::new().unwrap();
    let created = run_sb_json(tmp.path(), &["create", "Alpha"]);
    let pid = created["id"].as_str().unwrap().to_string();

    let saved = run_sb_json(tmp.path(), &["task", "add", &pid, "fix bug"]);
    assert_eq!(saved["outcome"], "created");
    let tid = saved["task"].as_str().unwrap().to_string();
    assert!(tid.starts_with("local-"));

    let out = run_sb_ok(tmp.path(), &["show", &pid]);
    assert!(out.contains(&format!("{}  fix bug  [awaiting sync]", tid)));

    let edited = run_sb_json(tmp.path(), &["task", "edit", &pid, &tid, "fix bug v2"]);
    assert_eq!(edited["outcome"], "updated");
    assert_eq!(edited["task"], tid.as_str());

    let detail = run_sb_json(tmp.path(), &["show", &pid]);
    let pending = detail["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["description"], "fix bug v2");
    assert_eq!(pending[0]["done"], false);
}

#[test]
fn test_task_edit_keeps_image_unless_asked() {
    let tmp = tempfile::TempDir::new().unwrap();
    let saved = run_sb_json(tmp.path(), &["task", "add", "1", "hero", "--image", "photo-1"]);
    let tid = saved["task"].as_str().unwrap().to_string();

    run_sb_ok(tmp.path(), &["task", "edit", "1", &tid, "hero v2"]);
    let detail = run_sb_json(tmp.path(), &["show", "1"]);
    assert_eq!(detail["pending"][0]["description"], "hero v2");
    assert_eq!(detail["pending"][0]["image"], "photo-1");

    run_sb_ok(tmp.path(), &["task", "edit", "1", &tid, "hero v3", "--image", "photo-2"]);
    let detail = run_sb_json(tmp.path(), &["show", "1"]);
    assert_eq!(detail["pending"][0]["image"], "photo-2");

    run_sb_ok(tmp.path(), &["task", "edit", "1", &tid, "hero v4", "--clear-image"]);
    let detail = run_sb_json(tmp.path(), &["show", "1"]);
    assert_eq!(detail["pending"][0]["description"], "hero v4");
    assert!(detail["pending"][0]["image"].is_null());
}

#[test]
fn test_task_edit_image_flags_conflict() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, _stderr, success) = run_sb(
        tmp.path(),
        &["task", "edit", "1", "local-x", "d", "--image", "p", "--clear-image"],
    );
    assert!(!success);
}

#[test]
fn test_task_edit_unknown_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_sb(tmp.path(), &["task", "edit", "1", "local-nope", "x"]);
    assert!(!success);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_task_add_blank_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_sb(tmp.path(), &["task", "add", "1", " "]);
    assert!(!success);
    assert!(stderr.contains("please enter a task description"));
    assert!(!tmp.path().join("data/localProjects.json").exists());
}

#[test]
fn test_task_on_sample_surfaces_in_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_sb_ok(tmp.path(), &["task", "add", "2", "update footer", "--image", "photo-1"]);

    // The sample is now a stored local project, so the merged list shows it
    let out = run_sb_ok(tmp.path(), &["projects"]);
    assert!(out.contains("2  Company website"));

    let detail = run_sb_json(tmp.path(), &["show", "2"]);
    assert_eq!(detail["origin"], "local");
    assert_eq!(detail["pending"][0]["image"], "photo-1");
}

#[test]
fn test_corrupt_store_reads_as_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("allCustomers.json"), "not json").unwrap();
    assert_eq!(run_sb_ok(tmp.path(), &["projects"]), "No projects.\n");
}

#[test]
fn test_config_file_sets_data_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = tmp.path().join("custom.toml");
    let data = tmp.path().join("elsewhere");
    fs::write(
        &config,
        format!("[storage]\ndata_dir = {:?}\n", data.display().to_string()),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_sb"))
        .args(["--config", config.to_str().unwrap(), "create", "Alpha"])
        .env_remove("SITEBOARD_DATA_DIR")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(data.join("allCustomers.json").exists());
}
