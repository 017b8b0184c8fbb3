//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own snapshot file and an
//! isolated home directory so no real config is touched.

use std::path::{Path, PathBuf};
use std::process::Command;

struct Sandbox {
    home: tempfile::TempDir,
    snapshot: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp home");
        let snapshot = home.path().join("snapshot.json");
        Self { home, snapshot }
    }

    fn home(&self) -> &Path {
        self.home.path()
    }

    /// Run a CLI command and return (exit code, stdout, stderr).
    fn run(&self, args: &[&str]) -> (i32, String, String) {
        let output = Command::new(env!("CARGO_BIN_EXE_habitgrid"))
            .env("HOME", self.home())
            .env_remove("HABITGRID_ENV")
            .env_remove("HABITGRID_SNAPSHOT")
            .env_remove("XDG_CONFIG_HOME")
            .arg("--snapshot")
            .arg(&self.snapshot)
            .args(args)
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (code, stdout, stderr)
    }

    fn add(&self, name: &str, schedule: &str, today: &str) -> String {
        let (code, stdout, stderr) =
            self.run(&["--today", today, "habit", "add", name, "--schedule", schedule]);
        assert_eq!(code, 0, "habit add failed: {stderr}");
        stdout.trim().to_string()
    }

    fn check(&self, id: &str, day: &str) {
        let (code, _, stderr) = self.run(&["habit", "check", id, "--date", day]);
        assert_eq!(code, 0, "habit check failed: {stderr}");
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let (code, stdout, stderr) = self.run(args);
        assert_eq!(code, 0, "command {args:?} failed: {stderr}");
        serde_json::from_str(&stdout).expect("valid JSON output")
    }
}

#[test]
fn test_habit_add_and_list() {
    let sb = Sandbox::new();
    let id = sb.add("Read", "daily", "2026-03-01");
    assert!(!id.is_empty());
    assert!(sb.snapshot.exists());

    let habits = sb.json(&["habit", "list", "--json"]);
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["id"], id.as_str());
    assert_eq!(habits[0]["name"], "Read");
    assert_eq!(habits[0]["schedule"]["kind"], "daily");
}

#[test]
fn test_list_without_snapshot_is_empty() {
    let sb = Sandbox::new();
    let (code, stdout, _) = sb.run(&["habit", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no habits"));
}

#[test]
fn test_streak_after_checks() {
    let sb = Sandbox::new();
    let id = sb.add("Read", "daily", "2026-03-01");
    for day in ["2026-03-01", "2026-03-02", "2026-03-03"] {
        sb.check(&id, day);
    }

    let streak = sb.json(&["--today", "2026-03-03", "stats", "streak", &id]);
    assert_eq!(streak["current"], 3);
    assert_eq!(streak["longest"], 3);

    // Undo the middle day
    let (code, _, _) = sb.run(&["habit", "check", &id, "--date", "2026-03-02", "--undo"]);
    assert_eq!(code, 0);
    let streak = sb.json(&["--today", "2026-03-03", "stats", "streak", &id]);
    assert_eq!(streak["current"], 1);
    assert_eq!(streak["longest"], 1);
}

#[test]
fn test_archive_hides_from_list() {
    let sb = Sandbox::new();
    let id = sb.add("Stretch", "weekdays", "2026-03-02");
    let (code, _, stderr) = sb.run(&["habit", "archive", &id, "--on", "2026-03-10"]);
    assert_eq!(code, 0, "archive failed: {stderr}");

    let active = sb.json(&["habit", "list", "--json"]);
    assert!(active.as_array().unwrap().is_empty());
    let all = sb.json(&["habit", "list", "--all", "--json"]);
    assert_eq!(all[0]["is_archived"], true);
}

#[test]
fn test_today_and_summary() {
    let sb = Sandbox::new();
    let a = sb.add("Read", "daily", "2026-03-01");
    let _b = sb.add("Run", "daily", "2026-03-01");
    sb.check(&a, "2026-03-04");

    let today = sb.json(&["--today", "2026-03-04", "stats", "today"]);
    assert_eq!(today["scheduled"], 2);
    assert_eq!(today["completed"], 1);
    assert_eq!(today["completed_habits"][0], a.as_str());

    let summary = sb.json(&["--today", "2026-03-04", "stats", "summary", "--days", "3"]);
    let rows = summary.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["day"], "2026-03-02");
    assert_eq!(rows[2]["day"], "2026-03-04");
}

#[test]
fn test_heatmap_grass_json_and_text() {
    let sb = Sandbox::new();
    let id = sb.add("Read", "daily", "2026-03-01");
    sb.check(&id, "2026-03-04");

    let grid = sb.json(&["--today", "2026-03-04", "heatmap", "grass", "--json"]);
    let columns = grid["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 14);
    // 2026-03-04 is a Wednesday in the last column
    let cell = &columns[13][3];
    assert_eq!(cell["day"], "2026-03-04");
    assert_eq!(cell["level"], 4);
    assert_eq!(cell["is_today"], true);

    let (code, stdout, _) = sb.run(&["--today", "2026-03-04", "heatmap", "grass"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Sun "));
    assert!(stdout.contains('@'));
    assert!(stdout.contains("Legend"));
}

#[test]
fn test_heatmap_mini() {
    let sb = Sandbox::new();
    let id = sb.add("Gym", "mon,wed,fri", "2026-03-01");
    sb.check(&id, "2026-03-02");

    let grid = sb.json(&["--today", "2026-03-04", "heatmap", "mini", &id, "--json"]);
    let last = grid["columns"].as_array().unwrap().last().unwrap().clone();
    // Sun 03-01 .. Sat 03-07
    assert_eq!(last[0]["state"], "inactive");
    assert_eq!(last[1]["state"], "completed");
    assert_eq!(last[3]["state"], "pending");
    assert_eq!(last[5]["state"], "inactive");
}

#[test]
fn test_unknown_habit_fails() {
    let sb = Sandbox::new();
    let (code, _, stderr) = sb.run(&["stats", "streak", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, _) = sb.run(&["habit", "check", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_invalid_schedule_fails() {
    let sb = Sandbox::new();
    let (code, _, stderr) = sb.run(&["habit", "add", "Odd", "--schedule", "funday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid schedule day"));
}

#[test]
fn test_config_set_and_get() {
    let sb = Sandbox::new();
    let (code, _, stderr) = sb.run(&["config", "set", "heatmap.grass_weeks", "8"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (code, stdout, _) = sb.run(&["config", "get", "heatmap.grass_weeks"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "8");
    assert!(sb.home().join(".config/habitgrid/config.toml").exists());

    let grid = sb.json(&["--today", "2026-03-04", "heatmap", "grass", "--json"]);
    assert_eq!(grid["columns"].as_array().unwrap().len(), 8);

    let (code, _, _) = sb.run(&["config", "set", "heatmap.grass_weeks", "0"]);
    assert_eq!(code, 1);
    let (code, _, _) = sb.run(&["config", "get", "heatmap.nothing"]);
    assert_eq!(code, 1);
}

#[test]
fn test_oversized_ranges_rejected() {
    let sb = Sandbox::new();
    let id = sb.add("Read", "daily", "2026-03-01");

    let (code, _, stderr) = sb.run(&["heatmap", "range", "--from", "2026-03-01", "--weeks", "4000000000"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--weeks"));
    let (code, _, _) = sb.run(&["heatmap", "range", "--from", "2026-03-01", "--weeks", "0"]);
    assert_ne!(code, 0);

    let (code, _, _) = sb.run(&["stats", "summary", "--days", "18446744073709551615"]);
    assert_ne!(code, 0);
    let (code, _, _) = sb.run(&["stats", "habit", &id, "--days", "3661"]);
    assert_ne!(code, 0);

    let stats = sb.json(&["--today", "2026-03-04", "stats", "habit", &id, "--days", "3660"]);
    assert_eq!(stats["scheduled_days"], 4);
    let grid = sb.json(&["--today", "2026-03-04", "heatmap", "range", "--from", "2026-03-01", "--weeks", "520", "--json"]);
    assert_eq!(grid["columns"].as_array().unwrap().len(), 520);
}

#[test]
fn test_completions() {
    let sb = Sandbox::new();
    let (code, stdout, _) = sb.run(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("habitgrid"));
}
