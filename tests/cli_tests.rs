#![cfg(feature = "cli")]

mod common;

use assert_cmd::Command;
use capacity_engine::absence::{GlobalHoliday, TimeOff};
use capacity_engine::config::EngineConfig;
use capacity_engine::people::{Team, User};
use capacity_engine::persistence::{load_snapshot_from_json, save_snapshot_to_json};
use capacity_engine::project::{Epic, Project, Story, TaskType};
use capacity_engine::scope::{ScopeItem, ScopeStatus, TshirtSize};
use capacity_engine::snapshot::PlanningSnapshot;
use common::d;
use predicates::str::contains as str_contains;
use tempfile::TempDir;

fn write_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let mut team = Team::new(1, "Platform");
    team.member_ids = vec![1, 2];
    let snapshot = PlanningSnapshot {
        users: vec![
            User::new(1, "Ana").with_capacity(40.0).with_strengths("Frontend", "QA"),
            User::new(2, "Ben")
                .with_capacity(40.0)
                .with_strengths("Backend", "DevOps")
                .with_time_off(TimeOff::new(d(2025, 3, 6), d(2025, 3, 7), "Vacation")),
        ],
        global_holidays: vec![GlobalHoliday::new(d(2025, 3, 5), "Founders Day")],
        teams: vec![team],
        projects: vec![
            Project::new(1, "Portal")
                .with_members([1, 2])
                .with_epic(
                    Epic::new(1, "Auth")
                        .with_story(Story::new(1, "Login screen").with_points(8).of_type(TaskType::Ui)),
                )
                .with_scope_item(
                    ScopeItem::new(1, "Billing")
                        .sized(TshirtSize::L)
                        .with_status(ScopeStatus::Approved),
                ),
        ],
    };
    let path = dir.path().join("planning.json");
    save_snapshot_to_json(&snapshot, &path).expect("write snapshot");
    path
}

#[allow(deprecated)]
fn cli(data: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("capacity-cli").expect("cli binary");
    cmd.arg("--data").arg(data);
    cmd
}

#[test]
fn capacity_reports_hours() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    cli(&data)
        .args(["capacity", "--user", "1", "--start", "2025-03-03", "--end", "2025-03-07"])
        .assert()
        .success()
        .stdout(str_contains("\"available_days\": 4"))
        .stdout(str_contains("\"available_hours\": 32.0"));
}

#[test]
fn inverted_range_fails() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    cli(&data)
        .args(["availability", "--user", "1", "--start", "2025-03-07", "--end", "2025-03-03"])
        .assert()
        .failure()
        .stderr(str_contains("invalid range"));
}

#[test]
fn unknown_user_fails() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    cli(&data)
        .args(["capacity", "--user", "42", "--start", "2025-03-03", "--end", "2025-03-07"])
        .assert()
        .failure()
        .stderr(str_contains("unknown user 42"));
}

#[test]
fn team_calendar_lists_who_is_out() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    cli(&data)
        .args([
            "team-calendar",
            "--team",
            "1",
            "--start",
            "2025-03-03",
            "--end",
            "2025-03-07",
            "--today",
            "2025-03-06",
        ])
        .assert()
        .success()
        .stdout(str_contains("\"availability_percentage\": 60.0"))
        .stdout(str_contains("Time Off: Vacation"));
}

#[test]
fn capacity_report_renders_table() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    let csv_path = dir.path().join("report.csv");
    cli(&data)
        .args([
            "capacity-report",
            "--team",
            "1",
            "--start",
            "2025-03-03",
            "--end",
            "2025-03-07",
            "--format",
            "table",
            "--csv",
        ])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(str_contains("available_hours"))
        .stdout(str_contains("Ben"));
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn suggest_ranks_frontend_first() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    let assert = cli(&data)
        .args(["suggest", "--project", "1", "--story", "1"])
        .assert()
        .success()
        .stdout(str_contains("\"required_skill\": \"Frontend\""));
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let ana = output.find("\"Ana\"").expect("Ana listed");
    let ben = output.find("\"Ben\"").expect("Ben listed");
    assert!(ana < ben);
}

#[test]
fn estimate_prints_breakdown() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    cli(&data)
        .args(["estimate", "--project", "1"])
        .assert()
        .success()
        .stdout(str_contains("\"total_hours\": 96.0"));
}

#[test]
fn convert_scope_saves_snapshot() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    cli(&data)
        .args(["convert-scope", "--project", "1", "--item", "1"])
        .assert()
        .success()
        .stdout(str_contains("\"epic_id\": 2"));

    let snapshot = load_snapshot_from_json(&data, &EngineConfig::default()).unwrap();
    let project = snapshot.project(1).unwrap();
    assert_eq!(project.epics.len(), 2);
    assert_eq!(project.scope_items[0].status, ScopeStatus::Converted);

    cli(&data)
        .args(["convert-scope", "--project", "1", "--item", "1"])
        .assert()
        .failure()
        .stderr(str_contains("must be approved"));
}

#[test]
fn config_file_changes_the_work_week() {
    let dir = TempDir::new().unwrap();
    let data = write_snapshot(&dir);
    let config = dir.path().join("engine.toml");
    std::fs::write(
        &config,
        "[work_week]\nworking_days = [\"Mon\", \"Tue\", \"Wed\", \"Thu\"]\n",
    )
    .unwrap();
    cli(&data)
        .arg("--config")
        .arg(&config)
        .args(["capacity", "--user", "1", "--start", "2025-03-03", "--end", "2025-03-07"])
        .assert()
        .success()
        .stdout(str_contains("\"working_days\": 4"));
}
