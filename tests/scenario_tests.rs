//! Scenario files replayed end to end through the simulator.

use breakpoint_gutter::config::{ConfigError, GutterConfig};
use breakpoint_gutter::sim::{ActionKind, ActionRecord, Scenario, ScenarioError};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write file");
    path
}

#[test]
fn test_scenario_replays_gestures_and_edits() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(
        &dir,
        "edit.yaml",
        r#"
path: /src/main.rs
lines: 40
breakpoints: [2, 5, 9]
steps:
  - action: remove_breakpoint
    row: 5
  - action: hover
    row: 7
  - action: click
    row: 7
  - action: insert_lines
    at: 8
    count: 2
  - action: leave
"#,
    );

    let report = Scenario::load(&path).unwrap().run(GutterConfig::default());

    let expected: BTreeSet<u32> = [2, 7, 11].into_iter().collect();
    assert_eq!(report.committed_rows, expected);
    assert_eq!(report.store_rows, expected);
    assert_eq!(
        report.actions,
        vec![
            ActionRecord::new(ActionKind::Toggle, "/src/main.rs", 7),
            ActionRecord::new(ActionKind::Delete, "/src/main.rs", 9),
            ActionRecord::new(ActionKind::Add, "/src/main.rs", 11),
        ]
    );
    assert_eq!(report.shadow_row, None);
    assert!(report.gutter_visible);
    assert!(!report.owner_notified);
}

#[test]
fn test_scenario_close_editor_notifies_owner() {
    let scenario: Scenario = serde_yaml_ng::from_str(
        r#"
path: /src/lib.rs
breakpoints: [1]
steps:
  - action: close_editor
"#,
    )
    .unwrap();

    let report = scenario.run(GutterConfig::default());

    assert!(report.owner_notified);
    assert!(!report.gutter_visible);
}

#[test]
fn test_scenario_without_path_never_dispatches() {
    let scenario: Scenario = serde_yaml_ng::from_str(
        r#"
steps:
  - action: click
    row: 3
  - action: click_line_number
    row: 4
"#,
    )
    .unwrap();

    let report = scenario.run(GutterConfig::default());

    assert!(report.actions.is_empty());
    assert!(report.committed_rows.is_empty());
    assert!(!report.gutter_visible);
}

#[test]
fn test_scenario_dispose_destroys_markers() {
    let scenario: Scenario = serde_yaml_ng::from_str(
        r#"
path: /src/lib.rs
breakpoints: [1, 2, 3]
steps:
  - action: dispose
"#,
    )
    .unwrap();

    let report = scenario.run(GutterConfig::default());

    assert!(report.committed_rows.is_empty());
    assert_eq!(report.markers_created, 3);
    assert_eq!(report.markers_destroyed, 3);
    assert!(!report.gutter_visible);
}

#[test]
fn test_run_file_uses_given_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let scenario = write(
        &dir,
        "hover.yaml",
        "path: /a.rs\nsteps:\n  - action: hover\n    row: 3\n",
    );
    let config = write(&dir, "config.yaml", "hover_preview: false\n");

    let report = Scenario::run_file(&scenario, Some(&config)).unwrap();

    assert_eq!(report.shadow_row, None);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let err = Scenario::load(&dir.path().join("missing.yaml")).unwrap_err();

    assert!(matches!(err, ScenarioError::Io { .. }));
    assert!(err.to_string().contains("missing.yaml"));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(&dir, "bad.yaml", "steps:\n  - action: teleport\n");

    let err = Scenario::load(&path).unwrap_err();

    assert!(matches!(err, ScenarioError::Parse { .. }));
}

#[test]
fn test_run_file_rejects_invalid_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let scenario = write(&dir, "empty.yaml", "steps: []\n");
    let config = write(&dir, "config.yaml", "priority: 0\n");

    let err = Scenario::run_file(&scenario, Some(&config)).unwrap_err();

    assert!(matches!(
        err,
        ScenarioError::Config(ConfigError::Validation(_))
    ));
}
