//! End-to-end tests for the debrief binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_debrief")
}

fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("debrief-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

const MATCH_LOG: &str = concat!(
    "[ArenaCompetition:9]: Dumping Results at 300.0s (of 300.0s)\n",
    "[ArenaCompetition:9]: ALIVE:Falcon\n",
    "[ArenaCompetition:9]: DEAD:0:120.0:Kestrel\n",
    "[ArenaCompetition:9]: WHOSHOTWHO:Kestrel:6:Falcon\n",
    "[ArenaCompetition:9]: CLEANKILL:Kestrel:Falcon\n",
    "[ArenaCompetition:9]: ACCURACY:Falcon:6/18\n",
    "[ArenaCompetition:9]: RESULT:Win:{\"team\":\"Raptors\",\"members\":[\"Falcon\"]}\n",
);

fn write_tournament(name: &str) -> PathBuf {
    let dir = unique_temp_dir(name);
    let round = dir.join("Round 0");
    fs::create_dir_all(&round).expect("round dir");
    fs::write(round.join("heat_0.log"), MATCH_LOG).expect("write log");
    dir
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("run debrief");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: debrief"));
}

#[test]
fn report_command_writes_artifacts_and_prints_the_table() {
    let dir = write_tournament("report");
    let output = Command::new(bin())
        .args(["report", dir.to_string_lossy().as_ref()])
        .output()
        .expect("report should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Name"));
    assert!(stdout.contains("Falcon"));
    assert!(stdout.contains("Raptors"));

    assert!(dir.join("results.json").is_file());
    assert!(dir.join("summary.json").is_file());
    assert!(dir.join("summary.csv").is_file());

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("summary.json")).expect("read summary"))
            .expect("summary should be json");
    assert_eq!(summary["craft"]["Falcon"]["survivedCount"], 1);
    assert_eq!(summary["team results"]["wins"]["Raptors"], 1);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn report_no_files_skips_artifacts() {
    let dir = write_tournament("no-files");
    let output = Command::new(bin())
        .args(["report", dir.to_string_lossy().as_ref(), "--no-files"])
        .output()
        .expect("report should run");

    assert_eq!(output.status.code(), Some(0));
    assert!(!dir.join("results.json").exists());
    assert!(!dir.join("summary.csv").exists());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn report_quiet_still_writes_artifacts() {
    let dir = write_tournament("quiet");
    let output = Command::new(bin())
        .args(["report", dir.to_string_lossy().as_ref(), "--quiet"])
        .output()
        .expect("report should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Name"), "quiet mode suppresses the table");
    assert!(dir.join("results.json").is_file());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn report_on_empty_directory_reports_no_logs() {
    let dir = unique_temp_dir("empty");
    let output = Command::new(bin())
        .args(["report", dir.to_string_lossy().as_ref()])
        .output()
        .expect("report should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No valid log files found."));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn report_rejects_unknown_flags() {
    let output = Command::new(bin())
        .args(["report", "--frobnicate"])
        .output()
        .expect("report should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn check_command_passes_clean_logs() {
    let dir = unique_temp_dir("check-ok");
    let path = dir.join("heat_0.log");
    fs::write(&path, MATCH_LOG).expect("write log");

    let output = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref()])
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok (2 craft"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn check_command_flags_malformed_lines() {
    let dir = unique_temp_dir("check-bad");
    let path = dir.join("heat_0.log");
    fs::write(&path, "[ArenaCompetition:9]: DEAD:oops\n").expect("write log");

    let output = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref()])
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1"));
    assert!(stderr.contains("check failed: 1 issue(s)"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn check_command_requires_a_path() {
    let output = Command::new(bin()).arg("check").output().expect("check should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: debrief check"));
}
