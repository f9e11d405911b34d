//! Tests for directory layouts and scan fault tolerance.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use debrief::tournament::{scan_single_round, scan_tournament, ScanError};

fn fixture_tournament() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tournament")
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

#[test]
fn single_round_layout_treats_the_directory_as_one_round() {
    let round_dir = fixture_tournament().join("Round 0");
    let data = scan_single_round(&round_dir).expect("scan single round");
    assert_eq!(data.rounds.len(), 1);
    let round = &data.rounds["Round 0"];
    assert_eq!(round.len(), 2);
    assert!(round.contains_key("heat_0.log"));
    assert!(round.contains_key("heat_1.log"));
}

#[test]
fn missing_directory_is_a_scan_error() {
    let missing = fixture_tournament().join("no-such-round");
    let err = scan_tournament(&missing).expect_err("missing dir should fail");
    assert!(matches!(err, ScanError::NotADirectory(_)));
    assert!(err.to_string().contains("no-such-round"));
}

#[test]
fn non_log_files_are_ignored() {
    let dir = unique_temp_dir("mixed-round");
    fs::write(
        dir.join("heat_0.log"),
        "[ArenaCompetition:1]: ALIVE:Falcon\n",
    )
    .expect("write log");
    fs::write(dir.join("notes.txt"), "operator notes, not a log\n").expect("write notes");
    let data = scan_single_round(&dir).expect("scan");
    let round = data.rounds.values().next().expect("one round");
    assert_eq!(round.len(), 1);
    assert!(round.contains_key("heat_0.log"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unparseable_lines_do_not_drop_the_match() {
    let dir = unique_temp_dir("damaged-round");
    fs::write(
        dir.join("heat_0.log"),
        concat!(
            "[ArenaCompetition:1]: ALIVE:Falcon\n",
            "[ArenaCompetition:1]: DEAD:broken\n",
            "[ArenaCompetition:1]: ACCURACY:Falcon:4/8\n",
        ),
    )
    .expect("write log");
    let data = scan_single_round(&dir).expect("scan");
    let round = data.rounds.values().next().expect("one round");
    let record = &round["heat_0.log"];
    assert_eq!(record.craft["Falcon"].hits, Some(4), "good lines still apply");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn empty_tournament_directory_scans_to_empty_data() {
    let dir = unique_temp_dir("empty-tournament");
    let data = scan_tournament(&dir).expect("scan");
    assert!(data.is_empty());
    assert_eq!(data.rounds.len(), 0);
    let _ = fs::remove_dir_all(dir);
}
