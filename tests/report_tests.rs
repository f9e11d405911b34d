//! Tests for the CSV layout and console table rendering.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use debrief::battle::parse_match;
use debrief::report::csv::summary_rows;
use debrief::report::table::{render_craft_table, render_team_standings, HEADERS};
use debrief::summary::{summarize, TournamentSummary};
use debrief::tournament::{scan_tournament, TournamentData};

fn fixture_summary() -> TournamentSummary {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tournament");
    summarize(&scan_tournament(&dir).expect("scan fixture tournament"))
}

#[test]
fn csv_header_expands_tuple_fields_into_named_columns() {
    let rows = summary_rows(&fixture_summary());
    let header = &rows[0];
    assert_eq!(header.len(), 24);
    assert_eq!(header[0], "craft");
    let death_columns = ["deathCount", "dcB", "dcM", "dcR", "dcA", "dcS"];
    assert_eq!(&header[2..8], &death_columns);
    let kill_columns = ["cleanKills", "ckB", "ckM", "ckR"];
    assert_eq!(&header[10..14], &kill_columns);
    assert_eq!(header[23], "damage/spawn");
}

#[test]
fn csv_rows_carry_truncated_values_in_name_order() {
    let rows = summary_rows(&fixture_summary());
    assert_eq!(rows.len(), 3, "header plus one row per craft");
    let falcon = &rows[1];
    assert_eq!(falcon[0], "Falcon");
    assert_eq!(falcon[1], "2", "survivedCount");
    assert_eq!(&falcon[2..8], &["1", "0", "0", "0", "0", "1"]);
    assert_eq!(falcon[16], "480.5", "bulletDamage");
    assert_eq!(falcon[20], "21.42", "accuracy truncated, not rounded");
    let kestrel = &rows[2];
    assert_eq!(kestrel[0], "Kestrel");
    assert_eq!(&kestrel[2..8], &["2", "1", "0", "0", "1", "0"]);
}

#[test]
fn table_lines_share_the_column_grid() {
    let summary = fixture_summary();
    let table = render_craft_table(&summary);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Name"));
    assert!(lines[0].contains("Deaths (BMRAS)"));
    assert!(lines[0].contains("Dmg/Sp"));
    assert!(lines[1].starts_with("Falcon"));
    assert!(lines[2].starts_with("Kestrel"));
    // Every craft column starts where the header says it does.
    let survive_column = lines[0].find("Survive").expect("header column");
    assert_eq!(&lines[1][survive_column..survive_column + 1], "2");
    assert_eq!(&lines[2][survive_column..survive_column + 1], "1");
}

#[test]
fn team_standings_render_with_wins_draws_and_rosters() {
    let standings = render_team_standings(&fixture_summary()).expect("named teams render");
    let lines: Vec<&str> = standings.lines().collect();
    assert!(lines[0].starts_with("Team"));
    assert!(lines[0].ends_with("Wins\tDraws\tVessels"));
    assert!(lines.contains(&"Harriers\t0\t1\tKestrel"));
    assert!(lines.contains(&"Raptors \t1\t1\tFalcon"));
}

#[test]
fn generated_team_labels_suppress_the_standings_block() {
    let lines = [
        "[ArenaCompetition:1]: ALIVE:Falcon",
        "[ArenaCompetition:1]: DEAD:0:9.0:Kestrel",
        r#"[ArenaCompetition:1]: RESULT:Win:{"team":"A","members":["Falcon"]}"#,
    ];
    let record = parse_match(lines.iter()).expect("parse");
    let data = TournamentData {
        rounds: BTreeMap::from([(
            "Round 0".to_string(),
            BTreeMap::from([("heat_0.log".to_string(), record)]),
        )]),
    };
    let summary = summarize(&data);
    assert!(summary.has_generated_team_labels());
    assert_eq!(render_team_standings(&summary), None);
    assert_eq!(summary.team_results.wins.get("A"), Some(&1), "json still carries the tally");
}

#[test]
fn headers_match_the_console_layout() {
    assert_eq!(HEADERS.len(), 16);
    assert_eq!(HEADERS[0], "Name");
    assert_eq!(HEADERS[15], "Dmg/Sp");
}
