//! Command-line dispatch for the `debrief` binary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::battle::parse_match_lenient;
use crate::report::{self, table};
use crate::summary::summarize;
use crate::tournament::{scan_single_round, scan_tournament};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Report,
    Check,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("report") => Some(Command::Report),
        Some("check") => Some(Command::Check),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Report) => handle_report(args),
        Some(Command::Check) => handle_check(args),
        None => {
            eprintln!("usage: debrief <report|check>");
            2
        }
    }
}

const REPORT_USAGE: &str = "usage: debrief report [tournament-dir] [--quiet] [--no-files]";

/// Parse a tournament and emit artifacts plus the console tables. With a
/// directory argument its subdirectories are the rounds; without one the
/// current directory is treated as a single round.
fn handle_report(args: &[String]) -> i32 {
    let mut quiet = false;
    let mut no_files = false;
    let mut dir: Option<PathBuf> = None;
    for arg in &args[2..] {
        match arg.as_str() {
            "-q" | "--quiet" => quiet = true,
            "-n" | "--no-files" => no_files = true,
            flag if flag.starts_with('-') => {
                eprintln!("unknown flag '{flag}'");
                eprintln!("{REPORT_USAGE}");
                return 2;
            }
            path => {
                if dir.is_some() {
                    eprintln!("{REPORT_USAGE}");
                    return 2;
                }
                dir = Some(PathBuf::from(path));
            }
        }
    }

    let scan = match &dir {
        Some(dir) => scan_tournament(dir),
        None => scan_single_round(Path::new(".")),
    };
    let data = match scan {
        Ok(data) => data,
        Err(err) => {
            eprintln!("scan failed: {err}");
            return 1;
        }
    };
    let summary = summarize(&data);

    if !no_files {
        let out_dir = dir.unwrap_or_else(|| PathBuf::from("."));
        if let Err(err) = report::write_artifacts(&out_dir, &data, &summary) {
            eprintln!("{err}");
            return 1;
        }
    }

    if summary.craft.is_empty() {
        println!("No valid log files found.");
        return 0;
    }
    if !quiet {
        println!("{}", table::render_craft_table(&summary));
        if let Some(standings) = table::render_team_standings(&summary) {
            println!("\n{standings}");
        }
    }
    0
}

/// Parse each log file leniently and print its diagnostics. Exit 1 when any
/// file could not be read or produced diagnostics.
fn handle_check(args: &[String]) -> i32 {
    let files = &args[2..];
    if files.is_empty() {
        eprintln!("usage: debrief check <log-file>...");
        return 2;
    }
    let mut issues = 0usize;
    for file in files {
        let raw = match fs::read_to_string(file) {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("{file}: {err}");
                issues += 1;
                continue;
            }
        };
        let (record, diagnostics) = parse_match_lenient(raw.lines());
        if diagnostics.is_empty() {
            let result_note = if record.result.is_some() { "" } else { ", no result line" };
            println!("{file}: ok ({} craft{result_note})", record.craft.len());
        } else {
            for diagnostic in &diagnostics {
                eprintln!("{file}: {diagnostic}");
            }
            issues += diagnostics.len();
        }
    }
    if issues > 0 {
        eprintln!("check failed: {issues} issue(s)");
        1
    } else {
        0
    }
}
