//! Directory scanning and the assembled tournament dataset.
//!
//! A tournament is a directory of round subdirectories, each holding `*.log`
//! match files; a single directory can also be treated as one round. Matches
//! parse independently, so each round's files fan out across the rayon pool
//! and merge into the sorted map before any aggregation happens.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::battle::{parse_match_lenient, MatchRecord};

/// All parsed matches of a tournament, keyed by round name then match file
/// name. Serializes as the nested object persisted in `results.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentData {
    pub rounds: BTreeMap<String, BTreeMap<String, MatchRecord>>,
}

impl TournamentData {
    /// All match records in round order, then match order within the round.
    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.rounds.values().flat_map(|round| round.values())
    }

    pub fn match_count(&self) -> usize {
        self.rounds.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}

/// A tournament scan that could not start. Failures on individual rounds or
/// match files are logged and skipped instead.
#[derive(Debug)]
pub enum ScanError {
    NotADirectory(PathBuf),
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory(path) => write!(f, "not a directory: {}", path.display()),
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotADirectory(_) => None,
            Self::Read { source, .. } => Some(source),
        }
    }
}

/// Scan a tournament directory: every subdirectory is a round.
pub fn scan_tournament(dir: &Path) -> Result<TournamentData, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|source| ScanError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut rounds = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            rounds.insert(dir_name(&path), parse_round(&path));
        }
    }
    Ok(TournamentData { rounds })
}

/// Treat `dir` itself as the single round of a tournament.
pub fn scan_single_round(dir: &Path) -> Result<TournamentData, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }
    let rounds = BTreeMap::from([(dir_name(dir), parse_round(dir))]);
    Ok(TournamentData { rounds })
}

/// Parse every `*.log` file of one round. Unreadable files are logged and
/// skipped; they never abort the scan.
fn parse_round(dir: &Path) -> BTreeMap<String, MatchRecord> {
    let paths = match match_log_paths(dir) {
        Ok(paths) => paths,
        Err(err) => {
            warn!("skipping round {}: {err}", dir.display());
            return BTreeMap::new();
        }
    };
    paths
        .par_iter()
        .filter_map(|path| parse_match_file(path))
        .collect()
}

/// Parse one match log file, logging per-line diagnostics with file context.
/// Returns `None` when the file cannot be read.
pub fn parse_match_file(path: &Path) -> Option<(String, MatchRecord)> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("skipping {}: {err}", path.display());
            return None;
        }
    };
    let (record, diagnostics) = parse_match_lenient(raw.lines());
    for diagnostic in &diagnostics {
        warn!("{}: {diagnostic}", path.display());
    }
    debug!(
        "parsed {} ({} craft, {} bad line(s))",
        path.display(),
        record.craft.len(),
        diagnostics.len()
    );
    Some((name, record))
}

fn match_log_paths(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_log = path.extension().map_or(false, |ext| ext == "log");
        if path.is_file() && is_log {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
