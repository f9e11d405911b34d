//! Pretty-printed JSON artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::report::ReportError;
use crate::summary::TournamentSummary;
use crate::tournament::TournamentData;

pub const RESULTS_FILE: &str = "results.json";
pub const SUMMARY_FILE: &str = "summary.json";

/// Write the per-match records as `results.json`.
pub fn write_results(dir: &Path, data: &TournamentData) -> Result<PathBuf, ReportError> {
    write_pretty(dir.join(RESULTS_FILE), data)
}

/// Write the aggregated statistics as `summary.json`.
pub fn write_summary(dir: &Path, summary: &TournamentSummary) -> Result<PathBuf, ReportError> {
    write_pretty(dir.join(SUMMARY_FILE), summary)
}

fn write_pretty<T: Serialize>(path: PathBuf, value: &T) -> Result<PathBuf, ReportError> {
    let payload = serde_json::to_string_pretty(value)?;
    fs::write(&path, payload).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
