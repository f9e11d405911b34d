//! Artifact writers for a scanned tournament: `results.json`,
//! `summary.json`, `summary.csv`, and the fixed-width console tables.

pub mod csv;
pub mod json;
pub mod table;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::summary::TournamentSummary;
use crate::tournament::TournamentData;

#[derive(Debug)]
pub enum ReportError {
    Serialize(serde_json::Error),
    Csv(::csv::Error),
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize report: {err}"),
            Self::Csv(err) => write!(f, "failed to build summary.csv: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

impl From<::csv::Error> for ReportError {
    fn from(err: ::csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Write the persisted artifacts into `dir` and return their paths. The CSV
/// is only produced when at least one craft was seen.
pub fn write_artifacts(
    dir: &Path,
    data: &TournamentData,
    summary: &TournamentSummary,
) -> Result<Vec<PathBuf>, ReportError> {
    let mut written = vec![
        json::write_results(dir, data)?,
        json::write_summary(dir, summary)?,
    ];
    if !summary.craft.is_empty() {
        written.push(csv::write_summary_csv(dir, summary)?);
    }
    for path in &written {
        info!("wrote {}", path.display());
    }
    Ok(written)
}
