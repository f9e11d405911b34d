//! `summary.csv` writer. Tuple-valued fields expand into named columns
//! (`deathCount,dcB,dcM,dcR,dcA,dcS` and `cleanKills,ckB,ckM,ckR`); float
//! cells are truncated to two decimals.

use std::path::{Path, PathBuf};

use crate::report::ReportError;
use crate::summary::{CraftSummary, TournamentSummary};

pub const SUMMARY_CSV_FILE: &str = "summary.csv";

const HEADER: [&str; 24] = [
    "craft",
    "survivedCount",
    "deathCount",
    "dcB",
    "dcM",
    "dcR",
    "dcA",
    "dcS",
    "deathOrder",
    "deathTime",
    "cleanKills",
    "ckB",
    "ckM",
    "ckR",
    "assists",
    "hits",
    "bulletDamage",
    "missileHits",
    "missileDamage",
    "ramScore",
    "accuracy",
    "damage/hit",
    "hits/spawn",
    "damage/spawn",
];

/// Write `summary.csv` into `dir`.
pub fn write_summary_csv(dir: &Path, summary: &TournamentSummary) -> Result<PathBuf, ReportError> {
    let path = dir.join(SUMMARY_CSV_FILE);
    let mut writer = ::csv::Writer::from_path(&path)?;
    for row in summary_rows(summary) {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// All CSV rows, header first. Exposed so the layout can be tested without
/// touching the filesystem.
pub fn summary_rows(summary: &TournamentSummary) -> Vec<Vec<String>> {
    let mut rows = vec![HEADER.iter().map(|cell| cell.to_string()).collect()];
    for (name, craft) in &summary.craft {
        rows.push(craft_row(name, craft));
    }
    rows
}

fn craft_row(name: &str, craft: &CraftSummary) -> Vec<String> {
    vec![
        name.to_string(),
        craft.survived_count.to_string(),
        craft.death_count.total.to_string(),
        craft.death_count.bullet.to_string(),
        craft.death_count.missile.to_string(),
        craft.death_count.ram.to_string(),
        craft.death_count.dirty.to_string(),
        craft.death_count.suicide.to_string(),
        float_cell(craft.death_order),
        float_cell(craft.death_time),
        craft.clean_kills.total.to_string(),
        craft.clean_kills.bullet.to_string(),
        craft.clean_kills.missile.to_string(),
        craft.clean_kills.ram.to_string(),
        craft.assists.to_string(),
        craft.hits.to_string(),
        float_cell(craft.bullet_damage),
        craft.missile_hits.to_string(),
        float_cell(craft.missile_damage),
        craft.ram_score.to_string(),
        float_cell(craft.accuracy),
        float_cell(craft.damage_per_hit),
        float_cell(craft.hits_per_spawn),
        float_cell(craft.damage_per_spawn),
    ]
}

/// Truncate to two decimals, dropping the fraction entirely when whole.
fn float_cell(value: f64) -> String {
    let truncated = (value * 100.0).trunc() / 100.0;
    format!("{truncated}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_truncate_instead_of_rounding() {
        assert_eq!(float_cell(21.428_57), "21.42");
        assert_eq!(float_cell(0.999), "0.99");
        assert_eq!(float_cell(5.0), "5");
        assert_eq!(float_cell(0.0), "0");
    }
}
