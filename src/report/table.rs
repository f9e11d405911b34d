//! Fixed-width console rendering of the tournament summary.

use crate::summary::{CraftSummary, TournamentSummary};

pub const HEADERS: [&str; 16] = [
    "Name",
    "Survive",
    "Deaths (BMRAS)",
    "D.Order",
    "D.Time",
    "Kills (BMR)",
    "Assists",
    "Hits",
    "Damage",
    "MisHits",
    "MisDmg",
    "Ram",
    "Acc%",
    "Dmg/Hit",
    "Hits/Sp",
    "Dmg/Sp",
];

/// Render the per-craft table, one craft per row in name order. Column width
/// is the longest cell plus two.
pub fn render_craft_table(summary: &TournamentSummary) -> String {
    let mut rows: Vec<[String; 16]> = vec![HEADERS.map(String::from)];
    for (name, craft) in &summary.craft {
        rows.push(craft_cells(name, craft));
    }
    let mut widths = [0usize; 16];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len() + 2);
        }
    }
    rows.iter()
        .map(|row| {
            let line: String = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the team standings block, or `None` when there are no team results
/// or the team names are per-match generated labels.
pub fn render_team_standings(summary: &TournamentSummary) -> Option<String> {
    if summary.team_results.is_empty() || summary.has_generated_team_labels() {
        return None;
    }
    let names = summary.team_results.team_names();
    let width = names.iter().map(|name| name.len()).max().unwrap_or(0);
    let mut lines = vec![format!(
        "Team{}\tWins\tDraws\tVessels",
        " ".repeat(width.saturating_sub(4))
    )];
    for name in names {
        let wins = summary.team_results.wins.get(name).copied().unwrap_or(0);
        let draws = summary.team_results.draws.get(name).copied().unwrap_or(0);
        let members = summary.teams.get(name).map(String::as_str).unwrap_or("");
        lines.push(format!(
            "{name}{}\t{wins}\t{draws}\t{members}",
            " ".repeat(width - name.len())
        ));
    }
    Some(lines.join("\n"))
}

fn craft_cells(name: &str, craft: &CraftSummary) -> [String; 16] {
    let deaths = &craft.death_count;
    let kills = &craft.clean_kills;
    [
        name.to_string(),
        craft.survived_count.to_string(),
        format!(
            "{} ({} {} {} {} {})",
            deaths.total, deaths.bullet, deaths.missile, deaths.ram, deaths.dirty, deaths.suicide
        ),
        format!("{:.3}", craft.death_order),
        format!("{:.1}", craft.death_time),
        format!("{} ({} {} {})", kills.total, kills.bullet, kills.missile, kills.ram),
        craft.assists.to_string(),
        craft.hits.to_string(),
        format!("{:.0}", craft.bullet_damage),
        craft.missile_hits.to_string(),
        format!("{:.0}", craft.missile_damage),
        craft.ram_score.to_string(),
        format!("{:.2}", craft.accuracy),
        format!("{:.1}", craft.damage_per_hit),
        format!("{:.1}", craft.hits_per_spawn),
        format!("{:.1}", craft.damage_per_spawn),
    ]
}
