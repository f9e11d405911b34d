//! Tournament-wide aggregation into per-craft and per-team statistics.
//!
//! Two explicit passes: the first scans every match once, accumulating raw
//! counts and sums per craft (and the team standings); the second derives the
//! ratios that need the finished totals. Rerunning [summarize] on the same
//! data always produces the same summary.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::battle::{calculate_accuracy, CraftOutcome, CraftState, MatchRecord, MatchResult};
use crate::tournament::TournamentData;

/// Death breakdown for one craft. The cause buckets partition `total` except
/// for a craft that died unattributed after ramming someone, which counts in
/// no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathCount {
    pub total: u32,
    pub bullet: u32,
    pub missile: u32,
    pub ram: u32,
    /// Died with attackers on record but nobody credited with the kill.
    pub dirty: u32,
    /// Died without being hit and without ramming anyone that match.
    pub suicide: u32,
}

/// Clean-kill credits for one craft, by weapon type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanKills {
    pub total: u32,
    pub bullet: u32,
    pub missile: u32,
    pub ram: u32,
}

/// Aggregated statistics for one craft across the whole tournament.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftSummary {
    pub survived_count: u32,
    pub death_count: DeathCount,
    /// Sum of death rank over participant count per match; survivors
    /// contribute a fixed penalty of 1.
    pub death_order: f64,
    /// Sum of death times; survivors contribute the full match duration.
    pub death_time: f64,
    pub clean_kills: CleanKills,
    pub assists: u32,
    pub hits: u32,
    pub bullet_damage: f64,
    pub missile_hits: u32,
    pub missile_damage: f64,
    pub ram_score: u32,
    /// Recomputed globally from summed hits and shots, never averaged.
    pub accuracy: f64,
    #[serde(rename = "damage/hit")]
    pub damage_per_hit: f64,
    #[serde(rename = "hits/spawn")]
    pub hits_per_spawn: f64,
    #[serde(rename = "damage/spawn")]
    pub damage_per_spawn: f64,
}

impl CraftSummary {
    /// Participation instances: survivals plus deaths.
    pub fn spawns(&self) -> u32 {
        self.survived_count + self.death_count.total
    }
}

/// Win and draw tallies per team name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResults {
    pub wins: BTreeMap<String, u32>,
    pub draws: BTreeMap<String, u32>,
}

impl TeamResults {
    pub fn is_empty(&self) -> bool {
        self.wins.is_empty() && self.draws.is_empty()
    }

    /// Every team name appearing in either tally, sorted.
    pub fn team_names(&self) -> BTreeSet<&str> {
        self.wins
            .keys()
            .chain(self.draws.keys())
            .map(String::as_str)
            .collect()
    }
}

/// The full aggregation output persisted as `summary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub craft: BTreeMap<String, CraftSummary>,
    #[serde(rename = "team results")]
    pub team_results: TeamResults,
    /// Team name to comma-joined member list, from the team's last match.
    pub teams: BTreeMap<String, String>,
}

impl TournamentSummary {
    /// True when every observed team name is one of the sequential labels
    /// `A`, `B`, ... sized to the craft count. Such labels are assigned
    /// independently per match and carry no identity across matches, so
    /// team-level reporting is suppressed in the console output.
    pub fn has_generated_team_labels(&self) -> bool {
        let names = self.team_results.team_names();
        if names.is_empty() {
            return false;
        }
        let labels: BTreeSet<String> = (0..self.craft.len() as u32)
            .filter_map(|offset| char::from_u32('A' as u32 + offset))
            .map(String::from)
            .collect();
        names.iter().all(|name| labels.contains(*name))
    }
}

/// Raw per-craft accumulator filled during the first pass.
#[derive(Debug, Default)]
struct Tally {
    survived: u32,
    deaths: DeathCount,
    death_order: f64,
    death_time: f64,
    clean_kills: CleanKills,
    assists: u32,
    hits: u32,
    shots: u32,
    bullet_damage: f64,
    missile_hits: u32,
    missile_damage: f64,
    ram_score: u32,
}

/// Aggregate a complete tournament. Pure: the data is only read, and the
/// craft universe is exactly the set of names appearing in match craft maps
/// (attacker names that never participated are not reported).
pub fn summarize(data: &TournamentData) -> TournamentSummary {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut participants: BTreeSet<String> = BTreeSet::new();
    let mut team_results = TeamResults::default();
    let mut teams = BTreeMap::new();

    for record in data.records() {
        tally_match(record, &mut tallies, &mut participants);
        tally_result(record.result.as_ref(), &mut team_results, &mut teams);
    }

    let craft = participants
        .into_iter()
        .map(|name| {
            let tally = tallies.remove(&name).unwrap_or_default();
            (name, finish(tally))
        })
        .collect();

    TournamentSummary {
        craft,
        team_results,
        teams,
    }
}

/// First pass over one match: victim-side tallies for each craft, plus the
/// attacker-side credits its outcome attributes to others.
fn tally_match(
    record: &MatchRecord,
    tallies: &mut BTreeMap<String, Tally>,
    participants: &mut BTreeSet<String>,
) {
    let craft_count = record.craft.len();
    for (name, outcome) in &record.craft {
        participants.insert(name.clone());
        let tally = tallies.entry(name.clone()).or_default();
        match outcome.state {
            CraftState::Alive => tally.survived += 1,
            CraftState::Dead => classify_death(record, name, outcome, tally),
            CraftState::Mia => {}
        }
        tally.death_order += match outcome.death_order {
            Some(order) => f64::from(order) / craft_count as f64,
            None => 1.0,
        };
        tally.death_time += outcome.death_time.unwrap_or(record.duration);
        tally.hits += outcome.hits.unwrap_or(0);
        tally.shots += outcome.shots.unwrap_or(0);

        credit_attackers(outcome, tallies);
    }
}

/// Bucket one death. The suicide check deliberately only excludes craft that
/// rammed someone, not bullet or missile attackers.
fn classify_death(record: &MatchRecord, name: &str, outcome: &CraftOutcome, tally: &mut Tally) {
    tally.deaths.total += 1;
    if outcome.clean_kill_by.is_some() {
        tally.deaths.bullet += 1;
    }
    if outcome.clean_missile_kill_by.is_some() {
        tally.deaths.missile += 1;
    }
    if outcome.clean_ram_kill_by.is_some() {
        tally.deaths.ram += 1;
    }
    if !outcome.has_clean_kill() {
        if outcome.has_hit_attribution() {
            tally.deaths.dirty += 1;
        } else if !rammed_anyone(record, name) {
            tally.deaths.suicide += 1;
        }
    }
}

/// Whether `name` appears as a ram attacker anywhere in this match.
fn rammed_anyone(record: &MatchRecord, name: &str) -> bool {
    record.craft.values().any(|outcome| {
        outcome
            .rammed_parts_lost_by
            .as_ref()
            .map_or(false, |by| by.contains_key(name))
    })
}

/// Credit the attackers named in one victim's outcome: dealt damage and hit
/// sums, clean-kill counts, and assists for uncredited contributors.
fn credit_attackers(outcome: &CraftOutcome, tallies: &mut BTreeMap<String, Tally>) {
    if let Some(by) = &outcome.bullet_damage_by {
        for (attacker, damage) in by {
            tallies.entry(attacker.clone()).or_default().bullet_damage += damage;
        }
    }
    if let Some(by) = &outcome.missile_hits_by {
        for (attacker, hits) in by {
            tallies.entry(attacker.clone()).or_default().missile_hits += hits;
        }
    }
    if let Some(by) = &outcome.missile_damage_by {
        for (attacker, damage) in by {
            tallies.entry(attacker.clone()).or_default().missile_damage += damage;
        }
    }
    if let Some(by) = &outcome.rammed_parts_lost_by {
        for (attacker, parts) in by {
            tallies.entry(attacker.clone()).or_default().ram_score += parts;
        }
    }

    if let Some(killer) = &outcome.clean_kill_by {
        let kills = &mut tallies.entry(killer.clone()).or_default().clean_kills;
        kills.total += 1;
        kills.bullet += 1;
    }
    if let Some(killer) = &outcome.clean_missile_kill_by {
        let kills = &mut tallies.entry(killer.clone()).or_default().clean_kills;
        kills.total += 1;
        kills.missile += 1;
    }
    if let Some(killer) = &outcome.clean_ram_kill_by {
        let kills = &mut tallies.entry(killer.clone()).or_default().clean_kills;
        kills.total += 1;
        kills.ram += 1;
    }

    if outcome.state == CraftState::Dead {
        for attacker in outcome.hit_attackers() {
            if !outcome.is_credited_killer(attacker) {
                tallies.entry(attacker.to_string()).or_default().assists += 1;
            }
        }
    }
}

fn tally_result(
    result: Option<&MatchResult>,
    team_results: &mut TeamResults,
    teams: &mut BTreeMap<String, String>,
) {
    let (tally, rosters) = match result {
        Some(MatchResult::Win { teams }) => (&mut team_results.wins, teams),
        Some(MatchResult::Draw { teams }) => (&mut team_results.draws, teams),
        Some(MatchResult::MutualAnnihilation) | None => return,
    };
    for (team, members) in rosters {
        *tally.entry(team.clone()).or_insert(0) += 1;
        teams.insert(team.clone(), members.clone());
    }
}

/// Second pass: derive the ratios that need the finished totals.
fn finish(tally: Tally) -> CraftSummary {
    let spawns = tally.survived + tally.deaths.total;
    CraftSummary {
        survived_count: tally.survived,
        death_count: tally.deaths,
        death_order: tally.death_order,
        death_time: tally.death_time,
        clean_kills: tally.clean_kills,
        assists: tally.assists,
        hits: tally.hits,
        bullet_damage: tally.bullet_damage,
        missile_hits: tally.missile_hits,
        missile_damage: tally.missile_damage,
        ram_score: tally.ram_score,
        accuracy: calculate_accuracy(tally.hits, tally.shots),
        damage_per_hit: ratio(tally.bullet_damage, tally.hits),
        hits_per_spawn: ratio(f64::from(tally.hits), spawns),
        damage_per_spawn: ratio(tally.bullet_damage, spawns),
    }
}

/// Division defaulting to 0 when the denominator is 0.
fn ratio(numerator: f64, denominator: u32) -> f64 {
    if denominator > 0 {
        numerator / f64::from(denominator)
    } else {
        0.0
    }
}
