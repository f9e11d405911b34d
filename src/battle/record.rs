//! Per-match records rebuilt from competition log lines.
//!
//! Field names follow the persisted `results.json` artifact, so a
//! [TournamentData](crate::tournament::TournamentData) round-trips through
//! JSON without loss.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Terminal state of a craft in one match. Logs emit exactly one state line
/// per craft; if several arrive, the last writer wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CraftState {
    Alive,
    Dead,
    /// Neither confirmed alive nor confirmed dead. Also the placeholder for a
    /// craft first seen through a non-state event.
    #[default]
    Mia,
}

/// Everything the log recorded about one craft in one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftOutcome {
    pub state: CraftState,
    /// Rank among the deaths of the match (0-based).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_order: Option<u32>,
    /// Seconds into the match at which the craft died.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits_by: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_damage_by: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missile_hits_by: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missile_damage_by: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rammed_parts_lost_by: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_kill_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_missile_kill_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_ram_kill_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_kill_reason: Option<String>,
    /// Own weapon performance, independent of being a victim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
}

/// The lethal cause of a death. At most one is recorded per craft; setting a
/// new one clears the previous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LethalCause {
    CleanKill(String),
    CleanMissileKill(String),
    CleanRam(String),
    Other(String),
}

impl CraftOutcome {
    /// Whether any hit-type attribution map was recorded (damage-only maps do
    /// not count towards death classification or assists).
    pub fn has_hit_attribution(&self) -> bool {
        self.hits_by.is_some() || self.missile_hits_by.is_some() || self.rammed_parts_lost_by.is_some()
    }

    /// Whether a single killer was credited with this death.
    pub fn has_clean_kill(&self) -> bool {
        self.clean_kill_by.is_some()
            || self.clean_missile_kill_by.is_some()
            || self.clean_ram_kill_by.is_some()
    }

    /// True if `name` is the clean-kill credited killer of this craft.
    pub fn is_credited_killer(&self, name: &str) -> bool {
        self.clean_kill_by.as_deref() == Some(name)
            || self.clean_missile_kill_by.as_deref() == Some(name)
            || self.clean_ram_kill_by.as_deref() == Some(name)
    }

    /// Union of all attackers recorded in the hit-type attribution maps.
    pub fn hit_attackers(&self) -> BTreeSet<&str> {
        let mut attackers = BTreeSet::new();
        if let Some(by) = &self.hits_by {
            attackers.extend(by.keys().map(String::as_str));
        }
        if let Some(by) = &self.missile_hits_by {
            attackers.extend(by.keys().map(String::as_str));
        }
        if let Some(by) = &self.rammed_parts_lost_by {
            attackers.extend(by.keys().map(String::as_str));
        }
        attackers
    }

    /// Record the lethal cause, clearing whichever one was set before.
    pub fn set_lethal_cause(&mut self, cause: LethalCause) {
        self.clean_kill_by = None;
        self.clean_missile_kill_by = None;
        self.clean_ram_kill_by = None;
        self.other_kill_reason = None;
        match cause {
            LethalCause::CleanKill(killer) => self.clean_kill_by = Some(killer),
            LethalCause::CleanMissileKill(killer) => self.clean_missile_kill_by = Some(killer),
            LethalCause::CleanRam(killer) => self.clean_ram_kill_by = Some(killer),
            LethalCause::Other(reason) => self.other_kill_reason = Some(reason),
        }
    }
}

/// How a match ended. The JSON tag matches the log's RESULT type strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum MatchResult {
    /// A single team had the only survivors. `teams` maps the winning team to
    /// its comma-joined member list (display convenience).
    Win { teams: BTreeMap<String, String> },
    /// Several teams still had survivors when time ran out.
    Draw { teams: BTreeMap<String, String> },
    /// Nobody survived.
    #[serde(rename = "Mutual Annihilation")]
    MutualAnnihilation,
}

/// One fully parsed match log. Immutable once parsing completes.
///
/// `result` is `None` when the log had no RESULT line (truncated log); such a
/// match still contributes craft statistics but no win/draw tallies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub result: Option<MatchResult>,
    pub duration: f64,
    pub craft: BTreeMap<String, CraftOutcome>,
}

impl MatchRecord {
    /// Outcome entry for `craft`, created with default state MIA on first
    /// reference so event order never matters.
    pub fn outcome_mut(&mut self, craft: &str) -> &mut CraftOutcome {
        self.craft.entry(craft.to_string()).or_default()
    }
}

/// Percentage accuracy from hit and shot counts; 0 when no shots were fired.
pub fn calculate_accuracy(hits: u32, shots: u32) -> f64 {
    if shots > 0 {
        100.0 * f64::from(hits) / f64::from(shots)
    } else {
        0.0
    }
}
