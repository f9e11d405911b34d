//! Tagged-line grammar for competition match logs.
//!
//! Each relevant line carries the competition marker; everything after the
//! first space is the field. The field's text up to the first `:` selects the
//! tag, remaining colon-delimited segments are tag-specific arguments. Lines
//! without the marker or with an unknown tag are ignored so newer log
//! variants (e.g. tag-mode scores) pass through harmlessly.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::battle::record::{
    calculate_accuracy, CraftState, LethalCause, MatchRecord, MatchResult,
};

/// Marker substring identifying competition log lines.
pub const COMPETITION_MARKER: &str = "ArenaCompetition";

/// Field prefix of the line carrying the match duration.
const DURATION_PREFIX: &str = "Dumping Results";

/// One recognized event decoded from a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Duration(f64),
    Alive(String),
    Mia(String),
    Dead { craft: String, order: u32, time: f64 },
    HitsBy { craft: String, by: BTreeMap<String, u32> },
    BulletDamageBy { craft: String, by: BTreeMap<String, f64> },
    MissileHitsBy { craft: String, by: BTreeMap<String, u32> },
    MissileDamageBy { craft: String, by: BTreeMap<String, f64> },
    RammedPartsLostBy { craft: String, by: BTreeMap<String, u32> },
    LethalCause { craft: String, cause: LethalCause },
    Accuracy { craft: String, hits: u32, shots: u32 },
    Result(MatchResult),
}

/// A malformed tagged line: the tag was recognized but its arguments did not
/// decode. Carries enough context to locate the bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number within the log.
    pub line_no: usize,
    /// The offending line, trimmed.
    pub line: String,
    pub detail: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line_no, self.detail, self.line)
    }
}

impl std::error::Error for ParseError {}

/// Parse one match log leniently: malformed tagged lines are skipped and
/// returned as diagnostics alongside the best-effort record.
pub fn parse_match_lenient<I, S>(lines: I) -> (MatchRecord, Vec<ParseError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut record = MatchRecord::default();
    let mut diagnostics = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        match parse_line(line) {
            Ok(Some(event)) => apply_event(&mut record, event),
            Ok(None) => {}
            Err(detail) => diagnostics.push(ParseError {
                line_no: idx + 1,
                line: line.to_string(),
                detail,
            }),
        }
    }
    (record, diagnostics)
}

/// Parse one match log strictly, failing on the first malformed tagged line.
pub fn parse_match<I, S>(lines: I) -> Result<MatchRecord, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (record, mut diagnostics) = parse_match_lenient(lines);
    if diagnostics.is_empty() {
        Ok(record)
    } else {
        Err(diagnostics.remove(0))
    }
}

/// Decode a single line. `Ok(None)` means the line is not a recognized
/// competition event; `Err` means the tag matched but its arguments did not.
pub fn parse_line(line: &str) -> Result<Option<LogEvent>, String> {
    let line = line.trim();
    if !line.contains(COMPETITION_MARKER) {
        return Ok(None);
    }
    let Some((_, field)) = line.split_once(' ') else {
        return Err("missing field after marker token".to_string());
    };
    if field.starts_with(DURATION_PREFIX) {
        return parse_duration(field).map(|d| Some(LogEvent::Duration(d)));
    }
    let Some((tag, args)) = field.split_once(':') else {
        return Ok(None);
    };
    match tag {
        "ALIVE" => Ok(Some(LogEvent::Alive(args.to_string()))),
        "MIA" => Ok(Some(LogEvent::Mia(args.to_string()))),
        "DEAD" => parse_dead(args).map(Some),
        "WHOSHOTWHO" => {
            parse_attribution(args).map(|(craft, by)| Some(LogEvent::HitsBy { craft, by }))
        }
        "WHODAMAGEDWHOWITHBULLETS" => parse_attribution(args)
            .map(|(craft, by)| Some(LogEvent::BulletDamageBy { craft, by })),
        "WHOSHOTWHOWITHMISSILES" => parse_attribution(args)
            .map(|(craft, by)| Some(LogEvent::MissileHitsBy { craft, by })),
        "WHODAMAGEDWHOWITHMISSILES" => parse_attribution(args)
            .map(|(craft, by)| Some(LogEvent::MissileDamageBy { craft, by })),
        "WHORAMMEDWHO" => parse_attribution(args)
            .map(|(craft, by)| Some(LogEvent::RammedPartsLostBy { craft, by })),
        "CLEANKILL" => parse_kill(args, "CLEANKILL", LethalCause::CleanKill).map(Some),
        "CLEANMISSILEKILL" => {
            parse_kill(args, "CLEANMISSILEKILL", LethalCause::CleanMissileKill).map(Some)
        }
        "CLEANRAM" => parse_kill(args, "CLEANRAM", LethalCause::CleanRam).map(Some),
        "OTHERKILL" => parse_kill(args, "OTHERKILL", LethalCause::Other).map(Some),
        "ACCURACY" => parse_accuracy(args).map(Some),
        "RESULT" => parse_result(args).map(|r| Some(LogEvent::Result(r))),
        _ => Ok(None),
    }
}

/// Merge one event into the match record. Scalars are last-writer-wins,
/// attribution maps replace the previous map for the same tag.
pub fn apply_event(record: &mut MatchRecord, event: LogEvent) {
    match event {
        LogEvent::Duration(duration) => record.duration = duration,
        LogEvent::Alive(craft) => record.outcome_mut(&craft).state = CraftState::Alive,
        LogEvent::Mia(craft) => record.outcome_mut(&craft).state = CraftState::Mia,
        LogEvent::Dead { craft, order, time } => {
            let outcome = record.outcome_mut(&craft);
            outcome.state = CraftState::Dead;
            outcome.death_order = Some(order);
            outcome.death_time = Some(time);
        }
        LogEvent::HitsBy { craft, by } => record.outcome_mut(&craft).hits_by = Some(by),
        LogEvent::BulletDamageBy { craft, by } => {
            record.outcome_mut(&craft).bullet_damage_by = Some(by)
        }
        LogEvent::MissileHitsBy { craft, by } => {
            record.outcome_mut(&craft).missile_hits_by = Some(by)
        }
        LogEvent::MissileDamageBy { craft, by } => {
            record.outcome_mut(&craft).missile_damage_by = Some(by)
        }
        LogEvent::RammedPartsLostBy { craft, by } => {
            record.outcome_mut(&craft).rammed_parts_lost_by = Some(by)
        }
        LogEvent::LethalCause { craft, cause } => {
            record.outcome_mut(&craft).set_lethal_cause(cause)
        }
        LogEvent::Accuracy { craft, hits, shots } => {
            let outcome = record.outcome_mut(&craft);
            outcome.accuracy = Some(calculate_accuracy(hits, shots));
            outcome.hits = Some(hits);
            outcome.shots = Some(shots);
        }
        LogEvent::Result(result) => record.result = Some(result),
    }
}

/// The duration is embedded as `(of <seconds>s)`: 4 bytes after `(`, one
/// before `)`.
fn parse_duration(field: &str) -> Result<f64, String> {
    let open = field
        .find('(')
        .ok_or_else(|| "duration line without '('".to_string())?;
    let close = field
        .find(')')
        .ok_or_else(|| "duration line without ')'".to_string())?;
    let (start, end) = (open + 4, close.saturating_sub(1));
    if start >= end || end > field.len() {
        return Err("malformed '(of <seconds>s)' duration".to_string());
    }
    field[start..end]
        .parse::<f64>()
        .map_err(|_| format!("non-numeric duration '{}'", &field[start..end]))
}

fn parse_dead(args: &str) -> Result<LogEvent, String> {
    let mut parts = args.splitn(3, ':');
    let (Some(order), Some(time), Some(craft)) = (parts.next(), parts.next(), parts.next()) else {
        return Err("DEAD expects order:time:craft".to_string());
    };
    let order = order
        .parse::<u32>()
        .map_err(|_| format!("non-numeric death order '{order}'"))?;
    let time = time
        .parse::<f64>()
        .map_err(|_| format!("non-numeric death time '{time}'"))?;
    Ok(LogEvent::Dead {
        craft: craft.to_string(),
        order,
        time,
    })
}

/// Decode `victim:v1:attacker1:v2:attacker2:...` into the victim and an
/// attacker→value map. Values lead each pair; an unpaired tail is an error.
fn parse_attribution<T>(args: &str) -> Result<(String, BTreeMap<String, T>), String>
where
    T: FromStr,
{
    let Some((craft, list)) = args.split_once(':') else {
        return Err("attribution expects victim:value:attacker pairs".to_string());
    };
    let segments: Vec<&str> = list.split(':').collect();
    if segments.len() % 2 != 0 {
        return Err(format!(
            "unpaired attribution list ({} segments)",
            segments.len()
        ));
    }
    let mut by = BTreeMap::new();
    for pair in segments.chunks_exact(2) {
        let value = pair[0]
            .parse::<T>()
            .map_err(|_| format!("non-numeric attribution value '{}'", pair[0]))?;
        by.insert(pair[1].to_string(), value);
    }
    Ok((craft.to_string(), by))
}

fn parse_kill(
    args: &str,
    tag: &str,
    cause: impl FnOnce(String) -> LethalCause,
) -> Result<LogEvent, String> {
    let Some((craft, killer)) = args.split_once(':') else {
        return Err(format!("{tag} expects victim:killer"));
    };
    Ok(LogEvent::LethalCause {
        craft: craft.to_string(),
        cause: cause(killer.to_string()),
    })
}

fn parse_accuracy(args: &str) -> Result<LogEvent, String> {
    let Some((craft, ratio)) = args.split_once(':') else {
        return Err("ACCURACY expects craft:hits/shots".to_string());
    };
    let Some((hits, shots)) = ratio.split_once('/') else {
        return Err(format!("malformed hits/shots '{ratio}'"));
    };
    let hits = hits
        .parse::<u32>()
        .map_err(|_| format!("non-numeric hit count '{hits}'"))?;
    let shots = shots
        .parse::<u32>()
        .map_err(|_| format!("non-numeric shot count '{shots}'"))?;
    Ok(LogEvent::Accuracy {
        craft: craft.to_string(),
        hits,
        shots,
    })
}

#[derive(Deserialize)]
struct TeamRoster {
    team: String,
    members: Vec<String>,
}

/// `RESULT:<type>` with no payload is mutual annihilation; a JSON object
/// payload is a win for one team, a JSON array a draw between several.
fn parse_result(args: &str) -> Result<MatchResult, String> {
    let Some((_, payload)) = args.split_once(':') else {
        return Ok(MatchResult::MutualAnnihilation);
    };
    let value: Value =
        serde_json::from_str(payload).map_err(|err| format!("invalid RESULT payload: {err}"))?;
    match value {
        Value::Object(_) => {
            let (team, members) = roster_entry(value)?;
            Ok(MatchResult::Win {
                teams: BTreeMap::from([(team, members)]),
            })
        }
        Value::Array(entries) => {
            let mut teams = BTreeMap::new();
            for entry in entries {
                let (team, members) = roster_entry(entry)?;
                teams.insert(team, members);
            }
            Ok(MatchResult::Draw { teams })
        }
        _ => Err("RESULT payload must be a team object or a list of them".to_string()),
    }
}

fn roster_entry(value: Value) -> Result<(String, String), String> {
    let roster: TeamRoster = serde_json::from_value(value)
        .map_err(|err| format!("RESULT team entry missing team/members: {err}"))?;
    Ok((roster.team, roster.members.join(", ")))
}
