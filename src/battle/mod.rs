pub mod parser;
pub mod record;

pub use parser::{
    apply_event, parse_line, parse_match, parse_match_lenient, LogEvent, ParseError,
    COMPETITION_MARKER,
};
pub use record::{
    calculate_accuracy, CraftOutcome, CraftState, LethalCause, MatchRecord, MatchResult,
};
