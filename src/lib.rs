/// Match log parsing: the tagged-line grammar and per-match records.
pub mod battle;
/// Command-line dispatch for the `debrief` binary.
pub mod cli;
/// Artifact writers: JSON results and summary, the CSV summary, console tables.
pub mod report;
/// Tournament-wide aggregation into per-craft and per-team statistics.
pub mod summary;
/// Directory scanning and the assembled tournament dataset.
pub mod tournament;
