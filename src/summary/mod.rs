pub mod tally;

pub use tally::{
    summarize, CleanKills, CraftSummary, DeathCount, TeamResults, TournamentSummary,
};
