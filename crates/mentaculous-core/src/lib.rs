//! Core domain types shared across the Mentaculous workspace.
//!
//! - [`statsapi`]: records returned by the MLB stats API
//! - [`enrich`]: box score enrichment (home-run progress, season rates, batting lines)
//! - [`ledger`]: the personal home-run ledger and its commands
//! - [`teams`]: team abbreviations and logos

pub mod enrich;
pub mod hr;
pub mod ledger;
pub mod player;
pub mod statsapi;
pub mod teams;

pub use enrich::{
    enrich, home_run_progress, lookup_plan, EnrichedBoxScore, EnrichedPlayer, EnrichedTeam,
    HomerLine, LookupPlan, NamedCount, PlayerLookups, SeasonRates, Side, SupplementalLines,
};
pub use hr::{hr_id, HomeRunEvent};
pub use ledger::{
    Direction, Ledger, LedgerCommand, LedgerEntry, LoggedPlayer, Mutation, Page,
    DEFAULT_PAGE_SIZE,
};
pub use player::PlayerId;
pub use statsapi::{
    BattingStats, BoxPlayer, BoxScore, BoxTeam, Game, PeopleResponse, PersonDetail, PlayByPlay,
    Schedule, StatSplit, StatsResponse, TeamRef, UNKNOWN_OPPONENT,
};
