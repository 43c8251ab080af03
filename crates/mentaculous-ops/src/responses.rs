//! Response DTOs for operations.

use chrono::NaiveDate;
use mentaculous_core::{
    BattingStats, EnrichedBoxScore, Game, HomeRunEvent, LedgerEntry, Mutation, PersonDetail,
    PlayerId, TeamRef,
};
use serde::Serialize;

/// Games on a date.
#[derive(Debug, Clone, Serialize)]
pub struct GamesResponse {
    pub date: NaiveDate,
    pub games: Vec<Game>,
}

/// An enriched box score plus ledger state for its homers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScoreResponse {
    pub game_pk: u64,
    pub box_score: EnrichedBoxScore,
    /// hrIds from this game that are already in the ledger.
    pub logged: Vec<String>,
}

impl BoxScoreResponse {
    pub fn is_logged(&self, hr_id: &str) -> bool {
        self.logged.iter().any(|id| id == hr_id)
    }
}

/// One year-by-year row.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonRow {
    pub season: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
    pub stat: BattingStats,
}

/// Bio plus hitting history.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub bio: PersonDetail,
    /// Career hitting line; absent when the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career: Option<BattingStats>,
    /// Seasons actually played, oldest first.
    pub seasons: Vec<SeasonRow>,
}

/// Result of logging home runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHomeRunResponse {
    pub player_id: PlayerId,
    pub player_name: String,
    pub added: Vec<HomeRunEvent>,
    pub already_logged: Vec<HomeRunEvent>,
    /// The player's entry after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<LedgerEntry>,
}

/// Result of deleting a logged home run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveHomeRunResponse {
    pub mutation: Mutation,
    /// The remaining entry, absent when the player left the ledger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<LedgerEntry>,
}

/// Result of a reorder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEntryResponse {
    pub mutation: Mutation,
    /// Zero-based position after the move.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub order: Vec<PlayerId>,
}

/// A page of the ledger in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPageResponse {
    pub index: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_players: usize,
    pub entries: Vec<LedgerEntry>,
}

/// Result of a backup push.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResponse {
    pub user_id: String,
    pub players: usize,
    pub bytes: usize,
}
