//! Request DTOs for operations.
//!
//! Each request type encapsulates all the parameters needed for an operation,
//! making it easy to call from CLI, REST API, or programmatically.

use chrono::NaiveDate;
use mentaculous_core::{Direction, PlayerId};
use serde::{Deserialize, Serialize};

/// Request the schedule for a date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamesRequest {
    /// Calendar date; today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl GamesRequest {
    pub fn on(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }

    pub fn today() -> Self {
        Self::default()
    }
}

/// Request an enriched box score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScoreRequest {
    pub game_pk: u64,

    /// Game date used for home-run ids; looked up from the game when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Skip the play-by-play fetch (no batting lines or pitcher order).
    #[serde(default)]
    pub skip_plays: bool,
}

impl BoxScoreRequest {
    pub fn new(game_pk: u64) -> Self {
        Self {
            game_pk,
            date: None,
            skip_plays: false,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn without_plays(mut self) -> Self {
        self.skip_plays = true;
        self
    }
}

/// Request a player profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub player_id: PlayerId,
}

impl PlayerRequest {
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
        }
    }
}

/// Log a player's home runs from a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHomeRunRequest {
    pub game_pk: u64,
    pub player_id: PlayerId,

    /// Only the homer with this season number; every homer from the game when absent.
    #[serde(default)]
    pub season_hr_number: Option<u32>,

    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl AddHomeRunRequest {
    pub fn new(game_pk: u64, player_id: impl Into<PlayerId>) -> Self {
        Self {
            game_pk,
            player_id: player_id.into(),
            season_hr_number: None,
            date: None,
        }
    }

    pub fn only(mut self, season_hr_number: u32) -> Self {
        self.season_hr_number = Some(season_hr_number);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Delete one logged home run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveHomeRunRequest {
    pub player_id: PlayerId,
    pub hr_id: String,
}

impl RemoveHomeRunRequest {
    pub fn new(player_id: impl Into<PlayerId>, hr_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            hr_id: hr_id.into(),
        }
    }
}

/// Move a player one slot in the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEntryRequest {
    pub player_id: PlayerId,
    pub direction: Direction,
}

impl MoveEntryRequest {
    pub fn new(player_id: impl Into<PlayerId>, direction: Direction) -> Self {
        Self {
            player_id: player_id.into(),
            direction,
        }
    }
}

/// Request a page of the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerPageRequest {
    /// Zero-based page index; clamped to the valid range.
    #[serde(default)]
    pub page: usize,
}

impl LedgerPageRequest {
    pub fn page(page: usize) -> Self {
        Self { page }
    }
}

/// Push a backup snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequest {
    /// Overrides the configured user id.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl BackupRequest {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}
