//! Home-run events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::statsapi::UNKNOWN_OPPONENT;

/// Build the composite key `{playerId}_{isoDate}_{seasonHRNumber}`.
pub fn hr_id(player: PlayerId, date: NaiveDate, season_hr_number: u32) -> String {
    format!("{}_{}_{}", player, date.format("%Y-%m-%d"), season_hr_number)
}

/// One specific home run hit by one player on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeRunEvent {
    /// Idempotence key, see [`hr_id`].
    pub hr_id: String,
    /// Game date.
    pub date: NaiveDate,
    /// Season count through and including this home run.
    #[serde(rename = "seasonHRNumber")]
    pub season_hr_number: u32,
    /// Career count through and including this home run, when known.
    #[serde(
        rename = "careerHRNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub career_hr_number: Option<u32>,
    /// `"vs X"`, `"@ X"` or `"Unknown"`.
    #[serde(default = "unknown_opponent")]
    pub opponent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_pk: Option<u64>,
}

fn unknown_opponent() -> String {
    UNKNOWN_OPPONENT.to_string()
}

impl HomeRunEvent {
    /// Create an event with an unresolved opponent.
    pub fn new(
        player: PlayerId,
        date: NaiveDate,
        season_hr_number: u32,
        career_hr_number: Option<u32>,
    ) -> Self {
        Self {
            hr_id: hr_id(player, date, season_hr_number),
            date,
            season_hr_number,
            career_hr_number,
            opponent: unknown_opponent(),
            game_pk: None,
        }
    }

    /// Attach the resolved opponent label.
    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = opponent.into();
        self
    }

    /// Attach the game the homer was hit in.
    pub fn with_game(mut self, game_pk: u64) -> Self {
        self.game_pk = Some(game_pk);
        self
    }

    /// Career number for display, `"-"` when the lookup failed.
    pub fn career_label(&self) -> String {
        self.career_hr_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
    }

    #[test]
    fn test_hr_id_format() {
        assert_eq!(hr_id(PlayerId(42), date(), 10), "42_2024-04-15_10");
    }

    #[test]
    fn test_event_serialized_field_names() {
        let event = HomeRunEvent::new(PlayerId(42), date(), 10, Some(300)).with_opponent("@ Boston Red Sox");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["hrId"], "42_2024-04-15_10");
        assert_eq!(json["seasonHRNumber"], 10);
        assert_eq!(json["careerHRNumber"], 300);
        assert_eq!(json["date"], "2024-04-15");
        assert!(json.get("gamePk").is_none());
    }

    #[test]
    fn test_event_defaults_opponent_on_read() {
        let event: HomeRunEvent = serde_json::from_str(
            r#"{"hrId": "42_2024-04-15_10", "date": "2024-04-15", "seasonHRNumber": 10}"#,
        )
        .unwrap();
        assert_eq!(event.opponent, "Unknown");
        assert_eq!(event.career_label(), "-");
    }
}
