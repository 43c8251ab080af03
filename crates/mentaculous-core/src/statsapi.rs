//! Records returned by the MLB stats API.
//!
//! Only the fields Mentaculous reads are modelled. Every field tolerates
//! absence: a missing number is zero, a missing string is empty or `None`.
//! Unknown fields are ignored.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

// =============================================================================
// Shared references
// =============================================================================

/// Minimal team reference (`{id, name}`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Person reference as embedded in box scores and plays.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: PlayerId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Person {
    /// Last name, falling back to the final word of the full name.
    pub fn last_name(&self) -> &str {
        if let Some(last) = self.last_name.as_deref().filter(|s| !s.is_empty()) {
            return last;
        }
        self.full_name.split_whitespace().last().unwrap_or("")
    }
}

/// Fielding position.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

// =============================================================================
// Schedule
// =============================================================================

/// `GET /schedule?sportId=1&date=...`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

/// One scheduled game.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub game_pk: u64,
    /// First pitch as an RFC 3339 timestamp.
    #[serde(default)]
    pub game_date: String,
    /// Local calendar date of the game (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_date: Option<String>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub teams: GameTeams,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub abstract_game_state: String,
    #[serde(default)]
    pub detailed_state: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeams {
    #[serde(default)]
    pub away: GameTeam,
    #[serde(default)]
    pub home: GameTeam,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_winner: Option<bool>,
}

impl Game {
    /// Calendar date of the game, preferring the official date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.official_date
            .as_deref()
            .or_else(|| self.game_date.get(..10))
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

impl Schedule {
    /// All games across every date in the response.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.dates.iter().flat_map(|d| d.games.iter())
    }

    /// Look up a game by its primary key.
    pub fn find_game(&self, game_pk: u64) -> Option<&Game> {
        self.games().find(|g| g.game_pk == game_pk)
    }

    /// Describe the opponent of `team_id` on this schedule.
    ///
    /// `"vs X"` when the team is at home, `"@ X"` when it is away, and
    /// `"Unknown"` when the team has no game here.
    pub fn opponent_for(&self, team_id: u32) -> String {
        for game in self.games() {
            if game.teams.home.team.id == team_id {
                return format!("vs {}", game.teams.away.team.name);
            }
            if game.teams.away.team.id == team_id {
                return format!("@ {}", game.teams.home.team.name);
            }
        }
        UNKNOWN_OPPONENT.to_string()
    }
}

/// Opponent label used when no matching game exists.
pub const UNKNOWN_OPPONENT: &str = "Unknown";

// =============================================================================
// Box score
// =============================================================================

/// `GET /game/{pk}/boxscore`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScore {
    #[serde(default)]
    pub teams: BoxTeams,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxTeams {
    #[serde(default)]
    pub away: BoxTeam,
    #[serde(default)]
    pub home: BoxTeam,
}

impl BoxTeams {
    /// Every player on both rosters, away first.
    pub fn players(&self) -> impl Iterator<Item = &BoxPlayer> {
        self.away.players.values().chain(self.home.players.values())
    }
}

/// One side of a box score. `players` is keyed by roster slot (`"ID660271"`).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxTeam {
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default)]
    pub team_stats: StatLines,
    #[serde(default)]
    pub players: BTreeMap<String, BoxPlayer>,
}

/// A player's record inside a box score.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlayer {
    #[serde(default)]
    pub person: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub position: Position,
    /// Lineup slot such as `"100"` (leadoff starter) or `"101"` (first sub).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batting_order: Option<String>,
    /// In-game stats.
    #[serde(default)]
    pub stats: StatLines,
    /// Season-to-date aggregate, including this game.
    #[serde(default)]
    pub season_stats: StatLines,
}

/// Batting and pitching lines grouped together.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLines {
    #[serde(default)]
    pub batting: BattingStats,
    #[serde(default)]
    pub pitching: PitchingStats,
}

/// Hitting counters. Used for game lines, team totals and stat splits alike.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub plate_appearances: u32,
    #[serde(default)]
    pub at_bats: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub doubles: u32,
    #[serde(default)]
    pub triples: u32,
    #[serde(default)]
    pub home_runs: u32,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub base_on_balls: u32,
    #[serde(default)]
    pub strike_outs: u32,
    #[serde(default)]
    pub left_on_base: u32,
    #[serde(default)]
    pub total_bases: u32,
    #[serde(default)]
    pub rbi_with_two_outs: u32,
    #[serde(default)]
    pub left_on_base_in_scoring_position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runners_scoring_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ops: Option<String>,
}

/// Pitching counters.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub earned_runs: u32,
    #[serde(default)]
    pub base_on_balls: u32,
    #[serde(default)]
    pub strike_outs: u32,
    #[serde(default)]
    pub home_runs: u32,
    #[serde(default)]
    pub pitches_thrown: u32,
    #[serde(default)]
    pub strikes: u32,
    #[serde(default)]
    pub wild_pitches: u32,
    #[serde(default)]
    pub balks: u32,
    #[serde(default)]
    pub hit_batsmen: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
}

// =============================================================================
// Play-by-play
// =============================================================================

/// `GET /game/{pk}/playByPlay`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlay {
    #[serde(default)]
    pub all_plays: Vec<Play>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    #[serde(default)]
    pub result: PlayResult,
    #[serde(default)]
    pub about: PlayAbout,
    #[serde(default)]
    pub matchup: Matchup,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAbout {
    #[serde(default)]
    pub at_bat_index: u32,
    #[serde(default)]
    pub inning: u32,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batter: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitcher: Option<Person>,
}

// =============================================================================
// People & stats
// =============================================================================

/// `GET /people/{id}`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<PersonDetail>,
}

/// Biographical record.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    #[serde(default)]
    pub id: PlayerId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mlb_debut_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_team: Option<TeamRef>,
}

/// `GET /people/{id}/stats?stats=...&group=...`
///
/// Generic over the stat payload so callers pick the shape of the group they
/// requested (`BattingStats` for hitting).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse<S> {
    #[serde(default = "Vec::new")]
    pub stats: Vec<StatBlock<S>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock<S> {
    #[serde(default = "Vec::new")]
    pub splits: Vec<StatSplit<S>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSplit<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
    pub stat: S,
}

impl<S> StatsResponse<S> {
    /// Splits of the first stat block, or nothing.
    pub fn splits(&self) -> &[StatSplit<S>] {
        self.stats.first().map(|b| b.splits.as_slice()).unwrap_or(&[])
    }

    /// The first split's stat line (`stats[0].splits[0].stat`).
    pub fn first_stat(&self) -> Option<&S> {
        self.splits().first().map(|s| &s.stat)
    }

    /// Consume the response and keep only the splits.
    pub fn into_splits(self) -> Vec<StatSplit<S>> {
        self.stats
            .into_iter()
            .next()
            .map(|b| b.splits)
            .unwrap_or_default()
    }
}

impl<S: DeserializeOwned> StatsResponse<S> {
    /// Parse a raw response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}
