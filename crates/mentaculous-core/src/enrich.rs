//! Box score enrichment.
//!
//! Takes a raw box score plus per-player lookups (career home-run totals and
//! season rate stats) and produces rosters annotated with home-run progress,
//! season rates, play-by-play batting lines and pitcher appearance order.
//!
//! Enrichment is pure. The lookups are keyed by player id so the result does
//! not depend on the order in which the lookups completed.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::hr::HomeRunEvent;
use crate::player::PlayerId;
use crate::statsapi::{BattingStats, BoxPlayer, BoxScore, BoxTeam, PlayByPlay, StatLines, TeamRef};

/// Shown in place of a rate stat that could not be fetched.
pub const RATE_PLACEHOLDER: &str = "-";

// =============================================================================
// Lookups
// =============================================================================

/// Season rate stats attached to every player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRates {
    pub avg: String,
    pub ops: String,
}

impl SeasonRates {
    pub fn placeholder() -> Self {
        Self {
            avg: RATE_PLACEHOLDER.to_string(),
            ops: RATE_PLACEHOLDER.to_string(),
        }
    }

    /// Take `avg` and `ops` from a season hitting line.
    pub fn from_stats(stats: &BattingStats) -> Self {
        let rate = |value: &Option<String>| {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| RATE_PLACEHOLDER.to_string())
        };
        Self {
            avg: rate(&stats.avg),
            ops: rate(&stats.ops),
        }
    }
}

impl Default for SeasonRates {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Results of the per-player lookups. Missing keys mean the lookup failed.
#[derive(Debug, Clone, Default)]
pub struct PlayerLookups {
    pub career_home_runs: HashMap<PlayerId, u32>,
    pub season_rates: HashMap<PlayerId, SeasonRates>,
}

impl PlayerLookups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_career(mut self, player: PlayerId, home_runs: u32) -> Self {
        self.career_home_runs.insert(player, home_runs);
        self
    }

    pub fn with_season(mut self, player: PlayerId, rates: SeasonRates) -> Self {
        self.season_rates.insert(player, rates);
        self
    }
}

/// Which players need which lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupPlan {
    /// Players who homered in this game.
    pub career: Vec<PlayerId>,
    /// Every rostered player.
    pub season: Vec<PlayerId>,
}

/// Work out the lookups a box score needs. Ids are deduplicated and sorted.
pub fn lookup_plan(raw: &BoxScore) -> LookupPlan {
    let mut career = BTreeSet::new();
    let mut season = BTreeSet::new();
    for player in raw.teams.players() {
        season.insert(player.person.id);
        if player.stats.batting.home_runs > 0 {
            career.insert(player.person.id);
        }
    }
    LookupPlan {
        career: career.into_iter().collect(),
        season: season.into_iter().collect(),
    }
}

// =============================================================================
// Enriched records
// =============================================================================

/// Home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "away" => Ok(Side::Away),
            "home" => Ok(Side::Home),
            other => Err(format!("unknown side: {other} (expected away or home)")),
        }
    }
}

/// A box-score player plus derived fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlayer {
    #[serde(flatten)]
    pub player: BoxPlayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_home_runs: Option<u32>,
    pub season_rates: SeasonRates,
    /// One record per homer hit in this game, earliest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub home_run_progress: Vec<HomeRunEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batting_line: Option<String>,
    /// Index of the first play this player pitched in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance_index: Option<usize>,
}

impl EnrichedPlayer {
    pub fn id(&self) -> PlayerId {
        self.player.person.id
    }

    pub fn batting(&self) -> &BattingStats {
        &self.player.stats.batting
    }

    fn lineup_slot(&self) -> Option<u32> {
        self.player
            .batting_order
            .as_deref()
            .and_then(|o| o.parse().ok())
    }

    fn is_batter(&self) -> bool {
        self.player.batting_order.is_some() || self.batting().plate_appearances > 0
    }

    fn is_pitcher(&self) -> bool {
        self.player.stats.pitching.innings_pitched.is_some()
    }
}

/// A name with a count, as in `"Devers 2"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedCount {
    pub name: String,
    pub count: u32,
}

/// One entry on the `HR` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomerLine {
    pub player_id: PlayerId,
    pub name: String,
    /// Homers hit in this game.
    pub count: u32,
    pub season_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_total: Option<u32>,
}

/// The notes printed under a team's batting table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementalLines {
    pub homers: Vec<HomerLine>,
    pub doubles: Vec<NamedCount>,
    pub total_bases: Vec<NamedCount>,
    pub rbi: Vec<NamedCount>,
    pub two_out_rbi: Vec<String>,
    /// Runners left in scoring position with two out.
    pub risp_left: Vec<String>,
    /// Team hits with runners in scoring position, `"0-0"` when absent.
    pub team_risp: String,
    pub team_lob: u32,
}

/// One side of an enriched box score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTeam {
    pub team: TeamRef,
    pub team_stats: StatLines,
    /// Keyed by roster slot.
    pub players: BTreeMap<String, EnrichedPlayer>,
}

impl EnrichedTeam {
    /// Players who came to the plate, in lineup order.
    pub fn batters(&self) -> Vec<&EnrichedPlayer> {
        let mut batters: Vec<&EnrichedPlayer> =
            self.players.values().filter(|p| p.is_batter()).collect();
        batters.sort_by_key(|p| (p.lineup_slot().unwrap_or(u32::MAX), p.id()));
        batters
    }

    /// Pitchers in order of first appearance; those never seen in the
    /// play-by-play come last.
    pub fn pitchers(&self) -> Vec<&EnrichedPlayer> {
        let mut pitchers: Vec<&EnrichedPlayer> =
            self.players.values().filter(|p| p.is_pitcher()).collect();
        pitchers.sort_by_key(|p| (p.appearance_index.unwrap_or(usize::MAX), p.id()));
        pitchers
    }

    pub fn find_player(&self, id: PlayerId) -> Option<&EnrichedPlayer> {
        self.players.values().find(|p| p.id() == id)
    }

    /// Home-run hitters with their game, season and career counts.
    pub fn homers(&self) -> Vec<HomerLine> {
        self.batters()
            .into_iter()
            .filter_map(|p| {
                let latest = p.home_run_progress.last()?;
                Some(HomerLine {
                    player_id: p.id(),
                    name: p.player.person.last_name().to_string(),
                    count: p.batting().home_runs,
                    season_total: latest.season_hr_number,
                    career_total: latest.career_hr_number,
                })
            })
            .collect()
    }

    pub fn supplemental(&self) -> SupplementalLines {
        let batters = self.batters();
        let counted = |f: fn(&BattingStats) -> u32| -> Vec<NamedCount> {
            batters
                .iter()
                .filter(|p| f(p.batting()) > 0)
                .map(|p| NamedCount {
                    name: p.player.person.last_name().to_string(),
                    count: f(p.batting()),
                })
                .collect()
        };
        let named = |f: fn(&BattingStats) -> u32| -> Vec<String> {
            batters
                .iter()
                .filter(|p| f(p.batting()) > 0)
                .map(|p| p.player.person.last_name().to_string())
                .collect()
        };

        let team = &self.team_stats.batting;
        SupplementalLines {
            homers: self.homers(),
            doubles: counted(|b| b.doubles),
            total_bases: counted(|b| b.total_bases),
            rbi: counted(|b| b.rbi),
            two_out_rbi: named(|b| b.rbi_with_two_outs),
            risp_left: named(|b| b.left_on_base_in_scoring_position),
            team_risp: team
                .runners_scoring_position
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "0-0".to_string()),
            team_lob: team.left_on_base,
        }
    }
}

/// A fully enriched game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBoxScore {
    pub date: NaiveDate,
    pub away: EnrichedTeam,
    pub home: EnrichedTeam,
}

impl EnrichedBoxScore {
    pub fn team(&self, side: Side) -> &EnrichedTeam {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    /// Locate a player on either roster.
    pub fn find_player(&self, id: PlayerId) -> Option<(Side, &EnrichedPlayer)> {
        self.away
            .find_player(id)
            .map(|p| (Side::Away, p))
            .or_else(|| self.home.find_player(id).map(|p| (Side::Home, p)))
    }
}

// =============================================================================
// Enrichment
// =============================================================================

/// Build the per-homer records for a player who hit `hit_today` home runs.
///
/// The `i`-th homer from the last gets season number `season_total - i` and
/// career number `career_total - i`. The list is returned earliest first.
pub fn home_run_progress(
    player: PlayerId,
    date: NaiveDate,
    hit_today: u32,
    season_total: u32,
    career_total: Option<u32>,
) -> Vec<HomeRunEvent> {
    // Season stats can lag the game line; never number below 1.
    let season_total = season_total.max(hit_today);
    let mut progress: Vec<HomeRunEvent> = (0..hit_today)
        .map(|i| {
            let career = career_total.and_then(|c| c.checked_sub(i));
            HomeRunEvent::new(player, date, season_total - i, career)
        })
        .collect();
    progress.reverse();
    progress
}

/// Map a play-by-play event name to its scorebook abbreviation.
pub fn abbreviate_event(event: &str) -> &str {
    match event {
        "Single" => "1B",
        "Double" => "2B",
        "Triple" => "3B",
        "Home Run" => "HR",
        "Walk" | "Intent Walk" => "BB",
        "Strikeout" => "K",
        "Groundout" | "Ground Out" => "GO",
        "Flyout" | "Fly Out" => "FO",
        "Lineout" | "Line Out" => "LO",
        "Pop Out" => "PO",
        "Field Error" => "E",
        "Fielders Choice" | "Fielders Choice Out" => "FC",
        "Hit By Pitch" => "HBP",
        "Sac Fly" | "Sacrifice Fly" => "SF",
        "Sac Bunt" | "Sacrifice Bunt" => "SAC",
        other => other,
    }
}

/// Each batter's plate-appearance results, sorted by inning.
fn batting_lines(plays: &PlayByPlay) -> HashMap<PlayerId, String> {
    let mut appearances: HashMap<PlayerId, Vec<(u32, u32, &str)>> = HashMap::new();
    for play in &plays.all_plays {
        let (Some(batter), Some(event)) = (&play.matchup.batter, play.result.event.as_deref())
        else {
            continue;
        };
        appearances.entry(batter.id).or_default().push((
            play.about.inning,
            play.about.at_bat_index,
            event,
        ));
    }

    appearances
        .into_iter()
        .map(|(id, mut list)| {
            list.sort_by_key(|(inning, index, _)| (*inning, *index));
            let line = list
                .iter()
                .map(|(_, _, event)| abbreviate_event(event))
                .collect::<Vec<_>>()
                .join(", ");
            (id, line)
        })
        .collect()
}

/// Index of the first play each pitcher appeared in.
fn pitching_order(plays: &PlayByPlay) -> HashMap<PlayerId, usize> {
    let mut order = HashMap::new();
    for (index, play) in plays.all_plays.iter().enumerate() {
        if let Some(pitcher) = &play.matchup.pitcher {
            order.entry(pitcher.id).or_insert(index);
        }
    }
    order
}

/// Annotate a raw box score.
pub fn enrich(
    raw: BoxScore,
    date: NaiveDate,
    lookups: &PlayerLookups,
    plays: Option<&PlayByPlay>,
) -> EnrichedBoxScore {
    let lines = plays.map(batting_lines).unwrap_or_default();
    let order = plays.map(pitching_order).unwrap_or_default();

    let enrich_team = |team: BoxTeam| -> EnrichedTeam {
        let players = team
            .players
            .into_iter()
            .map(|(slot, player)| {
                let id = player.person.id;
                let career_home_runs = lookups.career_home_runs.get(&id).copied();
                let batting = &player.stats.batting;
                let home_run_progress = if batting.home_runs > 0 {
                    home_run_progress(
                        id,
                        date,
                        batting.home_runs,
                        player.season_stats.batting.home_runs,
                        career_home_runs,
                    )
                } else {
                    Vec::new()
                };
                let enriched = EnrichedPlayer {
                    career_home_runs,
                    season_rates: lookups.season_rates.get(&id).cloned().unwrap_or_default(),
                    home_run_progress,
                    batting_line: lines.get(&id).cloned(),
                    appearance_index: order.get(&id).copied(),
                    player,
                };
                (slot, enriched)
            })
            .collect();
        EnrichedTeam {
            team: team.team,
            team_stats: team.team_stats,
            players,
        }
    };

    let BoxScore { teams } = raw;
    EnrichedBoxScore {
        date,
        away: enrich_team(teams.away),
        home: enrich_team(teams.home),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
    }

    fn box_score() -> BoxScore {
        serde_json::from_str(
            r#"{
              "teams": {
                "away": {
                  "team": {"id": 147, "name": "New York Yankees"},
                  "teamStats": {"batting": {"leftOnBase": 7, "runnersScoringPosition": "1-6"}},
                  "players": {
                    "ID592450": {
                      "person": {"id": 592450, "fullName": "Aaron Judge"},
                      "battingOrder": "200",
                      "stats": {"batting": {"plateAppearances": 4, "atBats": 3, "hits": 2, "homeRuns": 2, "rbi": 3, "totalBases": 8, "rbiWithTwoOuts": 1}},
                      "seasonStats": {"batting": {"homeRuns": 10}}
                    },
                    "ID665742": {
                      "person": {"id": 665742, "fullName": "Juan Soto"},
                      "battingOrder": "100",
                      "stats": {"batting": {"plateAppearances": 5, "atBats": 4, "hits": 1, "doubles": 1, "totalBases": 2, "leftOnBaseInScoringPosition": 2}},
                      "seasonStats": {"batting": {"homeRuns": 4}}
                    },
                    "ID543037": {
                      "person": {"id": 543037, "fullName": "Gerrit Cole"},
                      "stats": {"pitching": {"inningsPitched": "6.0"}}
                    },
                    "ID622663": {
                      "person": {"id": 622663, "fullName": "Luis Severino"},
                      "stats": {"pitching": {"inningsPitched": "2.0"}}
                    }
                  }
                },
                "home": {
                  "team": {"id": 111, "name": "Boston Red Sox"},
                  "players": {
                    "ID646240": {
                      "person": {"id": 646240, "fullName": "Rafael Devers"},
                      "battingOrder": "300",
                      "stats": {"batting": {"plateAppearances": 4, "homeRuns": 1}},
                      "seasonStats": {"batting": {}}
                    }
                  }
                }
              }
            }"#,
        )
        .unwrap()
    }

    fn plays() -> PlayByPlay {
        serde_json::from_str(
            r#"{
              "allPlays": [
                {"result": {"event": "Groundout"}, "about": {"atBatIndex": 0, "inning": 1},
                 "matchup": {"batter": {"id": 665742}, "pitcher": {"id": 999}}},
                {"result": {"event": "Home Run"}, "about": {"atBatIndex": 1, "inning": 1},
                 "matchup": {"batter": {"id": 592450}, "pitcher": {"id": 999}}},
                {"result": {"event": "Strikeout"}, "about": {"atBatIndex": 2, "inning": 1},
                 "matchup": {"batter": {"id": 646240}, "pitcher": {"id": 622663}}},
                {"result": {"event": "Walk"}, "about": {"atBatIndex": 4, "inning": 3},
                 "matchup": {"batter": {"id": 592450}, "pitcher": {"id": 999}}},
                {"result": {"event": "Double"}, "about": {"atBatIndex": 3, "inning": 2},
                 "matchup": {"batter": {"id": 592450}, "pitcher": {"id": 999}}},
                {"result": {"event": "Lineout"}, "about": {"atBatIndex": 5, "inning": 4},
                 "matchup": {"batter": {"id": 646240}, "pitcher": {"id": 543037}}}
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_home_run_progress_numbering() {
        let progress = home_run_progress(PlayerId(592450), date(), 2, 10, Some(300));
        let numbers: Vec<(u32, Option<u32>)> = progress
            .iter()
            .map(|e| (e.season_hr_number, e.career_hr_number))
            .collect();
        assert_eq!(numbers, vec![(9, Some(299)), (10, Some(300))]);
        assert_eq!(progress[1].hr_id, "592450_2024-04-15_10");
        assert_eq!(progress[0].opponent, "Unknown");
    }

    #[test]
    fn test_home_run_progress_without_career_or_season() {
        let progress = home_run_progress(PlayerId(1), date(), 2, 0, None);
        let seasons: Vec<u32> = progress.iter().map(|e| e.season_hr_number).collect();
        assert_eq!(seasons, vec![1, 2]);
        assert!(progress.iter().all(|e| e.career_hr_number.is_none()));
    }

    #[test]
    fn test_enrich_attaches_progress_and_rates() {
        let lookups = PlayerLookups::new()
            .with_career(PlayerId(592450), 300)
            .with_season(
                PlayerId(592450),
                SeasonRates {
                    avg: ".322".to_string(),
                    ops: "1.111".to_string(),
                },
            );
        let enriched = enrich(box_score(), date(), &lookups, None);

        let (side, judge) = enriched.find_player(PlayerId(592450)).unwrap();
        assert_eq!(side, Side::Away);
        assert_eq!(judge.home_run_progress.len(), 2);
        assert_eq!(judge.career_home_runs, Some(300));
        assert_eq!(judge.season_rates.avg, ".322");

        let (_, soto) = enriched.find_player(PlayerId(665742)).unwrap();
        assert!(soto.home_run_progress.is_empty());
        assert_eq!(soto.season_rates, SeasonRates::placeholder());

        let (side, devers) = enriched.find_player(PlayerId(646240)).unwrap();
        assert_eq!(side, Side::Home);
        assert_eq!(devers.home_run_progress.len(), 1);
        assert_eq!(devers.home_run_progress[0].season_hr_number, 1);
        assert_eq!(devers.home_run_progress[0].career_hr_number, None);
    }

    #[test]
    fn test_enrich_is_independent_of_lookup_insertion_order() {
        let a = PlayerLookups::new()
            .with_career(PlayerId(592450), 300)
            .with_career(PlayerId(646240), 200);
        let b = PlayerLookups::new()
            .with_career(PlayerId(646240), 200)
            .with_career(PlayerId(592450), 300);

        let left = serde_json::to_value(enrich(box_score(), date(), &a, Some(&plays()))).unwrap();
        let right = serde_json::to_value(enrich(box_score(), date(), &b, Some(&plays()))).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_batting_line_sorted_by_inning() {
        let enriched = enrich(box_score(), date(), &PlayerLookups::new(), Some(&plays()));
        let (_, judge) = enriched.find_player(PlayerId(592450)).unwrap();
        assert_eq!(judge.batting_line.as_deref(), Some("HR, 2B, BB"));
        let (_, devers) = enriched.find_player(PlayerId(646240)).unwrap();
        assert_eq!(devers.batting_line.as_deref(), Some("K, LO"));
    }

    #[test]
    fn test_pitchers_in_appearance_order() {
        let enriched = enrich(box_score(), date(), &PlayerLookups::new(), Some(&plays()));
        let pitchers: Vec<PlayerId> = enriched.away.pitchers().iter().map(|p| p.id()).collect();
        assert_eq!(pitchers, vec![PlayerId(622663), PlayerId(543037)]);

        let no_plays = enrich(box_score(), date(), &PlayerLookups::new(), None);
        assert!(no_plays.away.pitchers().iter().all(|p| p.appearance_index.is_none()));
    }

    #[test]
    fn test_batters_in_lineup_order() {
        let enriched = enrich(box_score(), date(), &PlayerLookups::new(), None);
        let batters: Vec<PlayerId> = enriched.away.batters().iter().map(|p| p.id()).collect();
        assert_eq!(batters, vec![PlayerId(665742), PlayerId(592450)]);
    }

    #[test]
    fn test_supplemental_lines() {
        let lookups = PlayerLookups::new().with_career(PlayerId(592450), 300);
        let enriched = enrich(box_score(), date(), &lookups, None);
        let lines = enriched.away.supplemental();

        assert_eq!(
            lines.homers,
            vec![HomerLine {
                player_id: PlayerId(592450),
                name: "Judge".to_string(),
                count: 2,
                season_total: 10,
                career_total: Some(300),
            }]
        );
        assert_eq!(lines.doubles, vec![NamedCount { name: "Soto".to_string(), count: 1 }]);
        assert_eq!(lines.total_bases.len(), 2);
        assert_eq!(lines.two_out_rbi, vec!["Judge".to_string()]);
        assert_eq!(lines.risp_left, vec!["Soto".to_string()]);
        assert_eq!(lines.team_risp, "1-6");
        assert_eq!(lines.team_lob, 7);

        let home = enriched.home.supplemental();
        assert_eq!(home.team_risp, "0-0");
        assert_eq!(home.team_lob, 0);
    }

    #[test]
    fn test_lookup_plan() {
        let plan = lookup_plan(&box_score());
        assert_eq!(plan.career, vec![PlayerId(592450), PlayerId(646240)]);
        assert_eq!(plan.season.len(), 5);
    }

    #[test]
    fn test_season_rates_placeholder_for_missing_values() {
        let rates = SeasonRates::from_stats(&BattingStats {
            avg: Some(".250".to_string()),
            ..Default::default()
        });
        assert_eq!(rates.avg, ".250");
        assert_eq!(rates.ops, "-");
    }

    #[test]
    fn test_abbreviate_unknown_event_verbatim() {
        assert_eq!(abbreviate_event("Catcher Interference"), "Catcher Interference");
        assert_eq!(abbreviate_event("Sac Fly"), "SF");
    }
}
