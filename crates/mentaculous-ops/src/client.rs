//! MLB stats API client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use mentaculous_core::{BattingStats, BoxScore, PeopleResponse, PlayByPlay, PlayerId, Schedule, StatsResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{OpsError, OpsResult};

/// `stats=` parameter of the player stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatsType {
    Career,
    Season,
    YearByYear,
    YearByYearAdvanced,
    GameLog,
    StatsSingleSeason,
    ByDateRange,
}

impl StatsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsType::Career => "career",
            StatsType::Season => "season",
            StatsType::YearByYear => "yearByYear",
            StatsType::YearByYearAdvanced => "yearByYearAdvanced",
            StatsType::GameLog => "gameLog",
            StatsType::StatsSingleSeason => "statsSingleSeason",
            StatsType::ByDateRange => "byDateRange",
        }
    }
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `group=` parameter of the player stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    Hitting,
    Pitching,
    Fielding,
}

impl StatGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
            StatGroup::Fielding => "fielding",
        }
    }
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a player stats request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsQuery {
    pub stats: StatsType,
    pub group: StatGroup,
    pub season: Option<i32>,
}

impl StatsQuery {
    /// Hitting stats of the given type.
    pub fn hitting(stats: StatsType) -> Self {
        Self {
            stats,
            group: StatGroup::Hitting,
            season: None,
        }
    }

    /// Restrict to one season.
    pub fn season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("stats", self.stats.to_string()),
            ("group", self.group.to_string()),
        ];
        if let Some(season) = self.season {
            params.push(("season", season.to_string()));
        }
        params
    }
}

/// Read access to the stats API.
///
/// Implemented by [`StatsClient`] over HTTP and by [`crate::StaticSource`] from
/// preloaded records.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Games on a calendar date.
    async fn schedule(&self, date: NaiveDate) -> OpsResult<Schedule>;

    /// Schedule entry for a single game.
    async fn game_schedule(&self, game_pk: u64) -> OpsResult<Schedule>;

    async fn box_score(&self, game_pk: u64) -> OpsResult<BoxScore>;

    async fn play_by_play(&self, game_pk: u64) -> OpsResult<PlayByPlay>;

    async fn person(&self, id: PlayerId) -> OpsResult<PeopleResponse>;

    /// Raw stats payload; parse with [`parse_stats`].
    async fn player_stats(&self, id: PlayerId, query: StatsQuery) -> OpsResult<serde_json::Value>;
}

/// Parse a stats payload into typed splits.
pub fn parse_stats<S: DeserializeOwned>(value: serde_json::Value) -> OpsResult<StatsResponse<S>> {
    Ok(serde_json::from_value(value)?)
}

/// Fetch and parse hitting stats.
pub async fn hitting_stats(
    source: &dyn StatsSource,
    id: PlayerId,
    query: StatsQuery,
) -> OpsResult<StatsResponse<BattingStats>> {
    parse_stats(source.player_stats(id, query).await?)
}

/// HTTP client for the stats API.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base: String,
}

impl StatsClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> OpsResult<Self> {
        Ok(Self {
            http: build_http_client(config.request_timeout_secs)?,
            base: config.stats_api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> OpsResult<T> {
        let url = format!("{}{}", self.base, path);
        debug!(url = %url, ?params, "stats request");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OpsError::Api {
                resource: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Build a reqwest client honoring the configured timeout (0 disables it).
pub(crate) fn build_http_client(timeout_secs: u64) -> OpsResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    Ok(builder.build()?)
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn schedule(&self, date: NaiveDate) -> OpsResult<Schedule> {
        self.get_json(
            "/schedule",
            &[
                ("sportId", "1".to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ],
        )
        .await
    }

    async fn game_schedule(&self, game_pk: u64) -> OpsResult<Schedule> {
        self.get_json(
            "/schedule",
            &[("sportId", "1".to_string()), ("gamePk", game_pk.to_string())],
        )
        .await
    }

    async fn box_score(&self, game_pk: u64) -> OpsResult<BoxScore> {
        self.get_json(&format!("/game/{game_pk}/boxscore"), &[]).await
    }

    async fn play_by_play(&self, game_pk: u64) -> OpsResult<PlayByPlay> {
        self.get_json(&format!("/game/{game_pk}/playByPlay"), &[])
            .await
    }

    async fn person(&self, id: PlayerId) -> OpsResult<PeopleResponse> {
        self.get_json(&format!("/people/{id}"), &[]).await
    }

    async fn player_stats(&self, id: PlayerId, query: StatsQuery) -> OpsResult<serde_json::Value> {
        self.get_json(&format!("/people/{id}/stats"), &query.params())
            .await
    }
}
