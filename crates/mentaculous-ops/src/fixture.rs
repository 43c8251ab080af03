//! In-memory [`StatsSource`] serving preloaded records.
//!
//! Anything not loaded answers like the live API does for unknown resources:
//! an [`OpsError::Api`] with status 404.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use mentaculous_core::{BoxScore, PeopleResponse, PlayByPlay, PlayerId, Schedule};

use crate::client::{StatsQuery, StatsSource, StatsType};
use crate::error::{OpsError, OpsResult};

/// Preloaded stats records keyed the way the API addresses them.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    schedules: HashMap<NaiveDate, Schedule>,
    box_scores: HashMap<u64, BoxScore>,
    plays: HashMap<u64, PlayByPlay>,
    people: HashMap<PlayerId, PeopleResponse>,
    stats: HashMap<(PlayerId, StatsType), serde_json::Value>,
}

fn missing<T>(resource: String) -> OpsResult<T> {
    Err(OpsError::Api {
        resource,
        status: 404,
    })
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, date: NaiveDate, schedule: Schedule) -> Self {
        self.schedules.insert(date, schedule);
        self
    }

    pub fn with_box_score(mut self, game_pk: u64, box_score: BoxScore) -> Self {
        self.box_scores.insert(game_pk, box_score);
        self
    }

    pub fn with_plays(mut self, game_pk: u64, plays: PlayByPlay) -> Self {
        self.plays.insert(game_pk, plays);
        self
    }

    pub fn with_person(mut self, id: PlayerId, person: PeopleResponse) -> Self {
        self.people.insert(id, person);
        self
    }

    /// Stats payload for one player and stats type, whatever the group or season.
    pub fn with_stats(mut self, id: PlayerId, stats: StatsType, payload: serde_json::Value) -> Self {
        self.stats.insert((id, stats), payload);
        self
    }
}

#[async_trait]
impl StatsSource for StaticSource {
    async fn schedule(&self, date: NaiveDate) -> OpsResult<Schedule> {
        Ok(self.schedules.get(&date).cloned().unwrap_or_default())
    }

    async fn game_schedule(&self, game_pk: u64) -> OpsResult<Schedule> {
        let mut schedule = Schedule::default();
        for day in self.schedules.values() {
            for date in &day.dates {
                if date.games.iter().any(|g| g.game_pk == game_pk) {
                    let mut date = date.clone();
                    date.games.retain(|g| g.game_pk == game_pk);
                    schedule.dates.push(date);
                }
            }
        }
        Ok(schedule)
    }

    async fn box_score(&self, game_pk: u64) -> OpsResult<BoxScore> {
        match self.box_scores.get(&game_pk) {
            Some(box_score) => Ok(box_score.clone()),
            None => missing(format!("/game/{game_pk}/boxscore")),
        }
    }

    async fn play_by_play(&self, game_pk: u64) -> OpsResult<PlayByPlay> {
        match self.plays.get(&game_pk) {
            Some(plays) => Ok(plays.clone()),
            None => missing(format!("/game/{game_pk}/playByPlay")),
        }
    }

    async fn person(&self, id: PlayerId) -> OpsResult<PeopleResponse> {
        match self.people.get(&id) {
            Some(person) => Ok(person.clone()),
            None => missing(format!("/people/{id}")),
        }
    }

    async fn player_stats(&self, id: PlayerId, query: StatsQuery) -> OpsResult<serde_json::Value> {
        match self.stats.get(&(id, query.stats)) {
            Some(payload) => Ok(payload.clone()),
            None => missing(format!("/people/{id}/stats")),
        }
    }
}
