//! OpsContext - The main service for executing operations.
//!
//! The OpsContext holds configuration, the stats source and the ledger store,
//! and provides methods for all Mentaculous operations. It can be used by CLI,
//! REST API, or any other consumer.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate, Utc};
use futures::future::join_all;
use mentaculous_core::{
    enrich, lookup_plan, HomeRunEvent, Ledger, LedgerCommand, LedgerEntry, LoggedPlayer,
    LookupPlan, Mutation, PlayerId, PlayerLookups, SeasonRates, UNKNOWN_OPPONENT,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::backup::{BackupClient, BackupSnapshot};
use crate::client::{hitting_stats, StatsClient, StatsQuery, StatsSource, StatsType};
use crate::config::Config;
use crate::error::{OpsError, OpsResult};
use crate::requests::*;
use crate::responses::*;
use crate::store::{FileStore, LedgerStore};

/// User id recorded with backups when none is configured.
pub const DEFAULT_BACKUP_USER: &str = "anonymous";

/// The main operations context.
///
/// Cheap to clone; clones share the stats source and the ledger. Ledger
/// commands are serialized through an async mutex.
#[derive(Clone)]
pub struct OpsContext {
    /// Configuration for operations.
    pub config: Config,
    stats: Arc<dyn StatsSource>,
    ledger: Arc<Mutex<LedgerStore>>,
}

impl std::fmt::Debug for OpsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpsContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Turn a 404 from the stats API into a domain error.
fn not_found_as(err: OpsError, missing: impl FnOnce() -> OpsError) -> OpsError {
    match err {
        OpsError::Api { status: 404, .. } => missing(),
        other => other,
    }
}

impl OpsContext {
    /// Create a context talking to the live stats API with the ledger stored
    /// under `config.data_dir`.
    pub fn new(config: Config) -> OpsResult<Self> {
        let stats = StatsClient::new(&config)?;
        let store = LedgerStore::hydrate(FileStore::new(&config.data_dir));
        Ok(Self::with_parts(config, Arc::new(stats), store))
    }

    /// Create a new OpsContext with configuration loaded from disk.
    pub fn default_config() -> OpsResult<Self> {
        Self::new(Config::load()?)
    }

    /// Assemble a context from explicit parts.
    pub fn with_parts(config: Config, stats: Arc<dyn StatsSource>, store: LedgerStore) -> Self {
        Self {
            config,
            stats,
            ledger: Arc::new(Mutex::new(store)),
        }
    }

    /// Copy of the current ledger state.
    pub async fn ledger(&self) -> Ledger {
        self.ledger.lock().await.ledger().clone()
    }

    // =========================================================================
    // Stats Operations
    // =========================================================================

    /// Games scheduled on a date.
    pub async fn games(&self, request: GamesRequest) -> OpsResult<GamesResponse> {
        let date = request.date.unwrap_or_else(today);
        let schedule = self.stats.schedule(date).await?;
        let games = schedule.dates.into_iter().flat_map(|d| d.games).collect();
        Ok(GamesResponse { date, games })
    }

    /// Fetch and enrich a box score.
    ///
    /// The box score, play-by-play and game date are fetched concurrently,
    /// then the per-player lookups fan out. Failed lookups are logged and
    /// left out; only a failed box score fails the operation.
    pub async fn box_score(&self, request: BoxScoreRequest) -> OpsResult<BoxScoreResponse> {
        let game_pk = request.game_pk;
        let plays = async {
            if request.skip_plays {
                return None;
            }
            match self.stats.play_by_play(game_pk).await {
                Ok(plays) => Some(plays),
                Err(e) => {
                    warn!(game_pk, error = %e, "Play-by-play unavailable");
                    None
                }
            }
        };
        let (raw, plays, date) = tokio::join!(
            self.stats.box_score(game_pk),
            plays,
            self.game_date(game_pk, request.date)
        );
        let raw = raw.map_err(|e| not_found_as(e, || OpsError::GameNotFound { game_pk }))?;

        let plan = lookup_plan(&raw);
        let lookups = self.player_lookups(&plan, date.year()).await;
        let box_score = enrich(raw, date, &lookups, plays.as_ref());

        let ledger = self.ledger.lock().await;
        let logged = [&box_score.away, &box_score.home]
            .into_iter()
            .flat_map(|team| team.players.values())
            .flat_map(|p| p.home_run_progress.iter().map(move |e| (p.id(), e)))
            .filter(|(id, e)| ledger.ledger().contains(*id, &e.hr_id))
            .map(|(_, e)| e.hr_id.clone())
            .collect();

        info!(
            game_pk,
            %date,
            career_lookups = lookups.career_home_runs.len(),
            season_lookups = lookups.season_rates.len(),
            "Box score enriched"
        );
        Ok(BoxScoreResponse {
            game_pk,
            box_score,
            logged,
        })
    }

    /// The given date, else the game's own date, else today.
    async fn game_date(&self, game_pk: u64, date: Option<NaiveDate>) -> NaiveDate {
        if let Some(date) = date {
            return date;
        }
        match self.stats.game_schedule(game_pk).await {
            Ok(schedule) => match schedule.find_game(game_pk).and_then(|g| g.date()) {
                Some(date) => date,
                None => {
                    warn!(game_pk, "Game date unknown, using today");
                    today()
                }
            },
            Err(e) => {
                warn!(game_pk, error = %e, "Game lookup failed, using today");
                today()
            }
        }
    }

    /// Run every lookup in `plan` concurrently and key the results by player.
    async fn player_lookups(&self, plan: &LookupPlan, season: i32) -> PlayerLookups {
        let stats = self.stats.as_ref();
        let career = join_all(plan.career.iter().map(|&id| async move {
            let query = StatsQuery::hitting(StatsType::Career);
            (id, hitting_stats(stats, id, query).await)
        }));
        let rates = join_all(plan.season.iter().map(|&id| async move {
            let query = StatsQuery::hitting(StatsType::Season).season(season);
            (id, hitting_stats(stats, id, query).await)
        }));
        let (career, rates) = tokio::join!(career, rates);

        let mut lookups = PlayerLookups::new();
        for (id, result) in career {
            match result.map(|r| r.first_stat().map(|s| s.home_runs)) {
                Ok(Some(home_runs)) => {
                    lookups.career_home_runs.insert(id, home_runs);
                }
                Ok(None) => debug!(player_id = %id, "No career split"),
                Err(e) => warn!(player_id = %id, error = %e, "Career lookup failed"),
            }
        }
        for (id, result) in rates {
            match result.map(|r| r.first_stat().map(SeasonRates::from_stats)) {
                Ok(Some(season_rates)) => {
                    lookups.season_rates.insert(id, season_rates);
                }
                Ok(None) => debug!(player_id = %id, "No season split"),
                Err(e) => warn!(player_id = %id, error = %e, "Season lookup failed"),
            }
        }
        lookups
    }

    /// Bio, career line and year-by-year hitting.
    pub async fn player(&self, request: PlayerRequest) -> OpsResult<PlayerProfile> {
        let player_id = request.player_id;
        let missing = || OpsError::PlayerNotFound { player_id };

        let (person, career, years) = tokio::join!(
            self.stats.person(player_id),
            hitting_stats(
                self.stats.as_ref(),
                player_id,
                StatsQuery::hitting(StatsType::Career)
            ),
            hitting_stats(
                self.stats.as_ref(),
                player_id,
                StatsQuery::hitting(StatsType::YearByYear)
            ),
        );

        let bio = person
            .map_err(|e| not_found_as(e, missing))?
            .people
            .into_iter()
            .next()
            .ok_or_else(missing)?;

        let career = match career {
            Ok(response) => response.first_stat().cloned(),
            Err(e) => {
                warn!(player_id = %player_id, error = %e, "Career lookup failed");
                None
            }
        };
        let seasons = match years {
            Ok(response) => response
                .into_splits()
                .into_iter()
                .filter(|split| split.stat.games_played > 0)
                .filter_map(|split| {
                    Some(SeasonRow {
                        season: split.season.filter(|s| !s.is_empty())?,
                        team: split.team,
                        stat: split.stat,
                    })
                })
                .collect(),
            Err(e) => {
                warn!(player_id = %player_id, error = %e, "Year-by-year lookup failed");
                Vec::new()
            }
        };

        Ok(PlayerProfile {
            bio,
            career,
            seasons,
        })
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Log a player's home runs from a game.
    ///
    /// Home runs already in the ledger are reported, not duplicated. The
    /// opponent comes from the schedule of the game date.
    pub async fn add_home_runs(&self, request: AddHomeRunRequest) -> OpsResult<AddHomeRunResponse> {
        let AddHomeRunRequest {
            game_pk,
            player_id,
            season_hr_number,
            date,
        } = request;

        let mut box_request = BoxScoreRequest::new(game_pk).without_plays();
        box_request.date = date;
        let response = self.box_score(box_request).await?;
        let date = response.box_score.date;

        let (side, player) = response
            .box_score
            .find_player(player_id)
            .ok_or(OpsError::PlayerNotFound { player_id })?;
        let events: Vec<HomeRunEvent> = player
            .home_run_progress
            .iter()
            .filter(|e| season_hr_number.map_or(true, |n| e.season_hr_number == n))
            .cloned()
            .collect();
        if events.is_empty() {
            return Err(OpsError::NoHomeRun { player_id, game_pk });
        }

        let team = &response.box_score.team(side).team;
        let opponent = self.opponent(date, team.id).await;
        let logged = LoggedPlayer {
            id: player_id,
            name: player.player.person.full_name.clone(),
            team_name: if team.name.is_empty() {
                UNKNOWN_OPPONENT.to_string()
            } else {
                team.name.clone()
            },
            team_id: Some(team.id).filter(|id| *id != 0),
        };

        let mut added = Vec::new();
        let mut already_logged = Vec::new();
        let mut store = self.ledger.lock().await;
        for event in events {
            let event = event.with_opponent(opponent.clone()).with_game(game_pk);
            let mutation = store.mutate(LedgerCommand::Add {
                player: logged.clone(),
                event: event.clone(),
                at: Utc::now(),
            })?;
            match mutation {
                Mutation::Added { .. } => added.push(event),
                _ => already_logged.push(event),
            }
        }

        info!(
            player_id = %player_id,
            game_pk,
            added = added.len(),
            already_logged = already_logged.len(),
            "Home runs logged"
        );
        Ok(AddHomeRunResponse {
            player_id,
            player_name: logged.name,
            added,
            already_logged,
            entry: store.ledger().get(player_id).cloned(),
        })
    }

    /// `"vs X"` / `"@ X"` for the team on `date`, `"Unknown"` when the schedule
    /// is unavailable or has no game for the team.
    async fn opponent(&self, date: NaiveDate, team_id: u32) -> String {
        match self.stats.schedule(date).await {
            Ok(schedule) => schedule.opponent_for(team_id),
            Err(e) => {
                warn!(%date, team_id, error = %e, "Schedule lookup failed, opponent unknown");
                UNKNOWN_OPPONENT.to_string()
            }
        }
    }

    /// Delete a logged home run. Unknown events leave the ledger unchanged.
    pub async fn remove_home_run(
        &self,
        request: RemoveHomeRunRequest,
    ) -> OpsResult<RemoveHomeRunResponse> {
        let mut store = self.ledger.lock().await;
        let mutation = store.mutate(LedgerCommand::Remove {
            player: request.player_id,
            hr_id: request.hr_id,
        })?;
        Ok(RemoveHomeRunResponse {
            mutation,
            entry: store.ledger().get(request.player_id).cloned(),
        })
    }

    /// Swap a player with its neighbour in the display order.
    pub async fn move_entry(&self, request: MoveEntryRequest) -> OpsResult<MoveEntryResponse> {
        let mut store = self.ledger.lock().await;
        let mutation = store.mutate(LedgerCommand::Reorder {
            player: request.player_id,
            direction: request.direction,
        })?;
        let order = store.ledger().order().to_vec();
        Ok(MoveEntryResponse {
            mutation,
            position: order.iter().position(|id| *id == request.player_id),
            order,
        })
    }

    /// One page of the ledger in display order.
    pub async fn ledger_page(&self, request: LedgerPageRequest) -> OpsResult<LedgerPageResponse> {
        let page_size = self.config.effective_page_size();
        let store = self.ledger.lock().await;
        let ledger = store.ledger();
        let page = ledger.page(request.page, page_size);
        Ok(LedgerPageResponse {
            index: page.index,
            total_pages: page.total_pages,
            page_size,
            total_players: ledger.len(),
            entries: page.entries.into_iter().cloned().collect(),
        })
    }

    /// A single player's entry.
    pub async fn ledger_entry(&self, player_id: PlayerId) -> OpsResult<LedgerEntry> {
        self.ledger
            .lock()
            .await
            .ledger()
            .get(player_id)
            .cloned()
            .ok_or(OpsError::PlayerNotFound { player_id })
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Push the stored records to the backup table.
    pub async fn backup(&self, request: BackupRequest) -> OpsResult<BackupResponse> {
        let client = BackupClient::from_config(&self.config)?;
        let user_id = request
            .user_id
            .or_else(|| self.config.user_id.clone())
            .unwrap_or_else(|| DEFAULT_BACKUP_USER.to_string());

        let (snapshot, players) = {
            let store = self.ledger.lock().await;
            let (mentaculous, order) = store.raw_records()?;
            (
                BackupSnapshot {
                    user_id: user_id.clone(),
                    mentaculous,
                    order,
                },
                store.ledger().len(),
            )
        };

        client.push(&snapshot).await?;
        Ok(BackupResponse {
            user_id,
            players,
            bytes: snapshot.mentaculous.len() + snapshot.order.len(),
        })
    }
}

