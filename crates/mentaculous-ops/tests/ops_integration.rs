//! Integration tests for the operations layer over preloaded stats records.

use std::sync::Arc;

use chrono::NaiveDate;
use mentaculous_core::{Direction, Mutation, PlayerId};
use mentaculous_ops::{
    AddHomeRunRequest, BackupRequest, BoxScoreRequest, Config, FileStore, GamesRequest,
    LedgerPageRequest, LedgerStore, MemoryStore, MoveEntryRequest, OpsContext, OpsError,
    PlayerRequest, RemoveHomeRunRequest, StaticSource, StatsType,
};
use serde_json::json;
use tempfile::TempDir;

const GAME: u64 = 745000;
const DEVERS: PlayerId = PlayerId(646240);
const JUDGE: PlayerId = PlayerId(592450);
const SOTO: PlayerId = PlayerId(665742);

fn game_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
}

fn source() -> StaticSource {
    let schedule = serde_json::from_value(json!({
        "dates": [{
            "date": "2024-04-15",
            "games": [{
                "gamePk": GAME,
                "gameDate": "2024-04-15T23:10:00Z",
                "officialDate": "2024-04-15",
                "status": {"abstractGameState": "Final", "detailedState": "Final"},
                "teams": {
                    "away": {"team": {"id": 147, "name": "New York Yankees"}, "score": 3},
                    "home": {"team": {"id": 111, "name": "Boston Red Sox"}, "score": 5}
                }
            }]
        }]
    }))
    .unwrap();

    let box_score = serde_json::from_value(json!({
        "teams": {
            "away": {
                "team": {"id": 147, "name": "New York Yankees"},
                "players": {
                    "ID592450": {
                        "person": {"id": 592450, "fullName": "Aaron Judge"},
                        "battingOrder": "200",
                        "stats": {"batting": {"plateAppearances": 4, "homeRuns": 1}},
                        "seasonStats": {"batting": {"homeRuns": 6}}
                    },
                    "ID665742": {
                        "person": {"id": 665742, "fullName": "Juan Soto"},
                        "battingOrder": "100",
                        "stats": {"batting": {"plateAppearances": 4}},
                        "seasonStats": {"batting": {"homeRuns": 4}}
                    }
                }
            },
            "home": {
                "team": {"id": 111, "name": "Boston Red Sox"},
                "players": {
                    "ID646240": {
                        "person": {"id": 646240, "fullName": "Rafael Devers"},
                        "battingOrder": "300",
                        "stats": {"batting": {"plateAppearances": 4, "homeRuns": 2}},
                        "seasonStats": {"batting": {"homeRuns": 10}}
                    }
                }
            }
        }
    }))
    .unwrap();

    let plays = serde_json::from_value(json!({
        "allPlays": [
            {"result": {"event": "Home Run"}, "about": {"atBatIndex": 0, "inning": 1},
             "matchup": {"batter": {"id": 646240}, "pitcher": {"id": 1}}},
            {"result": {"event": "Home Run"}, "about": {"atBatIndex": 1, "inning": 5},
             "matchup": {"batter": {"id": 646240}, "pitcher": {"id": 1}}}
        ]
    }))
    .unwrap();

    let person = serde_json::from_value(json!({
        "people": [{
            "id": 646240,
            "fullName": "Rafael Devers",
            "primaryPosition": {"name": "Third Base", "abbreviation": "3B"},
            "birthCountry": "Dominican Republic"
        }]
    }))
    .unwrap();

    StaticSource::new()
        .with_schedule(game_date(), schedule)
        .with_box_score(GAME, box_score)
        .with_plays(GAME, plays)
        .with_person(DEVERS, person)
        .with_stats(
            DEVERS,
            StatsType::Career,
            json!({"stats": [{"splits": [{"stat": {"homeRuns": 200, "gamesPlayed": 900}}]}]}),
        )
        .with_stats(
            DEVERS,
            StatsType::Season,
            json!({"stats": [{"splits": [{"season": "2024", "stat": {"avg": ".291", "ops": ".912"}}]}]}),
        )
        .with_stats(
            DEVERS,
            StatsType::YearByYear,
            json!({"stats": [{"splits": [
                {"season": "2017", "stat": {"gamesPlayed": 58, "homeRuns": 10}},
                {"season": "2018", "stat": {"gamesPlayed": 0}},
                {"stat": {"gamesPlayed": 12}},
                {"season": "2019", "stat": {"gamesPlayed": 156, "homeRuns": 32}}
            ]}]}),
        )
}

fn context() -> OpsContext {
    OpsContext::with_parts(
        Config::default(),
        Arc::new(source()),
        LedgerStore::hydrate(MemoryStore::new()),
    )
}

#[tokio::test]
async fn test_games_for_date() {
    let ctx = context();
    let response = ctx.games(GamesRequest::on(game_date())).await.unwrap();
    assert_eq!(response.games.len(), 1);
    assert_eq!(response.games[0].game_pk, GAME);

    let empty = ctx
        .games(GamesRequest::on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
        .await
        .unwrap();
    assert!(empty.games.is_empty());
}

#[tokio::test]
async fn test_box_score_enriched_with_degraded_lookups() {
    let ctx = context();
    let response = ctx.box_score(BoxScoreRequest::new(GAME)).await.unwrap();
    let box_score = &response.box_score;

    // Date taken from the game itself.
    assert_eq!(box_score.date, game_date());

    let (_, devers) = box_score.find_player(DEVERS).unwrap();
    let numbers: Vec<(u32, Option<u32>)> = devers
        .home_run_progress
        .iter()
        .map(|e| (e.season_hr_number, e.career_hr_number))
        .collect();
    assert_eq!(numbers, vec![(9, Some(199)), (10, Some(200))]);
    assert_eq!(devers.season_rates.ops, ".912");
    assert_eq!(devers.batting_line.as_deref(), Some("HR, HR"));

    // No lookups loaded for Judge: placeholders, enrichment still completes.
    let (_, judge) = box_score.find_player(JUDGE).unwrap();
    assert_eq!(judge.career_home_runs, None);
    assert_eq!(judge.season_rates.avg, "-");
    assert_eq!(judge.home_run_progress[0].season_hr_number, 6);
    assert_eq!(judge.home_run_progress[0].career_hr_number, None);

    assert!(response.logged.is_empty());
}

#[tokio::test]
async fn test_box_score_missing_game() {
    let ctx = context();
    let err = ctx.box_score(BoxScoreRequest::new(1)).await.unwrap_err();
    assert!(matches!(err, OpsError::GameNotFound { game_pk: 1 }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_add_home_runs_resolves_opponent_and_is_idempotent() {
    let ctx = context();

    let response = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, DEVERS))
        .await
        .unwrap();
    assert_eq!(response.added.len(), 2);
    assert!(response.already_logged.is_empty());
    assert_eq!(response.added[0].hr_id, "646240_2024-04-15_9");
    assert_eq!(response.added[0].opponent, "vs New York Yankees");
    assert_eq!(response.added[0].game_pk, Some(GAME));

    let entry = response.entry.unwrap();
    assert_eq!(entry.team_name, "Boston Red Sox");
    assert_eq!(entry.team_id, Some(111));
    assert_eq!(entry.season_total(), 2);

    let again = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, DEVERS).only(10))
        .await
        .unwrap();
    assert!(again.added.is_empty());
    assert_eq!(again.already_logged.len(), 1);

    let box_score = ctx.box_score(BoxScoreRequest::new(GAME)).await.unwrap();
    assert!(box_score.is_logged("646240_2024-04-15_10"));
}

#[tokio::test]
async fn test_add_away_player_gets_at_opponent() {
    let ctx = context();
    let response = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, JUDGE))
        .await
        .unwrap();
    assert_eq!(response.added[0].opponent, "@ Boston Red Sox");
}

#[tokio::test]
async fn test_add_unknown_opponent_when_schedule_missing() {
    let ctx = context();
    let other_day = NaiveDate::from_ymd_opt(2024, 4, 16).unwrap();
    let response = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, DEVERS).with_date(other_day))
        .await
        .unwrap();
    assert_eq!(response.added[0].opponent, "Unknown");
    assert_eq!(response.added[0].hr_id, "646240_2024-04-16_9");
}

#[tokio::test]
async fn test_add_errors() {
    let ctx = context();

    let err = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, SOTO))
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::NoHomeRun { .. }));

    let err = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, DEVERS).only(3))
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::NoHomeRun { .. }));

    let err = ctx
        .add_home_runs(AddHomeRunRequest::new(GAME, PlayerId(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, OpsError::PlayerNotFound { .. }));

    assert!(ctx.ledger().await.is_empty());
}

#[tokio::test]
async fn test_remove_and_move() {
    let ctx = context();
    ctx.add_home_runs(AddHomeRunRequest::new(GAME, DEVERS))
        .await
        .unwrap();
    ctx.add_home_runs(AddHomeRunRequest::new(GAME, JUDGE))
        .await
        .unwrap();

    let moved = ctx
        .move_entry(MoveEntryRequest::new(JUDGE, Direction::Up))
        .await
        .unwrap();
    assert_eq!(moved.mutation, Mutation::Moved);
    assert_eq!(moved.position, Some(0));
    assert_eq!(moved.order, vec![JUDGE, DEVERS]);

    let boundary = ctx
        .move_entry(MoveEntryRequest::new(JUDGE, Direction::Up))
        .await
        .unwrap();
    assert_eq!(boundary.mutation, Mutation::Unchanged);

    let removed = ctx
        .remove_home_run(RemoveHomeRunRequest::new(JUDGE, "592450_2024-04-15_6"))
        .await
        .unwrap();
    assert_eq!(
        removed.mutation,
        Mutation::Removed {
            entry_removed: true
        }
    );
    assert!(removed.entry.is_none());

    let page = ctx.ledger_page(LedgerPageRequest::page(5)).await.unwrap();
    assert_eq!(page.index, 0);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page_size, 32);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].player_id, DEVERS);

    assert!(ctx.ledger_entry(DEVERS).await.is_ok());
    assert!(matches!(
        ctx.ledger_entry(JUDGE).await,
        Err(OpsError::PlayerNotFound { .. })
    ));
}

#[tokio::test]
async fn test_ledger_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        data_dir: tmp.path().to_path_buf(),
        ..Config::default()
    };

    let ctx = OpsContext::with_parts(
        config.clone(),
        Arc::new(source()),
        LedgerStore::hydrate(FileStore::new(&config.data_dir)),
    );
    ctx.add_home_runs(AddHomeRunRequest::new(GAME, DEVERS))
        .await
        .unwrap();
    ctx.add_home_runs(AddHomeRunRequest::new(GAME, JUDGE))
        .await
        .unwrap();
    ctx.move_entry(MoveEntryRequest::new(JUDGE, Direction::Up))
        .await
        .unwrap();

    let reopened = OpsContext::with_parts(
        config.clone(),
        Arc::new(source()),
        LedgerStore::hydrate(FileStore::new(&config.data_dir)),
    );
    assert_eq!(reopened.ledger().await, ctx.ledger().await);
    assert_eq!(reopened.ledger().await.order(), &[JUDGE, DEVERS]);
}

#[tokio::test]
async fn test_player_profile() {
    let ctx = context();
    let profile = ctx.player(PlayerRequest::new(DEVERS)).await.unwrap();
    assert_eq!(profile.bio.full_name, "Rafael Devers");
    assert_eq!(profile.career.as_ref().map(|c| c.home_runs), Some(200));
    let seasons: Vec<&str> = profile.seasons.iter().map(|s| s.season.as_str()).collect();
    assert_eq!(seasons, vec!["2017", "2019"]);

    let err = ctx.player(PlayerRequest::new(JUDGE)).await.unwrap_err();
    assert!(matches!(err, OpsError::PlayerNotFound { .. }));
}

#[tokio::test]
async fn test_backup_requires_configuration() {
    let ctx = context();
    let err = ctx.backup(BackupRequest::default()).await.unwrap_err();
    assert!(matches!(err, OpsError::BackupNotConfigured));
}
