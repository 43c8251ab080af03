//! Integration tests for the Mentaculous REST API.
//!
//! The router runs over preloaded stats records and an in-memory ledger, so
//! no network access is needed.
//!
//! Run with: `cargo test --package mentaculous-api --test api_integration`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use mentaculous_core::PlayerId;
use mentaculous_ops::{Config, LedgerStore, MemoryStore, OpsContext, StaticSource, StatsType};
use serde_json::{json, Value};
use tower::ServiceExt;

use mentaculous_api::create_app;

const GAME: u64 = 745000;

fn source() -> StaticSource {
    let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
    let schedule = serde_json::from_value(json!({
        "dates": [{
            "date": "2024-04-15",
            "games": [{
                "gamePk": GAME,
                "officialDate": "2024-04-15",
                "teams": {
                    "away": {"team": {"id": 147, "name": "New York Yankees"}},
                    "home": {"team": {"id": 111, "name": "Boston Red Sox"}}
                }
            }]
        }]
    }))
    .unwrap();
    let box_score = serde_json::from_value(json!({
        "teams": {
            "away": {"team": {"id": 147, "name": "New York Yankees"}, "players": {}},
            "home": {
                "team": {"id": 111, "name": "Boston Red Sox"},
                "players": {
                    "ID42": {
                        "person": {"id": 42, "fullName": "Test Slugger"},
                        "battingOrder": "100",
                        "stats": {"batting": {"plateAppearances": 4, "homeRuns": 1}},
                        "seasonStats": {"batting": {"homeRuns": 10}}
                    },
                    "ID7": {
                        "person": {"id": 7, "fullName": "Second Slugger"},
                        "battingOrder": "200",
                        "stats": {"batting": {"plateAppearances": 4, "homeRuns": 1}},
                        "seasonStats": {"batting": {"homeRuns": 3}}
                    }
                }
            }
        }
    }))
    .unwrap();

    StaticSource::new()
        .with_schedule(date, schedule)
        .with_box_score(GAME, box_score)
        .with_stats(
            PlayerId(42),
            StatsType::Career,
            json!({"stats": [{"splits": [{"stat": {"homeRuns": 120}}]}]}),
        )
}

/// Create a test router with a fresh in-memory ledger.
fn create_test_router() -> Router {
    let ctx = OpsContext::with_parts(
        Config::default(),
        Arc::new(source()),
        LedgerStore::hydrate(MemoryStore::new()),
    );
    create_app(ctx)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!(null));

    (status, json)
}

/// Helper to make a GET request.
async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

/// Helper to make a POST request with JSON body.
async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(router, request).await
}

/// Helper to make a DELETE request.
async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let router = create_test_router();
    let (status, json) = get(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["players"], 0);
    assert!(json["timestamp"].as_u64().is_some());
}

#[tokio::test]
async fn test_games_for_date() {
    let router = create_test_router();
    let (status, json) = get(&router, "/api/games?date=2024-04-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["date"], "2024-04-15");
    assert_eq!(json["data"]["games"][0]["gamePk"], GAME);
}

#[tokio::test]
async fn test_box_score() {
    let router = create_test_router();
    let (status, json) = get(&router, "/api/games/745000/boxscore").await;
    assert_eq!(status, StatusCode::OK, "{json:?}");

    let slugger = &json["data"]["boxScore"]["home"]["players"]["ID42"];
    assert_eq!(slugger["person"]["fullName"], "Test Slugger");
    assert_eq!(slugger["careerHomeRuns"], 120);
    assert_eq!(slugger["seasonRates"]["avg"], "-");
    assert_eq!(
        slugger["homeRunProgress"][0]["hrId"],
        "42_2024-04-15_10"
    );
    assert_eq!(slugger["homeRunProgress"][0]["careerHRNumber"], 120);
}

#[tokio::test]
async fn test_box_score_unknown_game_is_404() {
    let router = create_test_router();
    let (status, json) = get(&router, "/api/games/1/boxscore").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["code"], "GAME_NOT_FOUND");
}

#[tokio::test]
async fn test_add_is_idempotent() {
    let router = create_test_router();

    let (status, json) = post(&router, "/api/ledger", json!({"gamePk": GAME, "playerId": 42})).await;
    assert_eq!(status, StatusCode::OK, "{json:?}");
    assert_eq!(json["data"]["added"][0]["hrId"], "42_2024-04-15_10");
    assert_eq!(json["data"]["added"][0]["opponent"], "vs New York Yankees");
    assert_eq!(json["data"]["entry"]["teamName"], "Boston Red Sox");
    assert_eq!(json["data"]["entry"]["teamId"], 111);

    let (status, json) = post(
        &router,
        "/api/ledger",
        json!({"gamePk": GAME, "playerId": "42", "seasonHrNumber": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["added"], json!([]));
    assert_eq!(json["data"]["alreadyLogged"][0]["hrId"], "42_2024-04-15_10");

    let (_, json) = get(&router, "/api/ledger/42").await;
    assert_eq!(json["data"]["homeRuns"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_without_home_run_is_400() {
    let router = create_test_router();
    let (status, json) = post(
        &router,
        "/api/ledger",
        json!({"gamePk": GAME, "playerId": 42, "seasonHrNumber": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"]["code"], "NO_HOME_RUN");
}

#[tokio::test]
async fn test_page_move_and_remove() {
    let router = create_test_router();
    post(&router, "/api/ledger", json!({"gamePk": GAME, "playerId": 42})).await;
    post(&router, "/api/ledger", json!({"gamePk": GAME, "playerId": 7})).await;

    let (status, json) = get(&router, "/api/ledger").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalPages"], 1);
    assert_eq!(json["data"]["entries"][0]["playerId"], "42");
    assert_eq!(json["data"]["entries"][1]["playerId"], "7");

    let (status, json) = post(&router, "/api/ledger/7/move", json!({"direction": "up"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["order"], json!(["7", "42"]));

    let (_, json) = post(&router, "/api/ledger/7/move", json!({"direction": "up"})).await;
    assert_eq!(json["data"]["mutation"]["outcome"], "unchanged");

    let (status, json) = delete(&router, "/api/ledger/7/7_2024-04-15_3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["mutation"]["outcome"], "removed");
    assert_eq!(json["data"]["mutation"]["entryRemoved"], true);

    let (status, _) = get(&router, "/api/ledger/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = get(&router, "/api/ledger?page=9").await;
    assert_eq!(json["data"]["index"], 0);
    assert_eq!(json["data"]["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_bad_player_id_is_400() {
    let router = create_test_router();
    let (status, json) = get(&router, "/api/ledger/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_backup_not_configured() {
    let router = create_test_router();
    let (status, json) = post(&router, "/api/backup", json!({})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["data"]["code"], "BACKUP_NOT_CONFIGURED");
}
