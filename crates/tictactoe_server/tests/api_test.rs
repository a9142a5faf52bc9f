//! HTTP tests for `/api/game`, driven through the router without a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use tictactoe_server::{AppState, GameRepository, GameService, router};

fn setup_app() -> (NamedTempFile, Router) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    let app = router(AppState::new(GameService::new(repo)));
    (db_file, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router) -> i64 {
    let (status, body) = send(app, "POST", "/api/game", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_returns_new_game_with_location() {
    let (_db, app) = setup_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/game")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(location, format!("/api/game/{}", body["id"]));
    assert_eq!(body["board"], json!([null, null, null, null, null, null, null, null, null]));
    assert_eq!(body["nextPlayer"], "X");
    assert_eq!(body["outcome"], Value::Null);
    assert_eq!(body["version"], 0);
}

#[tokio::test]
async fn test_list_games() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, "GET", "/api/game", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let first = create(&app).await;
    let second = create(&app).await;
    let (_, body) = send(&app, "GET", "/api/game", None).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn test_get_missing_game_is_404() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, "GET", "/api/game/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_move_is_applied() {
    let (_db, app) = setup_app();
    let id = create(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/game/{id}"),
        Some(json!({"cell": 4, "player": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, game) = send(&app, "GET", &format!("/api/game/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["board"][4], "X");
    assert_eq!(game["nextPlayer"], "O");
    assert_eq!(game["version"], 1);
}

#[tokio::test]
async fn test_wrong_turn_is_422() {
    let (_db, app) = setup_app();
    let id = create(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/game/{id}"),
        Some(json!({"cell": 0, "player": "O"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_MOVE");
}

#[tokio::test]
async fn test_stale_version_is_409() {
    let (_db, app) = setup_app();
    let id = create(&app).await;
    let uri = format!("/api/game/{id}");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"cell": 4, "player": "X", "version": 0}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"cell": 0, "player": "O", "version": 0}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_put_missing_game_is_404() {
    let (_db, app) = setup_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/game/777",
        Some(json!({"cell": 0, "player": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_positive_id_is_400() {
    let (_db, app) = setup_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/game/0",
        Some(json!({"cell": 0, "player": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, "GET", "/api/game/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unparseable_body_is_400() {
    let (_db, app) = setup_app();
    let id = create(&app).await;
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/game/{id}"),
        Some(json!({"square": "middle"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_full_board_body_is_reduced_to_a_move() {
    let (_db, app) = setup_app();
    let id = create(&app).await;
    let uri = format!("/api/game/{id}");

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "board": [null, null, null, null, "X", null, null, null, null],
            "nextPlayer": "X",
            "outcome": "Draw"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, game) = send(&app, "GET", &uri, None).await;
    assert_eq!(game["board"][4], "X");
    assert_eq!(game["nextPlayer"], "O");
    assert_eq!(game["outcome"], Value::Null);
}

#[tokio::test]
async fn test_full_board_with_two_changes_is_422() {
    let (_db, app) = setup_app();
    let id = create(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/game/{id}"),
        Some(json!({
            "board": ["X", "O", null, null, null, null, null, null, null],
            "nextPlayer": "X",
            "outcome": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_MOVE");
}

#[tokio::test]
async fn test_win_is_reported_and_further_moves_rejected() {
    let (_db, app) = setup_app();
    let id = create(&app).await;
    let uri = format!("/api/game/{id}");

    for (cell, player) in [(0, "X"), (3, "O"), (1, "X"), (4, "O"), (2, "X")] {
        let (status, _) = send(&app, "PUT", &uri, Some(json!({"cell": cell, "player": player}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (_, game) = send(&app, "GET", &uri, None).await;
    assert_eq!(game["outcome"], "X");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"cell": 5, "player": "O"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_MOVE");
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let (_db, app) = setup_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/game")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
