use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use depthchart_backend::{config, create_app, loader};
use depthchart_store::DepthChartStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
// for `oneshot` method

/// Helper to create a store over the built-in catalog
fn setup_test_store() -> DepthChartStore {
    DepthChartStore::new(config::default_catalog())
}

/// Helper to create app with default test configuration (no rate limiting)
fn create_test_app(store: DepthChartStore) -> axum::Router {
    let config = config::Config::default();
    create_app(store, config.request_body_limit, config.request_timeout, None)
}

/// Helper to send a request and get status, headers and JSON body
async fn send_request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let request_builder = Request::builder().uri(uri).method(method);

    // Build request with body
    let request = if let Some(json_body) = body {
        request_builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json_body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    // Send request
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();

    // Extract body
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    // Try to parse as JSON, or return empty object
    let json = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, headers, json)
}

fn brady() -> Value {
    json!({ "number": 12, "name": "Tom Brady" })
}

fn gabbert() -> Value {
    json!({ "number": 11, "name": "Blaine Gabbert" })
}

fn trask() -> Value {
    json!({ "number": 2, "name": "Kyle Trask" })
}

async fn add(app: &axum::Router, uri: &str, player: Value) {
    let (status, _, _) = send_request(app.clone(), "POST", uri, Some(player)).await;
    assert_eq!(status, StatusCode::CREATED);
}

const QB: &str = "/api/v1/NFL/teams/TB/depth-chart/QB";

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    // GIVEN: A running application
    let app = create_test_app(setup_test_store());

    // WHEN: Making a GET request to /health
    let (status, _, _) = send_request(app, "GET", "/health", None).await;

    // THEN: Should return 200 OK
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoint_with_post_method() {
    // GIVEN: A running application
    let app = create_test_app(setup_test_store());

    // WHEN: Making a POST request to /health (wrong method)
    let (status, _, _) = send_request(app, "POST", "/health", None).await;

    // THEN: Should return 405 Method Not Allowed
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// ADD PLAYER TESTS
// =============================================================================

#[tokio::test]
async fn test_add_player_returns_created_with_location() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Adding a player with lower-case path segments
    let (status, headers, _) = send_request(
        app,
        "POST",
        "/api/v1/nfl/teams/tb/depth-chart/qb",
        Some(brady()),
    )
    .await;

    // THEN: Should return 201 with the normalized chart location
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers.get("location").unwrap(),
        "/api/v1/NFL/teams/TB/depth-chart/QB"
    );
    // AND: A correlation id is echoed back
    assert!(headers.get("x-correlation-id").is_some());
}

#[tokio::test]
async fn test_add_player_at_depth_shifts_others() {
    // GIVEN: A QB chart of [Brady, Gabbert]
    let app = create_test_app(setup_test_store());
    add(&app, QB, brady()).await;
    add(&app, QB, gabbert()).await;

    // WHEN: Adding Trask at depth 0
    add(&app, &format!("{QB}?position_depth=0"), trask()).await;

    // THEN: Trask is the starter and the others shift down
    let (status, _, body) =
        send_request(app, "GET", "/api/v1/NFL/teams/TB/depth-chart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["QB"], json!([trask(), brady(), gabbert()]));
}

#[tokio::test]
async fn test_add_existing_player_moves_it() {
    // GIVEN: A QB chart of [Brady, Gabbert, Trask]
    let app = create_test_app(setup_test_store());
    add(&app, QB, brady()).await;
    add(&app, QB, gabbert()).await;
    add(&app, QB, trask()).await;

    // WHEN: Re-adding Trask at depth 0
    add(&app, &format!("{QB}?position_depth=0"), trask()).await;

    // THEN: Trask moved without being duplicated
    let (_, _, body) = send_request(app, "GET", "/api/v1/NFL/teams/TB/depth-chart", None).await;
    assert_eq!(body["QB"], json!([trask(), brady(), gabbert()]));
}

#[tokio::test]
async fn test_add_player_with_unknown_position() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Adding a player at a position the league doesn't have
    let (status, _, body) = send_request(
        app.clone(),
        "POST",
        "/api/v1/NFL/teams/TB/depth-chart/PITCHER",
        Some(brady()),
    )
    .await;

    // THEN: Should return 400 naming the position
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_position");
    assert!(body["details"].as_str().unwrap().contains("PITCHER"));

    // AND: The chart shows no trace of the attempt
    let (_, _, body) = send_request(app, "GET", "/api/v1/NFL/teams/TB/depth-chart", None).await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_add_player_with_negative_depth() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Adding with a negative position_depth
    let (status, _, body) =
        send_request(app, "POST", &format!("{QB}?position_depth=-1"), Some(brady())).await;

    // THEN: Should return 400
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_rank");
}

#[tokio::test]
async fn test_add_player_with_invalid_player() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Adding a player with a blank name
    let (status, _, body) = send_request(
        app.clone(),
        "POST",
        QB,
        Some(json!({ "number": 12, "name": "   " })),
    )
    .await;

    // THEN: Should return 400
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_player");

    // WHEN: Adding a player with number 0
    let (status, _, body) =
        send_request(app, "POST", QB, Some(json!({ "number": 0, "name": "Tom Brady" }))).await;

    // THEN: Should return 400
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_player");
}

// =============================================================================
// REMOVE PLAYER TESTS
// =============================================================================

#[tokio::test]
async fn test_remove_player_returns_removed() {
    // GIVEN: A QB chart of [Brady, Gabbert]
    let app = create_test_app(setup_test_store());
    add(&app, QB, brady()).await;
    add(&app, QB, gabbert()).await;

    // WHEN: Removing Brady
    let (status, headers, body) = send_request(app.clone(), "DELETE", QB, Some(brady())).await;

    // THEN: The response contains the removed player
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([brady()]));
    assert!(headers.get("x-correlation-id").is_some());

    // AND: Only Gabbert remains
    let (_, _, body) = send_request(app, "GET", "/api/v1/NFL/teams/TB/depth-chart", None).await;
    assert_eq!(body["QB"], json!([gabbert()]));
}

#[tokio::test]
async fn test_remove_unlisted_player_returns_empty_list() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Removing a player that was never added
    let (status, _, body) = send_request(app, "DELETE", QB, Some(brady())).await;

    // THEN: Should return 200 with an empty list
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_remove_last_player_drops_position() {
    // GIVEN: A QB chart with just Brady
    let app = create_test_app(setup_test_store());
    add(&app, QB, brady()).await;

    // WHEN: Removing Brady
    let (status, _, body) = send_request(app.clone(), "DELETE", QB, Some(brady())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([brady()]));

    // THEN: QB disappears from the team chart
    let (_, _, body) = send_request(app, "GET", "/api/v1/NFL/teams/TB/depth-chart", None).await;
    assert_eq!(body, json!({}));
}

// =============================================================================
// BACKUPS TESTS
// =============================================================================

#[tokio::test]
async fn test_get_backups() {
    // GIVEN: A QB chart of [Brady, Gabbert, Trask]
    let app = create_test_app(setup_test_store());
    add(&app, QB, brady()).await;
    add(&app, QB, gabbert()).await;
    add(&app, QB, trask()).await;

    // WHEN: Asking for Brady's backups
    let (status, _, body) =
        send_request(app.clone(), "POST", &format!("{QB}/backups"), Some(brady())).await;

    // THEN: Everyone below Brady, in order
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([gabbert(), trask()]));

    // WHEN: Asking for the last player's backups
    let (status, _, body) = send_request(app, "POST", &format!("{QB}/backups"), Some(trask())).await;

    // THEN: Empty list
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_backups_for_unlisted_player() {
    // GIVEN: A QB chart with just Brady
    let app = create_test_app(setup_test_store());
    add(&app, QB, brady()).await;

    // WHEN: Asking for backups of a player not on the chart
    let (status, _, body) = send_request(
        app,
        "POST",
        &format!("{QB}/backups"),
        Some(json!({ "number": 99, "name": "Nobody" })),
    )
    .await;

    // THEN: Empty list, not an error
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_bulk_loaded_long_name_can_be_queried_and_removed() {
    // GIVEN: A bulk-loaded QB whose name is longer than the add endpoint allows
    let store = setup_test_store();
    let long_name = "A".repeat(70);
    let chart = json!({
        "league": "NFL",
        "team": "TB",
        "positions": { "QB": [brady(), { "number": 7, "name": long_name }] }
    });
    let summary = loader::load_chart(&store, "inline", &chart.to_string())
        .await
        .unwrap();
    assert_eq!(summary.players, 2);
    let app = create_test_app(store);
    let long_player = json!({ "number": 7, "name": long_name });

    // WHEN: Asking for Brady's backups
    let (status, _, body) =
        send_request(app.clone(), "POST", &format!("{QB}/backups"), Some(brady())).await;

    // THEN: The long-named player is listed
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([long_player]));

    // WHEN: Asking for the long-named player's own backups
    let (status, _, body) = send_request(
        app.clone(),
        "POST",
        &format!("{QB}/backups"),
        Some(long_player.clone()),
    )
    .await;

    // THEN: Not rejected by name validation
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // WHEN: Removing the long-named player
    let (status, _, body) = send_request(app, "DELETE", QB, Some(long_player.clone())).await;

    // THEN: The player is removed and returned
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([long_player]));
}

// =============================================================================
// FULL CHART TESTS
// =============================================================================

#[tokio::test]
async fn test_full_chart_keeps_insertion_order() {
    // GIVEN: Players added at WR, then QB, then TE
    let app = create_test_app(setup_test_store());
    add(
        &app,
        "/api/v1/NFL/teams/TB/depth-chart/WR",
        json!({ "number": 13, "name": "Mike Evans" }),
    )
    .await;
    add(&app, QB, brady()).await;
    add(
        &app,
        "/api/v1/NFL/teams/TB/depth-chart/TE",
        json!({ "number": 87, "name": "Rob Gronkowski" }),
    )
    .await;

    // WHEN: Fetching the full chart (case-insensitive path)
    let (status, headers, body) =
        send_request(app, "GET", "/api/v1/nfl/teams/tb/depth-chart", None).await;

    // THEN: Positions are listed in the order they were created
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("x-correlation-id").is_some());
    let positions: Vec<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(positions, vec!["WR", "QB", "TE"]);
}

#[tokio::test]
async fn test_full_chart_for_team_without_players() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Fetching a known team's chart
    let (status, _, body) =
        send_request(app, "GET", "/api/v1/NFL/teams/KC/depth-chart", None).await;

    // THEN: 200 with an empty object
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_full_chart_for_unknown_team() {
    // GIVEN: An empty store
    let app = create_test_app(setup_test_store());

    // WHEN: Fetching an unknown team's chart
    let (status, _, body) =
        send_request(app, "GET", "/api/v1/NFL/teams/XYZ/depth-chart", None).await;

    // THEN: 400 naming the team
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_team");
}

// =============================================================================
// FULL FLOW
// =============================================================================

#[tokio::test]
async fn test_concurrent_requests_to_distinct_positions() {
    // GIVEN: A shared store
    let store = setup_test_store();
    let positions = ["QB", "RB", "WR", "TE", "LT", "LG", "C", "RG", "RT", "K"];

    // WHEN: Adding one player per position concurrently
    let mut handles = Vec::new();
    for (i, position) in positions.iter().enumerate() {
        let app = create_test_app(store.clone());
        let uri = format!("/api/v1/NFL/teams/TB/depth-chart/{position}");
        handles.push(tokio::spawn(async move {
            send_request(
                app,
                "POST",
                &uri,
                Some(json!({ "number": i + 1, "name": format!("Player {i}") })),
            )
            .await
            .0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    // THEN: Every player landed
    let app = create_test_app(store);
    let (_, _, body) = send_request(app, "GET", "/api/v1/NFL/teams/TB/depth-chart", None).await;
    let total: usize = body
        .as_object()
        .unwrap()
        .values()
        .map(|players| players.as_array().unwrap().len())
        .sum();
    assert_eq!(total, positions.len());
}
