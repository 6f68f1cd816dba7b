use crate::AppState;
use crate::error::AppError;
use crate::helpers::{CORRELATION_ID, chart_location, correlation_id};
use crate::validation;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use axum_macros::debug_handler;
use depthchart_store::{Player, PositionChart, RosterKey};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

#[derive(Deserialize)]
pub(crate) struct AddParams {
    position_depth: Option<i64>,
}

/// Full team chart, serialized as `{"QB": [...], "WR": [...]}` in store order
pub(crate) struct FullChartResponse(Vec<PositionChart>);

impl Serialize for FullChartResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for chart in &self.0 {
            map.serialize_entry(&chart.position, &chart.players)?;
        }
        map.end()
    }
}

/// Validate raw path segments, then build the roster key
fn roster_key(league: &str, team: &str, position: &str) -> Result<RosterKey, AppError> {
    validation::validate_segment("league", league)?;
    validation::validate_segment("team", team)?;
    validation::validate_segment("position", position)?;
    Ok(RosterKey::new(league, team, position)?)
}

#[debug_handler]
pub(crate) async fn add_player(
    State(state): State<Arc<AppState>>,
    Path((league, team, position)): Path<(String, String, String)>,
    Query(params): Query<AddParams>,
    Json(player): Json<Player>,
) -> Result<impl IntoResponse, AppError> {
    let correlation_id = correlation_id();
    tracing::info!(
        %correlation_id,
        %league, %team, %position,
        position_depth = ?params.position_depth,
        "add player"
    );

    let key = roster_key(&league, &team, &position)?;
    // Only added names are bounded; remove and backups match any stored player
    validation::validate_player_name(&player.name)?;
    state
        .store
        .add_player(&key, player, params.position_depth)
        .await?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, chart_location(&key)), (CORRELATION_ID, correlation_id)],
    ))
}

#[debug_handler]
pub(crate) async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path((league, team, position)): Path<(String, String, String)>,
    Json(player): Json<Player>,
) -> Result<impl IntoResponse, AppError> {
    let correlation_id = correlation_id();
    tracing::info!(%correlation_id, %league, %team, %position, "remove player");

    let key = roster_key(&league, &team, &position)?;
    let removed = state.store.remove_player(&key, &player).await?;

    Ok(([(CORRELATION_ID, correlation_id)], Json(removed)))
}

#[debug_handler]
pub(crate) async fn backups(
    State(state): State<Arc<AppState>>,
    Path((league, team, position)): Path<(String, String, String)>,
    Json(player): Json<Player>,
) -> Result<impl IntoResponse, AppError> {
    let correlation_id = correlation_id();
    tracing::info!(%correlation_id, %league, %team, %position, "get backups");

    let key = roster_key(&league, &team, &position)?;
    let backups = state.store.get_backups(&key, &player).await?;

    Ok(([(CORRELATION_ID, correlation_id)], Json(backups)))
}

#[debug_handler]
pub(crate) async fn full_chart(
    State(state): State<Arc<AppState>>,
    Path((league, team)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let correlation_id = correlation_id();
    tracing::info!(%correlation_id, %league, %team, "get full depth chart");

    validation::validate_segment("league", &league)?;
    validation::validate_segment("team", &team)?;
    let chart = state.store.get_full_chart(&league, &team).await?;

    Ok((
        [(CORRELATION_ID, correlation_id)],
        Json(FullChartResponse(chart)),
    ))
}
