//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use super::AppState;
use super::types::{AdviceResponse, ErrorResponse, HistoryRecord, StatsResponse};
use crate::advisory::{AdvisoryRequest, request_advice};
use crate::assets::Asset;
use crate::sim::event_log::EventLogEntry;
use crate::sim::{Advice, Scenario};

/// `GET /assets` → 200 + current fleet
pub async fn get_assets(State(state): State<Arc<AppState>>) -> Json<Vec<Asset>> {
    Json(state.grid.read().await.assets().to_vec())
}

/// `GET /stats` → 200 + `StatsResponse`
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse::from(&*state.grid.read().await))
}

/// `GET /history` → 200 + retained history, oldest first
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistoryRecord>> {
    let grid = state.grid.read().await;
    Json(grid.history().iter().map(HistoryRecord::from).collect())
}

/// `GET /events` → 200 + event log, oldest first
pub async fn get_events(State(state): State<Arc<AppState>>) -> Json<Vec<EventLogEntry>> {
    let grid = state.grid.read().await;
    Json(grid.events().iter().cloned().collect())
}

/// `GET /advice` → 200 + latest advice or `null`
pub async fn get_advice(State(state): State<Arc<AppState>>) -> Json<AdviceResponse> {
    let advice = state.grid.read().await.advice().cloned();
    Json(AdviceResponse { advice })
}

/// Applies a scenario by name.
///
/// `POST /scenario/{name}` → 200 + `StatsResponse`
/// `POST /scenario/flood` → 400 + `ErrorResponse`
pub async fn post_scenario(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let scenario = name.parse::<Scenario>().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    info!(%scenario, "scenario requested via api");
    let grid = state.transition(|grid| grid.apply_scenario(scenario)).await;
    Ok(Json(StatsResponse::from(&*grid)))
}

/// `POST /reset` → 200 + `StatsResponse`
pub async fn post_reset(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    info!("reset requested via api");
    let grid = state.transition(|grid| grid.reset()).await;
    Json(StatsResponse::from(&*grid))
}

/// Requests advice for the current grid picture.
///
/// The lock is released while the advisor runs; ticks may land in between
/// and the stored advice keeps the stats it was asked about.
///
/// `POST /advice` → 200 + `Advice` (fallback text on any advisory failure)
pub async fn post_advice(State(state): State<Arc<AppState>>) -> Json<Advice> {
    let (request, stats, at) = {
        let grid = state.grid.read().await;
        (
            AdvisoryRequest::from_state(&grid),
            grid.stats(),
            grid.elapsed_ms(),
        )
    };
    let advice = request_advice(state.advisor.as_ref(), request, stats, at).await;
    let stored = advice.clone();
    drop(state.transition(|grid| grid.with_advice(stored)).await);
    Json(advice)
}
