//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::cache::SearchOutcome;
use crate::controller::{ControllerClosed, RefreshTrigger};
use crate::departure::{MenuEntry, TrayStatus};
use crate::domain::Selection;
use crate::geocoder::AddPairRequest;

use super::dto::*;
use super::state::AppState;

/// Create the control API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route(
            "/pairs",
            get(list_pairs).post(add_pair).delete(clear_pairs),
        )
        .route("/active", put(select_route))
        .route("/refresh", post(refresh))
        .route("/stops/search", get(search_stops))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current tray title and icon.
async fn status(State(state): State<AppState>) -> Json<TrayStatus> {
    Json(state.display.current())
}

/// Route menu: forward and reverse entry per saved pair.
async fn list_pairs(State(state): State<AppState>) -> Result<Json<Vec<MenuEntry>>, AppError> {
    Ok(Json(state.controller.menu().await?))
}

/// Save a pair.
///
/// Accepted even when a stop is missing or malformed; the controller logs
/// and drops incomplete requests.
async fn add_pair(
    State(state): State<AppState>,
    Json(req): Json<AddPairRequest>,
) -> Result<StatusCode, AppError> {
    state.controller.add_pair(req).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Forget every pair and the selection.
async fn clear_pairs(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.controller.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn select_route(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<StatusCode, AppError> {
    let selection = Selection::parse(&req.selection).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    state.controller.select(selection).await?;
    Ok(StatusCode::ACCEPTED)
}

async fn refresh(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.controller.refresh(RefreshTrigger::Manual).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Stop suggestions. Geocoder failures come back as an empty list with a
/// message rather than an error status.
async fn search_stops(
    State(state): State<AppState>,
    Query(query): Query<StopSearchQuery>,
) -> Json<SearchOutcome> {
    Json(state.geocoder.search(&query.text).await)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
}

impl From<ControllerClosed> for AppError {
    fn from(e: ControllerClosed) -> Self {
        AppError::Unavailable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
