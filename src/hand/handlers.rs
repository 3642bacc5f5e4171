use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::{
    service,
    types::{CheckHandRequest, CheckHandResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for checking whether 14 tiles form a winning hand
///
/// POST /api/check_hand
#[instrument(name = "check_hand", skip(state, request))]
pub async fn check_hand(
    State(state): State<AppState>,
    Json(request): Json<CheckHandRequest>,
) -> Result<Json<CheckHandResponse>, AppError> {
    info!(tiles = ?request.tiles, "Checking hand");

    let response = service::check_hand(&state.validator, &request.tiles)?;

    Ok(Json(response))
}
