//! HTTP handlers for the global history log

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::domain::HistoryEntry;
use crate::error::ApiResult;
use crate::repository::MedicationRepository;
use crate::AppState;

pub async fn list_history(State(state): State<AppState>) -> ApiResult<Json<Vec<HistoryEntry>>> {
    Ok(Json(state.repo.list_history().await?))
}

pub async fn clear_history(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.repo.clear_history().await?;
    info!("Cleared medication history");
    Ok(StatusCode::NO_CONTENT)
}
