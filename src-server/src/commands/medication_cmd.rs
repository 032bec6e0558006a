//! HTTP handlers for medication CRUD and the taken/snooze/skip actions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use reminder_core::api::{ActionRequest, ActionResponse};
use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, Medication, MedicationAction, MedicationPatch, NewMedication};
use crate::error::ApiResult;
use crate::repository::{ActionRecord, MedicationRepository, Repository};
use crate::AppState;

/// List all medications
pub async fn list_medications(State(state): State<AppState>) -> ApiResult<Json<Vec<Medication>>> {
    Ok(Json(state.repo.list().await?))
}

/// Get medication by ID
pub async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Medication>> {
    let medication = state
        .repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::medication_not_found(&id))?;
    Ok(Json(medication))
}

/// Create a medication with a fresh id
pub async fn create_medication(
    State(state): State<AppState>,
    Json(new): Json<NewMedication>,
) -> ApiResult<(StatusCode, Json<Medication>)> {
    let medication = Medication::create(Uuid::new_v4().to_string(), new, Utc::now())
        .map_err(DomainError::from)?;
    let created = state.repo.create(&medication).await?;

    info!("Created medication {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Merge a partial update into a medication
pub async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MedicationPatch>,
) -> ApiResult<Json<Medication>> {
    let updated = state.repo.patch(&id, patch).await?;
    info!("Updated medication {}", id);
    Ok(Json(updated))
}

pub async fn delete_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.repo.delete(&id).await?;
    info!("Deleted medication {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_taken(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ActionRequest>>,
) -> ApiResult<Json<ActionResponse>> {
    record_action(&state, &id, MedicationAction::Taken, request(body)).await
}

pub async fn snooze(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ActionRequest>>,
) -> ApiResult<Json<ActionResponse>> {
    let request = request(body);
    let minutes = request.snooze_minutes();
    if minutes == 0 {
        return Err(DomainError::InvalidInput("snooze duration must be at least one minute".to_string()).into());
    }
    record_action(&state, &id, MedicationAction::Snoozed { minutes }, request).await
}

pub async fn skip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ActionRequest>>,
) -> ApiResult<Json<ActionResponse>> {
    record_action(&state, &id, MedicationAction::Skipped, request(body)).await
}

fn request(body: Option<Json<ActionRequest>>) -> ActionRequest {
    body.map(|Json(request)| request).unwrap_or_default()
}

async fn record_action(
    state: &AppState,
    id: &str,
    action: MedicationAction,
    request: ActionRequest,
) -> ApiResult<Json<ActionResponse>> {
    let draft = request.history_entry.unwrap_or_default();
    let record = ActionRecord {
        action,
        entry_id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        at: draft.taken_at.unwrap_or_else(Utc::now),
        dose_rule: state.dose_rule,
    };

    let (medication, history_entry) = state.repo.record(id, record).await?;
    info!("Medication {} {}", medication.name, history_entry.describe());

    Ok(Json(ActionResponse {
        medication,
        history_entry,
    }))
}
