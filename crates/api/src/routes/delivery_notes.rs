//! Delivery note endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{DeliveryNote, DeliveryNoteService, NewDeliveryNote, NoteId};
use note_store::NoteStore;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: NoteStore> {
    pub delivery_notes: DeliveryNoteService<S>,
}

/// POST /delivery-notes: create a note with its items.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<NewDeliveryNote>, JsonRejection>,
) -> Result<(StatusCode, Json<DeliveryNote>), ApiError> {
    let Json(input) = payload?;
    let note = state.delivery_notes.create(input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /delivery-notes: list all notes.
#[tracing::instrument(skip(state))]
pub async fn list<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<DeliveryNote>>, ApiError> {
    Ok(Json(state.delivery_notes.list().await?))
}

/// GET /delivery-notes/{id}: load one note.
#[tracing::instrument(skip(state))]
pub async fn get<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeliveryNote>, ApiError> {
    let id = parse_note_id(&id)?;
    Ok(Json(state.delivery_notes.get(id).await?))
}

/// POST /delivery-notes/{id}/send: move a note to `pending_sign`.
#[tracing::instrument(skip(state))]
pub async fn send<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeliveryNote>, ApiError> {
    let id = parse_note_id(&id)?;
    Ok(Json(state.delivery_notes.send(id).await?))
}

fn parse_note_id(id: &str) -> Result<NoteId, ApiError> {
    id.parse::<NoteId>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
