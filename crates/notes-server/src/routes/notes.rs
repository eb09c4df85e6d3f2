//! Note routes.
//!
//! - POST /notes - Create a note
//! - GET /notes - List all notes, newest first
//! - GET /notes/{id} - Fetch one note
//! - DELETE /notes/{id} - Delete one note

use axum::{Json, Router, http::StatusCode, routing::get};
use notes_core::Note;

use crate::error::{ApiError, ApiResult};
use crate::extract::{DbSession, NotePath, ValidNote};
use crate::state::AppState;

/// POST /notes - Create a new note.
///
/// # Request
///
/// Body: `{ "content": "..." }`, 1 to 2000 characters.
///
/// # Response
///
/// - 201 Created: `{ "id": 1, "content": "...", "created_at": "..." }`
/// - 422 Unprocessable Entity: content missing, wrong type, or out of bounds
async fn create_note(
    DbSession(mut session): DbSession,
    ValidNote(content): ValidNote,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = session.create(content.as_str()).await?;

    tracing::info!(note_id = %note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes - List all notes, most recent first.
async fn list_notes(DbSession(mut session): DbSession) -> ApiResult<Json<Vec<Note>>> {
    let notes = session.list().await?;

    tracing::debug!(count = notes.len(), "Listed notes");

    Ok(Json(notes))
}

/// GET /notes/{id} - Fetch a single note.
///
/// # Response
///
/// - 200 OK: the note
/// - 404 Not Found: `{ "error": "not_found", "message": "Note {id} does not exist" }`
async fn get_note(
    NotePath(id): NotePath,
    DbSession(mut session): DbSession,
) -> ApiResult<Json<Note>> {
    session
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// DELETE /notes/{id} - Delete a note.
///
/// # Response
///
/// - 204 No Content: deleted
/// - 404 Not Found: same body as GET
async fn delete_note(
    NotePath(id): NotePath,
    DbSession(mut session): DbSession,
) -> ApiResult<StatusCode> {
    if !session.delete(id).await? {
        return Err(ApiError::NotFound(id));
    }

    tracing::info!(note_id = %id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).delete(delete_note))
}
