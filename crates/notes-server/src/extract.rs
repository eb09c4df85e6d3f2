//! Request extractors.
//!
//! Every rejection is an [`ApiError`], so malformed input produces the same
//! 422 body as a length violation instead of axum's plain-text rejections.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, header, request::Parts},
};
use notes_core::{NoteContent, NoteId};
use notes_store::Session;
use serde_json::{Value, json};

use crate::error::{ApiError, FieldError};
use crate::state::AppState;

/// A store session opened for the current request.
///
/// The underlying connection goes back to the pool when the handler returns,
/// whether it succeeded or not.
pub struct DbSession(pub Session);

impl FromRequestParts<AppState> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.store().session().await?;
        Ok(Self(session))
    }
}

/// The `{id}` path segment, parsed as a note id.
pub struct NotePath(pub NoteId);

impl<S> FromRequestParts<S> for NotePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A segment that does not decode to UTF-8 cannot be an integer either.
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected path parameter");
                return Err(invalid_id());
            }
        };

        raw.parse::<NoteId>().map(Self).map_err(|_| invalid_id())
    }
}

fn invalid_id() -> ApiError {
    ApiError::field(FieldError::new(
        "int_parsing",
        &["path", "id"],
        "Input should be a valid integer, unable to parse string as an integer",
    ))
}

/// A POST /notes body whose content passed validation.
pub struct ValidNote(pub NoteContent);

impl<S> FromRequest<S> for ValidNote
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = is_json_body(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Failed to read request body");
            ApiError::field(FieldError::new(
                "json_invalid",
                &["body"],
                rejection.body_text(),
            ))
        })?;

        if bytes.is_empty() {
            return Err(missing_body());
        }
        if !json_body {
            return Err(not_an_object());
        }

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            ApiError::field(
                FieldError::new("json_invalid", &["body"], "JSON decode error")
                    .with_ctx(json!({ "error": e.to_string() })),
            )
        })?;

        let content = match body {
            Value::Object(mut fields) => match fields.remove("content") {
                Some(Value::String(content)) => content,
                Some(_) => {
                    return Err(ApiError::field(FieldError::new(
                        "string_type",
                        &["body", "content"],
                        "Input should be a valid string",
                    )));
                }
                None => {
                    return Err(ApiError::field(FieldError::new(
                        "missing",
                        &["body", "content"],
                        "Field required",
                    )));
                }
            },
            Value::Null => return Err(missing_body()),
            _ => return Err(not_an_object()),
        };

        NoteContent::parse(content)
            .map(Self)
            .map_err(|e| ApiError::field(e.into()))
    }
}

/// A body without a content type is read as JSON, as is any `application/json`
/// or `+json` media type.
fn is_json_body(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn missing_body() -> ApiError {
    ApiError::field(FieldError::new("missing", &["body"], "Field required"))
}

fn not_an_object() -> ApiError {
    ApiError::field(FieldError::new(
        "model_attributes_type",
        &["body"],
        "Input should be a valid dictionary or object to extract fields from",
    ))
}
