//! API error types with JSON responses.
//!
//! Two body shapes reach clients:
//! - validation failures: `{"detail": [{"type", "loc", "msg", "ctx"?}, ...]}` (422)
//! - everything else: `{"error": <code>, "message": <text>}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_core::{ContentError, NoteId};
use serde::Serialize;
use serde_json::{Value, json};

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request failed validation (422).
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Note does not exist (404).
    #[error("Note {0} does not exist")]
    NotFound(NoteId),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] notes_store::StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for a single field error.
    pub fn field(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

/// One entry of a validation error body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Machine-readable kind, e.g. `string_too_short`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Where the bad value came from, e.g. `["body", "content"]`.
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// Constraint parameters, e.g. `{"min_length": 1}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    pub fn new(kind: &str, loc: &[&str], msg: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            ctx: None,
        }
    }

    pub fn with_ctx(mut self, ctx: Value) -> Self {
        self.ctx = Some(ctx);
        self
    }
}

impl From<ContentError> for FieldError {
    fn from(err: ContentError) -> Self {
        let ctx = match err {
            ContentError::TooShort { min, .. } => json!({ "min_length": min }),
            ContentError::TooLong { max, .. } => json!({ "max_length": max }),
        };
        FieldError::new(err.kind(), &["body", "content"], err.to_string()).with_ctx(ctx)
    }
}

/// JSON body for non-validation errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// JSON body for validation errors.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub detail: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::Validation(detail) => (status, Json(ValidationResponse { detail })).into_response(),
            Self::NotFound(_) => {
                let body = ErrorResponse {
                    error: self.code().to_string(),
                    message: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
            Self::Store(_) => {
                tracing::error!(error = %self, "Request failed");
                let body = ErrorResponse {
                    error: self.code().to_string(),
                    message: "internal server error".to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ApiError::NotFound(NoteId(42));
        assert_eq!(err.to_string(), "Note 42 does not exist");
        assert_eq!(err.code(), "not_found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_content_error_to_field_error() {
        let field: FieldError = ContentError::TooShort { min: 1, actual: 0 }.into();
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "string_too_short");
        assert_eq!(json["loc"], json!(["body", "content"]));
        assert_eq!(json["msg"], "String should have at least 1 character");
        assert_eq!(json["ctx"], json!({ "min_length": 1 }));
    }

    #[test]
    fn test_field_error_omits_empty_ctx() {
        let field = FieldError::new("missing", &["body", "content"], "Field required");
        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("ctx").is_none());
    }

    #[test]
    fn test_validation_status_and_summary() {
        let err = ApiError::field(FieldError::new("int_parsing", &["path", "id"], "bad id"));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "validation failed: path.id: bad id");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err = ApiError::from(notes_store::StoreError::Schema("boom".to_string()));
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
