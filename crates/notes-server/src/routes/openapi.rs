//! OpenAPI description of the service.
//!
//! The document is written by hand; keep it in step with `routes::notes`.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

pub const API_TITLE: &str = "Notes Vault API";
pub const API_DESCRIPTION: &str = "MVP Notes API: create, list, fetch, and delete notes.";

/// Build the OpenAPI 3.1 document.
pub fn document() -> Value {
    let note_ref = json!({ "$ref": "#/components/schemas/Note" });
    let not_found = json!({
        "description": "Note does not exist",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NotFound" } } }
    });
    let validation = json!({
        "description": "Validation Error",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ValidationError" } } }
    });
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer" }
    });

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "version": env!("CARGO_PKG_VERSION"),
            "description": API_DESCRIPTION
        },
        "paths": {
            "/notes": {
                "get": {
                    "summary": "List Notes",
                    "operationId": "list_notes",
                    "responses": {
                        "200": {
                            "description": "Notes, most recent first",
                            "content": { "application/json": { "schema": { "type": "array", "items": note_ref } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create Note",
                    "operationId": "create_note",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NoteCreate" } } }
                    },
                    "responses": {
                        "201": {
                            "description": "Created",
                            "content": { "application/json": { "schema": note_ref } }
                        },
                        "422": validation
                    }
                }
            },
            "/notes/{id}": {
                "get": {
                    "summary": "Get Note",
                    "operationId": "get_note",
                    "parameters": [id_param],
                    "responses": {
                        "200": {
                            "description": "The note",
                            "content": { "application/json": { "schema": note_ref } }
                        },
                        "404": not_found,
                        "422": validation
                    }
                },
                "delete": {
                    "summary": "Delete Note",
                    "operationId": "delete_note",
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": not_found,
                        "422": validation
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health Check",
                    "operationId": "health_check",
                    "responses": {
                        "200": { "description": "Service and database are up" },
                        "503": { "description": "Database unreachable" }
                    }
                }
            }
        },
        "components": { "schemas": schemas() }
    })
}

fn schemas() -> Value {
    json!({
        "NoteCreate": {
            "type": "object",
            "required": ["content"],
            "properties": {
                "content": {
                    "type": "string",
                    "minLength": notes_core::MIN_CONTENT_CHARS,
                    "maxLength": notes_core::MAX_CONTENT_CHARS
                }
            }
        },
        "Note": {
            "type": "object",
            "required": ["id", "content", "created_at"],
            "properties": {
                "id": { "type": "integer" },
                "content": { "type": "string" },
                "created_at": { "type": "string", "format": "date-time" }
            }
        },
        "NotFound": {
            "type": "object",
            "required": ["error", "message"],
            "properties": {
                "error": { "type": "string", "const": "not_found" },
                "message": { "type": "string" }
            }
        },
        "ValidationError": {
            "type": "object",
            "properties": {
                "detail": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["type", "loc", "msg"],
                        "properties": {
                            "type": { "type": "string" },
                            "loc": { "type": "array", "items": { "type": "string" } },
                            "msg": { "type": "string" },
                            "ctx": { "type": "object" }
                        }
                    }
                }
            }
        }
    })
}

/// GET /openapi.json
async fn openapi_json() -> Json<Value> {
    Json(document())
}

/// Build OpenAPI routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}
