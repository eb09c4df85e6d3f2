//! Database models for the storage layer.
//!
//! `NoteRow` maps one-to-one onto a row of the `notes` table and is
//! converted into the client-facing [`Note`] at the crate boundary.

use chrono::{DateTime, Utc};
use notes_core::{Note, NoteId};
use sqlx::FromRow;

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: NoteId(row.id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}
