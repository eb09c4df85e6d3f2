//! Data-access operations on notes.
//!
//! A `Session` owns one pooled connection for its lifetime. Writes run in an
//! explicit transaction and commit before returning; reads run directly on the
//! connection. No content validation happens here.

use chrono::{DateTime, SecondsFormat, Utc};
use notes_core::{Note, NoteId};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite};

use crate::error::StoreResult;
use crate::models::NoteRow;

/// A request-scoped handle on the store.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub(crate) fn new(conn: PoolConnection<Sqlite>) -> Self {
        Self { conn }
    }

    /// Insert a note stamped with the current time.
    ///
    /// Returns the stored row, including the generated id.
    pub async fn create(&mut self, content: &str) -> StoreResult<Note> {
        let created_at = format_timestamp(Utc::now());

        let mut tx = self.conn.begin().await?;

        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO notes (content, created_at)
            VALUES (?, ?)
            RETURNING id, content, created_at
            "#,
        )
        .bind(content)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(note_id = row.id, "Note inserted");
        Ok(row.into())
    }

    /// All notes, most recent first.
    ///
    /// Notes created within the same microsecond fall back to id order, newest first.
    pub async fn list(&mut self) -> StoreResult<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, content, created_at
            FROM notes
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    /// Look up a note by id. `None` if it does not exist.
    pub async fn get(&mut self, id: NoteId) -> StoreResult<Option<Note>> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"SELECT id, content, created_at FROM notes WHERE id = ?"#,
        )
        .bind(id.get())
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(Note::from))
    }

    /// Delete a note by id.
    ///
    /// Returns `false` without touching the table if the note does not exist.
    pub async fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let mut tx = self.conn.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as(r#"SELECT id FROM notes WHERE id = ?"#)
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(r#"DELETE FROM notes WHERE id = ?"#)
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(note_id = id.get(), "Note deleted");
        Ok(true)
    }
}

/// Fixed-width RFC 3339 in UTC, so that text order in SQLite is time order.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreConfig};

    async fn session() -> (Store, Session) {
        let store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        let session = store.session().await.unwrap();
        (store, session)
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let whole = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let fractional = DateTime::parse_from_rfc3339("2024-05-01T12:00:00.5Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(format_timestamp(whole), "2024-05-01T12:00:00.000000Z");
        assert_eq!(format_timestamp(fractional), "2024-05-01T12:00:00.500000Z");
        assert!(format_timestamp(whole) < format_timestamp(fractional));
    }

    #[tokio::test]
    async fn test_create_note_persists() {
        let (_store, mut session) = session().await;

        let note = session.create("hello crud").await.unwrap();
        assert!(note.id.get() > 0);
        assert_eq!(note.content, "hello crud");

        let fetched = session.get(note.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, note.id);
        assert_eq!(fetched.content, "hello crud");
        assert_eq!(fetched.created_at, note.created_at);
    }

    #[tokio::test]
    async fn test_create_preserves_multibyte_content() {
        let (_store, mut session) = session().await;

        let content = "naïve café ✓ 日本語";
        let note = session.create(content).await.unwrap();
        let fetched = session.get(note.id).await.unwrap().unwrap();
        assert_eq!(fetched.content, content);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_store, mut session) = session().await;
        assert!(session.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let (_store, mut session) = session().await;

        let a = session.create("a").await.unwrap();
        let b = session.create("b").await.unwrap();
        let c = session.create("c").await.unwrap();

        let ids: Vec<NoteId> = session.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at_over_id() {
        let (_store, mut session) = session().await;

        // A row with a later timestamp but a smaller id still sorts first.
        sqlx::query("INSERT INTO notes (content, created_at) VALUES (?, ?)")
            .bind("future")
            .bind("2999-01-01T00:00:00.000000Z")
            .execute(&mut *session.conn)
            .await
            .unwrap();
        session.create("now").await.unwrap();

        let contents: Vec<String> = session
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.content)
            .collect();
        assert_eq!(contents, vec!["future", "now"]);
    }

    #[tokio::test]
    async fn test_get_note_missing_returns_none() {
        let (_store, mut session) = session().await;
        assert!(session.get(NoteId(123456)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_note_returns_bool() {
        let (_store, mut session) = session().await;

        let note = session.create("to delete").await.unwrap();

        assert!(session.delete(note.id).await.unwrap());
        assert!(session.get(note.id).await.unwrap().is_none());

        assert!(!session.delete(note.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_other_notes() {
        let (_store, mut session) = session().await;

        let keep = session.create("keep").await.unwrap();
        assert!(!session.delete(NoteId(keep.id.get() + 100)).await.unwrap());

        let notes = session.list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (_store, mut session) = session().await;

        let first = session.create("first").await.unwrap();
        assert!(session.delete(first.id).await.unwrap());

        let second = session.create("second").await.unwrap();
        assert!(second.id > first.id);
    }
}
