//! notes-core: shared types for the Notes Vault service.
//!
//! This crate defines:
//! - [`Note`], the record returned to clients
//! - [`NoteId`], the store-assigned integer identifier
//! - [`NoteContent`], note text that has passed the length check
//!
//! It performs no I/O; the storage and HTTP crates build on it.

pub mod types;

pub use types::{ContentError, MAX_CONTENT_CHARS, MIN_CONTENT_CHARS, Note, NoteContent, NoteId};
