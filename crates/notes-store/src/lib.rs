//! notes-store: storage layer for the Notes Vault service
//!
//! This crate provides:
//! - SQLite storage for the single `notes` table
//! - Schema bootstrap on connect (no migration tooling)
//! - The data-access operations: create, list, get, delete
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{Store, StoreConfig};
//!
//! let store = Store::connect(StoreConfig::from_env()?).await?;
//!
//! // One session per unit of work; the connection is released on drop.
//! let mut session = store.session().await?;
//! let note = session.create("hello").await?;
//! assert!(session.get(note.id).await?.is_some());
//! ```

pub mod error;
pub mod models;
pub mod schema;
pub mod session;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::NoteRow;
pub use session::Session;
pub use store::{Store, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
