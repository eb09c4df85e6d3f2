//! Core data types for the Notes Vault service.
//!
//! A note is immutable once written: the store assigns its id and creation
//! time, and nothing updates it afterwards. The only rule the service enforces
//! on input is the length of the note's text, which lives in [`NoteContent`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fewest characters a note may contain.
pub const MIN_CONTENT_CHARS: usize = 1;

/// Most characters a note may contain.
pub const MAX_CONTENT_CHARS: usize = 2000;

// ============================================================================
// ID Types
// ============================================================================

/// Identifier of a note, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// ============================================================================
// Content
// ============================================================================

/// Reasons a piece of note text is rejected.
///
/// Lengths are counted in characters (Unicode scalar values), not bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// Fewer than [`MIN_CONTENT_CHARS`] characters.
    #[error("String should have at least {min} character{}", plural(.min))]
    TooShort { min: usize, actual: usize },

    /// More than [`MAX_CONTENT_CHARS`] characters.
    #[error("String should have at most {max} character{}", plural(.max))]
    TooLong { max: usize, actual: usize },
}

impl ContentError {
    /// Machine-readable kind, used as the `type` of a validation error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "string_too_short",
            Self::TooLong { .. } => "string_too_long",
        }
    }
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 { "" } else { "s" }
}

/// Note text that satisfies the length bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    /// Validate `content` against [`MIN_CONTENT_CHARS`]..=[`MAX_CONTENT_CHARS`].
    pub fn parse(content: String) -> Result<Self, ContentError> {
        let actual = content.chars().count();
        if actual < MIN_CONTENT_CHARS {
            return Err(ContentError::TooShort {
                min: MIN_CONTENT_CHARS,
                actual,
            });
        }
        if actual > MAX_CONTENT_CHARS {
            return Err(ContentError::TooLong {
                max: MAX_CONTENT_CHARS,
                actual,
            });
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Note
// ============================================================================

/// A persisted note, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
