//! Word domain model.
//!
//! # Responsibility
//! - Define the canonical vocabulary record shared by list/detail/page views.
//! - Provide constructors and submission validation.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another word.
//! - `word` keeps the submitted casing verbatim; comparisons for
//!   search/filter/lookup are case-insensitive at the query layer.
//! - Records are never updated in place; removal is a hard delete.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted word record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type WordId = Uuid;

/// Canonical vocabulary record.
///
/// `examples` keeps submission order; the store serializes it as one JSON
/// array column rather than a join table, since examples are only ever read
/// back whole with their word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Stable global ID used for cursors and deletion targeting.
    pub uuid: WordId,
    /// Opaque identifier of the submitting user, supplied by the identity
    /// layer outside this crate.
    pub owner: String,
    /// Display form of the vocabulary entry, casing preserved.
    pub word: String,
    /// Free-form meaning/definition text.
    pub meaning: String,
    /// Usage examples in submission order.
    pub examples: Vec<String>,
    /// Insertion timestamp in epoch milliseconds, assigned at persist time.
    pub created_at: i64,
}

/// Validation failures for word submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordValidationError {
    /// `word` is empty or whitespace-only.
    EmptyWord,
    /// Nil UUID cannot identify a record.
    NilUuid,
}

impl Display for WordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "word must not be empty"),
            Self::NilUuid => write!(f, "word uuid must not be nil"),
        }
    }
}

impl Error for WordValidationError {}

impl Word {
    /// Creates a new word record with a generated stable ID.
    ///
    /// `created_at` starts at zero and is assigned by the store on insert.
    pub fn new(
        owner: impl Into<String>,
        word: impl Into<String>,
        meaning: impl Into<String>,
        examples: Vec<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            owner: owner.into(),
            word: word.into(),
            meaning: meaning.into(),
            examples,
            created_at: 0,
        }
    }

    /// Creates a word record with a caller-provided stable ID.
    ///
    /// Used by import/test paths where identity already exists externally.
    pub fn with_id(
        uuid: WordId,
        owner: impl Into<String>,
        word: impl Into<String>,
        meaning: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<Self, WordValidationError> {
        if uuid.is_nil() {
            return Err(WordValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            owner: owner.into(),
            word: word.into(),
            meaning: meaning.into(),
            examples,
            created_at: 0,
        })
    }

    /// Validates submission invariants before persistence.
    pub fn validate(&self) -> Result<(), WordValidationError> {
        if self.uuid.is_nil() {
            return Err(WordValidationError::NilUuid);
        }
        if self.word.trim().is_empty() {
            return Err(WordValidationError::EmptyWord);
        }
        Ok(())
    }

    /// Case-insensitive equality against another display form.
    pub fn matches_name(&self, name: &str) -> bool {
        self.word.to_lowercase() == name.to_lowercase()
    }
}
