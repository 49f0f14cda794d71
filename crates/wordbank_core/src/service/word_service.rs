//! Word use-case service.
//!
//! # Responsibility
//! - Provide stable submit/list/lookup/delete entry points for core callers.
//! - Build validated records from raw submission fields.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service layer remains storage-agnostic.

use crate::model::word::{Word, WordId, WordValidationError};
use crate::repo::word_repo::{RepoError, RepoResult, SubmittedWord, WordRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for word use-cases.
#[derive(Debug)]
pub enum WordServiceError {
    /// Submission fields failed validation.
    InvalidSubmission(WordValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for WordServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSubmission(err) => write!(f, "invalid word submission: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WordServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSubmission(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for WordServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidSubmission(err),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for word operations.
pub struct WordService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> WordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Submits one word: insert plus counter bump in a single transaction.
    ///
    /// # Contract
    /// - `word` must be non-empty after trimming.
    /// - Returns the persisted record and the running total after it.
    pub fn submit_word(
        &mut self,
        owner: impl Into<String>,
        word: impl Into<String>,
        meaning: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<SubmittedWord, WordServiceError> {
        let record = Word::new(owner, word, meaning, examples);
        record.validate().map_err(WordServiceError::InvalidSubmission)?;

        let submitted = self.repo.submit_word(&record)?;
        info!(
            "event=word_submit module=service status=ok word_id={} total_count={}",
            submitted.word.uuid, submitted.total_count
        );
        Ok(submitted)
    }

    /// Inserts one word without touching the counter.
    ///
    /// Kept for callers that drive the counter bump as a separate call; the
    /// pair is not atomic and can drift on partial failure.
    pub fn create_word(
        &self,
        owner: impl Into<String>,
        word: impl Into<String>,
        meaning: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<WordId, WordServiceError> {
        let record = Word::new(owner, word, meaning, examples);
        record.validate().map_err(WordServiceError::InvalidSubmission)?;
        Ok(self.repo.create_word(&record)?)
    }

    /// Returns every stored word in insertion order.
    pub fn list_words(&self) -> RepoResult<Vec<Word>> {
        self.repo.list_words()
    }

    /// Case-insensitive exact lookup by display form.
    pub fn find_word_by_name(&self, name: &str) -> RepoResult<Option<Word>> {
        self.repo.find_word_by_name(name)
    }

    /// Deletes the oldest record matching the display form exactly.
    pub fn delete_word(&self, name: &str) -> RepoResult<bool> {
        self.repo.delete_word(name)
    }

    /// Returns all words submitted by one owner.
    pub fn list_owner_words(&self, owner: &str) -> RepoResult<Vec<Word>> {
        self.repo.list_owner_words(owner)
    }
}
