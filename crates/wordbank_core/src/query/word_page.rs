//! Cursor-based page loader over the word set.
//!
//! # Responsibility
//! - Load filtered, newest-first pages for global and owner-scoped views.
//! - Resolve the opaque id cursor positionally against the current snapshot.
//!
//! # Invariants
//! - Filtering happens before pagination, so `limit` bounds the filtered
//!   result.
//! - A cursor that no longer matches the filtered sequence yields an empty
//!   page, never an error and never a fallback scan.
//! - Pages never exceed `limit` items.

use crate::db::DbError;
use crate::model::word::{Word, WordId};
use crate::repo::word_repo::{parse_word_row, RepoError, WORD_SELECT_SQL};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for page-loading APIs.
pub type PageResult<T> = Result<T, PageError>;

/// Page-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum PageError {
    Db(DbError),
    InvalidData(String),
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid page row: {message}"),
        }
    }
}

impl Error for PageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for PageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for PageError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Page options shared by the global and owner-scoped entry points.
///
/// The loader is stateless: every call re-reads the store, so two calls with
/// the same options can observe different snapshots when writes land in
/// between. The only cross-call token is the `starts_after` id cursor.
#[derive(Debug, Clone, Default)]
pub struct WordPageQuery {
    /// Maximum records per page. Zero yields an empty page.
    pub limit: u32,
    /// Id of the last record seen on the previous page.
    pub starts_after: Option<WordId>,
    /// Case-insensitive substring filter on the display form.
    pub search: Option<String>,
    /// Single-letter filter on the first character, case-insensitive on
    /// both sides.
    pub first_letter: Option<char>,
}

impl WordPageQuery {
    /// Creates a first-page query with no filters.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            starts_after: None,
            search: None,
            first_letter: None,
        }
    }
}

/// Loads one page across the whole word set, newest first.
pub fn load_word_page(conn: &Connection, query: &WordPageQuery) -> PageResult<Vec<Word>> {
    let base = load_base_set(conn, None)?;
    Ok(shape_page(base, query))
}

/// Loads one page across a single owner's words, newest first.
pub fn load_owner_word_page(
    conn: &Connection,
    owner: &str,
    query: &WordPageQuery,
) -> PageResult<Vec<Word>> {
    let base = load_base_set(conn, Some(owner))?;
    Ok(shape_page(base, query))
}

fn load_base_set(conn: &Connection, owner: Option<&str>) -> PageResult<Vec<Word>> {
    let mut words = Vec::new();

    match owner {
        Some(owner) => {
            let mut stmt = conn.prepare(&format!(
                "{WORD_SELECT_SQL}
                 WHERE owner = ?1
                 ORDER BY created_at DESC, rowid DESC;"
            ))?;
            let mut rows = stmt.query([owner])?;
            while let Some(row) = rows.next()? {
                words.push(parse_word_row(row)?);
            }
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "{WORD_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
            ))?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                words.push(parse_word_row(row)?);
            }
        }
    }

    Ok(words)
}

/// Applies filters, resolves the cursor, and slices the page.
///
/// Sequencing is load-bearing for cursor stability: the cursor position is
/// looked up in the already-filtered ordered sequence, so changing filters
/// between pages invalidates the cursor by design.
fn shape_page(mut words: Vec<Word>, query: &WordPageQuery) -> Vec<Word> {
    if let Some(search) = query.search.as_deref() {
        let needle = search.to_lowercase();
        words.retain(|word| word.word.to_lowercase().contains(&needle));
    }

    if let Some(letter) = query.first_letter {
        words.retain(|word| {
            word.word
                .chars()
                .next()
                .is_some_and(|first| chars_eq_ignore_case(first, letter))
        });
    }

    let limit = query.limit as usize;

    if let Some(cursor) = query.starts_after {
        let Some(index) = words.iter().position(|word| word.uuid == cursor) else {
            // Stale cursor: the record was deleted or filtered out. Empty
            // page, indistinguishable from end-of-data by contract.
            return Vec::new();
        };
        return words.into_iter().skip(index + 1).take(limit).collect();
    }

    words.truncate(limit);
    words
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a.to_uppercase().eq(b.to_uppercase())
}
