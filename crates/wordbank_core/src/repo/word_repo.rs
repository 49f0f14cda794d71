//! Word repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `words` table.
//! - Own the atomic submit path (insert + running-total bump).
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Word::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `submit_word` moves the word row and the counter in one transaction.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::word::{Word, WordId, WordValidationError};
use crate::repo::count_repo::bump_word_count;
use crate::repo::{current_user_version, table_exists, table_has_column};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub(crate) const WORD_SELECT_SQL: &str = "SELECT
    uuid,
    owner,
    word,
    meaning,
    examples,
    created_at
FROM words";

const REQUIRED_WORD_COLUMNS: &[&str] =
    &["uuid", "owner", "word", "meaning", "examples", "created_at"];
const REQUIRED_METADATA_COLUMNS: &[&str] = &["id", "word_count"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for word persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(WordValidationError),
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "word repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "word repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "word repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted word data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordValidationError> for RepoError {
    fn from(value: WordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of an atomic word submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedWord {
    /// Persisted record as read back from the store.
    pub word: Word,
    /// Running total after this submission.
    pub total_count: i64,
}

/// Repository interface for word CRUD operations.
pub trait WordRepository {
    /// Inserts one record unconditionally and returns its stable id.
    ///
    /// No uniqueness constraint applies; the counter is untouched. Callers
    /// pairing this with an explicit counter bump accept that the pair is
    /// not atomic.
    fn create_word(&self, word: &Word) -> RepoResult<WordId>;
    /// Inserts one record and bumps the running total in one transaction.
    fn submit_word(&mut self, word: &Word) -> RepoResult<SubmittedWord>;
    /// Returns every record in store-native insertion order.
    fn list_words(&self) -> RepoResult<Vec<Word>>;
    /// Case-insensitive exact lookup; first match in insertion order.
    fn find_word_by_name(&self, name: &str) -> RepoResult<Option<Word>>;
    /// Case-sensitive exact delete of the oldest matching record.
    ///
    /// Returns `true` when a row was removed, `false` when nothing matched.
    fn delete_word(&self, name: &str) -> RepoResult<bool>;
    /// Returns all records submitted by the given owner.
    fn list_owner_words(&self, owner: &str) -> RepoResult<Vec<Word>>;
}

/// SQLite-backed word repository.
pub struct SqliteWordRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_word_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn create_word(&self, word: &Word) -> RepoResult<WordId> {
        word.validate()?;
        insert_word_row(self.conn, word)?;
        Ok(word.uuid)
    }

    fn submit_word(&mut self, word: &Word) -> RepoResult<SubmittedWord> {
        word.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        insert_word_row(&tx, word)?;
        let total_count = bump_word_count(&tx)?;
        let persisted = load_word_by_id(&tx, word.uuid)?.ok_or_else(|| {
            RepoError::InvalidData("submitted word missing in transactional read-back".to_string())
        })?;

        tx.commit()?;

        Ok(SubmittedWord {
            word: persisted,
            total_count,
        })
    }

    fn list_words(&self) -> RepoResult<Vec<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut words = Vec::new();

        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }

        Ok(words)
    }

    fn find_word_by_name(&self, name: &str) -> RepoResult<Option<Word>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WORD_SELECT_SQL}
             WHERE word = ?1 COLLATE NOCASE
             ORDER BY created_at ASC, rowid ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_word_row(row)?));
        }

        Ok(None)
    }

    fn delete_word(&self, name: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM words
             WHERE rowid = (
                SELECT rowid
                FROM words
                WHERE word = ?1
                ORDER BY created_at ASC, rowid ASC
                LIMIT 1
             );",
            [name],
        )?;

        Ok(changed > 0)
    }

    fn list_owner_words(&self, owner: &str) -> RepoResult<Vec<Word>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WORD_SELECT_SQL}
             WHERE owner = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([owner])?;
        let mut words = Vec::new();

        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }

        Ok(words)
    }
}

pub(crate) fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in words.uuid"))
    })?;

    let examples_text: String = row.get("examples")?;
    let examples = decode_examples(&examples_text)?;

    Ok(Word {
        uuid,
        owner: row.get("owner")?,
        word: row.get("word")?,
        meaning: row.get("meaning")?,
        examples,
        created_at: row.get("created_at")?,
    })
}

fn insert_word_row(conn: &Connection, word: &Word) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO words (uuid, owner, word, meaning, examples)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            word.uuid.to_string(),
            word.owner.as_str(),
            word.word.as_str(),
            word.meaning.as_str(),
            encode_examples(&word.examples)?,
        ],
    )?;
    Ok(())
}

fn load_word_by_id(conn: &Connection, id: WordId) -> RepoResult<Option<Word>> {
    let mut stmt = conn.prepare(&format!("{WORD_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_word_row(row)?));
    }
    Ok(None)
}

fn encode_examples(examples: &[String]) -> RepoResult<String> {
    serde_json::to_string(examples)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode examples: {err}")))
}

fn decode_examples(value: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid examples value `{value}` in words.examples"))
    })
}

fn ensure_word_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "words")? {
        return Err(RepoError::MissingRequiredTable("words"));
    }
    if !table_exists(conn, "metadata")? {
        return Err(RepoError::MissingRequiredTable("metadata"));
    }

    for column in REQUIRED_WORD_COLUMNS.iter().copied() {
        if !table_has_column(conn, "words", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "words",
                column,
            });
        }
    }

    for column in REQUIRED_METADATA_COLUMNS.iter().copied() {
        if !table_has_column(conn, "metadata", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "metadata",
                column,
            });
        }
    }

    Ok(())
}
