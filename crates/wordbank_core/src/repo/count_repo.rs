//! Running-total repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Maintain the denormalized total-word counter in `metadata`.
//! - Provide the reconciliation path that re-derives the counter from the
//!   word set.
//!
//! # Invariants
//! - At most one `metadata` row exists; it is lazily created on first bump.
//! - The counter is monotonic under increments: deletes never reduce it.
//! - Reconciliation is the only operation allowed to move the counter down.

use crate::db::migrations::latest_version;
use crate::repo::word_repo::{RepoError, RepoResult};
use crate::repo::{current_user_version, table_exists, table_has_column};
use rusqlite::Connection;

/// Repository interface for the total-word counter.
pub trait CountRepository {
    /// Bumps the counter by one, creating the metadata row on first use.
    ///
    /// Returns the resulting total. Not paired with any word insert; callers
    /// composing the two-call workflow own the consistency gap (see
    /// [`crate::repo::word_repo::WordRepository::submit_word`] for the
    /// transactional alternative).
    fn increment_word_count(&self) -> RepoResult<i64>;
    /// Returns the current total, `0` when the metadata row is absent.
    fn total_word_count(&self) -> RepoResult<i64>;
    /// Re-derives the counter from the actual word-set size.
    ///
    /// Intended as a periodic correction for drift left behind by the
    /// non-transactional create+bump pair.
    fn recount_words(&self) -> RepoResult<i64>;
}

/// SQLite-backed counter repository.
pub struct SqliteCountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_count_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CountRepository for SqliteCountRepository<'_> {
    fn increment_word_count(&self) -> RepoResult<i64> {
        bump_word_count(self.conn)
    }

    fn total_word_count(&self) -> RepoResult<i64> {
        read_word_count(self.conn)
    }

    fn recount_words(&self) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO metadata (id, word_count)
             VALUES (1, (SELECT COUNT(*) FROM words))
             ON CONFLICT(id) DO UPDATE SET word_count = excluded.word_count;",
            [],
        )?;
        read_word_count(self.conn)
    }
}

/// Bumps the counter on any ready connection, including open transactions.
pub(crate) fn bump_word_count(conn: &Connection) -> RepoResult<i64> {
    conn.execute(
        "INSERT INTO metadata (id, word_count)
         VALUES (1, 1)
         ON CONFLICT(id) DO UPDATE SET word_count = word_count + 1;",
        [],
    )?;
    read_word_count(conn)
}

fn read_word_count(conn: &Connection) -> RepoResult<i64> {
    let mut stmt = conn.prepare("SELECT word_count FROM metadata WHERE id = 1;")?;
    let mut rows = stmt.query([])?;
    if let Some(row) = rows.next()? {
        let count: i64 = row.get(0)?;
        return Ok(count);
    }
    Ok(0)
}

fn ensure_count_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "metadata")? {
        return Err(RepoError::MissingRequiredTable("metadata"));
    }

    for column in ["id", "word_count"] {
        if !table_has_column(conn, "metadata", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "metadata",
                column,
            });
        }
    }

    Ok(())
}
