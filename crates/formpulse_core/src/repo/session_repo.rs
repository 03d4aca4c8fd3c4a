//! Session repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide string-keyed get/set/clear over persistent local storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Values survive process restarts when backed by a file database.
//! - `clear` removes every persisted key, not only the session identity keys.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "TOKEN";
/// Key under which the signed-in user's display name is persisted.
pub const NAME_KEY: &str = "NAME";
/// Key under which the signed-in user's email is persisted.
pub const EMAIL_KEY: &str = "EMAIL";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for session persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
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

/// String-keyed persistent storage for session state.
///
/// Mirrors the browser-storage contract the store was designed against:
/// process-wide, string values, surviving restarts.
pub trait SessionRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes every persisted key. Logout relies on this being a full wipe.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed session repository.
///
/// Owns its connection so the store can hold it without lifetime plumbing.
pub struct SqliteSessionRepository {
    conn: Connection,
}

impl SqliteSessionRepository {
    /// Opens (and migrates) the session store at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory session store that forgets everything on drop.
    pub fn in_memory() -> RepoResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM kv_entries;", [])?;
        Ok(())
    }
}
