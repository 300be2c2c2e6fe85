//! Widget state record store: contract plus SQLite and in-memory backends.
//!
//! # Responsibility
//! - Provide durable read/write access to named JSON records.
//! - Validate connection readiness before any record access.
//!
//! # Invariants
//! - A record write replaces the whole value for its key.
//! - Record values are opaque text at this layer; decoding policy lives in
//!   the services.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const STATE_TABLE: &str = "widget_state";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record persistence errors.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Durable key/value record access used by every widget service.
///
/// Implementations own no decoding policy; values are whole JSON documents
/// written and read as text.
pub trait StateStore {
    /// Reads the record stored under `key`, if any.
    fn read_record(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the record stored under `key`.
    fn write_record(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_record(key)
    }

    fn write_record(&mut self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_record(key, value)
    }
}

/// SQLite-backed record store.
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    /// Constructs a store from a migrated, ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM widget_state WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_record(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO widget_state (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory record store for isolated service tests and host embedding
/// without durability.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: HashMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one record directly, bypassing the services. Test scaffolding
    /// for malformed-payload paths.
    pub fn seed(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.records.insert(key.into(), value.into());
    }
}

impl StateStore for MemoryStateStore {
    fn read_record(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn write_record(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = schema_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_present: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [STATE_TABLE],
            |row| row.get(0),
        )
        .optional()?;
    if table_present.is_none() {
        return Err(RepoError::MissingRequiredTable(STATE_TABLE));
    }

    Ok(())
}
