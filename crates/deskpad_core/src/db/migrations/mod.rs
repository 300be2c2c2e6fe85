//! Schema migration registry for the widget state database.
//!
//! # Responsibility
//! - Hold the ordered list of schema migrations shipped with this binary.
//! - Bring a connection from any older schema version to the latest one.
//!
//! # Invariants
//! - Migration versions are strictly increasing, starting at 1.
//! - The applied version is mirrored to `PRAGMA user_version` inside the
//!   same transaction as the schema change.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(version, batch SQL)` pairs in apply order.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Returns the newest schema version this binary understands.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Reads the schema version recorded on the connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Applies every migration newer than the connection's recorded version.
///
/// A database written by a newer binary is rejected rather than guessed at.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let applied = schema_version(conn)?;
    let latest = latest_version();

    if applied > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: applied,
            latest_supported: latest,
        });
    }

    let pending: Vec<_> = MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > applied)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
    }
    tx.commit()?;

    Ok(())
}
