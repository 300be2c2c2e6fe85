//! Record persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the key/value record access contract used by the services.
//! - Keep SQLite details behind the persistence boundary.
//!
//! # Invariants
//! - The SQLite implementation refuses connections that have not been
//!   migrated by `db::open_db` / `db::open_db_in_memory`.

pub mod state_repo;
