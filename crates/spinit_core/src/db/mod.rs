//! SQLite file backing the key-value blob store.
//!
//! # Responsibility
//! - Open a SQLite file (or in-memory database) that holds `kv_entries`.
//! - Bring its layout up to date before any blob is read or written.
//!
//! # Invariants
//! - The layout version lives in `PRAGMA user_version`.
//! - A file stamped with a newer layout than this build knows is refused
//!   untouched, so stored blobs are never rewritten by an older binary.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the blob database.
#[derive(Debug)]
pub enum DbError {
    /// The database could not be opened or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// A statement against `kv_entries` failed.
    Sqlite(rusqlite::Error),
    /// A layout step failed and was rolled back.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open blob database {target}: {source}")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "layout step {version} ({name}) failed: {source}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "blob database layout {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
