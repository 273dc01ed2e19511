//! Opening the blob database.
//!
//! # Invariants
//! - Returned connections hold an up-to-date `kv_entries` layout.
//! - Every open attempt emits one `db_open` start event and one outcome event.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const MEMORY_TARGET: &str = ":memory:";

/// Opens the blob database file at `path`, creating it when missing.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(&path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway in-memory blob database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(MEMORY_TARGET, Connection::open_in_memory)
}

fn open_with(
    target: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = if target == MEMORY_TARGET { "memory" } else { "file" };
    info!("event=db_open module=db status=start mode={mode}");

    let result = open()
        .and_then(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(conn)
        })
        .map_err(|source| DbError::Open {
            target: target.to_string(),
            source,
        })
        .and_then(|mut conn| {
            let applied = apply_migrations(&mut conn)?;
            Ok((conn, applied))
        });

    match result {
        Ok((conn, applied)) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} migrations_applied={}",
                mode,
                started_at.elapsed().as_millis(),
                applied
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
