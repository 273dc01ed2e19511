//! Layout steps for the blob database.
//!
//! Each step runs inside one transaction together with the
//! `user_version` bump, so a failed step leaves the file at its previous
//! layout with every stored blob intact.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "kv_entries",
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Layout version written by this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the layout version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to [`latest_version`] and returns how many steps ran.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > found);
    let mut applied = 0;
    for migration in pending {
        run_step(conn, migration)?;
        applied += 1;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    Ok(applied)
}

fn run_step(conn: &mut Connection, migration: &Migration) -> DbResult<()> {
    let wrap = |source: rusqlite::Error| DbError::Migration {
        version: migration.version,
        name: migration.name,
        source,
    };
    let tx = conn.transaction().map_err(wrap)?;
    tx.execute_batch(migration.sql).map_err(wrap)?;
    tx.pragma_update(None, "user_version", migration.version)
        .map_err(wrap)?;
    tx.commit().map_err(wrap)
}
