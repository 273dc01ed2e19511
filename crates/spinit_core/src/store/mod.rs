//! Key-value blob persistence with JSON encode/decode.
//!
//! # Responsibility
//! - Define the opaque `KvStore` contract every repository writes through.
//! - Provide `save`/`load` helpers that (de)serialize JSON values.
//!
//! # Invariants
//! - `load` never fails: absent, unparsable, `null` or wrongly-shaped blobs
//!   resolve to the caller-provided fallback.
//! - `save` propagates backend write failures unchanged.

use crate::db::DbError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Persisted key holding the task list.
pub const TASKS_KEY: &str = "spinit_tasks";
/// Persisted key holding the note list.
pub const NOTES_KEY: &str = "spinit_notes";
/// Persisted key holding the per-day focus minutes map.
pub const SESSIONS_KEY: &str = "spinit_sessions";
/// Persisted key holding the cumulative stats aggregate.
pub const STATS_KEY: &str = "spinit_stats";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for backend access and value encoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode value for `{key}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque persistent key-value blob store.
///
/// Writes take `&self`: the store is shared by every repository of one
/// application and all access happens on a single thread.
pub trait KvStore {
    /// Reads the raw blob stored under `key`.
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the raw blob stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for std::rc::Rc<S> {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }
}

/// Serializes `value` as JSON and writes it under `key`.
pub fn save<S, T>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: KvStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_raw(key, &encoded)?;
    debug!(
        "event=store_save module=store status=ok key={} bytes={}",
        key,
        encoded.len()
    );
    Ok(())
}

/// Reads and deserializes the value under `key`, or returns `fallback`.
///
/// Backend read errors and decode errors are logged and swallowed.
pub fn load<S, T>(store: &S, key: &str, fallback: T) -> T
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={} error_code=read_failed error={}",
                key, err
            );
            return fallback;
        }
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={} error_code=decode_failed error={}",
                key, err
            );
            fallback
        }
    }
}
