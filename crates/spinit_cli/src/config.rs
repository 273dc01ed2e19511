//! Filesystem layout for the CLI.
//!
//! Data directory resolution order: `--data-dir` flag, `SPINIT_DATA_DIR`
//! environment variable, then `<platform data dir>/spinit`.

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SPINIT_DATA_DIR";
const APP_DIR_NAME: &str = "spinit";
const DB_FILE_NAME: &str = "spinit.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved on-disk locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Resolves the data directory; `None` when no candidate exists.
    pub fn resolve(flag: Option<PathBuf>, log_level: String) -> Option<Self> {
        let data_dir = flag
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)))?;
        let data_dir = absolutize(&data_dir);
        Some(Self {
            data_dir,
            log_level,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
