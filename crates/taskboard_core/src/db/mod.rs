//! SQLite task store: connection setup and schema upgrades.
//!
//! # Responsibility
//! - Hand out connections whose `tasks` schema matches this build.
//! - Report which store (file path or memory) and which schema step failed.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A store written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The store at `target` could not be opened or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// A schema step failed; the whole upgrade was rolled back.
    Migration {
        version: u32,
        step: &'static str,
        source: rusqlite::Error,
    },
    /// The store was created by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Statement failure after the store is open.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open task store `{target}`: {source}")
            }
            Self::Migration {
                version,
                step,
                source,
            } => write!(f, "task schema step {version} ({step}) failed: {source}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "task store schema v{found} is newer than this build (v{supported})"
            ),
            Self::Sqlite(err) => write!(f, "task store query failed: {err}"),
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
