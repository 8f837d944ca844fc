//! Database operations and SQLite management for task records.
//!
//! Both the primary store and the search index are plain SQLite files with
//! the same `tasks` schema. A [`Database`] is opened against one of them and
//! carries a [`StoreKind`] naming which one it is, so the target store is
//! always an explicit handle rather than shared state.

use std::{fmt, path::Path};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod schema;
pub mod search_queries;
pub mod task_queries;

/// Which of the two task stores a connection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Canonical records, as entered
    Primary,
    /// Lower-cased mirror used only for search
    SearchIndex,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Primary => write!(f, "primary store"),
            StoreKind::SearchIndex => write!(f, "search index"),
        }
    }
}

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
    kind: StoreKind,
}

impl Database {
    /// Opens a connection and ensures the schema exists.
    pub fn new<P: AsRef<Path>>(path: P, kind: StoreKind) -> Result<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection, kind };
        db.initialize_schema()?;
        Ok(db)
    }

    /// The store this connection writes to.
    pub fn kind(&self) -> StoreKind {
        self.kind
    }
}
