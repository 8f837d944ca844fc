//! High-level task store API.
//!
//! [`TaskStore`] is the entry point the CLI talks to. It owns the paths of the
//! two SQLite files and coordinates every operation across them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI / shell   │───▶│    TaskStore    │───▶│  primary store  │
//! │                 │    │  (task_ops,     │    │   (tasks.db)    │
//! │                 │    │   search_ops,   │───▶│  search index   │
//! │                 │    │   maintenance)  │    │(search_tasks.db)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every mutation writes the primary store first and, once that commits,
//! replays itself against the search index with lower-cased values. A failed
//! replay never undoes the primary write; it is logged and handed back in the
//! returned [`Synced`] so the caller can report it. `rebuild_index` repairs
//! the drift.
//!
//! Each operation opens its own connections on a blocking thread and drops
//! them before returning. Mutations hold an async lock for the primary and
//! mirror writes together, so the mirror can never lead the primary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskmate_core::{NewTask, SearchFilter, TaskStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TaskStoreBuilder::new()
//!     .with_database_path(Some("tasks.db"))
//!     .build()
//!     .await?;
//!
//! let id = store
//!     .add(&NewTask::new("Write report", "Finish project report", "Work", "15.10.2023", "High"))
//!     .await?
//!     .into_value();
//!
//! let found = store.search(&SearchFilter::new().with_category("WORK")).await?;
//! assert_eq!(found, vec![id]);
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::warn;
use tokio::sync::Mutex;

use crate::{
    db::{Database, StoreKind},
    error::{Result, TaskError},
};

pub mod builder;
pub mod maintenance;
pub mod search_ops;
pub mod synced;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::TaskStoreBuilder;
pub use synced::Synced;

/// Main interface for storing and searching tasks.
#[derive(Debug, Clone)]
pub struct TaskStore {
    pub(crate) primary_path: PathBuf,
    pub(crate) index_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl TaskStore {
    /// Creates a store over the given primary and index files.
    pub(crate) fn new(primary_path: PathBuf, index_path: PathBuf) -> Self {
        Self {
            primary_path,
            index_path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the primary database file.
    pub fn database_path(&self) -> &Path {
        &self.primary_path
    }

    /// Path of the search index database file.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }
}

/// Replays a committed primary mutation against the search index.
///
/// Returns the failure, if any, instead of propagating it: the primary write
/// has already committed and stays.
pub(crate) fn replay_on_index<F>(
    index_path: &Path,
    id: u64,
    operation: &'static str,
    apply: F,
) -> Option<TaskError>
where
    F: FnOnce(&mut Database) -> Result<()>,
{
    let outcome = Database::new(index_path, StoreKind::SearchIndex).and_then(|mut db| apply(&mut db));

    match outcome {
        Ok(()) => None,
        Err(e) => {
            warn!("Search index {operation} failed for task {id}: {e}");
            Some(TaskError::index_sync(id, operation, e))
        }
    }
}
