//! Core library for the taskmate task tracker.
//!
//! This crate stores task records in a primary SQLite database and keeps a
//! lower-cased mirror of every record in a second database used only for
//! case-insensitive search.
//!
//! - [`models`]: task records, the closed set of updatable fields, change
//!   sets, selectors and search filters
//! - [`db`]: SQLite access against one store at a time
//! - [`store`]: [`TaskStore`], which runs every operation across both stores
//! - [`display`]: markdown formatting for tasks and operation results
//!
//! # Quick Start
//!
//! ```rust
//! use taskmate_core::{NewTask, SearchFilter, Selector, TaskChanges, TaskStoreBuilder};
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
//! let done = store.update(id, &TaskChanges::mark_done()).await?.into_value();
//! assert_eq!(done.status, "done");
//!
//! let ids = store.search(&SearchFilter::new().with_keyword("REPORT")).await?;
//! let tasks = store.get(&Selector::Many(ids)).await?;
//! println!("{} matching tasks", tasks.len());
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use db::{Database, StoreKind};
pub use display::{Categories, CreateResult, DeleteResult, OperationStatus, Tasks, UpdateResult};
pub use error::{Result, TaskError};
pub use models::{
    Fetched, NewTask, SearchFilter, Selector, Task, TaskChanges, TaskField, DEFAULT_STATUS,
    DONE_STATUS,
};
pub use store::{Synced, TaskStore, TaskStoreBuilder};
