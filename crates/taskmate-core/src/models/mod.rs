//! Data models for task records.
//!
//! Display implementations for these models live in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use taskmate_core::models::{NewTask, TaskChanges, TaskField};
//!
//! let new_task = NewTask::new("Write report", "Finish project report", "Work", "15.10.2023", "High");
//! assert_eq!(new_task.status(), "not done");
//!
//! let changes = TaskChanges::parse([("status", "done")]).unwrap();
//! assert_eq!(changes.get(TaskField::Status), Some("done"));
//! ```

pub mod changes;
pub mod field;
pub mod filter;
pub mod selector;
pub mod task;

#[cfg(test)]
mod tests;

pub use changes::TaskChanges;
pub use field::TaskField;
pub use filter::SearchFilter;
pub use selector::{Fetched, Selector};
pub use task::{NewTask, Task, DEFAULT_STATUS, DONE_STATUS};
