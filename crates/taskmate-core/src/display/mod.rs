//! Display formatting for tasks and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and operation outcomes are formatted through newtype wrappers
//! so the same data can read differently in a listing, after a create, or
//! after an update. Everything is emitted as markdown for the terminal
//! renderer.
//!
//! ```rust
//! use taskmate_core::{display::CreateResult, NewTask};
//!
//! let task = NewTask::new("Write report", "Finish project report", "Work", "15.10.2023", "High")
//!     .into_task(1);
//! let output = CreateResult::new(task).to_string();
//! assert!(output.contains("Created task with ID: 1"));
//! ```

pub mod collections;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Categories, Tasks};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
