//! The closed set of task fields that callers may name.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// A mutable task column. `id` is deliberately absent: it is assigned once by
/// storage and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    Title,
    Description,
    Category,
    DueDate,
    Priority,
    Status,
}

impl TaskField {
    /// Every field in column order.
    pub const ALL: [TaskField; 6] = [
        TaskField::Title,
        TaskField::Description,
        TaskField::Category,
        TaskField::DueDate,
        TaskField::Priority,
        TaskField::Status,
    ];

    /// The SQL column backing this field. Only these literals are ever
    /// interpolated into statements.
    pub fn column(&self) -> &'static str {
        match self {
            TaskField::Title => "title",
            TaskField::Description => "description",
            TaskField::Category => "category",
            TaskField::DueDate => "due_date",
            TaskField::Priority => "priority",
            TaskField::Status => "status",
        }
    }

    /// Human-readable label for prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            TaskField::Title => "Title",
            TaskField::Description => "Description",
            TaskField::Category => "Category",
            TaskField::DueDate => "Due date",
            TaskField::Priority => "Priority",
            TaskField::Status => "Status",
        }
    }
}

impl FromStr for TaskField {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "title" => Ok(TaskField::Title),
            "description" => Ok(TaskField::Description),
            "category" => Ok(TaskField::Category),
            "due_date" | "due-date" | "due" => Ok(TaskField::DueDate),
            "priority" => Ok(TaskField::Priority),
            "status" => Ok(TaskField::Status),
            "id" => Err(TaskError::invalid_input("id").with_reason("task ids cannot be changed")),
            _ => Err(TaskError::UnknownField {
                name: s.to_string(),
            }),
        }
    }
}
