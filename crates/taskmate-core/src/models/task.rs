//! Task records as stored and as submitted for creation.

use serde::{Deserialize, Serialize};

use super::TaskField;
use crate::error::{Result, TaskError};

/// Status assigned to every task that is created without one.
pub const DEFAULT_STATUS: &str = "not done";

/// Status written by the "mark done" operation.
pub const DONE_STATUS: &str = "done";

/// A persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
    pub priority: String,
    pub status: String,
}

impl Task {
    /// Returns the value of a non-id field.
    pub fn field(&self, field: TaskField) -> &str {
        match field {
            TaskField::Title => &self.title,
            TaskField::Description => &self.description,
            TaskField::Category => &self.category,
            TaskField::DueDate => &self.due_date,
            TaskField::Priority => &self.priority,
            TaskField::Status => &self.status,
        }
    }

    /// Mutable access to a non-id field.
    pub(crate) fn field_mut(&mut self, field: TaskField) -> &mut String {
        match field {
            TaskField::Title => &mut self.title,
            TaskField::Description => &mut self.description,
            TaskField::Category => &mut self.category,
            TaskField::DueDate => &mut self.due_date,
            TaskField::Priority => &mut self.priority,
            TaskField::Status => &mut self.status,
        }
    }

    /// Copy of the record with every text field lower-cased, as held by the
    /// search index.
    pub fn lowercased(&self) -> Task {
        let mut task = self.clone();
        for field in TaskField::ALL {
            let slot = task.field_mut(field);
            *slot = slot.to_lowercase();
        }
        task
    }

    /// Whether the task carries the done status, ignoring case.
    pub fn is_done(&self) -> bool {
        self.status.trim().to_lowercase() == DONE_STATUS
    }
}

/// Caller-supplied fields for a new task. The id is assigned by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
    pub priority: String,
    /// Defaults to [`DEFAULT_STATUS`] when absent
    #[serde(default)]
    pub status: Option<String>,
}

impl NewTask {
    /// Creates a payload with every required field and the default status.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        due_date: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            due_date: due_date.into(),
            priority: priority.into(),
            status: None,
        }
    }

    /// Sets an explicit initial status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// The status the record will be stored with.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }

    /// Rejects payloads with a blank required field or a blank explicit
    /// status.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (TaskField::Title, &self.title),
            (TaskField::Description, &self.description),
            (TaskField::Category, &self.category),
            (TaskField::DueDate, &self.due_date),
            (TaskField::Priority, &self.priority),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(TaskError::invalid_input(field.column()).with_reason("must not be empty"));
            }
        }
        if let Some(status) = &self.status {
            if status.trim().is_empty() {
                return Err(TaskError::invalid_input(TaskField::Status.column())
                    .with_reason("must not be empty when given"));
            }
        }
        Ok(())
    }

    /// Materializes the record under an assigned id.
    pub fn into_task(self, id: u64) -> Task {
        let status = self.status().to_string();
        Task {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            due_date: self.due_date,
            priority: self.priority,
            status,
        }
    }
}
