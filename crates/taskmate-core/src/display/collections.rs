//! Collection wrapper types for displaying groups of tasks.

use std::{fmt, ops::Index};

use crate::{error::Result, models::Task};

/// Newtype wrapper for displaying collections of tasks.
///
/// Handles empty collections gracefully and appends a total when more than
/// one task is listed.
///
/// # Examples
///
/// ```rust
/// use taskmate_core::{display::Tasks, NewTask};
///
/// let task = NewTask::new("Pay bills", "Utilities for October", "Personal", "15.10.2023", "High")
///     .into_task(7);
/// let output = Tasks(vec![task]).to_string();
/// assert!(output.contains("### 7. Pay bills"));
/// ```
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the tasks.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// Serializes the collection as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Task>> for Tasks {
    fn from(tasks: Vec<Task>) -> Self {
        Tasks(tasks)
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        if self.0.len() > 1 {
            writeln!(f, "Total tasks: {}", self.0.len())?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a numbered list of category names.
pub struct Categories(pub Vec<String>);

impl fmt::Display for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No categories found.");
        }
        for (index, category) in self.0.iter().enumerate() {
            writeln!(f, "{}. {category}", index + 1)?;
        }
        Ok(())
    }
}
