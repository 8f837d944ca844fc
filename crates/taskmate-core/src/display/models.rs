//! Display implementations for domain models.

use std::fmt;

use crate::models::{Task, TaskField};

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl Task {
    /// Status with a leading icon: `✓` when done, `○` otherwise.
    pub fn status_with_icon(&self) -> String {
        let icon = if self.is_done() { "✓" } else { "○" };
        format!("{icon} {}", self.status)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.title, self.status_with_icon())?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Due: {}", self.due_date)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        writeln!(f)
    }
}
