//! Validated field-to-value maps for partial task updates.

use std::collections::BTreeMap;

use super::{Task, TaskField, DONE_STATUS};
use crate::error::{Result, TaskError};

/// A set of field changes keyed by [`TaskField`].
///
/// Keys are always members of the closed field enum, so building an `UPDATE`
/// statement from a `TaskChanges` can only ever name real columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    values: BTreeMap<TaskField, String>,
}

impl TaskChanges {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the new value for a field.
    pub fn set(mut self, field: TaskField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// The change set that marks a task as done.
    pub fn mark_done() -> Self {
        Self::new().set(TaskField::Status, DONE_STATUS)
    }

    /// Parses caller-supplied `(name, value)` pairs.
    ///
    /// # Errors
    ///
    /// * `TaskError::UnknownField` - a name is not a task field
    /// * `TaskError::InvalidInput` - a name is `id`, a value is blank, or no
    ///   pairs were given
    pub fn parse<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut changes = Self::new();
        for (name, value) in pairs {
            let field: TaskField = name.as_ref().parse()?;
            changes.values.insert(field, value.into());
        }
        changes.validate()?;
        Ok(changes)
    }

    /// Rejects an empty change set or a blank value.
    pub fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(TaskError::invalid_input("changes").with_reason("no fields to update"));
        }
        for (field, value) in &self.values {
            if value.trim().is_empty() {
                return Err(TaskError::invalid_input(field.column()).with_reason("must not be empty"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, field: TaskField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Iterates over changes in column order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Copy with every value lower-cased, for replay against the search
    /// index.
    pub fn lowercased(&self) -> Self {
        Self {
            values: self
                .values
                .iter()
                .map(|(field, value)| (*field, value.to_lowercase()))
                .collect(),
        }
    }

    /// Short descriptions of each change, for update summaries.
    pub fn describe(&self) -> Vec<String> {
        self.iter()
            .map(|(field, value)| format!("{} set to \"{value}\"", field.label()))
            .collect()
    }
}
