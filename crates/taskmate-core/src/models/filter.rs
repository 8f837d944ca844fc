//! Search filters for the task index.

use serde::{Deserialize, Serialize};

/// Filter options for searching tasks.
///
/// Supplied filters combine with AND. A filter whose value is blank counts as
/// not supplied, so a filter with nothing set matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Case-insensitive substring of title, description, category or status
    pub keyword: Option<String>,
    /// Case-insensitive exact category
    pub category: Option<String>,
    /// Case-insensitive exact status
    pub status: Option<String>,
}

impl SearchFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Lower-cases every supplied value and drops blank ones.
    pub fn normalized(&self) -> Self {
        fn normalize(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_lowercase)
        }

        Self {
            keyword: normalize(&self.keyword),
            category: normalize(&self.category),
            status: normalize(&self.status),
        }
    }

    /// True when no filter value is supplied.
    pub fn is_empty(&self) -> bool {
        let normalized = self.normalized();
        normalized.keyword.is_none() && normalized.category.is_none() && normalized.status.is_none()
    }
}
