//! Results of mutations that span the primary store and the search index.

use crate::error::TaskError;

/// A committed primary result plus the outcome of its search index replay.
///
/// The primary value is always valid when a `Synced` is returned. A present
/// `index_error` means the search index is stale for this record until it is
/// rebuilt.
#[derive(Debug)]
pub struct Synced<T> {
    pub value: T,
    pub index_error: Option<TaskError>,
}

impl<T> Synced<T> {
    pub fn new(value: T, index_error: Option<TaskError>) -> Self {
        Self { value, index_error }
    }

    /// Whether the search index accepted the replay.
    pub fn is_synced(&self) -> bool {
        self.index_error.is_none()
    }

    /// Drops the sync outcome and keeps the primary result.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Splits into the primary result and the sync outcome.
    pub fn into_parts(self) -> (T, Option<TaskError>) {
        (self.value, self.index_error)
    }
}
