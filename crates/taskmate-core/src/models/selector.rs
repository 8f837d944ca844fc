//! Fetch selectors and the result shapes they produce.

use super::Task;

/// Which records a fetch should return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// Every record, in insertion order
    #[default]
    All,
    /// A single record; missing ids are reported as not found
    One(u64),
    /// Records for each listed id in list order; missing ids are skipped
    Many(Vec<u64>),
}

impl From<u64> for Selector {
    fn from(id: u64) -> Self {
        Selector::One(id)
    }
}

impl From<Vec<u64>> for Selector {
    fn from(ids: Vec<u64>) -> Self {
        Selector::Many(ids)
    }
}

impl From<Option<u64>> for Selector {
    fn from(id: Option<u64>) -> Self {
        id.map_or(Selector::All, Selector::One)
    }
}

/// Result of a fetch, shaped after its [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    One(Task),
    Many(Vec<Task>),
}

impl Fetched {
    /// Flattens either shape into a list.
    pub fn into_vec(self) -> Vec<Task> {
        match self {
            Fetched::One(task) => vec![task],
            Fetched::Many(tasks) => tasks,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Fetched::One(_) => 1,
            Fetched::Many(tasks) => tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
