//! Search operations for the TaskStore.

use tokio::task;

use super::TaskStore;
use crate::{
    db::{Database, StoreKind},
    error::{join_error, Result},
    models::{SearchFilter, Task},
};

impl TaskStore {
    /// Returns the ids of tasks matching the filter, in id order.
    ///
    /// Runs against the search index only. Supplied filters combine with AND;
    /// the keyword matches title, description, category or status. A filter
    /// with nothing set returns every id.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<u64>> {
        let index_path = self.index_path.clone();
        let filter = filter.clone();

        task::spawn_blocking(move || {
            Database::new(&index_path, StoreKind::SearchIndex)?.search_task_ids(&filter)
        })
        .await
        .map_err(join_error)?
    }

    /// Searches the index and loads the matching records from the primary
    /// store, in id order.
    pub async fn search_tasks(&self, filter: &SearchFilter) -> Result<Vec<Task>> {
        let ids = self.search(filter).await?;
        self.get_tasks(&ids).await
    }
}
