//! Index repair and bulk operations for the TaskStore.

use std::collections::{BTreeSet, HashMap};

use log::info;
use tokio::task;

use super::{replay_on_index, Synced, TaskStore};
use crate::{
    db::{Database, StoreKind},
    error::{join_error, Result},
    models::Task,
};

impl TaskStore {
    /// Re-derives the whole search index from the primary store, keeping ids.
    /// Returns the number of records written.
    pub async fn rebuild_index(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();

        let written = task::spawn_blocking(move || {
            let tasks = Database::new(&primary_path, StoreKind::Primary)?.list_tasks()?;
            let mirrored: Vec<Task> = tasks.iter().map(Task::lowercased).collect();
            Database::new(&index_path, StoreKind::SearchIndex)?.replace_all_tasks(&mirrored)
        })
        .await
        .map_err(join_error)??;

        info!("Rebuilt search index with {written} tasks");
        Ok(written)
    }

    /// Ids whose search index row is missing, stale, or has no primary
    /// record, sorted ascending. Empty when the stores agree.
    pub async fn index_drift(&self) -> Result<Vec<u64>> {
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();

        task::spawn_blocking(move || {
            let primary = Database::new(&primary_path, StoreKind::Primary)?.list_tasks()?;
            let index = Database::new(&index_path, StoreKind::SearchIndex)?.list_tasks()?;
            Ok(drifted_ids(&primary, &index))
        })
        .await
        .map_err(join_error)?
    }

    /// Deletes every task from both stores. Returns the number of primary
    /// records removed.
    pub async fn clear(&self) -> Result<Synced<usize>> {
        let _guard = self.write_lock.lock().await;
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();

        task::spawn_blocking(move || {
            let removed = Database::new(&primary_path, StoreKind::Primary)?.clear_tasks()?;
            let index_error =
                replay_on_index(&index_path, 0, "clear", |db| db.clear_tasks().map(|_| ()));
            Ok(Synced::new(removed, index_error))
        })
        .await
        .map_err(join_error)?
    }

    /// Distinct categories of the primary store, sorted.
    pub async fn categories(&self) -> Result<Vec<String>> {
        let primary_path = self.primary_path.clone();

        task::spawn_blocking(move || {
            Database::new(&primary_path, StoreKind::Primary)?.list_categories()
        })
        .await
        .map_err(join_error)?
    }
}

/// Compares the primary records against their index rows.
fn drifted_ids(primary: &[Task], index: &[Task]) -> Vec<u64> {
    let index_by_id: HashMap<u64, &Task> = index.iter().map(|t| (t.id, t)).collect();
    let primary_ids: BTreeSet<u64> = primary.iter().map(|t| t.id).collect();

    let mut drifted: BTreeSet<u64> = primary
        .iter()
        .filter(|task| index_by_id.get(&task.id).copied() != Some(&task.lowercased()))
        .map(|task| task.id)
        .collect();

    drifted.extend(index.iter().map(|t| t.id).filter(|id| !primary_ids.contains(id)));
    drifted.into_iter().collect()
}
