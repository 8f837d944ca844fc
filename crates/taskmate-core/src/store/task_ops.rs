//! Task record operations for the TaskStore.

use log::debug;
use tokio::task;

use super::{replay_on_index, Synced, TaskStore};
use crate::{
    db::{Database, StoreKind},
    error::{join_error, Result, TaskError},
    models::{Fetched, NewTask, Selector, Task, TaskChanges},
};

impl TaskStore {
    /// Ensures the `tasks` table exists in both stores. Safe to call on every
    /// startup; existing tables and rows are left untouched.
    pub async fn initialize(&self) -> Result<()> {
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();

        task::spawn_blocking(move || {
            Database::new(&primary_path, StoreKind::Primary)?;
            Database::new(&index_path, StoreKind::SearchIndex)?;
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    /// Adds a new task and returns its assigned id.
    ///
    /// The lower-cased record is mirrored into the search index under the
    /// same id once the primary insert has committed.
    pub async fn add(&self, new_task: &NewTask) -> Result<Synced<u64>> {
        new_task.validate()?;

        let _guard = self.write_lock.lock().await;
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();
        let new_task = new_task.clone();

        task::spawn_blocking(move || {
            let task = Database::new(&primary_path, StoreKind::Primary)?.insert_task(&new_task)?;

            let mirrored = task.lowercased();
            let index_error = replay_on_index(&index_path, task.id, "insert", |db| {
                db.insert_task_with_id(&mirrored)
            });

            Ok(Synced::new(task.id, index_error))
        })
        .await
        .map_err(join_error)?
    }

    /// Fetches tasks by selector.
    ///
    /// * `Selector::All` - every task in insertion order
    /// * `Selector::One` - the task, or `TaskError::TaskNotFound`
    /// * `Selector::Many` - existing tasks in list order, unknown ids skipped
    pub async fn get(&self, selector: &Selector) -> Result<Fetched> {
        match selector {
            Selector::All => Ok(Fetched::Many(self.list_tasks().await?)),
            Selector::One(id) => {
                let id = *id;
                self.get_task(id)
                    .await?
                    .map(Fetched::One)
                    .ok_or(TaskError::TaskNotFound { id })
            }
            Selector::Many(ids) => Ok(Fetched::Many(self.get_tasks(ids).await?)),
        }
    }

    /// Retrieves a single task by its ID.
    pub async fn get_task(&self, id: u64) -> Result<Option<Task>> {
        let primary_path = self.primary_path.clone();

        task::spawn_blocking(move || Database::new(&primary_path, StoreKind::Primary)?.get_task(id))
            .await
            .map_err(join_error)?
    }

    /// Retrieves the tasks for the given ids, in the order given.
    pub async fn get_tasks(&self, ids: &[u64]) -> Result<Vec<Task>> {
        let primary_path = self.primary_path.clone();
        let ids = ids.to_vec();

        task::spawn_blocking(move || Database::new(&primary_path, StoreKind::Primary)?.get_tasks(&ids))
            .await
            .map_err(join_error)?
    }

    /// Lists every task in insertion order.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let primary_path = self.primary_path.clone();

        task::spawn_blocking(move || Database::new(&primary_path, StoreKind::Primary)?.list_tasks())
            .await
            .map_err(join_error)?
    }

    /// Applies a change set and returns the updated task.
    ///
    /// The search index receives the same changes, lower-cased from the
    /// values passed in here rather than from what the primary store holds.
    ///
    /// # Errors
    ///
    /// * `TaskError::TaskNotFound` - no task has this id; nothing is written
    /// * `TaskError::InvalidInput` - the change set is empty or has a blank value
    pub async fn update(&self, id: u64, changes: &TaskChanges) -> Result<Synced<Task>> {
        changes.validate()?;

        let _guard = self.write_lock.lock().await;
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();
        let changes = changes.clone();

        task::spawn_blocking(move || {
            let task = Database::new(&primary_path, StoreKind::Primary)?.update_task(id, &changes)?;

            let mirrored = changes.lowercased();
            let index_error = replay_on_index(&index_path, id, "update", |db| {
                db.update_task(id, &mirrored).map(|_| ())
            });

            Ok(Synced::new(task, index_error))
        })
        .await
        .map_err(join_error)?
    }

    /// Sets the task's status to done.
    pub async fn mark_done(&self, id: u64) -> Result<Synced<Task>> {
        self.update(id, &TaskChanges::mark_done()).await
    }

    /// Deletes a task from both stores and returns its title.
    ///
    /// Deleting an unknown id writes nothing and returns
    /// `TaskError::TaskNotFound`.
    pub async fn delete(&self, id: u64) -> Result<Synced<String>> {
        let _guard = self.write_lock.lock().await;
        let primary_path = self.primary_path.clone();
        let index_path = self.index_path.clone();

        task::spawn_blocking(move || {
            let title = Database::new(&primary_path, StoreKind::Primary)?.delete_task(id)?;

            let index_error = replay_on_index(&index_path, id, "delete", |db| {
                if !db.remove_task_if_exists(id)? {
                    debug!("Task {id} was already missing from the search index");
                }
                Ok(())
            });

            Ok(Synced::new(title, index_error))
        })
        .await
        .map_err(join_error)?
    }
}
