//! Task CRUD operations and queries.

use std::collections::HashMap;

use log::debug;
use rusqlite::{params, params_from_iter, OptionalExtension, ToSql};

use crate::{
    error::{DatabaseResultExt, Result, TaskError},
    models::{NewTask, Task, TaskChanges},
};

const TASK_COLUMNS: &str = "id, title, description, category, due_date, priority, status";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (title, description, category, due_date, priority, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_TASK_WITH_ID_SQL: &str = "INSERT OR REPLACE INTO tasks (id, title, description, category, due_date, priority, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_TASK_BY_ID_SQL: &str = "SELECT id, title, description, category, due_date, priority, status FROM tasks WHERE id = ?1";
const SELECT_ALL_TASKS_SQL: &str = "SELECT id, title, description, category, due_date, priority, status FROM tasks ORDER BY id";
const SELECT_TITLE_SQL: &str = "SELECT title FROM tasks WHERE id = ?1";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const DELETE_ALL_TASKS_SQL: &str = "DELETE FROM tasks";
const SELECT_CATEGORIES_SQL: &str = "SELECT DISTINCT category FROM tasks ORDER BY category";
const COUNT_TASKS_SQL: &str = "SELECT COUNT(*) FROM tasks";
const MAX_IDS_PER_QUERY: usize = 500;

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            due_date: row.get(4)?,
            priority: row.get(5)?,
            status: row.get(6)?,
        })
    }

    /// Inserts a new task and returns it with the id assigned by SQLite.
    pub fn insert_task(&mut self, new_task: &NewTask) -> Result<Task> {
        new_task.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_TASK_SQL,
            params![
                new_task.title,
                new_task.description,
                new_task.category,
                new_task.due_date,
                new_task.priority,
                new_task.status(),
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Inserted task {id} into {}", self.kind);
        Ok(new_task.clone().into_task(id))
    }

    /// Writes a task under its existing id, replacing any row already there.
    ///
    /// Used to mirror records into the search index, which must reuse the
    /// ids handed out by the primary store.
    pub fn insert_task_with_id(&mut self, task: &Task) -> Result<()> {
        self.connection
            .execute(
                INSERT_TASK_WITH_ID_SQL,
                params![
                    task.id as i64,
                    task.title,
                    task.description,
                    task.category,
                    task.due_date,
                    task.priority,
                    task.status,
                ],
            )
            .db_context("Failed to insert task")?;

        debug!("Wrote task {} into {}", task.id, self.kind);
        Ok(())
    }

    /// Retrieves a task by its ID.
    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        self.connection
            .query_row(SELECT_TASK_BY_ID_SQL, params![id as i64], Self::build_task_from_row)
            .optional()
            .db_context("Failed to query task")
    }

    /// Retrieves the tasks for each id that exists, in the order the ids were
    /// given. Unknown ids are skipped.
    pub fn get_tasks(&self, ids: &[u64]) -> Result<Vec<Task>> {
        let mut found: HashMap<u64, Task> = HashMap::with_capacity(ids.len());

        // Bounded IN lists stay under SQLite's bound-parameter limit
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id IN ({placeholders})");
            let mut stmt = self
                .connection
                .prepare(&query)
                .db_context("Failed to prepare query")?;

            let rows = stmt
                .query_map(
                    params_from_iter(chunk.iter().map(|id| *id as i64)),
                    Self::build_task_from_row,
                )
                .db_context("Failed to query tasks")?;
            for task in rows {
                let task = task.db_context("Failed to fetch tasks")?;
                found.insert(task.id, task);
            }
        }

        Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
    }

    /// Lists every task in insertion order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_TASKS_SQL)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map([], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        Ok(tasks)
    }

    /// Applies a validated change set and returns the updated task.
    ///
    /// Column names come from [`crate::models::TaskField::column`], never
    /// from caller input.
    pub fn update_task(&mut self, id: u64, changes: &TaskChanges) -> Result<Task> {
        changes.validate()?;

        let sets: Vec<String> = changes
            .iter()
            .map(|(field, _)| format!("{} = ?", field.column()))
            .collect();
        let query = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));

        let mut params_vec: Vec<Box<dyn ToSql>> = changes
            .iter()
            .map(|(_, value)| Box::new(value.to_string()) as Box<dyn ToSql>)
            .collect();
        params_vec.push(Box::new(id as i64));
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(&query, &params_refs[..])
            .db_context("Failed to update task")?;

        if rows_affected == 0 {
            return Err(TaskError::TaskNotFound { id });
        }

        let task = tx
            .query_row(SELECT_TASK_BY_ID_SQL, params![id as i64], Self::build_task_from_row)
            .db_context("Failed to query updated task")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Updated task {id} in {} ({} fields)", self.kind, changes.len());
        Ok(task)
    }

    /// Deletes a task and returns its title.
    pub fn delete_task(&mut self, id: u64) -> Result<String> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let title: String = tx
            .query_row(SELECT_TITLE_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    TaskError::TaskNotFound { id }
                } else {
                    TaskError::database("Failed to query task").with_source(e)
                }
            })?;

        tx.execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Deleted task {id} from {}", self.kind);
        Ok(title)
    }

    /// Removes a task if present. Returns whether a row was deleted.
    pub fn remove_task_if_exists(&mut self, id: u64) -> Result<bool> {
        let rows_affected = self
            .connection
            .execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;
        Ok(rows_affected > 0)
    }

    /// Deletes every task. Returns the number of rows removed.
    pub fn clear_tasks(&mut self) -> Result<usize> {
        let removed = self
            .connection
            .execute(DELETE_ALL_TASKS_SQL, [])
            .db_context("Failed to clear tasks")?;

        debug!("Cleared {removed} tasks from {}", self.kind);
        Ok(removed)
    }

    /// Replaces the whole table with the given records, keeping their ids.
    pub fn replace_all_tasks(&mut self, tasks: &[Task]) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_ALL_TASKS_SQL, [])
            .db_context("Failed to clear tasks")?;

        for task in tasks {
            tx.execute(
                INSERT_TASK_WITH_ID_SQL,
                params![
                    task.id as i64,
                    task.title,
                    task.description,
                    task.category,
                    task.due_date,
                    task.priority,
                    task.status,
                ],
            )
            .db_context("Failed to insert task")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(tasks.len())
    }

    /// Distinct categories, sorted.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CATEGORIES_SQL)
            .db_context("Failed to prepare query")?;

        let categories = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query categories")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to fetch categories")?;

        Ok(categories)
    }

    /// Number of stored tasks.
    pub fn count_tasks(&self) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_TASKS_SQL, [], |row| row.get(0))
            .db_context("Failed to count tasks")?;
        Ok(count as u64)
    }
}
