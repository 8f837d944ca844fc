//! Keyword, category and status search over the lower-cased task index.

use log::debug;
use rusqlite::ToSql;

use crate::{
    error::{DatabaseResultExt, Result},
    models::SearchFilter,
};

// instr() keeps '%' and '_' in a keyword literal, unlike LIKE
const KEYWORD_CONDITION: &str = "(instr(title, ?) > 0 OR instr(description, ?) > 0 OR instr(category, ?) > 0 OR instr(status, ?) > 0)";

impl super::Database {
    /// Returns the ids of tasks matching every supplied filter, in id order.
    ///
    /// Filter values are lower-cased here and compared against stored text
    /// as-is, so this is only case-insensitive against a store whose rows are
    /// already lower-cased. An empty filter matches every task.
    pub fn search_task_ids(&self, filter: &SearchFilter) -> Result<Vec<u64>> {
        let filter = filter.normalized();

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(keyword) = filter.keyword {
            conditions.push(KEYWORD_CONDITION);
            for _ in 0..4 {
                params_vec.push(Box::new(keyword.clone()));
            }
        }

        if let Some(category) = filter.category {
            conditions.push("category = ?");
            params_vec.push(Box::new(category));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status));
        }

        let mut query = String::from("SELECT id FROM tasks");
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare search query")?;

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let ids = stmt
            .query_map(&params_refs[..], |row| row.get::<_, i64>(0))
            .db_context("Failed to search tasks")?
            .map(|id| id.map(|id| id as u64))
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch search results")?;

        debug!("Search in {} matched {} tasks", self.kind, ids.len());
        Ok(ids)
    }
}
