//! Database schema initialization.

use log::debug;

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the schema using the embedded SQL file. Every statement is
    /// `IF NOT EXISTS`, so running it against an existing store is a no-op.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        debug!("Schema ready for {}", self.kind);
        Ok(())
    }

    /// Column names of the `tasks` table, in declaration order.
    pub fn task_columns(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare("SELECT name FROM pragma_table_info('tasks') ORDER BY cid")
            .db_context("Failed to prepare schema query")?;

        let columns = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query schema")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to read schema")?;

        Ok(columns)
    }
}
