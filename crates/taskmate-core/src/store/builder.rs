//! Builder for creating and configuring TaskStore instances.

use std::path::{Path, PathBuf};

use log::info;

use super::TaskStore;
use crate::error::{Result, TaskError};

const PRIMARY_FILE: &str = "tasks.db";
const INDEX_FILE: &str = "search_tasks.db";

/// Builder for creating and configuring TaskStore instances.
#[derive(Debug, Clone, Default)]
pub struct TaskStoreBuilder {
    database_path: Option<PathBuf>,
    index_path: Option<PathBuf>,
}

impl TaskStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom primary database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/taskmate/tasks.db` or `~/.local/share/taskmate/tasks.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a custom search index file path.
    ///
    /// If not specified, the index sits next to the primary database as
    /// `search_<primary file name>`.
    pub fn with_index_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.index_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store and initializes both schemas.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::FileSystem` if a parent directory cannot be created
    /// Returns `TaskError::Configuration` if both paths name the same file
    /// Returns `TaskError::Database` if schema initialization fails
    pub async fn build(self) -> Result<TaskStore> {
        let primary_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let index_path = match self.index_path {
            Some(path) => path,
            None => Self::index_path_for(&primary_path),
        };

        for path in [&primary_path, &index_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| TaskError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        if Self::resolve(&primary_path) == Self::resolve(&index_path) {
            return Err(TaskError::Configuration {
                message: format!(
                    "search index path must differ from the database path ({})",
                    primary_path.display()
                ),
            });
        }

        let store = TaskStore::new(primary_path, index_path);
        store.initialize().await?;

        info!(
            "Task store ready at {} (index {})",
            store.primary_path.display(),
            store.index_path.display()
        );
        Ok(store)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("taskmate")
            .place_data_file(PRIMARY_FILE)
            .map_err(|e| TaskError::XdgDirectory(e.to_string()))
    }

    /// Absolute form of a path whose file may not exist yet. Falls back to
    /// the path as given when even the parent cannot be resolved.
    fn resolve(path: &Path) -> PathBuf {
        if let Ok(canonical) = path.canonicalize() {
            return canonical;
        }
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        match (parent.canonicalize(), path.file_name()) {
            (Ok(parent), Some(name)) => parent.join(name),
            _ => path.to_path_buf(),
        }
    }

    /// Derives the index file path from the primary one.
    fn index_path_for(primary: &Path) -> PathBuf {
        let file_name = primary
            .file_name()
            .map(|name| format!("search_{}", name.to_string_lossy()))
            .unwrap_or_else(|| INDEX_FILE.to_string());
        primary.with_file_name(file_name)
    }
}
