use taskmate_core::{NewTask, TaskStoreBuilder};
use tempfile::TempDir;

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, taskmate_core::TaskStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = TaskStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

#[allow(dead_code)]
pub fn sample_task(title: &str, category: &str) -> NewTask {
    NewTask::new(title, format!("About {title}"), category, "15.10.2023", "High")
}
