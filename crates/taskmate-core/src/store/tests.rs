//! Tests for the task store.

use super::*;
use crate::models::{Fetched, NewTask, SearchFilter, Selector, TaskChanges, TaskField};
use tempfile::TempDir;

/// Helper function to create a test store
async fn create_test_store() -> (TempDir, TaskStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("tasks.db");
    let store = TaskStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

fn report_task() -> NewTask {
    NewTask::new(
        "Write report",
        "Finish project report",
        "Work",
        "15.10.2023",
        "High",
    )
}

fn index_row(store: &TaskStore, id: u64) -> Option<crate::models::Task> {
    Database::new(store.index_path(), StoreKind::SearchIndex)
        .expect("Failed to open index")
        .get_task(id)
        .expect("Failed to query index")
}

#[tokio::test]
async fn test_concrete_scenario() {
    let (_temp_dir, store) = create_test_store().await;

    let added = store.add(&report_task()).await.expect("Failed to add task");
    assert!(added.is_synced());
    let id = added.into_value();
    assert_eq!(id, 1);

    let task = store.get_task(id).await.unwrap().expect("Task should exist");
    assert_eq!(task.status, "not done");
    assert_eq!(task.title, "Write report");

    let updated = store
        .update(id, &TaskChanges::parse([("status", "done")]).unwrap())
        .await
        .expect("Failed to update task")
        .into_value();
    assert_eq!(updated.status, "done");
    assert_eq!(updated.title, task.title);
    assert_eq!(updated.description, task.description);
    assert_eq!(updated.category, task.category);
    assert_eq!(updated.due_date, task.due_date);
    assert_eq!(updated.priority, task.priority);

    let title = store.delete(id).await.expect("Failed to delete").into_value();
    assert_eq!(title, "Write report");

    let err = store.get(&Selector::One(id)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_round_trip_keeps_fields_and_defaults_status() {
    let (_temp_dir, store) = create_test_store().await;

    let new_task = NewTask::new("Посетить врача", "Ежегодный осмотр", "Здоровье", "01.11.2023", "Средний");
    let id = store.add(&new_task).await.unwrap().into_value();

    let fetched = store.get(&Selector::One(id)).await.unwrap();
    assert_eq!(fetched, Fetched::One(new_task.into_task(id)));
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let (_temp_dir, store) = create_test_store().await;

    let first = store.add(&report_task()).await.unwrap().into_value();
    let second = store.add(&report_task()).await.unwrap().into_value();
    store.delete(second).await.unwrap();
    let third = store.add(&report_task()).await.unwrap().into_value();

    assert!(second > first);
    assert!(third > second);
}

#[tokio::test]
async fn test_add_rejects_blank_fields_before_storage() {
    let (_temp_dir, store) = create_test_store().await;

    let mut new_task = report_task();
    new_task.title = "  ".to_string();
    let err = store.add(&new_task).await.unwrap_err();
    assert!(err.is_validation());

    assert!(store.list_tasks().await.unwrap().is_empty());
    assert!(store.search(&SearchFilter::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_selectors() {
    let (_temp_dir, store) = create_test_store().await;

    let a = store.add(&report_task()).await.unwrap().into_value();
    let b = store
        .add(&NewTask::new("Buy groceries", "Bread, milk", "Personal", "10.10.2023", "Medium"))
        .await
        .unwrap()
        .into_value();

    let all = store.get(&Selector::All).await.unwrap().into_vec();
    assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a, b]);

    let listed = store.get(&Selector::Many(vec![b, 999, a])).await.unwrap();
    let ids: Vec<u64> = listed.into_vec().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b, a]);

    let empty = store.get(&Selector::Many(vec![])).await.unwrap();
    assert!(empty.is_empty());

    let err = store.get(&Selector::One(999)).await.unwrap_err();
    assert!(matches!(err, TaskError::TaskNotFound { id: 999 }));
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();

    for _ in 0..3 {
        store.initialize().await.expect("Failed to re-initialize");
    }

    let reopened = TaskStoreBuilder::new()
        .with_database_path(Some(temp_dir.path().join("tasks.db")))
        .build()
        .await
        .unwrap();
    let tasks = reopened.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(reopened.search(&SearchFilter::new()).await.unwrap(), vec![id]);
}

#[tokio::test]
async fn test_add_mirrors_lowercased_record_under_same_id() {
    let (_temp_dir, store) = create_test_store().await;

    let id = store.add(&report_task()).await.unwrap().into_value();
    let mirrored = index_row(&store, id).expect("Index row should exist");

    assert_eq!(mirrored.title, "write report");
    assert_eq!(mirrored.category, "work");
    assert_eq!(mirrored.priority, "high");
    assert_eq!(mirrored.status, "not done");

    let primary = store.get_task(id).await.unwrap().unwrap();
    assert_eq!(primary.category, "Work");
}

#[tokio::test]
async fn test_case_insensitive_category_search() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();

    for category in ["work", "WORK", "Work"] {
        let found = store
            .search(&SearchFilter::new().with_category(category))
            .await
            .unwrap();
        assert_eq!(found, vec![id], "category {category}");
    }

    let found = store
        .search(&SearchFilter::new().with_category("wor"))
        .await
        .unwrap();
    assert!(found.is_empty(), "category must match exactly");
}

#[tokio::test]
async fn test_case_insensitive_search_with_cyrillic() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store
        .add(&NewTask::new(
            "Организовать встречу",
            "Встреча с коллегами",
            "Работа",
            "25.10.2023",
            "Высокий",
        ))
        .await
        .unwrap()
        .into_value();

    let by_category = store
        .search(&SearchFilter::new().with_category("РАБОТА"))
        .await
        .unwrap();
    assert_eq!(by_category, vec![id]);

    let by_keyword = store
        .search(&SearchFilter::new().with_keyword("ВСТРЕЧ"))
        .await
        .unwrap();
    assert_eq!(by_keyword, vec![id]);
}

#[tokio::test]
async fn test_search_and_across_filters_or_within_keyword() {
    let (_temp_dir, store) = create_test_store().await;

    let a = store.add(&report_task()).await.unwrap().into_value();
    let b = store
        .add(&NewTask::new("Read report", "Monthly bills", "Home", "01.11.2023", "Low"))
        .await
        .unwrap()
        .into_value();
    let c = store
        .add(&NewTask::new("Plan trip", "Mountains with friends", "Leisure", "01.11.2023", "Medium"))
        .await
        .unwrap()
        .into_value();

    let found = store
        .search(&SearchFilter::new().with_keyword("report").with_category("work"))
        .await
        .unwrap();
    assert_eq!(found, vec![a]);

    let found = store
        .search(&SearchFilter::new().with_keyword("REPORT"))
        .await
        .unwrap();
    assert_eq!(found, vec![a, b]);

    // Keyword also matches description, category and status
    let found = store
        .search(&SearchFilter::new().with_keyword("friends"))
        .await
        .unwrap();
    assert_eq!(found, vec![c]);
    let found = store
        .search(&SearchFilter::new().with_keyword("leisure"))
        .await
        .unwrap();
    assert_eq!(found, vec![c]);

    store.mark_done(b).await.unwrap();
    let found = store
        .search(&SearchFilter::new().with_status("Done"))
        .await
        .unwrap();
    assert_eq!(found, vec![b]);
    let found = store
        .search(&SearchFilter::new().with_keyword("not done"))
        .await
        .unwrap();
    assert_eq!(found, vec![a, c]);
}

#[tokio::test]
async fn test_search_without_filters_returns_all_ids() {
    let (_temp_dir, store) = create_test_store().await;

    let a = store.add(&report_task()).await.unwrap().into_value();
    let b = store.add(&report_task()).await.unwrap().into_value();

    assert_eq!(store.search(&SearchFilter::new()).await.unwrap(), vec![a, b]);
    assert_eq!(
        store
            .search(&SearchFilter::new().with_keyword("").with_status(" "))
            .await
            .unwrap(),
        vec![a, b]
    );
}

#[tokio::test]
async fn test_search_keyword_wildcards_are_literal() {
    let (_temp_dir, store) = create_test_store().await;

    let plain = store.add(&report_task()).await.unwrap().into_value();
    let percent = store
        .add(&NewTask::new("Raise prices 10%", "Pricing", "Work", "01.12.2023", "Low"))
        .await
        .unwrap()
        .into_value();

    let found = store
        .search(&SearchFilter::new().with_keyword("%"))
        .await
        .unwrap();
    assert_eq!(found, vec![percent]);
    assert!(!found.contains(&plain));
}

#[tokio::test]
async fn test_search_tasks_loads_primary_records() {
    let (_temp_dir, store) = create_test_store().await;
    store.add(&report_task()).await.unwrap();

    let tasks = store
        .search_tasks(&SearchFilter::new().with_keyword("PROJECT"))
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "Finish project report");
}

#[tokio::test]
async fn test_update_changes_only_named_fields() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();
    let before = store.get_task(id).await.unwrap().unwrap();

    let changes = TaskChanges::new()
        .set(TaskField::Priority, "Low")
        .set(TaskField::DueDate, "20.10.2023");
    let after = store.update(id, &changes).await.unwrap().into_value();

    assert_eq!(after.priority, "Low");
    assert_eq!(after.due_date, "20.10.2023");
    assert_eq!(after.title, before.title);
    assert_eq!(after.description, before.description);
    assert_eq!(after.category, before.category);
    assert_eq!(after.status, before.status);
    assert_eq!(store.get_task(id).await.unwrap().unwrap(), after);
}

#[tokio::test]
async fn test_update_replays_lowercased_arguments_on_index() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();

    let changes = TaskChanges::new().set(TaskField::Category, "Office WORK");
    let updated = store.update(id, &changes).await.unwrap();
    assert!(updated.is_synced());
    assert_eq!(updated.value.category, "Office WORK");

    let mirrored = index_row(&store, id).unwrap();
    assert_eq!(mirrored.category, "office work");
    assert_eq!(mirrored.title, "write report");

    let found = store
        .search(&SearchFilter::new().with_category("OFFICE work"))
        .await
        .unwrap();
    assert_eq!(found, vec![id]);
    assert!(store.index_drift().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_unknown_task_is_not_found() {
    let (_temp_dir, store) = create_test_store().await;

    let err = store.mark_done(42).await.unwrap_err();
    assert!(matches!(err, TaskError::TaskNotFound { id: 42 }));
    assert!(index_row(&store, 42).is_none());
}

#[tokio::test]
async fn test_update_rejects_unknown_field() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();

    let err = TaskChanges::parse([("not_a_field", "x")]).unwrap_err();
    assert!(err.is_validation());

    let err = store.update(id, &TaskChanges::new()).await.unwrap_err();
    assert!(err.is_validation());

    let task = store.get_task(id).await.unwrap().unwrap();
    assert_eq!(task, report_task().into_task(id));
}

#[tokio::test]
async fn test_delete_finality() {
    let (_temp_dir, store) = create_test_store().await;

    let keep = store.add(&report_task()).await.unwrap().into_value();
    let gone = store.add(&report_task()).await.unwrap().into_value();

    let deleted = store.delete(gone).await.unwrap();
    assert!(deleted.is_synced());

    assert!(store.get_task(gone).await.unwrap().is_none());
    let all: Vec<u64> = store.list_tasks().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(all, vec![keep]);
    assert_eq!(store.search(&SearchFilter::new()).await.unwrap(), vec![keep]);
    assert_eq!(
        store
            .search(&SearchFilter::new().with_keyword("report"))
            .await
            .unwrap(),
        vec![keep]
    );
    assert!(index_row(&store, gone).is_none());
}

#[tokio::test]
async fn test_delete_unknown_task_is_not_found() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();

    let err = store.delete(id + 1).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.list_tasks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_index_failure_keeps_primary_write_and_rebuild_repairs() {
    let (_temp_dir, store) = create_test_store().await;
    let first = store.add(&report_task()).await.unwrap().into_value();

    break_index(&store);

    let added = store
        .add(&NewTask::new("Pay bills", "Utilities", "Personal", "15.10.2023", "High"))
        .await
        .expect("Primary write should still succeed");
    let (second, index_error) = added.into_parts();
    let index_error = index_error.expect("Index failure should be reported");
    assert!(matches!(
        index_error,
        TaskError::IndexSync { id, operation: "insert", .. } if id == second
    ));
    assert!(store.get_task(second).await.unwrap().is_some());

    std::fs::remove_dir(store.index_path()).unwrap();
    store.initialize().await.unwrap();
    assert_eq!(store.index_drift().await.unwrap(), vec![first, second]);

    let written = store.rebuild_index().await.unwrap();
    assert_eq!(written, 2);
    assert!(store.index_drift().await.unwrap().is_empty());
    assert_eq!(
        store
            .search(&SearchFilter::new().with_keyword("bills"))
            .await
            .unwrap(),
        vec![second]
    );
}

/// Replaces the index file with a directory so SQLite cannot open it.
fn break_index(store: &TaskStore) {
    std::fs::remove_file(store.index_path()).unwrap();
    std::fs::create_dir(store.index_path()).unwrap();
}

#[tokio::test]
async fn test_update_keeps_primary_write_when_index_fails() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();
    break_index(&store);

    let (task, index_error) = store
        .update(id, &TaskChanges::new().set(TaskField::Title, "Rewrite report"))
        .await
        .expect("Primary write should still succeed")
        .into_parts();

    assert_eq!(task.title, "Rewrite report");
    assert!(matches!(
        index_error,
        Some(TaskError::IndexSync { id: failed, operation: "update", .. }) if failed == id
    ));
    assert_eq!(
        store.get_task(id).await.unwrap().unwrap().title,
        "Rewrite report"
    );
}

#[tokio::test]
async fn test_delete_keeps_primary_write_when_index_fails() {
    let (_temp_dir, store) = create_test_store().await;
    let id = store.add(&report_task()).await.unwrap().into_value();
    break_index(&store);

    let (title, index_error) = store
        .delete(id)
        .await
        .expect("Primary write should still succeed")
        .into_parts();

    assert_eq!(title, "Write report");
    assert!(matches!(
        index_error,
        Some(TaskError::IndexSync { id: failed, operation: "delete", .. }) if failed == id
    ));
    assert!(store.get_task(id).await.unwrap().is_none());

    std::fs::remove_dir(store.index_path()).unwrap();
    store.initialize().await.unwrap();
    assert!(store.index_drift().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_empties_both_stores() {
    let (_temp_dir, store) = create_test_store().await;
    store.add(&report_task()).await.unwrap();
    store.add(&report_task()).await.unwrap();

    let cleared = store.clear().await.unwrap();
    assert!(cleared.is_synced());
    assert_eq!(cleared.into_value(), 2);

    assert!(store.list_tasks().await.unwrap().is_empty());
    assert!(store.search(&SearchFilter::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_categories_are_distinct_and_sorted() {
    let (_temp_dir, store) = create_test_store().await;
    store.add(&report_task()).await.unwrap();
    store
        .add(&NewTask::new("Buy groceries", "Bread", "Personal", "10.10.2023", "Medium"))
        .await
        .unwrap();
    store.add(&report_task()).await.unwrap();

    assert_eq!(
        store.categories().await.unwrap(),
        vec!["Personal".to_string(), "Work".to_string()]
    );
}
