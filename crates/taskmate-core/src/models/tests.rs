#[cfg(test)]
mod model_tests {
    use crate::models::{Fetched, NewTask, Selector, Task, TaskField, DEFAULT_STATUS};

    fn create_test_task() -> Task {
        Task {
            id: 12,
            title: "Проанализировать отчет".to_string(),
            description: "Quarterly REPORT feedback".to_string(),
            category: "Работа".to_string(),
            due_date: "18.10.2023".to_string(),
            priority: "Высокий".to_string(),
            status: "Not Done".to_string(),
        }
    }

    #[test]
    fn test_new_task_defaults_status() {
        let new_task = NewTask::new("Title", "Description", "Home", "01.11.2023", "Low");
        assert_eq!(new_task.status(), DEFAULT_STATUS);

        let task = new_task.into_task(5);
        assert_eq!(task.id, 5);
        assert_eq!(task.status, DEFAULT_STATUS);
    }

    #[test]
    fn test_new_task_keeps_explicit_status() {
        let task = NewTask::new("Title", "Description", "Home", "01.11.2023", "Low")
            .with_status("In review")
            .into_task(1);
        assert_eq!(task.status, "In review");
    }

    #[test]
    fn test_new_task_validation_names_blank_field() {
        let mut new_task = NewTask::new("Title", "Description", "Home", "01.11.2023", "Low");
        assert!(new_task.validate().is_ok());

        new_task.category = " ".to_string();
        let err = new_task.validate().unwrap_err();
        assert!(err.to_string().contains("'category'"));

        let err = NewTask::new("Title", "Description", "Home", "01.11.2023", "Low")
            .with_status("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("'status'"));
    }

    #[test]
    fn test_lowercased_folds_every_text_field() {
        let lowered = create_test_task().lowercased();

        assert_eq!(lowered.id, 12);
        assert_eq!(lowered.title, "проанализировать отчет");
        assert_eq!(lowered.description, "quarterly report feedback");
        assert_eq!(lowered.category, "работа");
        assert_eq!(lowered.priority, "высокий");
        assert_eq!(lowered.status, "not done");
    }

    #[test]
    fn test_field_accessor_matches_struct() {
        let task = create_test_task();
        assert_eq!(task.field(TaskField::Title), task.title);
        assert_eq!(task.field(TaskField::DueDate), task.due_date);
        assert_eq!(task.field(TaskField::Status), task.status);
    }

    #[test]
    fn test_is_done_ignores_case() {
        let mut task = create_test_task();
        assert!(!task.is_done());
        task.status = "DONE".to_string();
        assert!(task.is_done());
    }

    #[test]
    fn test_selector_conversions() {
        assert_eq!(Selector::from(None), Selector::All);
        assert_eq!(Selector::from(Some(3)), Selector::One(3));
        assert_eq!(Selector::from(vec![2, 1]), Selector::Many(vec![2, 1]));
    }

    #[test]
    fn test_fetched_into_vec() {
        let task = create_test_task();
        assert_eq!(Fetched::One(task.clone()).into_vec(), vec![task.clone()]);
        assert_eq!(Fetched::Many(vec![]).len(), 0);
        assert!(Fetched::Many(vec![]).is_empty());
        assert_eq!(Fetched::Many(vec![task.clone(), task]).len(), 2);
    }

    #[test]
    fn test_task_serializes_to_json() {
        let json = serde_json::to_string(&create_test_task()).unwrap();
        assert!(json.contains("\"due_date\":\"18.10.2023\""));

        let parsed: NewTask = serde_json::from_str(
            r#"{"title":"t","description":"d","category":"c","due_date":"01.01.2024","priority":"p"}"#,
        )
        .unwrap();
        assert_eq!(parsed.status, None);
    }
}
