//! End-to-end task tracking over a real file.

use tempfile::TempDir;

use valet::tools::{AddTaskParams, DeleteTaskParams, ListTasksParams, UpdateTaskStatusParams};
use valet::{Assistant, Config, StatusFilter, TaskStore};

fn assistant() -> (TempDir, Assistant) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tasks.data_file = dir
        .path()
        .join("tasks_data.json")
        .to_string_lossy()
        .into_owned();
    (dir, Assistant::new(config, None))
}

fn add(title: &str) -> AddTaskParams {
    AddTaskParams {
        title: title.to_string(),
        description: None,
        priority: None,
        due_date: None,
    }
}

#[tokio::test]
async fn add_list_update_delete_flow() {
    let (_dir, assistant) = assistant();

    assert_eq!(
        assistant.add_task(add("Buy groceries")).await,
        "Task 'Buy groceries' added successfully with ID 1."
    );
    assert_eq!(
        assistant
            .add_task(AddTaskParams {
                title: "File taxes".to_string(),
                description: Some("Federal and state".to_string()),
                priority: Some("high".to_string()),
                due_date: Some("2024-04-15".to_string()),
            })
            .await,
        "Task 'File taxes' added successfully with ID 2."
    );

    let listing = assistant.list_tasks(ListTasksParams { status: None }).await;
    assert!(listing.contains("Task #1: Buy groceries"));
    assert!(listing.contains("Task #2: File taxes"));
    assert!(listing.contains("Due Date: 2024-04-15"));
    assert!(listing.contains("Description: Federal and state"));

    assert_eq!(
        assistant
            .update_task_status(UpdateTaskStatusParams {
                id: 2,
                status: "completed".to_string(),
            })
            .await,
        "Task #2 status updated from 'pending' to 'completed'."
    );

    let completed = assistant
        .list_tasks(ListTasksParams {
            status: Some("completed".to_string()),
        })
        .await;
    assert!(completed.contains("Task #2: File taxes"));
    assert!(!completed.contains("Buy groceries"));

    assert_eq!(
        assistant.delete_task(DeleteTaskParams { id: 1 }).await,
        "Task #1 deleted successfully."
    );

    let remaining = assistant.list_tasks(ListTasksParams { status: None }).await;
    assert!(!remaining.contains("Buy groceries"));
}

#[tokio::test]
async fn ids_survive_process_restarts_and_are_never_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks_data.json");

    {
        let mut config = Config::default();
        config.tasks.data_file = path.to_string_lossy().into_owned();
        let assistant = Assistant::new(config, None);
        assistant.add_task(add("First")).await;
        assistant.add_task(add("Second")).await;
        assistant.delete_task(DeleteTaskParams { id: 1 }).await;
    }

    // A fresh assistant over the same file continues the numbering.
    let mut config = Config::default();
    config.tasks.data_file = path.to_string_lossy().into_owned();
    let assistant = Assistant::new(config, None);
    assert_eq!(
        assistant.add_task(add("Third")).await,
        "Task 'Third' added successfully with ID 3."
    );
}

#[tokio::test]
async fn filtering_is_case_insensitive() {
    let (_dir, assistant) = assistant();
    assistant.add_task(add("Anything")).await;

    let listing = assistant
        .list_tasks(ListTasksParams {
            status: Some("PENDING".to_string()),
        })
        .await;
    assert!(listing.contains("Task #1: Anything"));
}

#[tokio::test]
async fn unknown_filter_is_a_validation_error() {
    let (_dir, assistant) = assistant();
    let message = assistant
        .list_tasks(ListTasksParams {
            status: Some("archived".to_string()),
        })
        .await;
    assert_eq!(
        message,
        "Invalid status: archived. Must be one of: pending, in_progress, completed."
    );
}

#[tokio::test]
async fn not_found_update_leaves_collection_unchanged() {
    let (dir, assistant) = assistant();
    assistant.add_task(add("Keep")).await;

    let path = dir.path().join("tasks_data.json");
    let before = std::fs::read(&path).unwrap();

    let message = assistant
        .update_task_status(UpdateTaskStatusParams {
            id: 99,
            status: "completed".to_string(),
        })
        .await;
    assert_eq!(message, "Task with ID 99 not found.");
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn concurrent_adds_do_not_lose_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = std::sync::Arc::new(TaskStore::new(dir.path().join("tasks_data.json")));

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .add(valet::NewTask {
                    title: format!("Task {i}"),
                    ..Default::default()
                })
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let tasks = store.list(StatusFilter::All).await.unwrap();
    assert_eq!(tasks.len(), 10);

    let mut ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
}
