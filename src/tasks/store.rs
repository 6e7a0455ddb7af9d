//! Durable task store over a single flat JSON file.
//!
//! Every operation is a full read-modify-write: the file is the only source
//! of truth and nothing is cached between calls. A store-scoped mutex
//! serializes the cycles so overlapping mutations cannot lose updates, and
//! writes go to a temp file renamed over the target so a failed write never
//! truncates the collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, TaskError};

use super::types::{NewTask, StatusFilter, Task, TaskStatus};

/// Outcome of a status update, keeping the prior status for reporting.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The status before the update.
    pub previous: TaskStatus,
    /// The task after the update.
    pub task: Task,
}

/// File-backed task store.
pub struct TaskStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TaskStore {
    /// Create a store over the given file. The file is created on first
    /// mutation; until then it reads as an empty collection.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List tasks, optionally restricted to one status.
    pub async fn list(&self, filter: StatusFilter) -> Result<Vec<Task>> {
        let _guard = self.lock.lock().await;
        let tasks = self.load().await?;
        Ok(tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Add a task, assigning the next id and stamping `created_at`.
    pub async fn add(&self, new: NewTask) -> Result<Task> {
        if new.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle.into());
        }

        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?;

        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            title: new.title,
            description: new.description,
            status: TaskStatus::Pending,
            priority: new.priority,
            due_date: new.due_date,
            created_at: Utc::now(),
            updated_at: None,
        };

        tasks.push(task.clone());
        self.persist(&tasks).await?;
        debug!(id = task.id, title = %task.title, "added task");
        Ok(task)
    }

    /// Change the status of a task, stamping `updated_at`.
    pub async fn update_status(&self, id: u64, status: TaskStatus) -> Result<StatusChange> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?;

        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Err(TaskError::NotFound(id).into());
        };

        let previous = task.status;
        task.status = status;
        task.updated_at = Some(Utc::now());
        let updated = task.clone();

        self.persist(&tasks).await?;
        debug!(id, from = previous.as_str(), to = status.as_str(), "updated task status");
        Ok(StatusChange {
            previous,
            task: updated,
        })
    }

    /// Remove a task, returning the removed record.
    pub async fn delete(&self, id: u64) -> Result<Task> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?;

        let Some(position) = tasks.iter().position(|t| t.id == id) else {
            return Err(TaskError::NotFound(id).into());
        };

        let removed = tasks.remove(position);
        self.persist(&tasks).await?;
        debug!(id, "deleted task");
        Ok(removed)
    }

    /// Read the whole collection. A missing file is an empty collection.
    async fn load(&self) -> Result<Vec<Task>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole collection on disk atomically.
    async fn persist(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_vec_pretty(tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(TaskError::Persistence)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(TaskError::Persistence)?;
        Ok(())
    }
}
