//! In-memory task board.
//!
//! Collaborator plumbing for the auth layer: the task endpoints exist to
//! exercise the gateway and the client renewal protocol. Owner-scoped —
//! every operation sees only the calling account's tasks.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use taskhub_core::pagination::{Page, PageRequest};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A task owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: i64,
    /// Owning account.
    pub user_id: i64,
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Priority.
    pub priority: Priority,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Concurrent, owner-scoped task store.
#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: DashMap<i64, Task>,
    next_id: AtomicI64,
}

impl TaskBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            tasks: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a board seeded with the demo tasks.
    pub fn with_demo_tasks() -> Self {
        let board = Self::new();
        let seed = [
            (1, "Configurer le client HTTP", true, Priority::High),
            (1, "Implémenter les tokens JWT", false, Priority::High),
            (1, "Brancher le renouvellement de session", false, Priority::Medium),
            (2, "Tester la pagination", true, Priority::Low),
            (2, "Écrire les tests d'intégration", false, Priority::Medium),
            (3, "Optimiser les performances", false, Priority::High),
            (3, "Documenter l'API", true, Priority::Low),
        ];
        for (user_id, title, completed, priority) in seed {
            let task = board.create(user_id, title.to_string(), priority);
            if completed {
                board.toggle(user_id, task.id);
            }
        }
        board
    }

    /// Creates a task owned by `user_id`.
    pub fn create(&self, user_id: i64, title: String, priority: Priority) -> Task {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let task = Task {
            id,
            user_id,
            title,
            completed: false,
            priority,
            created_at: Utc::now(),
        };
        self.tasks.insert(id, task.clone());
        task
    }

    /// Lists the caller's tasks, newest id first, paginated.
    pub fn list(&self, user_id: i64, page: &PageRequest) -> Page<Task> {
        let mut owned: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        owned.sort_by_key(|t| std::cmp::Reverse(t.id));

        let total = owned.len() as u64;
        let items = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Page::new(items, page.page, page.page_size, total)
    }

    /// Flips the completion flag of one of the caller's tasks.
    pub fn toggle(&self, user_id: i64, task_id: i64) -> Option<Task> {
        let mut entry = self.tasks.get_mut(&task_id)?;
        if entry.user_id != user_id {
            return None;
        }
        entry.completed = !entry.completed;
        Some(entry.clone())
    }

    /// Deletes one of the caller's tasks. Returns whether anything was
    /// removed.
    pub fn delete(&self, user_id: i64, task_id: i64) -> bool {
        self.tasks
            .remove_if(&task_id, |_, task| task.user_id == user_id)
            .is_some()
    }
}
