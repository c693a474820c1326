use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Unique identifier for tasks
///
/// Ids are positive, assigned by [`TaskStore`](crate::task::TaskStore) in
/// strictly increasing order starting at 1, and never reused.
pub type TaskId = u64;

/// Core task record with scheduling metadata and completion state
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    /// Higher value = more urgent
    pub priority: i32,
    /// Ids of tasks that must be completed before this one may complete.
    /// Append-only; referenced ids are not validated to exist.
    pub dependencies: BTreeSet<TaskId>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Task specification for creating new tasks
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TaskSpec {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub priority: i32,
    /// Initial dependencies; same semantics as adding them one by one
    /// after creation.
    pub dependencies: Vec<TaskId>,
}

/// Errors reported by the task registry and scheduler
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task {id} not found")]
    NotFound { id: TaskId },

    #[error("task {id} cannot be completed: blocked by dependencies {blocking:?}")]
    DependencyUnsatisfied { id: TaskId, blocking: Vec<TaskId> },
}

impl Task {
    /// Create a new task record from a specification
    pub fn new(id: TaskId, spec: TaskSpec) -> Self {
        Self {
            id,
            title: spec.title,
            description: spec.description,
            deadline: spec.deadline,
            priority: spec.priority,
            dependencies: spec.dependencies.into_iter().collect(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Check whether the deadline has passed relative to `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now
    }
}

impl TaskSpec {
    /// Create a spec with no initial dependencies
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        priority: i32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline,
            priority,
            dependencies: Vec::new(),
        }
    }

    /// Add initial dependencies to the spec
    pub fn with_dependencies(mut self, dependencies: Vec<TaskId>) -> Self {
        self.dependencies = dependencies;
        self
    }
}
