use crate::task::types::{Task, TaskError, TaskId, TaskSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Authoritative task registry
///
/// Owns the canonical task records and the id counter. Completion state
/// lives here and nowhere else; the scheduler's orderings hold only ids
/// and consult this store at read time.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TaskStore {
    tasks: HashMap<TaskId, Task>,
    /// Next id to hand out. Owned by the store and bumped under the same
    /// borrow as the insert, so ids are dense and never reused.
    next_id: TaskId,
}

impl TaskStore {
    /// Create an empty store; the first task gets id 1
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a new task record and return its id
    ///
    /// Always succeeds. The record is visible to all subsequent lookups.
    pub fn add_task(&mut self, spec: TaskSpec) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;

        let task = Task::new(id, spec);
        debug!("registered task {} ({:?})", id, task.title);
        self.tasks.insert(id, task);
        id
    }

    /// Get a task by id
    pub fn get(&self, id: TaskId) -> Result<&Task, TaskError> {
        self.tasks.get(&id).ok_or(TaskError::NotFound { id })
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task, TaskError> {
        self.tasks.get_mut(&id).ok_or(TaskError::NotFound { id })
    }

    /// Record that `task_id` must wait for `dependency_id`
    ///
    /// The dependency id is not validated: it may reference a task that
    /// does not exist (yet). Fails only if `task_id` itself is unknown.
    pub fn add_dependency(
        &mut self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> Result<(), TaskError> {
        let task = self.get_mut(task_id)?;
        task.dependencies.insert(dependency_id);
        debug!("task {} now depends on {}", task_id, dependency_id);
        Ok(())
    }

    /// Flip the completed flag to true
    ///
    /// Storage does not check dependencies; gating is scheduler policy.
    /// The flip is one-way: there is no operation that clears it.
    pub fn mark_completed(&mut self, id: TaskId) -> Result<(), TaskError> {
        let task = self.get_mut(id)?;
        task.completed = true;
        debug!("task {} marked completed", id);
        Ok(())
    }

    /// Whether `id` refers to an existing, completed task
    ///
    /// An unknown id reads as not completed.
    pub fn is_completed(&self, id: TaskId) -> bool {
        self.tasks.get(&id).map(|t| t.completed).unwrap_or(false)
    }

    /// Iterate over all task records, in unspecified order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Number of tasks ever created (none are deleted)
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
