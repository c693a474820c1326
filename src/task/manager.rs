use crate::task::scheduler::TaskScheduler;
use crate::task::store::TaskStore;
use crate::task::types::{Task, TaskError, TaskId, TaskSpec};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Central task management facade
///
/// Wraps the store and the scheduler behind one lock and exposes the
/// operations the command loop drives. Events are emitted to registered
/// handlers after each state change.
pub struct TaskManager {
    state: Arc<Mutex<SchedulerState>>,
    event_handlers: Vec<Box<dyn TaskEventHandler + Send + Sync>>,
}

/// Store and orderings guarded as a unit
///
/// Creating and completing tasks touch both, so a single mutex holds them
/// together; they must never be observed out of step.
struct SchedulerState {
    store: TaskStore,
    scheduler: TaskScheduler,
}

/// Registry counters, computed on demand
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStatistics {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
}

/// Events that can occur during task management
#[derive(Debug, Clone)]
pub enum TaskEvent {
    TaskCreated {
        task_id: TaskId,
    },
    DependencyAdded {
        task_id: TaskId,
        dependency_id: TaskId,
    },
    TaskCompleted {
        task_id: TaskId,
    },
    CompletionBlocked {
        task_id: TaskId,
        blocking: Vec<TaskId>,
    },
    TasksOverdue {
        task_ids: Vec<TaskId>,
    },
}

/// Handler for task events
pub trait TaskEventHandler {
    fn handle_event(&self, event: &TaskEvent) -> Result<()>;
}

impl TaskManager {
    /// Create a manager over an empty registry
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                store: TaskStore::new(),
                scheduler: TaskScheduler::new(),
            })),
            event_handlers: Vec::new(),
        }
    }

    /// Create a new task and index it into both orderings
    pub async fn create_task(&self, spec: TaskSpec) -> Result<TaskId, TaskError> {
        let task_id = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let id = state.store.add_task(spec);
            let task = state.store.get(id)?;
            state.scheduler.register(task);
            id
        };

        self.emit_event(TaskEvent::TaskCreated { task_id });
        debug!("created task {}", task_id);
        Ok(task_id)
    }

    /// Record a dependency on `dependency_id` for `task_id`
    pub async fn add_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> Result<(), TaskError> {
        {
            let mut guard = self.state.lock().await;
            guard.store.add_dependency(task_id, dependency_id)?;
        }

        self.emit_event(TaskEvent::DependencyAdded {
            task_id,
            dependency_id,
        });
        Ok(())
    }

    /// Complete `task_id` if its direct dependencies allow it
    pub async fn complete_task(&self, task_id: TaskId) -> Result<(), TaskError> {
        let outcome = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            state.scheduler.complete_task(&mut state.store, task_id)
        };

        match &outcome {
            Ok(()) => self.emit_event(TaskEvent::TaskCompleted { task_id }),
            Err(TaskError::DependencyUnsatisfied { blocking, .. }) => {
                self.emit_event(TaskEvent::CompletionBlocked {
                    task_id,
                    blocking: blocking.clone(),
                });
            }
            Err(TaskError::NotFound { .. }) => {}
        }
        outcome
    }

    /// Id of the highest-priority incomplete task, if any
    pub async fn highest_priority_pending(&self) -> Option<TaskId> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        state.scheduler.highest_priority_pending(&state.store)
    }

    /// One-shot report of tasks whose deadline lies before `now`
    pub async fn sweep_overdue(&self, now: DateTime<Utc>) -> Vec<TaskId> {
        let task_ids = {
            let mut guard = self.state.lock().await;
            guard.scheduler.sweep_overdue(now)
        };

        if !task_ids.is_empty() {
            self.emit_event(TaskEvent::TasksOverdue {
                task_ids: task_ids.clone(),
            });
        }
        task_ids
    }

    /// Unsatisfied direct dependencies of `task_id`
    pub async fn blocking_dependencies(&self, task_id: TaskId) -> Result<Vec<TaskId>, TaskError> {
        let guard = self.state.lock().await;
        guard.scheduler.blocking_dependencies(&guard.store, task_id)
    }

    /// Get a snapshot of a single task
    pub async fn get_task(&self, task_id: TaskId) -> Result<Task, TaskError> {
        let guard = self.state.lock().await;
        Ok(guard.store.get(task_id)?.clone())
    }

    /// Snapshots of every task, in unspecified order
    pub async fn list_tasks(&self) -> Vec<Task> {
        let guard = self.state.lock().await;
        guard.store.tasks().cloned().collect()
    }

    /// Current registry counters
    pub async fn statistics(&self) -> TaskStatistics {
        let guard = self.state.lock().await;
        let total = guard.store.len() as u32;
        let completed = guard.store.tasks().filter(|t| t.completed).count() as u32;
        TaskStatistics {
            total_tasks: total,
            completed_tasks: completed,
            pending_tasks: total - completed,
        }
    }

    /// Export the registry as pretty-printed JSON
    pub async fn export_to_json(&self) -> Result<String> {
        let guard = self.state.lock().await;
        serde_json::to_string_pretty(&guard.store).map_err(|e| anyhow!("serialization error: {}", e))
    }

    /// Add event handler
    pub fn add_event_handler(&mut self, handler: Box<dyn TaskEventHandler + Send + Sync>) {
        self.event_handlers.push(handler);
    }

    /// Emit task event to all handlers
    fn emit_event(&self, event: TaskEvent) {
        for handler in &self.event_handlers {
            if let Err(e) = handler.handle_event(&event) {
                error!("event handler error: {}", e);
            }
        }
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple event handler that logs events
pub struct LoggingEventHandler;

impl TaskEventHandler for LoggingEventHandler {
    fn handle_event(&self, event: &TaskEvent) -> Result<()> {
        match event {
            TaskEvent::TaskCreated { task_id } => {
                info!("task created: {}", task_id);
            }
            TaskEvent::DependencyAdded {
                task_id,
                dependency_id,
            } => {
                info!("task {} now depends on {}", task_id, dependency_id);
            }
            TaskEvent::TaskCompleted { task_id } => {
                info!("task completed: {}", task_id);
            }
            TaskEvent::CompletionBlocked { task_id, blocking } => {
                warn!("task {} blocked by dependencies {:?}", task_id, blocking);
            }
            TaskEvent::TasksOverdue { task_ids } => {
                warn!("overdue tasks: {:?}", task_ids);
            }
        }
        Ok(())
    }
}
