use crate::task::store::TaskStore;
use crate::task::types::{Task, TaskError, TaskId};
use chrono::{DateTime, Utc};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, info};

/// Entry in the deadline ordering, wrapped in `Reverse` for min-heap behavior
///
/// Derived `Ord` compares deadline first, id second, so ties pop in id order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct DeadlineEntry {
    deadline: DateTime<Utc>,
    id: TaskId,
}

/// Entry in the priority ordering (max-heap)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PriorityEntry {
    priority: i32,
    /// Registration sequence number; on equal priority the earlier
    /// registration wins.
    seq: u64,
    id: TaskId,
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scheduling policy over the tasks held by a [`TaskStore`]
///
/// Maintains two orderings over task ids: earliest-deadline-first and
/// highest-priority-first. Entries are never removed when a task
/// completes; stale entries are discarded lazily when a read encounters
/// them. Completion state is always read from the store, never cached in
/// the heap entries.
#[derive(Clone, Debug)]
pub struct TaskScheduler {
    deadline_queue: BinaryHeap<Reverse<DeadlineEntry>>,
    priority_queue: BinaryHeap<PriorityEntry>,
    next_seq: u64,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            deadline_queue: BinaryHeap::new(),
            priority_queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Index a newly created task into both orderings
    ///
    /// Must be called exactly once per task, right after the store creates
    /// it; tasks never registered are invisible to the query operations.
    pub fn register(&mut self, task: &Task) {
        self.deadline_queue.push(Reverse(DeadlineEntry {
            deadline: task.deadline,
            id: task.id,
        }));
        self.priority_queue.push(PriorityEntry {
            priority: task.priority,
            seq: self.next_seq,
            id: task.id,
        });
        self.next_seq += 1;
        debug!(
            "indexed task {} (priority {}, deadline {})",
            task.id, task.priority, task.deadline
        );
    }

    /// Direct dependencies of `id` that are not yet satisfied
    ///
    /// A dependency is satisfied only by an existing, completed task; an
    /// id that resolves to nothing counts as blocking.
    pub fn blocking_dependencies(
        &self,
        store: &TaskStore,
        id: TaskId,
    ) -> Result<Vec<TaskId>, TaskError> {
        let task = store.get(id)?;
        Ok(task
            .dependencies
            .iter()
            .copied()
            .filter(|&dep| !store.is_completed(dep))
            .collect())
    }

    /// Whether every direct dependency of `id` is satisfied
    pub fn dependencies_satisfied(
        &self,
        store: &TaskStore,
        id: TaskId,
    ) -> Result<bool, TaskError> {
        Ok(self.blocking_dependencies(store, id)?.is_empty())
    }

    /// Mark `id` completed if all of its direct dependencies are
    ///
    /// Only direct dependencies are checked: a task can only have
    /// completed after its own dependencies did, so a completed task's
    /// transitive closure is complete as well. Neither ordering is touched
    /// on success; stale entries are pruned by the readers.
    pub fn complete_task(&self, store: &mut TaskStore, id: TaskId) -> Result<(), TaskError> {
        let blocking = self.blocking_dependencies(store, id)?;
        if !blocking.is_empty() {
            debug!("task {} blocked by {:?}", id, blocking);
            return Err(TaskError::DependencyUnsatisfied { id, blocking });
        }

        store.mark_completed(id)?;
        info!("task {} completed", id);
        Ok(())
    }

    /// Id of the highest-priority incomplete task, if any
    ///
    /// Completed entries found at the top are popped and discarded for
    /// good; the winning incomplete entry is only peeked, so repeated
    /// calls without intervening completions return the same id. Equal
    /// priorities resolve to the earlier-registered task.
    pub fn highest_priority_pending(&mut self, store: &TaskStore) -> Option<TaskId> {
        while let Some(top) = self.priority_queue.peek() {
            if !store.is_completed(top.id) {
                return Some(top.id);
            }
            let stale = self.priority_queue.pop();
            if let Some(stale) = stale {
                debug!("pruned completed task {} from priority ordering", stale.id);
            }
        }
        None
    }

    /// Pop and return every task whose deadline lies strictly before `now`
    ///
    /// Ids come back in ascending deadline order. Emitted entries are gone
    /// from the deadline ordering permanently: each task is reported
    /// overdue at most once, and completion state is not consulted.
    pub fn sweep_overdue(&mut self, now: DateTime<Utc>) -> Vec<TaskId> {
        let mut overdue = Vec::new();

        while let Some(Reverse(next)) = self.deadline_queue.peek() {
            if next.deadline >= now {
                break;
            }
            if let Some(Reverse(entry)) = self.deadline_queue.pop() {
                debug!("task {} overdue since {}", entry.id, entry.deadline);
                overdue.push(entry.id);
            }
        }

        if !overdue.is_empty() {
            info!("overdue sweep reported {} task(s)", overdue.len());
        }
        overdue
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
