#[cfg(test)]
mod tests {
    use crate::task::manager::*;
    use crate::task::scheduler::*;
    use crate::task::store::*;
    use crate::task::types::*;
    use chrono::{Duration, Utc};
    use std::sync::{Arc, Mutex};

    // Helper to build a spec with a deadline relative to now
    fn spec(title: &str, priority: i32, deadline_offset_hours: i64) -> TaskSpec {
        TaskSpec::new(
            title,
            format!("{} description", title),
            Utc::now() + Duration::hours(deadline_offset_hours),
            priority,
        )
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut store = TaskStore::new();

        let first = store.add_task(spec("first", 1, 1));
        let second = store.add_task(spec("second", 2, 2));
        let third = store.add_task(spec("third", 3, 3));

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_new_task_starts_incomplete_with_no_dependencies() {
        let mut store = TaskStore::new();
        let id = store.add_task(spec("fresh", 4, 1));

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "fresh");
        assert_eq!(task.priority, 4);
        assert!(!task.completed);
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_get_unknown_task_is_not_found() {
        let store = TaskStore::new();
        assert_eq!(store.get(42).unwrap_err(), TaskError::NotFound { id: 42 });
    }

    #[test]
    fn test_add_dependency_to_unknown_task_is_not_found() {
        let mut store = TaskStore::new();
        let existing = store.add_task(spec("existing", 1, 1));

        let result = store.add_dependency(99, existing);
        assert_eq!(result, Err(TaskError::NotFound { id: 99 }));

        // no state change
        assert_eq!(store.len(), 1);
        assert!(store.get(existing).unwrap().dependencies.is_empty());
    }

    #[test]
    fn test_dangling_dependency_is_recorded_but_blocks_completion() {
        let mut store = TaskStore::new();
        let scheduler = TaskScheduler::new();
        let id = store.add_task(spec("dangling", 1, 1));

        // the referenced id does not exist; recording it still succeeds
        store.add_dependency(id, 42).unwrap();
        assert!(store.get(id).unwrap().dependencies.contains(&42));

        let result = scheduler.complete_task(&mut store, id);
        assert_eq!(
            result,
            Err(TaskError::DependencyUnsatisfied {
                id,
                blocking: vec![42]
            })
        );
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_completion_gated_on_direct_dependencies() {
        let mut store = TaskStore::new();
        let scheduler = TaskScheduler::new();

        let a = store.add_task(spec("a", 1, 1));
        let b = store.add_task(spec("b", 2, 2));
        store.add_dependency(b, a).unwrap();

        let blocked = scheduler.complete_task(&mut store, b);
        assert_eq!(
            blocked,
            Err(TaskError::DependencyUnsatisfied {
                id: b,
                blocking: vec![a]
            })
        );

        scheduler.complete_task(&mut store, a).unwrap();
        scheduler.complete_task(&mut store, b).unwrap();
        assert!(store.get(b).unwrap().completed);
    }

    #[test]
    fn test_transitive_chain_completes_in_order_only() {
        let mut store = TaskStore::new();
        let scheduler = TaskScheduler::new();

        // c -> b -> a
        let a = store.add_task(spec("a", 1, 1));
        let b = store.add_task(spec("b", 1, 2));
        let c = store.add_task(spec("c", 1, 3));
        store.add_dependency(b, a).unwrap();
        store.add_dependency(c, b).unwrap();

        assert!(scheduler.complete_task(&mut store, c).is_err());
        assert!(scheduler.complete_task(&mut store, b).is_err());
        scheduler.complete_task(&mut store, a).unwrap();
        assert!(scheduler.complete_task(&mut store, c).is_err());
        scheduler.complete_task(&mut store, b).unwrap();
        scheduler.complete_task(&mut store, c).unwrap();
    }

    #[test]
    fn test_completion_is_monotonic() {
        let mut store = TaskStore::new();
        let scheduler = TaskScheduler::new();
        let id = store.add_task(spec("once", 1, 1));

        scheduler.complete_task(&mut store, id).unwrap();
        assert!(store.get(id).unwrap().completed);

        // completing again is a no-op, never a reset
        scheduler.complete_task(&mut store, id).unwrap();
        assert!(store.get(id).unwrap().completed);

        // late dependency additions cannot un-complete the task
        store.add_dependency(id, 999).unwrap();
        assert!(store.get(id).unwrap().completed);
    }

    #[test]
    fn test_dependencies_satisfied_query() {
        let mut store = TaskStore::new();
        let scheduler = TaskScheduler::new();

        let a = store.add_task(spec("a", 1, 1));
        let b = store.add_task(spec("b", 1, 2));
        store.add_dependency(b, a).unwrap();

        assert!(scheduler.dependencies_satisfied(&store, a).unwrap());
        assert!(!scheduler.dependencies_satisfied(&store, b).unwrap());
        assert_eq!(
            scheduler.blocking_dependencies(&store, b).unwrap(),
            vec![a]
        );

        scheduler.complete_task(&mut store, a).unwrap();
        assert!(scheduler.dependencies_satisfied(&store, b).unwrap());
    }

    #[test]
    fn test_highest_priority_pending_skips_completed() {
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let low = store.add_task(spec("low", 3, 1));
        let high = store.add_task(spec("high", 9, 2));
        scheduler.register(store.get(low).unwrap());
        scheduler.register(store.get(high).unwrap());

        assert_eq!(scheduler.highest_priority_pending(&store), Some(high));

        scheduler.complete_task(&mut store, high).unwrap();
        assert_eq!(scheduler.highest_priority_pending(&store), Some(low));

        scheduler.complete_task(&mut store, low).unwrap();
        assert_eq!(scheduler.highest_priority_pending(&store), None);
    }

    #[test]
    fn test_highest_priority_pending_is_repeatable() {
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let id = store.add_task(spec("only", 5, 1));
        scheduler.register(store.get(id).unwrap());

        // the winning entry stays queued across reads
        assert_eq!(scheduler.highest_priority_pending(&store), Some(id));
        assert_eq!(scheduler.highest_priority_pending(&store), Some(id));
    }

    #[test]
    fn test_priority_ties_resolve_to_earlier_registration() {
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let first = store.add_task(spec("first", 7, 1));
        let second = store.add_task(spec("second", 7, 2));
        scheduler.register(store.get(first).unwrap());
        scheduler.register(store.get(second).unwrap());

        assert_eq!(scheduler.highest_priority_pending(&store), Some(first));

        scheduler.complete_task(&mut store, first).unwrap();
        assert_eq!(scheduler.highest_priority_pending(&store), Some(second));
    }

    #[test]
    fn test_sweep_reports_ascending_deadlines_exactly_once() {
        let now = Utc::now();
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let late = store.add_task(spec("late", 1, -1));
        let later = store.add_task(spec("later", 1, -3));
        let future = store.add_task(spec("future", 1, 2));
        scheduler.register(store.get(late).unwrap());
        scheduler.register(store.get(later).unwrap());
        scheduler.register(store.get(future).unwrap());

        // ascending deadline order: -3h before -1h; the future task stays
        assert_eq!(scheduler.sweep_overdue(now), vec![later, late]);

        // one-shot: an immediate second sweep reports nothing
        assert_eq!(scheduler.sweep_overdue(now), Vec::<TaskId>::new());
    }

    #[test]
    fn test_sweep_is_strictly_before_now() {
        let now = Utc::now();
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let id = store.add_task(TaskSpec::new("exact", "on the boundary", now, 1));
        scheduler.register(store.get(id).unwrap());

        assert_eq!(scheduler.sweep_overdue(now), Vec::<TaskId>::new());
        assert_eq!(scheduler.sweep_overdue(now + Duration::seconds(1)), vec![id]);
    }

    #[test]
    fn test_sweep_reports_completed_tasks_too() {
        let now = Utc::now();
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let id = store.add_task(spec("done early", 1, -1));
        scheduler.register(store.get(id).unwrap());
        scheduler.complete_task(&mut store, id).unwrap();

        // completion does not remove the deadline entry
        assert_eq!(scheduler.sweep_overdue(now), vec![id]);
    }

    #[test]
    fn test_two_task_scenario() {
        let now = Utc::now();
        let mut store = TaskStore::new();
        let mut scheduler = TaskScheduler::new();

        let a = store.add_task(TaskSpec::new("a", "", now + Duration::hours(1), 5));
        let b = store.add_task(
            TaskSpec::new("b", "", now - Duration::hours(1), 9).with_dependencies(vec![a]),
        );
        scheduler.register(store.get(a).unwrap());
        scheduler.register(store.get(b).unwrap());

        assert_eq!(scheduler.highest_priority_pending(&store), Some(b));

        assert_eq!(
            scheduler.complete_task(&mut store, b),
            Err(TaskError::DependencyUnsatisfied {
                id: b,
                blocking: vec![a]
            })
        );
        scheduler.complete_task(&mut store, a).unwrap();
        scheduler.complete_task(&mut store, b).unwrap();

        assert_eq!(scheduler.highest_priority_pending(&store), None);
        assert_eq!(scheduler.sweep_overdue(now), vec![b]);
    }

    #[tokio::test]
    async fn test_manager_create_and_get() {
        let manager = TaskManager::new();

        let id = manager.create_task(spec("managed", 6, 1)).await.unwrap();
        assert_eq!(id, 1);

        let task = manager.get_task(id).await.unwrap();
        assert_eq!(task.title, "managed");
        assert!(!task.completed);

        assert_eq!(
            manager.get_task(5).await.unwrap_err(),
            TaskError::NotFound { id: 5 }
        );
    }

    #[tokio::test]
    async fn test_manager_dependency_flow() {
        let manager = TaskManager::new();

        let a = manager.create_task(spec("a", 5, 1)).await.unwrap();
        let b = manager.create_task(spec("b", 9, -1)).await.unwrap();
        manager.add_dependency(b, a).await.unwrap();

        assert_eq!(manager.highest_priority_pending().await, Some(b));
        assert!(manager.complete_task(b).await.is_err());
        assert_eq!(manager.blocking_dependencies(b).await.unwrap(), vec![a]);

        manager.complete_task(a).await.unwrap();
        manager.complete_task(b).await.unwrap();
        assert_eq!(manager.highest_priority_pending().await, None);
    }

    #[tokio::test]
    async fn test_manager_statistics_and_listing() {
        let manager = TaskManager::new();

        let a = manager.create_task(spec("a", 1, 1)).await.unwrap();
        manager.create_task(spec("b", 2, 2)).await.unwrap();
        manager.complete_task(a).await.unwrap();

        let stats = manager.statistics().await;
        assert_eq!(
            stats,
            TaskStatistics {
                total_tasks: 2,
                completed_tasks: 1,
                pending_tasks: 1,
            }
        );

        let tasks = manager.list_tasks().await;
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_manager_json_export() {
        let manager = TaskManager::new();
        manager.create_task(spec("exported", 3, 1)).await.unwrap();

        let json = manager.export_to_json().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tasks"]["1"]["title"], "exported");
    }

    // Handler that records which events fired, for assertions
    struct RecordingEventHandler {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl TaskEventHandler for RecordingEventHandler {
        fn handle_event(&self, event: &TaskEvent) -> anyhow::Result<()> {
            let label = match event {
                TaskEvent::TaskCreated { .. } => "created",
                TaskEvent::DependencyAdded { .. } => "dependency",
                TaskEvent::TaskCompleted { .. } => "completed",
                TaskEvent::CompletionBlocked { .. } => "blocked",
                TaskEvent::TasksOverdue { .. } => "overdue",
            };
            self.seen.lock().unwrap().push(label.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_manager_emits_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut manager = TaskManager::new();
        manager.add_event_handler(Box::new(RecordingEventHandler { seen: seen.clone() }));

        let a = manager.create_task(spec("a", 5, -1)).await.unwrap();
        let b = manager.create_task(spec("b", 9, 1)).await.unwrap();
        manager.add_dependency(b, a).await.unwrap();
        let _ = manager.complete_task(b).await;
        manager.complete_task(a).await.unwrap();
        manager.sweep_overdue(Utc::now()).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "created",
                "created",
                "dependency",
                "blocked",
                "completed",
                "overdue"
            ]
        );
    }
}
