//! # taskdeck
//!
//! An in-memory task tracker: every task carries a deadline, a priority,
//! and a set of prerequisite task ids that must be completed before the
//! task itself may be marked done. Two orderings over the registry keep
//! the interesting queries cheap as tasks are added and completed.
//!
//! ## Architecture Overview
//!
//! The system consists of a small core plus CLI glue:
//!
//! - **[`task`]**: the task registry ([`task::TaskStore`]), the two-heap
//!   scheduling policy ([`task::TaskScheduler`]), and the async facade
//!   ([`task::TaskManager`]) the command loop drives
//! - **[`cli`]**: argument parsing, configuration discovery, and
//!   interactive menu input handling
//! - **[`env`]**: directory and file name constants for configuration
//!   discovery
//!
//! ## Design
//!
//! The store is the single source of truth for completion state; the
//! scheduler's deadline and priority orderings hold only task ids.
//! Completing a task leaves both orderings untouched; stale entries are
//! discarded lazily when a query encounters them, so completion stays
//! O(1) in the indices and the cost of staleness is paid only by the
//! readers that need correctness.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use taskdeck::{TaskManager, TaskSpec};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let manager = TaskManager::new();
//!
//!     let report = manager
//!         .create_task(TaskSpec::new(
//!             "Write report",
//!             "Quarterly numbers",
//!             Utc::now() + Duration::days(1),
//!             8,
//!         ))
//!         .await?;
//!
//!     manager.complete_task(report).await?;
//!
//!     if let Some(next) = manager.highest_priority_pending().await {
//!         println!("Next up: task {}", next);
//!     }
//!     Ok(())
//! }
//! ```

/// Task registry, scheduling policy, and the management facade.
///
/// Provides the authoritative task store, the deadline/priority orderings
/// with lazy deletion, and dependency-gated completion.
pub mod task;

/// CLI argument parsing, configuration discovery, and menu input.
pub mod cli;

/// Environment constants and path utilities.
///
/// Centralizes the directory and file names used by configuration
/// discovery.
pub mod env;

// Re-export main task types
pub use task::{
    LoggingEventHandler, Task, TaskError, TaskEvent, TaskEventHandler, TaskId, TaskManager,
    TaskScheduler, TaskSpec, TaskStatistics, TaskStore,
};

// Re-export CLI types used by the binary
pub use cli::{Args, ConfigDiscovery, DefaultsConfig, ExecutionMode};
