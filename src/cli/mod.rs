//! CLI-specific functionality for taskdeck
//!
//! This module contains all CLI-related code including argument parsing,
//! interactive menu input handling, and configuration discovery.

pub mod args;
pub mod config;
pub mod menu;

pub use args::{Args, Commands, ExecutionMode, InteractiveConfig};
pub use config::{ConfigDiscovery, DefaultsConfig};
pub use menu::{parse_deadline, prompt_line, prompt_priority, prompt_task_id, show_menu};
