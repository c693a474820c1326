//! Environment constants and path utilities for taskdeck.
//!
//! Centralizes the directory and file names used by configuration
//! discovery so they stay consistent across the application.

use std::path::{Path, PathBuf};

/// Main application directory name (hidden directory like .git, .vscode)
pub const APP_DIR_NAME: &str = ".taskdeck";

/// Configuration file name inside the application directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Project-local configuration file name checked in the working directory
pub const PROJECT_CONFIG_FILE_NAME: &str = "taskdeck.toml";

/// Build the hidden config file path under `dir`
pub fn local_config_file_path(dir: &Path) -> PathBuf {
    dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Build the user configuration directory path from a home directory
pub fn user_config_dir_path(home_dir: &Path) -> PathBuf {
    home_dir.join(APP_DIR_NAME)
}

/// Build the user configuration file path from a home directory
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    user_config_dir_path(home_dir).join(CONFIG_FILE_NAME)
}
