//! Interactive menu input handling
//!
//! Prompt helpers for the menu loop: line and integer input with re-asking
//! on garbage, and deadline parsing. A deadline that fails to parse is
//! substituted with the current time and reported on stdout; the parse
//! failure never reaches the task core.

use crate::task::TaskId;
use chrono::{DateTime, NaiveDate, Utc};
use std::io::{self, Write};
use tracing::warn;

/// Print the interactive menu
pub fn show_menu() {
    println!();
    println!("1. Add task");
    println!("2. Add dependency");
    println!("3. Complete task");
    println!("4. Highest priority task");
    println!("5. Sweep overdue tasks");
    println!("6. List tasks");
    println!("7. Export JSON");
    println!("0. Exit");
}

/// Prompt for a single line of input
pub fn prompt_line(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a task id, re-asking until the input parses
pub fn prompt_task_id(label: &str) -> io::Result<TaskId> {
    loop {
        let input = prompt_line(label)?;
        match input.parse::<TaskId>() {
            Ok(id) => return Ok(id),
            Err(_) => println!("Please enter a numeric task id."),
        }
    }
}

/// Prompt for a priority; empty input falls back to `default`
pub fn prompt_priority(label: &str, default: i32) -> io::Result<i32> {
    loop {
        let input = prompt_line(label)?;
        if input.is_empty() {
            return Ok(default);
        }
        match input.parse::<i32>() {
            Ok(priority) => return Ok(priority),
            Err(_) => println!("Please enter a whole number (higher = more urgent)."),
        }
    }
}

/// Parse a deadline with the configured date format
///
/// The parsed date becomes midnight UTC of that day. Malformed input is
/// recovered locally: the current time is substituted and a notice
/// printed, matching the behavior the command loop expects.
pub fn parse_deadline(input: &str, format: &str) -> DateTime<Utc> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), format) {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return naive.and_utc();
        }
    }

    warn!(
        "could not parse deadline {:?} with format {:?}, substituting current time",
        input, format
    );
    println!("Error parsing date. Using current date instead.");
    Utc::now()
}
