//! Command line argument parsing
//!
//! This module handles CLI argument parsing with subcommands:
//! - `interactive`: run the interactive menu loop (the default when no
//!   subcommand is given)
//! - `show-config`: show configuration discovery information

use clap::{Parser, Subcommand};

#[derive(Debug)]
pub enum ExecutionMode {
    Interactive(InteractiveConfig),
    ShowConfig,
}

#[derive(Debug, Default)]
pub struct InteractiveConfig {
    pub verbose: bool,
}

#[derive(Debug, Parser)]
#[command(name = "taskdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track tasks with deadlines, priorities, and dependency-gated completion")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive menu loop
    Interactive {
        /// Enable verbose output
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },
    /// Show configuration discovery information
    ShowConfig,
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Resolve the execution mode; no subcommand means interactive
    pub fn mode(&self) -> ExecutionMode {
        match &self.command {
            Some(Commands::Interactive { verbose }) => {
                ExecutionMode::Interactive(InteractiveConfig { verbose: *verbose })
            }
            Some(Commands::ShowConfig) => ExecutionMode::ShowConfig,
            None => ExecutionMode::Interactive(InteractiveConfig::default()),
        }
    }
}
