//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::commands;
use super::output::{Output, OutputFormat};
use crate::storage::{Config, SheetStore};

#[derive(Parser)]
#[command(name = "tyme")]
#[command(author, version, about = "Command line todo list and time tracker")]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Sheet file (overrides the configured path)
    #[arg(long, global = true, env = "TYME_SHEET")]
    pub sheet: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "TYME_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new task
    #[command(visible_alias = "n")]
    New {
        /// Task name
        #[arg(required = true)]
        task: Vec<String>,

        /// Tags for the task
        #[arg(long, short = 't', num_args = 1..)]
        tag: Vec<String>,

        /// Deadline (MM-DD HH:MM or HH:MM)
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Start working on a task, stopping the current one
    #[command(visible_alias = "i")]
    In {
        /// Task to clock in to (fuzzy matched)
        #[arg(required = true)]
        task: Vec<String>,

        /// Start time (MM-DD HH:MM or HH:MM)
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Stop working on the current task
    #[command(visible_alias = "o")]
    Out {
        /// End time (MM-DD HH:MM or HH:MM)
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Print the sheet, optionally only tasks with all the given tags
    #[command(visible_alias = "r")]
    Report {
        /// Tags to filter by
        tags: Vec<String>,
    },

    /// Edit the sheet in your editor
    #[command(visible_alias = "e")]
    Edit,

    /// Show the task you are clocked in to
    #[command(visible_alias = "s")]
    Status,

    /// Mark a task as done
    #[command(visible_alias = "c")]
    Complete {
        /// Task to complete (fuzzy matched)
        #[arg(required = true)]
        task: Vec<String>,

        /// Completion time (MM-DD HH:MM or HH:MM)
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Restore the sheet from its backup
    #[command(visible_alias = "u")]
    Undo,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(sheet) = cli.sheet {
        config.sheet = sheet;
    }
    let clock = config.clock()?;
    let store = SheetStore::new(&config.sheet, clock);
    output.verbose_ctx("sheet", &format!("Using sheet: {}", store.path().display()));

    match &cli.command {
        Commands::New { task, tag, at } => {
            commands::new_task(&store, &output, task, tag, at.as_deref())?
        }
        Commands::In { task, at } => commands::clock_in(&store, &output, task, at.as_deref())?,
        Commands::Out { at } => commands::clock_out(&store, &output, at.as_deref())?,
        Commands::Report { tags } => commands::report(&store, &output, tags)?,
        Commands::Edit => commands::edit(&store, &config, &output)?,
        Commands::Status => commands::status(&store, &output)?,
        Commands::Complete { task, at } => {
            commands::complete(&store, &output, task, at.as_deref())?
        }
        Commands::Undo => commands::undo(&store, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
