//! # Command-Line Interface
//!
//! User-facing commands around the sheet.
//!
//! ## Commands
//!
//! | Command | Alias | Purpose |
//! |---------|-------|---------|
//! | `new` | `n` | Add a pending task, with `--tag` and a `--at` deadline |
//! | `in` | `i` | Clock in to a task (fuzzy matched), stopping the current one |
//! | `out` | `o` | Clock out |
//! | `complete` | `c` | Mark a task done |
//! | `report` | `r` | Print the sheet, filtered by tags |
//! | `status` | `s` | Show the running entry |
//! | `edit` | `e` | Edit the sheet in `$EDITOR` |
//! | `undo` | `u` | Restore the previous version |
//!
//! Times accept `MM-DD HH:MM` or a bare `HH:MM` for today.
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. Use `--verbose` (or `-v`) for
//! debug output on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod commands;
mod editor;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
