//! tyme - a command line todo list and time tracker
//!
//! Tasks and a log of clocked time live in one fixed-width text file that is
//! both the storage format and the view you edit by hand. Everything written
//! can be read back, and hand edits are checked as strictly as the tool's own
//! output.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Clock, ParseError, Sheet, Task, TimeEntry, TymeError};
