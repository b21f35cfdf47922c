//! Domain models for tyme
//!
//! Contains the sheet, its records and the line grammar, without any I/O.

mod entry;
mod error;
mod finder;
mod line;
mod sheet;
mod task;
mod time;

pub use entry::{TimeEntry, OPEN_END};
pub use error::{ParseError, TymeError};
pub use finder::find_task;
pub use line::Field;
pub use sheet::{Section, Sheet};
pub use task::Task;
pub use time::{format_duration, format_time, Clock, TimeError, DEFAULT_SENTINEL_YEAR, TIME_FORMAT};
