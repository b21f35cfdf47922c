//! Error types for sheet operations and sheet parsing

use thiserror::Error;

use super::line::Field;
use super::sheet::Section;

/// A domain rule was violated. Nothing was changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TymeError {
    #[error("That task already exists: {0}")]
    TaskExists(String),

    #[error("Not clocked in.")]
    NotClockedIn,

    #[error("No such task: {0}")]
    NoSuchTask(String),

    #[error("No matching task found for '{0}'")]
    NoMatch(String),

    #[error("Entry cannot end before it begins ({end} is before {start})")]
    EndsBeforeStart { start: String, end: String },

    #[error("Invalid task name {0:?}: use words separated by single spaces")]
    InvalidName(String),

    #[error("Invalid tag {0:?}: use words separated by single spaces")]
    InvalidTag(String),
}

/// Text does not follow the sheet format. The whole load is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Bad {field} field '{text}' in line: {line}")]
    BadField {
        field: Field,
        text: String,
        line: String,
    },

    #[error("Missing {field} field in line: {line}")]
    MissingField { field: Field, line: String },

    #[error("Unexpected field '{text}' in line: {line}")]
    UnexpectedField { text: String, line: String },

    #[error("Invalid entry in line: {line}: {source}")]
    InvalidEntry {
        line: String,
        #[source]
        source: TymeError,
    },

    #[error("No {0} header")]
    MissingHeader(Section),

    #[error("No rule under {0} header")]
    MissingRule(Section),

    #[error("Missing section: {0}")]
    MissingSection(Section),

    #[error("Unfinished nonfinal entry for task: {0}")]
    UnfinishedEntry(String),

    #[error("Task listed twice: {0}")]
    DuplicateTask(String),
}
