//! Task record
//!
//! A task is identified by its name. Tags and the deadline do not take part in
//! equality, so two tasks with the same name are the same task. The time spent
//! on a task is never stored: it is summed from the sheet's time log whenever
//! the task is rendered.
//!
//! Line grammar: `[(HH:MM)  ]name[  MM-DD HH:MM][  tag, tag, ...]`

use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;

use super::error::{ParseError, TymeError};
use super::line::{is_word_run, Field, Fields};
use super::sheet::Sheet;
use super::time::{format_duration, format_time, Clock};

/// Column width of the name field
pub const NAME_WIDTH: usize = 20;

/// Column width of the deadline field (`MM-DD HH:MM`)
pub const DEADLINE_WIDTH: usize = 11;

/// Separator between rendered columns
pub const COLUMN_GAP: &str = "   ";

/// A pending or completed task
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,

    /// Ordered, without duplicates
    pub tags: Vec<String>,

    /// Completion time for done tasks, or an explicit schedule
    pub deadline: Option<NaiveDateTime>,
}

impl Task {
    /// Creates a task with no deadline.
    ///
    /// The name and every tag must fit the line grammar so that the task can
    /// be written and read back. Repeated tags are dropped.
    pub fn new<S: AsRef<str>>(name: &str, tags: &[S]) -> Result<Self, TymeError> {
        if !is_word_run(name) {
            return Err(TymeError::InvalidName(name.to_string()));
        }

        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !is_word_run(tag) {
                return Err(TymeError::InvalidTag(tag.to_string()));
            }
            if !unique.iter().any(|t| t == tag) {
                unique.push(tag.to_string());
            }
        }

        Ok(Self {
            name: name.to_string(),
            tags: unique,
            deadline: None,
        })
    }

    /// Returns true if this task carries every tag in `tags`
    pub fn has_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter()
            .all(|wanted| self.tags.iter().any(|t| t == wanted.as_ref()))
    }

    /// Parses one task line
    pub fn parse(line: &str, clock: &Clock) -> Result<Self, ParseError> {
        let mut fields = Fields::new(line);
        fields.skip_duration();

        let name = fields.expect(Field::Name, |t| is_word_run(t).then_some(t))?;
        // Tags never contain '-' or ':', so such a field can only be a deadline
        let deadline = match fields.peek() {
            Some(t) if t.contains('-') && t.contains(':') => {
                Some(fields.expect(Field::Deadline, |t| clock.parse_full(t).ok())?)
            }
            _ => None,
        };
        let tags = match fields.peek() {
            Some(_) => fields.expect(Field::Tags, parse_tags)?,
            None => Vec::new(),
        };
        fields.finish()?;

        Ok(Self {
            name: name.to_string(),
            tags,
            deadline,
        })
    }

    /// Renders this task as a line, with its total time taken from `sheet`
    pub fn render(&self, sheet: &Sheet) -> String {
        let total = format_duration(sheet.task_time(&self.name));
        let deadline = self.deadline.map(format_time).unwrap_or_default();
        let line = format!(
            "{total}{gap}{name:<nw$}{gap}{deadline:<dw$}{gap}{tags}",
            gap = COLUMN_GAP,
            name = self.name,
            nw = NAME_WIDTH,
            dw = DEADLINE_WIDTH,
            tags = self.tags.join(", "),
        );
        line.trim_end().to_string()
    }
}

/// Splits `work, deep focus` into tags. Repeats are dropped.
fn parse_tags(text: &str) -> Option<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for tag in text.split(',').map(str::trim) {
        if !is_word_run(tag) {
            return None;
        }
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Some(tags)
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
