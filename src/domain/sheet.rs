//! The sheet: pending tasks, time log and completed tasks
//!
//! ## Invariants
//!
//! - Only the last entry of the time log may be open (no end time).
//! - A task name appears at most once across `todo` and `done`.
//!
//! Every mutating operation checks its preconditions before touching state, so
//! an operation that returns an error leaves the sheet as it was.

use std::borrow::Cow;
use std::fmt;

use chrono::{Duration, NaiveDateTime};
use super::entry::TimeEntry;
use super::error::{ParseError, TymeError};
use super::line::is_word_run;
use super::task::Task;
use super::time::Clock;

/// One of the three regions of a sheet, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Todo,
    Time,
    Done,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Todo, Section::Time, Section::Done];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Todo => "Todo",
            Section::Time => "Time",
            Section::Done => "Done",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A todo list with its time log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    clock: Clock,
    todo: Vec<Task>,
    time: Vec<TimeEntry>,
    done: Vec<Task>,
}

impl Sheet {
    /// Creates an empty sheet
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Assembles a sheet from parsed sections and checks its invariants
    pub fn from_parts(
        clock: Clock,
        todo: Vec<Task>,
        time: Vec<TimeEntry>,
        done: Vec<Task>,
    ) -> Result<Self, ParseError> {
        let sheet = Self {
            clock,
            todo,
            time,
            done,
        };
        sheet.validate()?;
        Ok(sheet)
    }

    /// Checks the sheet invariants
    pub fn validate(&self) -> Result<(), ParseError> {
        if let Some((_, earlier)) = self.time.split_last() {
            if let Some(open) = earlier.iter().find(|e| e.is_open()) {
                return Err(ParseError::UnfinishedEntry(open.task().to_string()));
            }
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.todo.len() + self.done.len());
        for task in self.todo.iter().chain(&self.done) {
            if seen.contains(&task.name.as_str()) {
                return Err(ParseError::DuplicateTask(task.name.clone()));
            }
            seen.push(&task.name);
        }
        Ok(())
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Pending tasks, in insertion order
    pub fn todo(&self) -> &[Task] {
        &self.todo
    }

    /// The time log, oldest first
    pub fn time(&self) -> &[TimeEntry] {
        &self.time
    }

    /// Completed tasks, in completion order
    pub fn done(&self) -> &[Task] {
        &self.done
    }

    /// The running entry, if the last entry has no end time
    pub fn current_entry(&self) -> Option<&TimeEntry> {
        self.time.last().filter(|e| e.is_open())
    }

    /// Looks up a pending or completed task by name
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.todo
            .iter()
            .chain(&self.done)
            .find(|t| t.name == name)
    }

    /// Names of the pending tasks
    pub fn pending_names(&self) -> impl Iterator<Item = &str> {
        self.todo.iter().map(|t| t.name.as_str())
    }

    /// Time log entries for the named task
    pub fn entries_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TimeEntry> + 'a {
        self.time.iter().filter(move |e| e.task() == name)
    }

    /// Total time logged against the named task, up to now for a running entry
    pub fn task_time(&self, name: &str) -> Duration {
        let now = self.clock.now();
        self.entries_for(name)
            .fold(Duration::zero(), |total, e| total + e.duration(now))
    }

    /// Adds a pending task
    pub fn add_task<S: AsRef<str>>(&mut self, name: &str, tags: &[S]) -> Result<&Task, TymeError> {
        if self.task(name).is_some() {
            return Err(TymeError::TaskExists(name.to_string()));
        }
        self.todo.push(Task::new(name, tags)?);
        Ok(&self.todo[self.todo.len() - 1])
    }

    /// Sets the deadline of a pending task
    pub fn schedule(&mut self, name: &str, deadline: NaiveDateTime) -> Result<(), TymeError> {
        let task = self
            .todo
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| TymeError::NoSuchTask(name.to_string()))?;
        task.deadline = Some(deadline);
        Ok(())
    }

    /// Starts logging time against `name`.
    ///
    /// A running entry is closed at the same moment, so switching tasks leaves
    /// no gap and no overlap in the log.
    pub fn clock_in(&mut self, name: &str, at: Option<NaiveDateTime>) -> Result<(), TymeError> {
        if !is_word_run(name) {
            return Err(TymeError::InvalidName(name.to_string()));
        }
        let at = at.unwrap_or_else(|| self.clock.now());
        if self.current_entry().is_some() {
            self.clock_out(Some(at))?;
        }
        self.time.push(TimeEntry::open(name, at));
        Ok(())
    }

    /// Stops the running entry and returns its task name
    pub fn clock_out(&mut self, at: Option<NaiveDateTime>) -> Result<String, TymeError> {
        let at = at.unwrap_or_else(|| self.clock.now());
        let entry = self
            .time
            .last_mut()
            .filter(|e| e.is_open())
            .ok_or(TymeError::NotClockedIn)?;
        entry.close(at)?;
        Ok(entry.task().to_string())
    }

    /// Moves a pending task to `done`, stamping its deadline.
    ///
    /// If the running entry belongs to the task it is stopped at the same time.
    pub fn complete_task(&mut self, name: &str, at: Option<NaiveDateTime>) -> Result<(), TymeError> {
        let at = at.unwrap_or_else(|| self.clock.now());
        let index = self
            .todo
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| TymeError::NoSuchTask(name.to_string()))?;

        let running = self.current_entry().filter(|e| e.task() == name);
        if let Some(entry) = running {
            entry.can_close_at(at)?;
            self.clock_out(Some(at))?;
        }

        let mut task = self.todo.remove(index);
        task.deadline = Some(at);
        self.done.push(task);
        Ok(())
    }

    /// Projects the sheet onto the tasks carrying every tag in `tags`.
    ///
    /// With no tags this is the sheet itself. Otherwise a new sheet holds the
    /// matching pending and completed tasks and the entries for those tasks.
    pub fn tag_filter<S: AsRef<str>>(&self, tags: &[S]) -> Cow<'_, Sheet> {
        if tags.is_empty() {
            return Cow::Borrowed(self);
        }

        let todo: Vec<Task> = self.todo.iter().filter(|t| t.has_tags(tags)).cloned().collect();
        let done: Vec<Task> = self.done.iter().filter(|t| t.has_tags(tags)).cloned().collect();
        let time = self
            .time
            .iter()
            .filter(|e| todo.iter().chain(&done).any(|t| t.name == e.task()))
            .cloned()
            .collect();

        Cow::Owned(Sheet {
            clock: self.clock,
            todo,
            time,
            done,
        })
    }
}
