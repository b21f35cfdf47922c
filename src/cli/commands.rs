//! Command handlers
//!
//! Each handler loads the sheet, applies one operation and saves with a
//! backup. A failing operation returns before anything is written.

use anyhow::Result;
use chrono::NaiveDateTime;

use super::editor;
use super::output::Output;
use crate::domain::{find_task, format_duration, format_time, Sheet, Task, TimeEntry};
use crate::storage::{codec, Config, SheetStore};

fn parse_at(sheet: &Sheet, at: Option<&str>) -> Result<Option<NaiveDateTime>> {
    Ok(at.map(|t| sheet.clock().parse(t)).transpose()?)
}

/// Resolves free text to a pending task name
fn resolve(sheet: &Sheet, words: &[String], output: &Output) -> Result<String> {
    let query = words.join(" ");
    let name = find_task(&query, sheet.pending_names())?;
    output.verbose_ctx("find", &format!("'{}' resolved to '{}'", query, name));
    Ok(name.to_string())
}

pub fn new_task(
    store: &SheetStore,
    output: &Output,
    words: &[String],
    tags: &[String],
    at: Option<&str>,
) -> Result<()> {
    let mut sheet = store.load()?;
    let name = words.join(" ");
    let deadline = parse_at(&sheet, at)?;

    sheet.add_task(&name, tags)?;
    if let Some(deadline) = deadline {
        sheet.schedule(&name, deadline)?;
    }
    store.save(&sheet, true)?;

    output.success(&format!("Created task: {}", name));
    Ok(())
}

pub fn clock_in(store: &SheetStore, output: &Output, words: &[String], at: Option<&str>) -> Result<()> {
    let mut sheet = store.load()?;
    let name = resolve(&sheet, words, output)?;
    let at = parse_at(&sheet, at)?;

    if let Some(previous) = sheet.current_entry() {
        output.verbose_ctx("in", &format!("Switching from '{}'", previous.task()));
    }
    sheet.clock_in(&name, at)?;
    store.save(&sheet, true)?;

    output.success(&format!("Clocked in: {}", name));
    Ok(())
}

pub fn clock_out(store: &SheetStore, output: &Output, at: Option<&str>) -> Result<()> {
    let mut sheet = store.load()?;
    let at = parse_at(&sheet, at)?;

    let name = sheet.clock_out(at)?;
    store.save(&sheet, true)?;

    output.success(&format!("Clocked out: {}", name));
    Ok(())
}

pub fn complete(store: &SheetStore, output: &Output, words: &[String], at: Option<&str>) -> Result<()> {
    let mut sheet = store.load()?;
    let name = resolve(&sheet, words, output)?;
    let at = parse_at(&sheet, at)?;

    sheet.complete_task(&name, at)?;
    store.save(&sheet, true)?;

    output.success(&format!("Completed: {}", name));
    Ok(())
}

pub fn report(store: &SheetStore, output: &Output, tags: &[String]) -> Result<()> {
    let sheet = store.load()?;
    let filtered = sheet.tag_filter(tags);
    output.verbose_ctx(
        "report",
        &format!(
            "{} pending, {} entries, {} done after filter {:?}",
            filtered.todo().len(),
            filtered.time().len(),
            filtered.done().len(),
            tags
        ),
    );

    if output.is_json() {
        output.data(&report_json(&filtered))?;
    } else {
        output.text(&codec::serialize(&filtered));
    }
    Ok(())
}

fn report_json(sheet: &Sheet) -> serde_json::Value {
    let task_json = |task: &Task| {
        serde_json::json!({
            "name": task.name,
            "tags": task.tags,
            "deadline": task.deadline.map(format_time),
            "total": format_duration(sheet.task_time(&task.name)),
        })
    };
    let now = sheet.clock().now();
    let entry_json = |entry: &TimeEntry| {
        serde_json::json!({
            "task": entry.task(),
            "start": format_time(entry.start()),
            "end": entry.end().map(format_time),
            "total": format_duration(entry.duration(now)),
        })
    };

    let todo: Vec<_> = sheet.todo().iter().map(task_json).collect();
    let time: Vec<_> = sheet.time().iter().map(entry_json).collect();
    let done: Vec<_> = sheet.done().iter().map(task_json).collect();
    serde_json::json!({ "todo": todo, "time": time, "done": done })
}

pub fn status(store: &SheetStore, output: &Output) -> Result<()> {
    let sheet = store.load()?;
    let current = sheet.current_entry();

    if output.is_json() {
        output.data(&serde_json::json!({
            "clocked_in": current.is_some(),
            "task": current.map(|e| e.task()),
            "start": current.map(|e| format_time(e.start())),
            "elapsed": current.map(|e| format_duration(e.duration(sheet.clock().now()))),
        }))?;
        return Ok(());
    }

    match current {
        Some(entry) => output.text(&format!(
            "Clocked in: {} {}",
            entry.task(),
            format_duration(entry.duration(sheet.clock().now()))
        )),
        None => output.text("No active task."),
    }
    Ok(())
}

pub fn edit(store: &SheetStore, config: &Config, output: &Output) -> Result<()> {
    let sheet = store.load()?;
    let edited = editor::edit_sheet(&sheet, &config.editor_command(), output)?;

    // Saving an unchanged sheet would replace the undo point
    if codec::serialize(&edited) == codec::serialize(&sheet) {
        output.success("No changes");
        return Ok(());
    }
    store.save(&edited, true)?;

    output.success("Saved edited sheet");
    Ok(())
}

pub fn undo(store: &SheetStore, output: &Output) -> Result<()> {
    output.verbose_ctx("undo", &format!("Restoring {}", store.backup_path().display()));
    store.undo()?;
    output.success("Undo!");
    Ok(())
}
