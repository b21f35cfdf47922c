//! Editing a sheet in an external editor

use std::fs;
use std::io::Write;
use std::process::Command;

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::Sheet;
use crate::storage::codec;

/// Opens the rendered sheet in `editor` and parses the result.
///
/// The edited text must parse completely; otherwise the error is returned and
/// the caller keeps the original sheet. `editor` may carry arguments
/// (`code --wait`).
pub fn edit_sheet(sheet: &Sheet, editor: &str, output: &Output) -> Result<Sheet> {
    let mut file = tempfile::Builder::new()
        .prefix("tyme-")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create temp file for editing")?;

    file.write_all(codec::serialize(sheet).as_bytes())
        .context("Failed to write temp file")?;
    file.flush().context("Failed to flush temp file")?;

    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| anyhow::anyhow!("Editor command is empty"))?;

    output.verbose_ctx("edit", &format!("Running {} {}", editor, file.path().display()));
    let status = Command::new(program)
        .args(words)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;

    if !status.success() {
        anyhow::bail!("Editor exited with code: {:?}", status.code());
    }

    // Editors may replace the file rather than write into it, so reopen by path
    let text = fs::read_to_string(file.path()).context("Failed to read edited sheet")?;
    codec::parse(&text, sheet.clock()).context("Edited sheet is invalid, nothing was saved")
}
