//! Sheet file storage
//!
//! The sheet lives in a single text file. Saves are atomic (temp file +
//! rename) and can first copy the previous version to `<file>~`, which is
//! what `undo` restores.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::codec;
use crate::domain::{Clock, Sheet};

/// Store for a sheet in the text format
pub struct SheetStore {
    path: PathBuf,
    clock: Clock,
}

impl SheetStore {
    /// Creates a store for the file at `path`
    pub fn new(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// Returns the path to the sheet file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the backup written before each save
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push("~");
        PathBuf::from(name)
    }

    /// Loads the sheet. A missing file is an empty sheet.
    pub fn load(&self) -> Result<Sheet> {
        if !self.path.exists() {
            return Ok(Sheet::new(self.clock));
        }
        self.read(&self.path)
    }

    fn read(&self, path: &Path) -> Result<Sheet> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sheet: {}", path.display()))?;

        codec::parse(&text, self.clock)
            .with_context(|| format!("Failed to parse sheet: {}", path.display()))
    }

    /// Writes the sheet, optionally backing up the current file first
    pub fn save(&self, sheet: &Sheet, backup: bool) -> Result<()> {
        // Render before touching the disk
        let text = codec::serialize(sheet);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if backup && self.path.exists() {
            let backup_path = self.backup_path();
            fs::copy(&self.path, &backup_path).with_context(|| {
                format!("Failed to write backup: {}", backup_path.display())
            })?;
        }

        let temp_path = self.temp_path();
        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on sheet")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(text.as_bytes())
                .context("Failed to write sheet")?;
            writer.flush().context("Failed to flush sheet")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Restores the backup, backing up the current sheet in its place.
    ///
    /// Running undo twice therefore returns to where it started.
    pub fn undo(&self) -> Result<Sheet> {
        let backup_path = self.backup_path();
        if !backup_path.exists() {
            anyhow::bail!("Nothing to undo: no backup at {}", backup_path.display());
        }

        let sheet = self.read(&backup_path)?;
        self.save(&sheet, true)?;
        Ok(sheet)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
