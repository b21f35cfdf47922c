//! # Storage Layer
//!
//! Persistence for tyme: one human-editable text file per sheet.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Sheet | Fixed-width text (see [`codec`]) | `~/.tyme/sheet` |
//! | Backup | Previous sheet version | `~/.tyme/sheet~` |
//! | Config | TOML | `~/.config/tyme/config.toml` |
//!
//! ## Write Safety
//!
//! - The sheet is rendered before the file is touched
//! - All writes are atomic (temp file + rename)
//! - Each destructive save first copies the old file to the backup path
//!
//! ## Key Types
//!
//! - [`SheetStore`] - Load and save a sheet, restore the backup
//! - [`Config`] - Sheet location, editor and sentinel year

pub mod codec;
mod config;
mod sheet_file;

pub use config::{Config, ConfigError};
pub use sheet_file::SheetStore;
