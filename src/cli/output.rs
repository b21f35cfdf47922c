//! Output formatting for CLI commands
//!
//! Results go to stdout as text or JSON. Diagnostics go to stderr and only
//! appear with `--verbose`.

use anyhow::{Context, Result};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data as one line of JSON.
    ///
    /// Handlers render their own text and only call this in JSON mode.
    pub fn data<T: Serialize>(&self, data: &T) -> Result<()> {
        println!("{}", encode(data)?);
        Ok(())
    }

    /// Prints plain text (text format only)
    pub fn text(&self, text: &str) {
        if self.format == OutputFormat::Text {
            println!("{}", text);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

fn encode<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data).context("Failed to encode JSON output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn encode_is_single_line() {
        let json = encode(&serde_json::json!({ "task": "read", "tags": ["a", "b"] })).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"task\":\"read\""));
    }

    #[test]
    fn encode_failure_is_an_error() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "non-string key");
        let err = encode(&bad).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to encode JSON output"));
        assert!(Output::new(OutputFormat::Json, false).data(&bad).is_err());
    }
}
