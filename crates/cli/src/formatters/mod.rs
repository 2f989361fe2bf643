//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render env variables, parse results and import summaries as a table or JSON.
//! - Write rendered output to stdout or atomically to a file.
//!
//! Does NOT handle:
//! - Masking decisions (values arrive already masked by the editor).
//!
//! Invariants:
//! - Formatters return strings; only `output_result` prints.
//! - Empty JSON output is still valid JSON (`[]`); tables print a human message.

use anyhow::Result;
use serde::Serialize;

use crate::editor::{DisplayRow, ImportSummary};

mod common;
mod json;
mod table;

pub use common::{output_result, write_to_file};
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: table, json", s),
        }
    }
}

/// Result of `env parse`.
#[derive(Debug, Serialize)]
pub struct ParseOutput<'a> {
    pub variables: Vec<DisplayRow<'a>>,
    pub summary: &'a ImportSummary,
}

/// Result of `env import`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutput<'a> {
    pub project: &'a str,
    pub summary: &'a ImportSummary,
    /// Variables in the submitted set after the merge.
    pub total: usize,
    pub dry_run: bool,
}

/// Formatter trait for the output types of the `env` commands.
pub trait Formatter {
    /// Format a project's variables.
    fn format_variables(&self, rows: &[DisplayRow<'_>]) -> Result<String>;

    /// Format the result of parsing a local file.
    fn format_parse(&self, output: &ParseOutput<'_>) -> Result<String>;

    /// Format the result of an import.
    fn format_import(&self, output: &ImportOutput<'_>) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
