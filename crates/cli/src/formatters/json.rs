//! JSON formatter implementation.

use anyhow::Result;

use crate::editor::DisplayRow;
use crate::formatters::{Formatter, ImportOutput, ParseOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_variables(&self, rows: &[DisplayRow<'_>]) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(rows)?))
    }

    fn format_parse(&self, output: &ParseOutput<'_>) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(output)?))
    }

    fn format_import(&self, output: &ImportOutput<'_>) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(output)?))
    }
}
