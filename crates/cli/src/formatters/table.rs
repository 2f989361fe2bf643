//! Table formatter implementation.
//!
//! Does NOT handle:
//! - Wrapping multi-line values; embedded newlines are shown as `\n`.

use anyhow::Result;

use crate::editor::{DisplayRow, ImportSummary};
use crate::formatters::{Formatter, ImportOutput, ParseOutput};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_variables(&self, rows: &[DisplayRow<'_>]) -> Result<String> {
        Ok(variables_table(rows))
    }

    fn format_parse(&self, output: &ParseOutput<'_>) -> Result<String> {
        let mut out = variables_table(&output.variables);
        out.push('\n');
        out.push_str(&format!("Parsed {} entries.\n", output.summary.parsed));
        push_diagnostics(&mut out, output.summary);
        Ok(out)
    }

    fn format_import(&self, output: &ImportOutput<'_>) -> Result<String> {
        let summary = output.summary;
        let mut out = String::new();

        if output.dry_run {
            out.push_str("Dry run: nothing was submitted.\n");
        }
        out.push_str(&format!(
            "Project '{}': {} parsed, {} added, {} updated, {} total.\n",
            output.project,
            summary.parsed,
            summary.added.len(),
            summary.updated.len(),
            output.total
        ));
        if !summary.added.is_empty() {
            out.push_str(&format!("  Added:   {}\n", summary.added.join(", ")));
        }
        if !summary.updated.is_empty() {
            out.push_str(&format!("  Updated: {}\n", summary.updated.join(", ")));
        }
        if summary.unchanged() {
            out.push_str("  No changes.\n");
        }
        push_diagnostics(&mut out, summary);
        Ok(out)
    }
}

fn variables_table(rows: &[DisplayRow<'_>]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        output.push_str("No environment variables found.\n");
        return output;
    }

    let width = rows
        .iter()
        .map(|r| r.key.chars().count())
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    output.push_str(&format!("{:<width$}  {}\n", "KEY", "VALUE"));
    output.push_str(&format!("{:<width$}  {}\n", "===", "====="));
    for row in rows {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            row.key,
            row.value.replace('\n', "\\n")
        ));
    }

    output
}

fn push_diagnostics(out: &mut String, summary: &ImportSummary) {
    if !summary.skipped_lines.is_empty() {
        let lines: Vec<String> = summary.skipped_lines.iter().map(|l| l.to_string()).collect();
        out.push_str(&format!(
            "  Skipped lines without a separator: {}\n",
            lines.join(", ")
        ));
    }
    if let Some(key) = &summary.dropped_key {
        out.push_str(&format!(
            "  Dropped '{}': quoted value was never closed.\n",
            key
        ));
    }
}
