//! Configuration editor session.
//!
//! Responsibilities:
//! - Hold the working set of env variables for one project across an import.
//! - Apply parsed uploads with last-write-wins and report what changed.
//! - Track which keys are revealed; everything else displays masked.
//! - Produce the map that is actually submitted to the API.
//!
//! Does NOT handle:
//! - Reading files or network I/O (see `commands::env`).
//! - Tokenizing text (see `deploydash_config::envfile`).
//!
//! Invariants:
//! - Keys keep their first-seen position across imports and edits.
//! - A key removed from the working set is also removed from the reveal set.
//! - `submission()` is the whole working set minus blank keys. Empty values
//!   are kept so a full-settings submit never drops a variable.

use std::collections::HashSet;

use deploydash_config::{
    EnvFileError, EnvMap, MergeStats, ParseMode, envfile::merge_into,
    envfile::parse_with_mode,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Placeholder shown for a masked value.
pub const MASK: &str = "••••••••";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    #[error("Env key must not be empty")]
    EmptyKey,

    #[error("Value for '{0}' must not be empty")]
    EmptyValue(String),

    #[error("Unknown env key '{0}'")]
    UnknownKey(String),

    #[error(transparent)]
    Parse(#[from] EnvFileError),
}

/// Outcome of a single import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Entries produced by the parser, duplicates included.
    pub parsed: usize,
    pub added: Vec<String>,
    pub updated: Vec<String>,
    /// 1-based line numbers that had no separator.
    pub skipped_lines: Vec<usize>,
    /// Key whose quoted value was never closed and was dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_key: Option<String>,
}

impl ImportSummary {
    pub fn unchanged(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }
}

/// Per-key reveal flags. Keys are masked unless present.
#[derive(Debug, Clone, Default)]
pub struct RevealState {
    revealed: HashSet<String>,
}

impl RevealState {
    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }

    /// Flip a key's flag, returning the new state.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.revealed.remove(key) {
            false
        } else {
            self.revealed.insert(key.to_string());
            true
        }
    }

    pub fn reveal(&mut self, key: &str) {
        self.revealed.insert(key.to_string());
    }

    pub fn forget(&mut self, key: &str) {
        self.revealed.remove(key);
    }
}

/// Editing session over one project's env variables.
#[derive(Debug, Clone, Default)]
pub struct EnvEditor {
    vars: EnvMap,
    reveal: RevealState,
}

impl EnvEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the variables the server already holds.
    pub fn with_existing(vars: EnvMap) -> Self {
        Self {
            vars,
            reveal: RevealState::default(),
        }
    }

    pub fn vars(&self) -> &EnvMap {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Parse `raw` and merge the result over the current set.
    ///
    /// In strict mode an unterminated quote fails the whole import and the
    /// current set is left untouched.
    pub fn import_text(&mut self, raw: &str, mode: ParseMode) -> Result<ImportSummary, EditorError> {
        let report = parse_with_mode(raw, mode)?;
        let MergeStats { added, updated } = merge_into(&mut self.vars, &report.entries);

        debug!(
            parsed = report.entries.len(),
            added = added.len(),
            updated = updated.len(),
            "Imported env text"
        );

        Ok(ImportSummary {
            parsed: report.entries.len(),
            added,
            updated,
            skipped_lines: report.skipped_lines,
            dropped_key: report.unterminated.map(|u| u.key),
        })
    }

    /// Insert or overwrite a variable.
    pub fn add(&mut self, key: &str, value: &str) -> Result<(), EditorError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(EditorError::EmptyKey);
        }
        if value.is_empty() {
            return Err(EditorError::EmptyValue(key.to_string()));
        }
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Change the value of an existing variable.
    pub fn edit(&mut self, key: &str, value: &str) -> Result<(), EditorError> {
        match self.vars.get_mut(key) {
            Some(current) => {
                *current = value.to_string();
                Ok(())
            }
            None => Err(EditorError::UnknownKey(key.to_string())),
        }
    }

    /// Drop a variable and its reveal flag.
    pub fn remove(&mut self, key: &str) -> Result<String, EditorError> {
        self.reveal.forget(key);
        self.vars
            .shift_remove(key)
            .ok_or_else(|| EditorError::UnknownKey(key.to_string()))
    }

    pub fn toggle_reveal(&mut self, key: &str) -> bool {
        self.reveal.toggle(key)
    }

    pub fn reveal(&mut self, key: &str) {
        self.reveal.reveal(key);
    }

    pub fn reveal_all(&mut self) {
        for key in self.vars.keys() {
            self.reveal.reveal(key);
        }
    }

    /// Value as it should be shown: plain if revealed, masked otherwise.
    pub fn display_value(&self, key: &str) -> Option<&str> {
        let value = self.vars.get(key)?;
        if self.reveal.is_revealed(key) {
            Some(value.as_str())
        } else {
            Some(MASK)
        }
    }

    /// Rows for display in key order.
    pub fn display_rows(&self) -> Vec<DisplayRow<'_>> {
        self.vars
            .keys()
            .map(|key| DisplayRow {
                key: key.as_str(),
                value: self.display_value(key).unwrap_or(MASK),
                revealed: self.reveal.is_revealed(key),
            })
            .collect()
    }

    /// Variables to send to the API. Only blank keys are left out.
    pub fn submission(&self) -> EnvMap {
        self.vars
            .iter()
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// One variable as rendered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub revealed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(pairs: &[(&str, &str)]) -> EnvEditor {
        EnvEditor::with_existing(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn keys(editor: &EnvEditor) -> Vec<&str> {
        editor.vars().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_import_merges_over_existing() {
        let mut editor = editor_with(&[("A", "1"), ("B", "2")]);

        let summary = editor
            .import_text("B=20\nC=3\n", ParseMode::Lenient)
            .unwrap();

        assert_eq!(summary.parsed, 2);
        assert_eq!(summary.added, vec!["C"]);
        assert_eq!(summary.updated, vec!["B"]);
        assert_eq!(keys(&editor), vec!["A", "B", "C"]);
        assert_eq!(editor.vars()["B"], "20");
    }

    #[test]
    fn test_import_reports_skipped_and_dropped() {
        let mut editor = EnvEditor::new();

        let summary = editor
            .import_text("A=1\ngarbage\nB=\"never closed\n", ParseMode::Lenient)
            .unwrap();

        assert_eq!(summary.skipped_lines, vec![2]);
        assert_eq!(summary.dropped_key.as_deref(), Some("B"));
        assert_eq!(keys(&editor), vec!["A"]);
    }

    #[test]
    fn test_strict_import_leaves_state_untouched() {
        let mut editor = editor_with(&[("A", "1")]);

        let err = editor
            .import_text("A=2\nB=\"open\n", ParseMode::Strict)
            .unwrap_err();

        assert!(matches!(err, EditorError::Parse(_)));
        assert_eq!(editor.vars()["A"], "1");
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_second_import_supersedes_first() {
        let mut editor = EnvEditor::new();
        editor.import_text("K=first", ParseMode::Lenient).unwrap();
        let summary = editor.import_text("K=second", ParseMode::Lenient).unwrap();

        assert_eq!(summary.updated, vec!["K"]);
        assert_eq!(editor.vars()["K"], "second");
    }

    #[test]
    fn test_import_of_identical_values_is_unchanged() {
        let mut editor = editor_with(&[("A", "1")]);
        let summary = editor.import_text("A=1", ParseMode::Lenient).unwrap();
        assert!(summary.unchanged());
    }

    #[test]
    fn test_add_requires_key_and_value() {
        let mut editor = EnvEditor::new();
        assert_eq!(editor.add("  ", "v"), Err(EditorError::EmptyKey));
        assert_eq!(
            editor.add("K", ""),
            Err(EditorError::EmptyValue("K".to_string()))
        );
        assert_eq!(editor.len(), 0);

        editor.add("K", "v").unwrap();
        editor.add("K", "w").unwrap();
        assert_eq!(editor.vars()["K"], "w");
    }

    #[test]
    fn test_edit_unknown_key() {
        let mut editor = editor_with(&[("A", "1")]);
        assert_eq!(
            editor.edit("B", "2"),
            Err(EditorError::UnknownKey("B".to_string()))
        );
        editor.edit("A", "").unwrap();
        assert_eq!(editor.vars()["A"], "");
    }

    #[test]
    fn test_remove_forgets_reveal_flag() {
        let mut editor = editor_with(&[("A", "1"), ("B", "2"), ("C", "3")]);
        editor.reveal("B");

        assert_eq!(editor.remove("B"), Ok("2".to_string()));
        assert_eq!(keys(&editor), vec!["A", "C"]);
        assert_eq!(
            editor.remove("B"),
            Err(EditorError::UnknownKey("B".to_string()))
        );

        editor.add("B", "again").unwrap();
        // flag did not survive the removal
        assert_eq!(editor.display_value("B"), Some(MASK));
    }

    #[test]
    fn test_values_masked_by_default() {
        let mut editor = editor_with(&[("SECRET", "hunter2")]);

        assert_eq!(editor.display_value("SECRET"), Some(MASK));
        assert!(editor.toggle_reveal("SECRET"));
        assert_eq!(editor.display_value("SECRET"), Some("hunter2"));
        assert!(!editor.toggle_reveal("SECRET"));
        assert_eq!(editor.display_value("SECRET"), Some(MASK));
        assert_eq!(editor.display_value("MISSING"), None);
    }

    #[test]
    fn test_reveal_all_and_rows() {
        let mut editor = editor_with(&[("A", "1"), ("B", "2")]);
        assert!(editor.display_rows().iter().all(|r| r.value == MASK));

        editor.reveal_all();
        let rows = editor.display_rows();
        assert_eq!(rows[0], DisplayRow { key: "A", value: "1", revealed: true });
        assert_eq!(rows[1].value, "2");
    }

    #[test]
    fn test_submission_drops_only_blank_keys() {
        let mut editor = EnvEditor::new();
        editor
            .import_text("A=1\nEMPTY=\n=orphan\nB=2", ParseMode::Lenient)
            .unwrap();

        let submitted = editor.submission();

        assert_eq!(
            submitted.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "EMPTY", "B"]
        );
        assert_eq!(submitted["EMPTY"], "");
    }

    #[test]
    fn test_existing_empty_value_survives_import() {
        let mut editor = editor_with(&[("FEATURE_FLAG", ""), ("A", "1")]);
        editor.import_text("B=2", ParseMode::Lenient).unwrap();

        let submitted = editor.submission();

        assert_eq!(
            submitted.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["FEATURE_FLAG", "A", "B"]
        );
        assert_eq!(submitted["FEATURE_FLAG"], "");
    }

    #[test]
    fn test_edit_to_empty_value_is_submitted() {
        let mut editor = editor_with(&[("A", "1"), ("B", "2")]);
        editor.edit("A", "").unwrap();

        let submitted = editor.submission();

        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted["A"], "");
    }
}
