//! `env` command implementation.
//!
//! Responsibilities:
//! - Parse a local env file offline and show what would be imported.
//! - Import a file into a project: fetch settings, merge, submit the settings
//!   with the merged variables.
//! - List, set, edit and unset individual variables.
//!
//! Does NOT handle:
//! - Tokenizing or merging (see `deploydash_config::envfile` and `editor`).
//! - Direct REST API calls (handled by the client crate).
//!
//! Invariants:
//! - Values are masked in output unless revealed explicitly.
//! - Values never appear in log events.
//! - Every network call races the Ctrl+C token.
//! - Unset asks for confirmation unless `--force` is given.
//! - An import that adds or changes nothing submits nothing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use deploydash_client::EnvTarget;
use deploydash_config::{Config, ParseMode};
use tracing::{debug, info, warn};

use crate::cancellation::CancellationToken;
use crate::commands::build_client_from_config;
use crate::config_context::ConfigCommandContext;
use crate::editor::EnvEditor;
use crate::formatters::{ImportOutput, OutputFormat, ParseOutput, get_formatter, output_result};

#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// Parse a local env file and print the resulting variables (no API calls)
    Parse {
        /// Path to a dotenv / properties file
        file: PathBuf,
        /// Fail on a quoted value that is never closed instead of dropping it
        #[arg(long)]
        strict: bool,
        /// Rewrite CRLF line endings to LF before parsing
        #[arg(long)]
        normalize_crlf: bool,
        /// Show values instead of masking them
        #[arg(long)]
        reveal: bool,
    },
    /// List a project's variables
    List {
        /// Project ID
        project: String,
        /// Show all values
        #[arg(long)]
        reveal: bool,
        /// Show one key's value (repeatable); combined with --reveal it masks KEY instead
        #[arg(long = "reveal-key", value_name = "KEY")]
        reveal_keys: Vec<String>,
    },
    /// Merge a local env file into a project's variables
    Import {
        /// Project ID
        project: String,
        /// Path to a dotenv / properties file
        file: PathBuf,
        /// Fail on a quoted value that is never closed instead of dropping it
        #[arg(long)]
        strict: bool,
        /// Rewrite CRLF line endings to LF before parsing
        #[arg(long)]
        normalize_crlf: bool,
        /// Show what would change without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Add or overwrite one variable
    Set {
        /// Project ID
        project: String,
        key: String,
        value: String,
        /// Deployment target (all, production, preview, development)
        #[arg(long, default_value = "all")]
        target: EnvTarget,
    },
    /// Change the value of an existing variable
    Edit {
        /// Project ID
        project: String,
        key: String,
        value: String,
    },
    /// Delete one variable
    Unset {
        /// Project ID
        project: String,
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl EnvCommand {
    pub fn needs_api(&self) -> bool {
        !matches!(self, EnvCommand::Parse { .. })
    }
}

/// Options shared by every `env` subcommand.
pub struct OutputOptions<'a> {
    pub format: &'a str,
    pub file: Option<PathBuf>,
}

pub(crate) async fn run(
    config: ConfigCommandContext,
    command: EnvCommand,
    output: OutputOptions<'_>,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output.format)?;
    let output_file = output.file;

    match command {
        EnvCommand::Parse {
            file,
            strict,
            normalize_crlf,
            reveal,
        } => run_parse(&file, parse_mode(strict), normalize_crlf, reveal, format, output_file),
        EnvCommand::List {
            project,
            reveal,
            reveal_keys,
        } => {
            let config = config.into_real_config()?;
            run_list(&config, &project, reveal, &reveal_keys, format, output_file, cancel).await
        }
        EnvCommand::Import {
            project,
            file,
            strict,
            normalize_crlf,
            dry_run,
        } => {
            let config = config.into_real_config()?;
            let text = read_env_file(&file, normalize_crlf)?;
            run_import(
                &config,
                &project,
                &text,
                parse_mode(strict),
                dry_run,
                format,
                output_file,
                cancel,
            )
            .await
        }
        EnvCommand::Set {
            project,
            key,
            value,
            target,
        } => {
            let config = config.into_real_config()?;
            run_set(&config, &project, &key, &value, target, cancel).await
        }
        EnvCommand::Edit {
            project,
            key,
            value,
        } => {
            let config = config.into_real_config()?;
            run_edit(&config, &project, &key, &value, cancel).await
        }
        EnvCommand::Unset {
            project,
            key,
            force,
        } => {
            let config = config.into_real_config()?;
            run_unset(&config, &project, &key, force, cancel).await
        }
    }
}

fn parse_mode(strict: bool) -> ParseMode {
    if strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    }
}

/// Read an uploaded file as text.
///
/// Invalid UTF-8 is replaced rather than rejected, and a leading BOM is dropped
/// so it does not end up in the first key.
pub(crate) fn read_env_file(path: &Path, normalize_crlf: bool) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), "File is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    let text = match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    };

    Ok(if normalize_crlf {
        text.replace("\r\n", "\n")
    } else {
        text
    })
}

fn run_parse(
    file: &Path,
    mode: ParseMode,
    normalize_crlf: bool,
    reveal: bool,
    format: OutputFormat,
    output_file: Option<PathBuf>,
) -> Result<()> {
    info!(file = %file.display(), ?mode, "Parsing env file");

    let text = read_env_file(file, normalize_crlf)?;
    let mut editor = EnvEditor::new();
    let summary = editor
        .import_text(&text, mode)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    if reveal {
        editor.reveal_all();
    }

    let output = get_formatter(format).format_parse(&ParseOutput {
        variables: editor.display_rows(),
        summary: &summary,
    })?;
    output_result(&output, format, output_file.as_ref())
}

async fn run_list(
    config: &Config,
    project: &str,
    reveal: bool,
    reveal_keys: &[String],
    format: OutputFormat,
    output_file: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(project, "Listing env variables");

    let client = build_client_from_config(config)?;
    let settings = cancel
        .run(client.get_settings(project))
        .await
        .with_context(|| format!("Failed to fetch settings for project '{}'", project))?;

    let mut editor = EnvEditor::with_existing(settings.env_variables);
    apply_reveal_flags(&mut editor, reveal, reveal_keys);
    debug!(project, count = editor.len(), "Fetched env variables");

    let output = get_formatter(format).format_variables(&editor.display_rows())?;
    output_result(&output, format, output_file.as_ref())
}

/// `--reveal` shows everything and each `--reveal-key` hides that key again;
/// without `--reveal` the listed keys are the only ones shown. Repeated keys
/// count once.
fn apply_reveal_flags(editor: &mut EnvEditor, reveal: bool, reveal_keys: &[String]) {
    if reveal {
        editor.reveal_all();
    }

    let mut seen = HashSet::new();
    for key in reveal_keys.iter().filter(|k| seen.insert(k.as_str())) {
        if !editor.vars().contains_key(key) {
            warn!(key = %key, "Requested key is not set on this project");
        }
        if reveal {
            editor.toggle_reveal(key);
        } else {
            editor.reveal(key);
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_import(
    config: &Config,
    project: &str,
    text: &str,
    mode: ParseMode,
    dry_run: bool,
    format: OutputFormat,
    output_file: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(project, ?mode, dry_run, "Importing env file");

    let client = build_client_from_config(config)?;
    let settings = cancel
        .run(client.get_settings(project))
        .await
        .with_context(|| format!("Failed to fetch settings for project '{}'", project))?;

    let mut editor = EnvEditor::with_existing(settings.env_variables.clone());
    let summary = editor.import_text(text, mode)?;
    let submission = editor.submission();
    let total = submission.len();

    if dry_run {
        info!(project, "Dry run, skipping submission");
    } else if summary.unchanged() {
        info!(project, "Nothing changed, skipping submission");
    } else {
        let updated = settings.with_env_variables(submission);
        cancel
            .run(client.update_settings(project, &updated))
            .await
            .with_context(|| format!("Failed to update settings for project '{}'", project))?;
    }

    let output = get_formatter(format).format_import(&ImportOutput {
        project,
        summary: &summary,
        total,
        dry_run,
    })?;
    output_result(&output, format, output_file.as_ref())
}

async fn run_set(
    config: &Config,
    project: &str,
    key: &str,
    value: &str,
    target: EnvTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    // Same rules as adding a row in the editor.
    EnvEditor::new().add(key, value)?;
    let key = key.trim();

    info!(project, key, %target, "Setting env variable");

    let client = build_client_from_config(config)?;
    cancel
        .run(client.add_env_variable(project, key, value, target))
        .await
        .with_context(|| format!("Failed to set '{}' on project '{}'", key, project))?;

    println!("Set '{}' on project '{}' ({}).", key, project, target);
    Ok(())
}

async fn run_edit(
    config: &Config,
    project: &str,
    key: &str,
    value: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(project, key, "Editing env variable");

    let client = build_client_from_config(config)?;
    let settings = cancel
        .run(client.get_settings(project))
        .await
        .with_context(|| format!("Failed to fetch settings for project '{}'", project))?;

    let mut editor = EnvEditor::with_existing(settings.env_variables.clone());
    editor.edit(key, value)?;

    let updated = settings.with_env_variables(editor.submission());
    cancel
        .run(client.update_settings(project, &updated))
        .await
        .with_context(|| format!("Failed to update settings for project '{}'", project))?;

    println!("Updated '{}' on project '{}'.", key, project);
    Ok(())
}

async fn run_unset(
    config: &Config,
    project: &str,
    key: &str,
    force: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    if !force && !crate::interactive::confirm_delete(key, project)? {
        return Ok(());
    }

    info!(project, key, "Deleting env variable");

    let client = build_client_from_config(config)?;
    let settings = cancel
        .run(client.get_settings(project))
        .await
        .with_context(|| format!("Failed to fetch settings for project '{}'", project))?;

    let mut editor = EnvEditor::with_existing(settings.env_variables);
    editor.remove(key)?;

    cancel
        .run(client.delete_env_variable(project, key))
        .await
        .with_context(|| format!("Failed to delete '{}' from project '{}'", key, project))?;

    println!(
        "Deleted '{}' from project '{}' ({} remaining).",
        key,
        project,
        editor.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_read_env_file_normalizes_crlf_on_request() {
        let file = write_temp(b"A=1\r\nB=\"x\r\ny\"\r\n");

        let raw = read_env_file(file.path(), false).unwrap();
        let normalized = read_env_file(file.path(), true).unwrap();

        assert!(raw.contains("\r\n"));
        assert_eq!(normalized, "A=1\nB=\"x\ny\"\n");
    }

    #[test]
    fn test_read_env_file_replaces_invalid_utf8() {
        let file = write_temp(b"A=caf\xff\nB=2\n");

        let text = read_env_file(file.path(), false).unwrap();

        assert_eq!(text, "A=caf\u{fffd}\nB=2\n");
    }

    #[test]
    fn test_read_env_file_strips_bom() {
        let file = write_temp("\u{feff}FIRST=1\n".as_bytes());
        assert_eq!(read_env_file(file.path(), false).unwrap(), "FIRST=1\n");
    }

    #[test]
    fn test_read_env_file_missing() {
        let err = read_env_file(Path::new("/definitely/not/here.env"), false).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_only_parse_is_offline() {
        let parse = EnvCommand::Parse {
            file: PathBuf::from(".env"),
            strict: false,
            normalize_crlf: false,
            reveal: false,
        };
        let unset = EnvCommand::Unset {
            project: "p".to_string(),
            key: "K".to_string(),
            force: true,
        };
        assert!(!parse.needs_api());
        assert!(unset.needs_api());
    }

    fn listed_editor() -> EnvEditor {
        EnvEditor::with_existing(
            [("A", "1"), ("B", "2")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_reveal_with_repeated_key_hides_it_once() {
        let mut editor = listed_editor();
        let keys = vec!["B".to_string(), "B".to_string()];

        apply_reveal_flags(&mut editor, true, &keys);

        assert_eq!(editor.display_value("A"), Some("1"));
        assert_eq!(editor.display_value("B"), Some(crate::editor::MASK));
    }

    #[test]
    fn test_repeated_reveal_key_without_reveal_all() {
        let mut editor = listed_editor();
        let keys = vec!["A".to_string(), "A".to_string(), "MISSING".to_string()];

        apply_reveal_flags(&mut editor, false, &keys);

        assert_eq!(editor.display_value("A"), Some("1"));
        assert_eq!(editor.display_value("B"), Some(crate::editor::MASK));
    }
}
