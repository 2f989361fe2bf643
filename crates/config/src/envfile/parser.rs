//! Single-pass line scanner for dotenv / properties style text.
//!
//! Responsibilities:
//! - Turn uploaded file content into `OrderedEntries`.
//! - Record diagnostics (lines without a separator, an unterminated quote).
//!
//! Does NOT handle:
//! - Reading files or decoding bytes (callers pass text).
//! - Duplicate resolution (see `merge.rs` and `OrderedEntries::materialize`).
//! - Variable substitution or escape sequences.
//!
//! Invariants:
//! - Input is split on `\n` only; a trailing `\r` survives inside quoted
//!   multi-line values.
//! - `=` is preferred over `:` as the separator.
//! - Unquoted keys and values are trimmed; quoted content is kept verbatim.
//! - Content after a closing quote on a continuation line is ignored.
//! - An unterminated quote at end of input drops that entry (lenient) or is
//!   reported as `EnvFileError::UnterminatedQuote` (strict).

use tracing::{debug, warn};

use super::entry::{Entry, OrderedEntries};
use super::error::EnvFileError;

const COMMENT_MARKERS: &[char] = &['#', '!'];

/// Quote delimiter that opened a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteChar {
    Single,
    Double,
}

impl QuoteChar {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// How to treat a quoted value that is still open at end of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Drop the pending entry silently.
    #[default]
    Lenient,
    /// Fail with `EnvFileError::UnterminatedQuote`.
    Strict,
}

/// A quoted value that never saw its closing delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedQuote {
    pub key: String,
    /// 1-based line on which the quote was opened.
    pub line: usize,
    pub quote: QuoteChar,
}

impl From<UnterminatedQuote> for EnvFileError {
    fn from(u: UnterminatedQuote) -> Self {
        EnvFileError::UnterminatedQuote {
            key: u.key,
            line: u.line,
            quote: u.quote.as_char(),
        }
    }
}

/// Parsed entries plus everything the scanner chose to ignore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub entries: OrderedEntries,
    /// 1-based numbers of non-comment lines that had no separator.
    pub skipped_lines: Vec<usize>,
    pub unterminated: Option<UnterminatedQuote>,
}

enum ScanState {
    Scanning,
    InQuote {
        quote: QuoteChar,
        key: String,
        value: String,
        opened_at: usize,
    },
}

/// Parse env-file text, silently skipping anything it cannot interpret.
pub fn parse_env_text(raw: &str) -> OrderedEntries {
    parse_env_text_report(raw).entries
}

/// Parse env-file text, failing if a quoted value is never closed.
pub fn parse_env_text_strict(raw: &str) -> Result<OrderedEntries, EnvFileError> {
    parse_with_mode(raw, ParseMode::Strict).map(|report| report.entries)
}

/// Parse and return diagnostics, applying `mode` to an unterminated quote.
///
/// In lenient mode this never fails; the dropped key is still visible in
/// `ParseReport::unterminated`.
pub fn parse_with_mode(raw: &str, mode: ParseMode) -> Result<ParseReport, EnvFileError> {
    let mut report = parse_env_text_report(raw);
    if mode == ParseMode::Strict {
        if let Some(unterminated) = report.unterminated.take() {
            return Err(unterminated.into());
        }
    }
    Ok(report)
}

/// Parse env-file text and keep a record of skipped input.
pub fn parse_env_text_report(raw: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut state = ScanState::Scanning;

    for (idx, line) in raw.split('\n').enumerate() {
        let line_no = idx + 1;
        state = match state {
            ScanState::Scanning => scan_line(line, line_no, &mut report),
            ScanState::InQuote {
                quote,
                key,
                mut value,
                opened_at,
            } => {
                value.push('\n');
                match line.find(quote.as_char()) {
                    Some(pos) => {
                        value.push_str(&line[..pos]);
                        debug!(line = line_no, opened_at, key = %key, "closed quoted value");
                        report.entries.push(Entry::new(key, value));
                        ScanState::Scanning
                    }
                    None => {
                        value.push_str(line);
                        ScanState::InQuote {
                            quote,
                            key,
                            value,
                            opened_at,
                        }
                    }
                }
            }
        };
    }

    if let ScanState::InQuote {
        quote,
        key,
        opened_at,
        ..
    } = state
    {
        warn!(line = opened_at, key = %key, "dropping value with unterminated quote");
        report.unterminated = Some(UnterminatedQuote {
            key,
            line: opened_at,
            quote,
        });
    }

    report
}

fn scan_line(line: &str, line_no: usize, report: &mut ParseReport) -> ScanState {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKERS) {
        return ScanState::Scanning;
    }

    let Some(sep) = find_separator(trimmed) else {
        debug!(line = line_no, "skipping line without separator");
        report.skipped_lines.push(line_no);
        return ScanState::Scanning;
    };

    let key = trimmed[..sep].trim();
    let raw_value = trimmed[sep + 1..].trim();

    match opening_quote(raw_value) {
        Some(quote) => {
            debug!(line = line_no, key = %key, "opened multi-line quoted value");
            ScanState::InQuote {
                quote,
                key: key.to_string(),
                // The quote is ASCII, so slicing one byte is a char boundary.
                value: raw_value[1..].to_string(),
                opened_at: line_no,
            }
        }
        None => {
            report
                .entries
                .push(Entry::new(key, strip_matching_quotes(raw_value)));
            ScanState::Scanning
        }
    }
}

/// Byte index of the first `=`, falling back to the first `:`.
fn find_separator(line: &str) -> Option<usize> {
    line.find('=').or_else(|| line.find(':'))
}

/// The quote that starts `value` if it is not closed on the same token.
fn opening_quote(value: &str) -> Option<QuoteChar> {
    let first = value.chars().next()?;
    let quote = QuoteChar::from_char(first)?;
    if is_self_closed(value, quote) {
        None
    } else {
        Some(quote)
    }
}

fn is_self_closed(value: &str, quote: QuoteChar) -> bool {
    value.len() >= 2 && value.starts_with(quote.as_char()) && value.ends_with(quote.as_char())
}

/// Remove one matching pair of outer `'…'` or `"…"`; anything else is returned as-is.
fn strip_matching_quotes(value: &str) -> &str {
    let quote = value.chars().next().and_then(QuoteChar::from_char);
    match quote {
        Some(q) if is_self_closed(value, q) => &value[1..value.len() - 1],
        _ => value,
    }
}
