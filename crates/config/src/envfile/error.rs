//! Error types for strict env-file parsing.
//!
//! Invariants:
//! - Errors carry keys and line numbers only, never values, so secrets from
//!   an uploaded file cannot leak into logs or terminal output.

use thiserror::Error;

/// Errors surfaced by strict-mode parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvFileError {
    /// A quoted value was opened but never closed before end of input.
    #[error("Unterminated {quote} quote for key '{key}' opened on line {line}")]
    UnterminatedQuote { key: String, line: usize, quote: char },
}
