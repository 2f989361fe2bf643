//! Environment-variable file ingestion.
//!
//! Responsibilities:
//! - Parse uploaded dotenv / properties text into ordered key/value entries.
//! - Merge parsed entries into an existing configuration (last write wins).
//!
//! Does NOT handle:
//! - Reading files or talking to the project API (see the cli and client crates).
//! - Masking values for display (owned by the editor session in the cli crate).
//!
//! Invariants:
//! - Parsing and merging are pure: no I/O, no shared state.
//! - Lenient parsing never fails; strict parsing fails only on an unterminated quote.

mod entry;
mod error;
mod merge;
mod parser;

pub use entry::{Entry, EnvMap, OrderedEntries};
pub use error::EnvFileError;
pub use merge::{MergeStats, merge_entries, merge_into};
pub use parser::{
    ParseMode, ParseReport, QuoteChar, UnterminatedQuote, parse_env_text, parse_env_text_report,
    parse_env_text_strict, parse_with_mode,
};
