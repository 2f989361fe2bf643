//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, editor and parse errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (128 + 2).

use deploydash_client::ClientError;
use deploydash_config::EnvFileError;

use crate::editor::EditorError;

/// Structured exit codes for deploydash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure, including configuration errors.
    GeneralError = 1,

    /// Missing or rejected API token (HTTP 401).
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Unknown project (HTTP 404) or env key.
    NotFound = 4,

    /// Bad input: rejected by the API (400/422), an empty key, or an
    /// unterminated quote in strict mode.
    ValidationError = 5,

    /// Token lacks access to the project (HTTP 403).
    PermissionDenied = 6,

    /// HTTP 429 after retries were exhausted.
    RateLimited = 7,

    /// HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ExitCode::ValidationError,
            401 => ExitCode::AuthenticationFailed,
            403 => ExitCode::PermissionDenied,
            404 => ExitCode::NotFound,
            429 => ExitCode::RateLimited,
            502..=504 => ExitCode::ServiceUnavailable,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::ApiError { status, .. } => Self::from_status(*status),
            ClientError::MaxRetriesExceeded { status, .. } => Self::from_status(*status),
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::InvalidRequest(_) | ClientError::InvalidResponse(_) => {
                ExitCode::ValidationError
            }
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Exit code for this error; `GeneralError` when nothing more specific applies.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(editor_err) = cause.downcast_ref::<EditorError>() {
                return match editor_err {
                    EditorError::UnknownKey(_) => ExitCode::NotFound,
                    _ => ExitCode::ValidationError,
                };
            }
            if cause.is::<EnvFileError>() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}
