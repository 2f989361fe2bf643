//! Centralized constants for the deploydash workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default project API base URL (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound for the configurable retry count.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_API_URL: &str = "DEPLOYDASH_API_URL";
pub const ENV_API_TOKEN: &str = "DEPLOYDASH_API_TOKEN";
pub const ENV_TIMEOUT: &str = "DEPLOYDASH_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "DEPLOYDASH_MAX_RETRIES";
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
