//! Raw REST endpoint functions.
//!
//! Each function takes the shared `reqwest::Client`, the normalized base URL,
//! an optional bearer token and a retry budget. [`crate::DeployClient`] wraps
//! them with its stored configuration.

pub mod projects;
mod request;
pub mod url_encoding;

pub use projects::{add_env_variable, delete_env_variable, get_settings, update_settings};
pub use request::{read_json, send_request_with_retry};
pub use url_encoding::encode_path_segment;
