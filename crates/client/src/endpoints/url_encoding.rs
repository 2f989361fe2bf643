//! Percent-encoding for values interpolated into API paths.
//!
//! Env-variable keys are user input. A key such as `a/b` or `KEY?x` must reach
//! the server as a single path segment, not as extra path or a query string.
//!
//! ```
//! use deploydash_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("a/b"), "a%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters escaped inside a single path segment.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b'[')
    .add(b']');

/// Percent-encode `segment` for use as one URL path segment.
///
/// Non-ASCII bytes are always encoded.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
