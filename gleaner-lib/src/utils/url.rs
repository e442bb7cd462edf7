//! URI parsing and resolution against a document base.
//!
//! A thin layer over the `url` crate mapping its failures to the crate's
//! non-fatal error kind. Resolution follows RFC 3986; IDN hosts are
//! accepted by the underlying parser.

use url::Url;

use crate::types::{ErrorKind, Result};

/// Parse an absolute URI. Surrounding ASCII whitespace is trimmed first.
///
/// # Errors
///
/// Returns [`ErrorKind::BadUri`] when the input does not parse as an
/// absolute URI.
pub fn parse_absolute(input: &str) -> Result<Url> {
    let trimmed = input.trim_matches(|c: char| c.is_ascii_whitespace());
    Url::parse(trimmed).map_err(|e| ErrorKind::BadUri(e, trimmed.to_string()))
}

/// Resolve `reference` against `base`. Absolute references pass through
/// unchanged; surrounding ASCII whitespace is trimmed first.
///
/// # Errors
///
/// Returns [`ErrorKind::BadUri`] when the reference cannot be joined with
/// the base.
pub fn resolve(base: &Url, reference: &str) -> Result<Url> {
    let trimmed = reference.trim_matches(|c: char| c.is_ascii_whitespace());
    base.join(trimmed)
        .map_err(|e| ErrorKind::BadUri(e, trimmed.to_string()))
}

/// Host and port of `uri`, without any userinfo. `None` for URIs that have
/// no host (e.g. `mailto:`).
#[must_use]
pub fn authority_minus_userinfo(uri: &Url) -> Option<String> {
    let host = uri.host_str()?;
    Some(match uri.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
