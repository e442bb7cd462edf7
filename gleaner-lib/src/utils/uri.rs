//! Heuristics for deciding whether an arbitrary string looks like a URI.
//!
//! Used for speculative extraction from script code, `value` attributes,
//! flashvars pairs, and meta content. The predicate is deliberately
//! liberal: fetching a false positive is cheap, missing a real link is
//! not. It is also pure; callers decide what to do with a hit.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Characters that may appear in a liberal path candidate. Anything outside
/// this set (quotes, angle brackets, backslashes, braces) disqualifies the
/// string immediately.
static PATH_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-\w.%~!$&'()*+,;=:@/?#]+$").expect("path-candidate pattern is valid")
});

/// Path extensions that mark a candidate as fetchable content.
static RECOGNIZED_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\.(?:s?html?|php\d?|aspx?|jsp|cfm|cgi|pl|py|js|css|json|xml|rss|atom|gif|jpe?g|png|webp|svg|ico|pdf|swf|flv|mp[34]|txt)(?:[?#]\S*)?$",
    )
    .expect("recognized-extension pattern is valid")
});

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Whether `candidate` looks enough like a URI to be worth scheduling.
#[must_use]
pub fn is_very_likely_uri(candidate: &str) -> bool {
    let s = candidate.trim();
    if s.is_empty() || s.len() > 1024 || s.contains(char::is_whitespace) {
        return false;
    }
    if starts_with_ignore_case(s, "http:") || starts_with_ignore_case(s, "https:") {
        return true;
    }
    if let Some(rest) = s.strip_prefix("//") {
        return !rest.is_empty();
    }
    if starts_with_ignore_case(s, "www.") {
        return s.len() > 4;
    }
    // Path-like fragments need a slash and path-legal characters only.
    if !s.contains('/') || !PATH_CANDIDATE.is_match(s) {
        return false;
    }
    // Pure numeric/ID strings ("2024/01") are more often counters than paths.
    if s.bytes().all(|b| b.is_ascii_digit() || b == b'/') {
        return false;
    }
    RECOGNIZED_EXTENSION.is_match(s)
        || s.bytes().filter(u8::is_ascii_alphanumeric).count() >= 6
}

/// Complete scheme-relative and `www.` candidates so they have a chance of
/// parsing as absolute URIs. Anything else passes through unchanged.
#[must_use]
pub fn speculative_fixup(candidate: &str, base: &Url) -> String {
    let s = candidate.trim();
    if s.starts_with("//") {
        format!("{}:{s}", base.scheme())
    } else if starts_with_ignore_case(s, "www.") {
        format!("http://{s}")
    } else {
        s.to_string()
    }
}
