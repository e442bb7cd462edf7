//! Speculative URI extraction from script code.
//!
//! Best-effort string analysis over inline JavaScript: quoted string
//! literals that pass the likely-URI heuristic become speculative
//! outlinks. This finds both valid and invalid URIs by design; the
//! crawler's frontier treats speculative hops accordingly.

use std::fmt::Debug;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Document, Hop, LinkContext, Outlink};
use crate::utils;

/// Quoted, whitespace-free string literals. URIs never contain raw
/// whitespace, so everything else is uninteresting.
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"\s]+)"|'([^'\s]+)'"#).expect("string-literal pattern is valid")
});

/// A replaceable script capability. The HTML extractor hands over inline
/// handler values, `javascript:` URI remainders, and whole `<script>`
/// bodies.
pub trait ScriptExtractor: Debug + Send + Sync {
    /// Scan script `code` for URI-like strings and emit speculative links
    /// on `doc`. Returns the number of links emitted.
    fn consider_strings(&self, doc: &mut Document, code: &str, max_outlinks: usize) -> usize;
}

/// The default string-literal heuristic extractor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeculativeScriptExtractor;

impl ScriptExtractor for SpeculativeScriptExtractor {
    fn consider_strings(&self, doc: &mut Document, code: &str, max_outlinks: usize) -> usize {
        let base = doc.base_uri().clone();
        let mut count = 0;
        for caps in STRING_LITERAL.captures_iter(code) {
            let Some(candidate) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let candidate = candidate.as_str();
            if !utils::uri::is_very_likely_uri(candidate) {
                continue;
            }
            match utils::url::resolve(&base, candidate) {
                Ok(target) => {
                    doc.append_outlink(
                        Outlink::new(target, Hop::Speculative, LinkContext::SCRIPT_MISC),
                        max_outlinks,
                    );
                    count += 1;
                }
                Err(e) => doc.record_failure(e),
            }
        }
        count
    }
}
