//! URI extraction from CSS: `url()` tokens in `<style>` bodies and inline
//! `style` attributes.
//!
//! A regular-expression based extractor; it does not handle escape
//! sequences within URLs or nested functions. A real CSS parser would
//! cover those, but the cases are rare in crawl traffic and the regex is a
//! fraction of the cost.

use std::fmt::Debug;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Document, Hop, LinkContext, Outlink};
use crate::utils;

/// Matches `url("…")`, `url('…')`, and `url(…)`.
static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        url\s*\(\s*
        (?:
            "(?P<double>[^"]*)"
            |'(?P<single>[^']*)'
            |(?P<unquoted>[^)]+)
        )
        \s*\)
        "#,
    )
    .expect("css url pattern is valid")
});

/// A replaceable CSS capability. The HTML extractor hands over inline
/// `style` values and whole `<style>` bodies; implementations emit embedded
/// resource links on the document.
pub trait CssExtractor: Debug + Send + Sync {
    /// Scan `css` and emit links on `doc`. Returns the number of links
    /// emitted.
    fn consider_style(&self, doc: &mut Document, css: &str, max_outlinks: usize) -> usize;
}

/// The default `url()`-token extractor.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexCssExtractor;

impl CssExtractor for RegexCssExtractor {
    fn consider_style(&self, doc: &mut Document, css: &str, max_outlinks: usize) -> usize {
        let base = doc.base_uri().clone();
        let mut count = 0;
        for caps in CSS_URL.captures_iter(css) {
            let Some(url) = caps
                .name("double")
                .or_else(|| caps.name("single"))
                .or_else(|| caps.name("unquoted"))
                .map(|m| m.as_str().trim())
            else {
                continue;
            };
            if url.is_empty()
                || url
                    .get(..5)
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
            {
                continue;
            }
            match utils::url::resolve(&base, url) {
                Ok(target) => {
                    doc.append_outlink(
                        Outlink::new(target, Hop::Embed, LinkContext::STYLE_MISC),
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
