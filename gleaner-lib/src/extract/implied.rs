//! Implied-URI extraction: finding 'implied' URIs inside other URIs.
//!
//! Works on URIs discovered by earlier extractors rather than on content,
//! so it should run after HTML extraction. When a discovered target
//! matches the trigger pattern, a new URI is built from the replacement
//! template; the capturing groups of the trigger are available to the
//! template as `$1`, `$2`, ….

use regex::Regex;

use crate::types::{Document, Hop, LinkContext, Outlink};
use crate::utils;

/// Secondary extractor that rewrites matching outlink targets into
/// additional inferred outlinks.
#[derive(Clone, Debug)]
pub struct ImpliedUriExtractor {
    trigger: Regex,
    format: String,
    remove_trigger: bool,
}

impl ImpliedUriExtractor {
    /// Create an extractor. `trigger` must match an entire target URI for
    /// the rewrite to fire; `format` is the replacement template. With
    /// `remove_trigger`, matching originals are removed from the outlink
    /// list once their implied URI is emitted.
    #[must_use]
    pub const fn new(trigger: Regex, format: String, remove_trigger: bool) -> Self {
        ImpliedUriExtractor {
            trigger,
            format,
            remove_trigger,
        }
    }

    /// Run over the document's current outlinks. Returns the number of
    /// inferred links emitted.
    pub fn extract(&self, doc: &mut Document, max_outlinks: usize) -> usize {
        let snapshot: Vec<Outlink> = doc.outlinks().to_vec();
        let mut count = 0;
        for link in snapshot {
            let Some(implied) = self.implied_uri(link.target.as_str()) else {
                continue;
            };
            match utils::url::parse_absolute(&implied) {
                Ok(target) => {
                    doc.append_outlink(
                        Outlink::new(target, Hop::Inferred, LinkContext::INFERRED_MISC),
                        max_outlinks,
                    );
                    count += 1;
                    if self.remove_trigger && doc.remove_outlink(&link) {
                        log::debug!("removed trigger uri {} from outlinks", link.target);
                    }
                }
                Err(e) => {
                    log::debug!("implied uri `{implied}` does not parse: {e}");
                }
            }
        }
        count
    }

    /// The rewritten URI when `uri` matches the whole trigger, else `None`.
    fn implied_uri(&self, uri: &str) -> Option<String> {
        let m = self.trigger.find(uri)?;
        if m.start() != 0 || m.end() != uri.len() {
            return None;
        }
        Some(self.trigger.replace(uri, self.format.as_str()).into_owned())
    }
}
