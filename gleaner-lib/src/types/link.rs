use std::fmt;

use url::Url;

use crate::types::{Hop, LinkContext};

/// A single discovered outbound reference.
///
/// The target is always absolute; relative references are resolved against
/// the document base before an `Outlink` is built. All fields are owned, so
/// outlinks stay valid after the originating document's content buffer is
/// released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outlink {
    /// Absolute resolved target URI.
    pub target: Url,
    /// How the link was discovered.
    pub hop: Hop,
    /// Where in the document it was found.
    pub context: LinkContext,
}

impl Outlink {
    /// Create a new outlink record.
    #[must_use]
    pub const fn new(target: Url, hop: Hop, context: LinkContext) -> Self {
        Outlink { target, hop, context }
    }
}

impl fmt::Display for Outlink {
    /// The crawl-log form: `target HOP context`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.hop, self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_crawl_log_form() {
        let link = Outlink::new(
            Url::parse("http://example.com/x").unwrap(),
            Hop::Navlink,
            LinkContext::elem_attr("a", "href"),
        );
        assert_eq!(link.to_string(), "http://example.com/x L a/@href");
    }
}
