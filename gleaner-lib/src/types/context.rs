use std::borrow::Cow;
use std::fmt;

/// Where in a document a link was found.
///
/// Usually an XPath-like `element/@attribute` pair, lowercased (`a/@href`,
/// `img/@srcset`). A few distinguished tokens cover links that have no
/// single attribute of origin, such as meta refresh targets or strings
/// pulled out of script code.
///
/// Contexts are short owned strings: they never borrow from the document's
/// replay buffer, so a link record can outlive its document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkContext(Cow<'static, str>);

impl LinkContext {
    /// Links found in a `<meta>` tag.
    pub const META: LinkContext = LinkContext(Cow::Borrowed("meta"));

    /// Links inferred from other already-discovered URIs.
    pub const INFERRED_MISC: LinkContext = LinkContext(Cow::Borrowed("inferred-misc"));

    /// Speculative strings found in script code.
    pub const SCRIPT_MISC: LinkContext = LinkContext(Cow::Borrowed("script-misc"));

    /// URIs found in style sheets or inline style attributes.
    pub const STYLE_MISC: LinkContext = LinkContext(Cow::Borrowed("style-misc"));

    /// Remote-content anchors (`<a data-remote="true" href=…>`).
    pub const A_DATA_REMOTE: LinkContext =
        LinkContext(Cow::Borrowed("a[data-remote='true']/@href"));

    /// Context for an `element/@attribute` pair, lowercased.
    #[must_use]
    pub fn elem_attr(element: &str, attribute: &str) -> Self {
        LinkContext(Cow::Owned(format!(
            "{}/@{}",
            element.to_ascii_lowercase(),
            attribute.to_ascii_lowercase()
        )))
    }

    /// Context for a link emitted for a whole element, without a single
    /// attribute of origin (e.g. object/applet resource lists).
    #[must_use]
    pub fn element(element: &str) -> Self {
        LinkContext(Cow::Owned(element.to_ascii_lowercase()))
    }

    /// Context for a `<link rel='…'>` keyword that turns the href into an
    /// embedded resource.
    pub(crate) fn link_rel(keyword: &str) -> Self {
        LinkContext(Cow::Owned(format!("link[rel='{keyword}']/@href")))
    }

    /// The context as a plain string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split an `element/@attribute` context into its two halves, if it has
    /// that shape.
    pub(crate) fn element_and_attribute(&self) -> Option<(&str, &str)> {
        self.0.split_once("/@")
    }
}

impl fmt::Display for LinkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elem_attr_is_lowercased() {
        assert_eq!(LinkContext::elem_attr("IMG", "SrcSet").as_str(), "img/@srcset");
    }

    #[test]
    fn split_roundtrip() {
        let context = LinkContext::elem_attr("a", "href");
        assert_eq!(context.element_and_attribute(), Some(("a", "href")));
        assert_eq!(LinkContext::META.element_and_attribute(), None);
    }
}
