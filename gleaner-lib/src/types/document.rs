use std::collections::{BTreeSet, HashMap};

use url::Url;

use crate::types::{ErrorKind, Outlink, Recorder, Result};
use crate::utils;

/// Data-map key under which the first `<base href>` is recorded.
pub const HTML_BASE: &str = "html-base";

/// Data-map key under which a robots meta-tag's content is stored.
pub const META_ROBOTS: &str = "meta-robots";

/// Data-map key under which the byte offsets of `<form>` open tags are
/// collected, for downstream form-credential handling.
pub const FORM_OFFSETS: &str = "form-offsets";

/// A value in the document's crawler-wide data map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataValue {
    /// Free-form text, e.g. a meta-robots content string or the installed
    /// base URI.
    Text(String),
    /// Byte offsets into the decoded content.
    Offsets(Vec<usize>),
}

/// Key/value side channel shared between the extractor and the rest of the
/// crawler.
#[derive(Clone, Debug, Default)]
pub struct DataMap(HashMap<&'static str, DataValue>);

impl DataMap {
    /// Store a value under `key`, replacing any existing one.
    pub fn put(&mut self, key: &'static str, value: DataValue) {
        self.0.insert(key, value);
    }

    /// Whether `key` has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The value under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.0.get(key)
    }

    /// The text value under `key`, if it is text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(DataValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The offset list under `key`, created empty on first use.
    pub fn offsets_mut(&mut self, key: &'static str) -> &mut Vec<usize> {
        let slot = self
            .0
            .entry(key)
            .and_modify(|value| {
                if !matches!(value, DataValue::Offsets(_)) {
                    *value = DataValue::Offsets(Vec::new());
                }
            })
            .or_insert_with(|| DataValue::Offsets(Vec::new()));
        match slot {
            DataValue::Offsets(offsets) => offsets,
            DataValue::Text(_) => unreachable!("slot was normalized to an offset list"),
        }
    }
}

/// A document under extraction: the per-fetch record the extractor mutates.
///
/// Created by the fetcher, handed to the extractor for the duration of one
/// call, then consumed by the scheduler. The extractor is the only mutator;
/// it never keeps references past return.
#[derive(Debug)]
pub struct Document {
    request_uri: Url,
    base: Option<Url>,
    content_type: String,
    recorder: Recorder,
    outlinks: Vec<Outlink>,
    annotations: BTreeSet<String>,
    non_fatal_failures: Vec<ErrorKind>,
    data: DataMap,
}

impl Document {
    /// Create a document for a fetched URI.
    #[must_use]
    pub fn new(request_uri: Url, content_type: impl Into<String>, recorder: Recorder) -> Self {
        Document {
            request_uri,
            base: None,
            content_type: content_type.into(),
            recorder,
            outlinks: Vec::new(),
            annotations: BTreeSet::new(),
            non_fatal_failures: Vec::new(),
            data: DataMap::default(),
        }
    }

    /// Convenience constructor from an in-memory body.
    ///
    /// # Errors
    ///
    /// Fails if `request_uri` is not an absolute URI.
    pub fn from_bytes(request_uri: &str, content_type: &str, body: Vec<u8>) -> Result<Self> {
        let request_uri = utils::url::parse_absolute(request_uri)?;
        Ok(Document::new(
            request_uri,
            content_type,
            Recorder::from_bytes(body),
        ))
    }

    /// The absolute URI that was fetched.
    #[must_use]
    pub const fn request_uri(&self) -> &Url {
        &self.request_uri
    }

    /// The effective base for resolving relative references: the first
    /// `<base href>` if one was installed, otherwise the request URI.
    #[must_use]
    pub const fn base_uri(&self) -> &Url {
        match &self.base {
            Some(base) => base,
            None => &self.request_uri,
        }
    }

    /// Install a `<base href>` as the document base. Only the first call has
    /// any effect; the installed base is also recorded under
    /// [`HTML_BASE`] in the data map.
    pub fn set_base_uri(&mut self, base: Url) {
        if self.data.contains(HTML_BASE) {
            return;
        }
        self.data.put(HTML_BASE, DataValue::Text(base.to_string()));
        self.base = Some(base);
    }

    /// The `Content-Type` of the fetch response.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether the response headers already declared a charset, making a
    /// content sniff unnecessary.
    #[must_use]
    pub fn has_content_type_charset(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("charset=")
    }

    /// The content replay buffer.
    #[must_use]
    pub const fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Mutable access to the content replay buffer (charset switching).
    pub fn recorder_mut(&mut self) -> &mut Recorder {
        &mut self.recorder
    }

    /// Append an outlink; silently dropped once `max` links are recorded.
    pub fn append_outlink(&mut self, link: Outlink, max: usize) {
        if self.outlinks.len() < max {
            self.outlinks.push(link);
        } else {
            log::trace!("outlink limit {max} reached, dropping {link}");
        }
    }

    /// The outlinks discovered so far, in emission order.
    #[must_use]
    pub fn outlinks(&self) -> &[Outlink] {
        &self.outlinks
    }

    /// Remove the first outlink equal to `link`. Returns whether one was
    /// removed.
    pub fn remove_outlink(&mut self, link: &Outlink) -> bool {
        match self.outlinks.iter().position(|l| l == link) {
            Some(index) => {
                self.outlinks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Add a short processing-anomaly tag.
    pub fn annotate(&mut self, tag: impl Into<String>) {
        self.annotations.insert(tag.into());
    }

    /// The processing-anomaly tags collected so far.
    #[must_use]
    pub const fn annotations(&self) -> &BTreeSet<String> {
        &self.annotations
    }

    /// Record a recoverable failure without stopping extraction.
    pub fn record_failure(&mut self, error: ErrorKind) {
        log::debug!("non-fatal failure on {}: {error}", self.request_uri);
        self.non_fatal_failures.push(error);
    }

    /// The recoverable failures recorded so far.
    #[must_use]
    pub fn non_fatal_failures(&self) -> &[ErrorKind] {
        &self.non_fatal_failures
    }

    /// The crawler-wide data map.
    #[must_use]
    pub const fn data(&self) -> &DataMap {
        &self.data
    }

    /// Mutable access to the crawler-wide data map.
    pub fn data_mut(&mut self) -> &mut DataMap {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Hop, LinkContext};
    use pretty_assertions::assert_eq;

    fn outlink(target: &str) -> Outlink {
        Outlink::new(
            Url::parse(target).unwrap(),
            Hop::Navlink,
            LinkContext::elem_attr("a", "href"),
        )
    }

    #[test]
    fn base_defaults_to_request_uri() {
        let doc = Document::from_bytes("http://h/p/q", "text/html", Vec::new()).unwrap();
        assert_eq!(doc.base_uri().as_str(), "http://h/p/q");
    }

    #[test]
    fn only_first_base_wins() {
        let mut doc = Document::from_bytes("http://h/", "text/html", Vec::new()).unwrap();
        doc.set_base_uri(Url::parse("http://b/").unwrap());
        doc.set_base_uri(Url::parse("http://c/").unwrap());
        assert_eq!(doc.base_uri().as_str(), "http://b/");
        assert_eq!(doc.data().text(HTML_BASE), Some("http://b/"));
    }

    #[test]
    fn outlink_cap_drops_silently() {
        let mut doc = Document::from_bytes("http://h/", "text/html", Vec::new()).unwrap();
        for i in 0..5 {
            doc.append_outlink(outlink(&format!("http://h/{i}")), 3);
        }
        assert_eq!(doc.outlinks().len(), 3);
    }

    #[test]
    fn remove_outlink_removes_one_instance() {
        let mut doc = Document::from_bytes("http://h/", "text/html", Vec::new()).unwrap();
        doc.append_outlink(outlink("http://h/a"), 10);
        doc.append_outlink(outlink("http://h/a"), 10);
        assert!(doc.remove_outlink(&outlink("http://h/a")));
        assert_eq!(doc.outlinks().len(), 1);
        assert!(!doc.remove_outlink(&outlink("http://h/b")));
    }

    #[test]
    fn charset_declaration_in_headers_is_detected() {
        let doc = Document::from_bytes(
            "http://h/",
            "text/html; charset=UTF-8",
            Vec::new(),
        )
        .unwrap();
        assert!(doc.has_content_type_charset());
        let doc = Document::from_bytes("http://h/", "text/html", Vec::new()).unwrap();
        assert!(!doc.has_content_type_charset());
    }

    #[test]
    fn offsets_list_is_created_on_first_use() {
        let mut doc = Document::from_bytes("http://h/", "text/html", Vec::new()).unwrap();
        doc.data_mut().offsets_mut(FORM_OFFSETS).push(42);
        doc.data_mut().offsets_mut(FORM_OFFSETS).push(99);
        assert_eq!(
            doc.data().get(FORM_OFFSETS),
            Some(&DataValue::Offsets(vec![42, 99]))
        );
    }
}
