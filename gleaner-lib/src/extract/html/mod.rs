//! HTML link extraction: the tag handler driving the scanners.
//!
//! Dispatches on the tag tokens of [`tag_scanner`], classifies attributes
//! with [`attribute`], and emits outlinks on the document according to the
//! per-tag rules: hop type, context tag, base installation, codebase
//! resolution, form handling, LINK rel keywords, meta robots/refresh, and
//! srcset expansion.

mod attribute;
mod srcset;
mod tag_scanner;

use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::charset;
use crate::extract::css::{CssExtractor, RegexCssExtractor};
use crate::extract::script::{ScriptExtractor, SpeculativeScriptExtractor};
use crate::types::{
    DataValue, Document, ErrorKind, FORM_OFFSETS, HTML_BASE, Hop, LinkContext, META_ROBOTS,
    Outlink, RobotsPolicy,
};
use crate::utils;

use attribute::{AttrClass, AttrLimits, AttrScanner, Attribute};
use tag_scanner::{TagScanner, TagToken, tag_pattern};

/// Anchors carrying `data-remote="true"` load their href as a fragment
/// rather than navigating to it.
static DATA_REMOTE_TRUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)data-remote\s*=\s*["']true"#).expect("data-remote pattern is valid")
});

static NOFOLLOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnofollow\b").expect("nofollow pattern is valid"));

/// Lazy-load attribute variants that carry resource URIs.
static DATA_LAZY_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data-(?:src|src-small|src-medium|srcset|original|original-set|lazy|lazy-srcset|full-src)$")
        .expect("data-lazy pattern is valid")
});

/// Path extensions that mark a URI as something other than an HTML page.
static NON_HTML_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:gif|jpe?g|png|tiff?|bmp|avi|mov|mpe?g|mp3|mp4|swf|wav|au|aiff|mid)$")
        .expect("non-html extension pattern is valid")
});

/// Tunable parameters for HTML link extraction. The defaults match a
/// large-scale crawl configuration.
#[derive(Clone, Debug)]
pub struct ExtractorOptions {
    /// Cap on element-name length in the tag scan.
    pub max_element_length: usize,
    /// Cap on attribute-name length.
    pub max_attribute_name_length: usize,
    /// Cap on attribute-value length; longer values are truncated.
    pub max_attribute_value_length: usize,
    /// Treat FRAME/IFRAME SRC links as embedded resources (like IMG, `E`
    /// hop type) instead of navigational links.
    pub treat_frames_as_embed_links: bool,
    /// Ignore URIs appearing as the ACTION attribute of forms.
    pub ignore_form_action_urls: bool,
    /// Only extract ACTION URIs whose METHOD is GET, explicit or implied.
    pub extract_only_form_gets: bool,
    /// Scan in-page and inline JavaScript for likely URIs. This finds both
    /// valid and invalid URIs; fetching the invalid ones sometimes
    /// generates webmaster concern over odd crawler behavior.
    pub extract_javascript: bool,
    /// Consider strings in unusual places (form VALUE attributes) as
    /// possible URIs.
    pub extract_value_attributes: bool,
    /// Skip documents whose URI path ends in a typical non-HTML extension
    /// unless the response says otherwise.
    pub ignore_unexpected_html: bool,
    /// Drop links carrying a `rel=nofollow` directive.
    pub obey_rel_nofollow: bool,
    /// Cap on total outlinks emitted per document; excess links are
    /// silently dropped.
    pub max_outlinks: usize,
    /// Policy for honoring robots meta tags.
    pub robots_policy: RobotsPolicy,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        ExtractorOptions {
            max_element_length: 64,
            max_attribute_name_length: 64,
            max_attribute_value_length: 2048,
            treat_frames_as_embed_links: true,
            ignore_form_action_urls: false,
            extract_only_form_gets: true,
            extract_javascript: true,
            extract_value_attributes: true,
            ignore_unexpected_html: true,
            obey_rel_nofollow: false,
            max_outlinks: 6000,
            robots_policy: RobotsPolicy::default(),
        }
    }
}

/// How a scan over a document ended.
enum ScanOutcome {
    Completed,
    AbortedByMetaRobots,
    Cancelled,
}

/// Link extraction from an HTML content body.
///
/// One extractor serves any number of documents; it holds only immutable
/// configuration and patterns compiled once at construction.
#[derive(Debug)]
pub struct HtmlExtractor {
    options: ExtractorOptions,
    tag_pattern: Regex,
    script_extractor: Option<Box<dyn ScriptExtractor>>,
    css_extractor: Box<dyn CssExtractor>,
}

impl HtmlExtractor {
    /// Create an extractor with the given options and the default script
    /// and CSS capabilities.
    #[must_use]
    pub fn new(options: ExtractorOptions) -> Self {
        HtmlExtractor {
            tag_pattern: tag_pattern(options.max_element_length),
            options,
            script_extractor: Some(Box::new(SpeculativeScriptExtractor)),
            css_extractor: Box::new(RegexCssExtractor),
        }
    }

    /// Replace the script capability. `None` disables inline-script
    /// scanning entirely.
    #[must_use]
    pub fn with_script_extractor(mut self, extractor: Option<Box<dyn ScriptExtractor>>) -> Self {
        self.script_extractor = extractor;
        self
    }

    /// Replace the CSS capability.
    #[must_use]
    pub fn with_css_extractor(mut self, extractor: Box<dyn CssExtractor>) -> Self {
        self.css_extractor = extractor;
        self
    }

    /// The options this extractor was built with.
    #[must_use]
    pub const fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Run extraction over a document, mutating it in place.
    ///
    /// Returns `true` only when extraction ran to normal completion;
    /// `false` when the document was skipped by the HTML-expected gate,
    /// stopped by a content read error, or aborted by a robots meta tag.
    pub fn extract(&self, doc: &mut Document) -> bool {
        self.extract_cancellable(doc, &AtomicBool::new(false))
    }

    /// Like [`extract`](HtmlExtractor::extract), with a cooperative
    /// cancellation flag checked between tag matches. On cancellation the
    /// partial outlink list is kept and `false` is returned.
    pub fn extract_cancellable(&self, doc: &mut Document, cancelled: &AtomicBool) -> bool {
        if !self.should_extract(doc) {
            return false;
        }
        charset::reconcile(doc);
        let replay = match doc.recorder().replay() {
            Ok(replay) => replay,
            Err(e) => {
                doc.record_failure(e);
                return false;
            }
        };
        if replay.decode_error_count > 0 {
            doc.annotate(format!(
                "decode-exception-count:{}",
                replay.decode_error_count
            ));
            doc.record_failure(ErrorKind::DecodeError(replay.decode_error_count));
        }
        matches!(
            self.scan(doc, &replay.text, cancelled),
            ScanOutcome::Completed
        )
    }

    /// Whether this document should be scanned as HTML at all.
    fn should_extract(&self, doc: &Document) -> bool {
        if self.options.ignore_unexpected_html && !is_html_expected(doc) {
            // HTML was not expected here (e.g. a GIF was), treat as a soft 404
            return false;
        }
        let mime = doc.content_type().to_ascii_lowercase();
        if mime.starts_with("text/html")
            || mime.starts_with("application/xhtml")
            || mime.starts_with("text/vnd.wap.wml")
            || mime.starts_with("application/vnd.wap.wml")
            || mime.starts_with("application/vnd.wap.xhtml")
        {
            return true;
        }
        let prefix = doc.recorder().content_prefix(1000).to_ascii_lowercase();
        prefix.contains("<html") || prefix.contains("<!doctype html")
    }

    fn scan(&self, doc: &mut Document, text: &str, cancelled: &AtomicBool) -> ScanOutcome {
        for token in TagScanner::new(&self.tag_pattern, text, cancelled) {
            match token {
                TagToken::Meta { attrs } => {
                    if self.process_meta(doc, attrs) {
                        // meta tag included NOFOLLOW; abort processing
                        return ScanOutcome::AbortedByMetaRobots;
                    }
                }
                TagToken::General {
                    element,
                    attrs,
                    offset,
                } => {
                    self.process_general_tag(doc, element, attrs);
                    // remember FORM offsets for later form-credential work
                    if element.eq_ignore_ascii_case("form") {
                        doc.data_mut().offsets_mut(FORM_OFFSETS).push(offset);
                    }
                }
                TagToken::Script { open_tag, body } => {
                    self.process_general_tag(doc, "script", open_tag);
                    self.process_script_code(doc, body);
                }
                TagToken::Style { open_tag, body } => {
                    self.process_general_tag(doc, "style", open_tag);
                    self.css_extractor
                        .consider_style(doc, body, self.options.max_outlinks);
                }
            }
        }
        if cancelled.load(Ordering::Relaxed) {
            ScanOutcome::Cancelled
        } else {
            ScanOutcome::Completed
        }
    }

    #[allow(clippy::too_many_lines)]
    fn process_general_tag(&self, doc: &mut Document, element: &str, tag_body: &str) {
        // OBJECT/APPLET state
        let mut codebase: Option<String> = None;
        let mut resources: Vec<String> = Vec::new();
        // FORM state
        let mut action: Option<String> = None;
        let mut action_context: Option<LinkContext> = None;
        let mut method: Option<String> = None;
        // VALUE whose interpretation depends on an accompanying NAME
        let mut value_val: Option<String> = None;
        let mut value_context: Option<LinkContext> = None;
        let mut name_val: Option<String> = None;
        // A/LINK state; href and rel are only interpreted together
        let mut link_href: Option<String> = None;
        let mut link_rel: Option<String> = None;
        let mut link_context: Option<LinkContext> = None;

        let is_frame =
            element.eq_ignore_ascii_case("frame") || element.eq_ignore_ascii_case("iframe");
        let embed_hop = if is_frame && !self.options.treat_frames_as_embed_links {
            Hop::Navlink
        } else {
            Hop::Embed
        };

        let limits = AttrLimits {
            max_name: self.options.max_attribute_name_length,
            max_value: self.options.max_attribute_value_length,
        };
        for Attribute { class, name, value } in AttrScanner::new(tag_body, limits) {
            match class {
                AttrClass::HrefCite => {
                    if element.eq_ignore_ascii_case("base") {
                        // the first <base href> becomes the document base;
                        // it is not itself an outlink
                        if !doc.data().contains(HTML_BASE) {
                            let current = doc.base_uri().clone();
                            match utils::url::resolve(&current, &value) {
                                Ok(base) => doc.set_base_uri(base),
                                Err(e) => doc.record_failure(e),
                            }
                        }
                    } else if element.eq_ignore_ascii_case("a")
                        && DATA_REMOTE_TRUE.is_match(tag_body)
                    {
                        self.process_embed(doc, &value, LinkContext::A_DATA_REMOTE, Hop::Embed);
                    } else if element.eq_ignore_ascii_case("a")
                        || element.eq_ignore_ascii_case("link")
                    {
                        if link_href.is_none() {
                            // delay until end of tag, when rel is known
                            link_context = Some(LinkContext::elem_attr(element, &name));
                            link_href = Some(value);
                        } else {
                            self.process_link(doc, &value, LinkContext::elem_attr(element, &name));
                        }
                    } else {
                        self.process_link(doc, &value, LinkContext::elem_attr(element, &name));
                    }
                }
                AttrClass::Action => {
                    if !self.options.ignore_form_action_urls {
                        action_context = Some(LinkContext::elem_attr(element, &name));
                        action = Some(value);
                        // handling finished at end of tag, after METHOD
                    }
                }
                AttrClass::ScriptHandler => self.process_script_code(doc, &value),
                AttrClass::SrcLike => {
                    if !value
                        .get(..5)
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
                    {
                        self.process_embed(
                            doc,
                            &value,
                            LinkContext::elem_attr(element, &name),
                            embed_hop,
                        );
                    }
                }
                AttrClass::Codebase => {
                    self.process_link(doc, &value, LinkContext::elem_attr(element, &name));
                    codebase = Some(value);
                }
                AttrClass::Resource => resources.push(value),
                AttrClass::Archive => {
                    resources.extend(value.split_ascii_whitespace().map(str::to_string));
                }
                AttrClass::Code => {
                    // applet code gets its implicit .class suffix
                    if element.eq_ignore_ascii_case("applet")
                        && !value.to_ascii_lowercase().ends_with(".class")
                    {
                        resources.push(format!("{value}.class"));
                    } else {
                        resources.push(value);
                    }
                }
                AttrClass::Value => {
                    value_context = Some(LinkContext::elem_attr(element, &name));
                    value_val = Some(value);
                }
                AttrClass::Style => {
                    self.css_extractor
                        .consider_style(doc, &value, self.options.max_outlinks);
                }
                AttrClass::Method => method = Some(value),
                AttrClass::Other => {
                    if name == "name" {
                        name_val = Some(value.clone());
                    } else if name == "flashvars" {
                        let context = LinkContext::elem_attr(element, &name);
                        self.consider_query_string_values(doc, &value, &context, Hop::Speculative);
                    } else if name == "rel" {
                        link_rel = Some(value.clone());
                    }
                    if DATA_LAZY_ATTR.is_match(&name) {
                        self.process_embed(
                            doc,
                            &value,
                            LinkContext::elem_attr(element, &name),
                            embed_hop,
                        );
                    }
                }
            }
        }

        if !resources.is_empty() {
            self.process_resources(doc, element, codebase.as_deref(), &resources);
        }

        // finish handling A/LINK now that both href and rel are known
        if let Some(href) = link_href {
            let context = link_context.unwrap_or_else(|| LinkContext::elem_attr(element, "href"));
            match link_rel.as_deref() {
                Some(rel) if element.eq_ignore_ascii_case("link") => {
                    self.process_link_tag_with_rel(doc, &href, rel);
                }
                Some(rel) if self.options.obey_rel_nofollow && NOFOLLOW.is_match(rel) => {
                    log::debug!("ignoring nofollow link: {href}");
                }
                _ => self.process_link(doc, &href, context),
            }
        }

        // finish handling the form action now that the method is known
        if let (Some(action), Some(context)) = (action, action_context) {
            let is_get = method
                .as_deref()
                .map_or(true, |m| m.eq_ignore_ascii_case("get"));
            if is_get || !self.options.extract_only_form_gets {
                self.process_link(doc, &action, context);
            }
        }

        // finish handling VALUE
        if let Some(value) = value_val {
            if element.eq_ignore_ascii_case("param")
                && name_val
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case("flashvars"))
            {
                let context =
                    value_context.unwrap_or_else(|| LinkContext::elem_attr(element, "value"));
                self.consider_query_string_values(doc, &value, &context, Hop::Speculative);
            } else if self.options.extract_value_attributes {
                if let Some(context) = value_context {
                    self.consider_if_likely_uri(doc, &value, context, Hop::Navlink);
                }
            }
        }
    }

    /// Resolve buffered OBJECT/APPLET resources against the codebase (when
    /// given) and emit them as embeds. A codebase that does not resolve
    /// drops the whole resource list.
    fn process_resources(
        &self,
        doc: &mut Document,
        element: &str,
        codebase: Option<&str>,
        resources: &[String],
    ) {
        let base = doc.base_uri().clone();
        let codebase_uri = match codebase {
            Some(codebase) => match utils::url::resolve(&base, codebase) {
                Ok(uri) => Some(uri),
                Err(e) => {
                    doc.record_failure(e);
                    return;
                }
            },
            None => None,
        };
        let resolve_base = codebase_uri.as_ref().unwrap_or(&base);
        for resource in resources {
            match utils::url::resolve(resolve_base, resource) {
                Ok(target) => doc.append_outlink(
                    Outlink::new(target, Hop::Embed, LinkContext::element(element)),
                    self.options.max_outlinks,
                ),
                Err(e) => doc.record_failure(e),
            }
        }
    }

    /// Apply the LINK rel-keyword table. The first terminal keyword wins;
    /// any unrecognized keyword makes the href a navigational link.
    fn process_link_tag_with_rel(&self, doc: &mut Document, href: &str, rel: &str) {
        let mut emit_as_navlink = false;
        for keyword in rel.split_ascii_whitespace() {
            let keyword = keyword.to_ascii_lowercase();
            match keyword.as_str() {
                "icon" | "stylesheet" | "modulepreload" | "prefetch" | "prerender" => {
                    // an embedded resource
                    self.process_embed(doc, href, LinkContext::link_rel(&keyword), Hop::Embed);
                    return;
                }
                "pingback" => {
                    // never extracted
                    return;
                }
                "dns-prefetch" | "preconnect" => {
                    // connection hints, not links
                }
                _ => emit_as_navlink = true,
            }
        }
        if emit_as_navlink {
            self.process_link(doc, href, LinkContext::elem_attr("link", "href"));
        }
    }

    /// Consider a query-string-like `key=value[&key=value]*` collection for
    /// URI-like strings in the values.
    fn consider_query_string_values(
        &self,
        doc: &mut Document,
        query: &str,
        context: &LinkContext,
        hop: Hop,
    ) {
        for pair in query.split('&') {
            let parts: Vec<&str> = pair.split('=').collect();
            let [_, encoded] = parts.as_slice() else {
                continue;
            };
            let plussed = encoded.replace('+', " ");
            let candidate = match percent_decode_str(&plussed).decode_utf8() {
                Ok(decoded) => decoded.into_owned(),
                // still consider values that fail to decode
                Err(_) => (*encoded).to_string(),
            };
            self.consider_if_likely_uri(doc, &candidate, context.clone(), hop);
        }
    }

    fn consider_if_likely_uri(
        &self,
        doc: &mut Document,
        candidate: &str,
        context: LinkContext,
        hop: Hop,
    ) {
        if utils::uri::is_very_likely_uri(candidate) {
            self.add_link(doc, candidate, context, hop);
        }
    }

    /// Hand inline script code to the script capability, if one is wired
    /// and enabled.
    fn process_script_code(&self, doc: &mut Document, code: &str) {
        if !self.options.extract_javascript {
            return;
        }
        if let Some(script) = &self.script_extractor {
            script.consider_strings(doc, code, self.options.max_outlinks);
        }
    }

    /// Generic href handling: `javascript:` URIs go to the script
    /// capability, everything else becomes a navigational link.
    fn process_link(&self, doc: &mut Document, value: &str, context: LinkContext) {
        if let Some(code) = strip_javascript_prefix(value) {
            self.process_script_code(doc, code);
        } else {
            log::trace!("link: {value} from {}", doc.request_uri());
            self.add_link(doc, value, context, Hop::Navlink);
        }
    }

    /// Embed handling; srcset-family contexts expand into one link per
    /// candidate URL.
    fn process_embed(&self, doc: &mut Document, value: &str, context: LinkContext, hop: Hop) {
        if is_srcset_context(&context) {
            for url in srcset::parse(value) {
                self.add_link(doc, url, context.clone(), hop);
            }
        } else {
            self.add_link(doc, value, context, hop);
        }
    }

    /// Resolve against the document base and append. Unresolvable
    /// references are recorded as non-fatal failures and dropped.
    fn add_link(&self, doc: &mut Document, uri: &str, context: LinkContext, hop: Hop) {
        let base = doc.base_uri().clone();
        match utils::url::resolve(&base, uri) {
            Ok(target) => doc.append_outlink(
                Outlink::new(target, hop, context),
                self.options.max_outlinks,
            ),
            Err(e) => doc.record_failure(e),
        }
    }

    /// Process a `<meta>` tag. Returns `true` when a robots meta tag tells
    /// this extractor to stop working on the document.
    fn process_meta(&self, doc: &mut Document, attrs: &str) -> bool {
        let limits = AttrLimits {
            max_name: self.options.max_attribute_name_length,
            max_value: self.options.max_attribute_value_length,
        };
        let mut name: Option<String> = None;
        let mut http_equiv: Option<String> = None;
        let mut content: Option<String> = None;
        for attr in AttrScanner::new(attrs, limits) {
            match attr.name.as_str() {
                "name" => name = Some(attr.value),
                "http-equiv" => http_equiv = Some(attr.value),
                "content" => content = Some(attr.value),
                _ => {}
            }
        }

        if name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case("robots")) && content.is_some() {
            let content = content.unwrap_or_default();
            doc.data_mut().put(META_ROBOTS, DataValue::Text(content.clone()));
            let lower = content.to_ascii_lowercase();
            if self.options.robots_policy.obeys_meta_robots_nofollow()
                && (lower.contains("nofollow") || lower.contains("none"))
            {
                log::debug!(
                    "HTML extraction skipped due to robots meta tag for {}",
                    doc.request_uri()
                );
                return true;
            }
        } else if http_equiv
            .as_deref()
            .is_some_and(|h| h.eq_ignore_ascii_case("refresh"))
            && content.is_some()
        {
            let content = content.unwrap_or_default();
            if let Some(eq) = content.find('=') {
                let refresh_uri: String = content[eq + 1..]
                    .chars()
                    .filter(|c| *c != '"' && *c != '\'')
                    .collect();
                self.add_link(doc, &refresh_uri, LinkContext::META, Hop::Refer);
            }
        } else if let Some(content) = content {
            // look for likely URIs in the content attribute
            let fixed = utils::uri::speculative_fixup(&content, doc.base_uri());
            if utils::uri::is_very_likely_uri(&fixed) {
                self.add_link(doc, &content, LinkContext::META, Hop::Speculative);
            }
        }
        false
    }
}

fn strip_javascript_prefix(value: &str) -> Option<&str> {
    const PREFIX: &str = "javascript:";
    value
        .get(..PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(PREFIX))
        .map(|_| &value[PREFIX.len()..])
}

/// Whether a srcset-family attribute produced this context, meaning the
/// value holds a candidate list rather than a single URL.
fn is_srcset_context(context: &LinkContext) -> bool {
    let Some((element, attribute)) = context.element_and_attribute() else {
        return false;
    };
    matches!(element, "img" | "source" | "link")
        && matches!(
            attribute,
            "srcset"
                | "imagesrcset"
                | "data-src"
                | "data-src-small"
                | "data-src-medium"
                | "data-srcset"
                | "data-lazy-srcset"
                | "data-original-set"
        )
}

/// Test whether HTML is so unexpected here (e.g. in place of a GIF URI)
/// that it should not be scanned for links.
fn is_html_expected(doc: &Document) -> bool {
    let path = doc.request_uri().path();
    let Some(dot) = path.rfind('.') else {
        return true;
    };
    if dot < path.len().saturating_sub(5) {
        // extension too long to recognize
        return true;
    }
    !NON_HTML_EXTENSION.is_match(&path[dot + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(options: ExtractorOptions, url: &str, html: &str) -> (bool, Document) {
        let mut doc = Document::from_bytes(url, "text/html", html.as_bytes().to_vec()).unwrap();
        let completed = HtmlExtractor::new(options).extract(&mut doc);
        (completed, doc)
    }

    fn links(doc: &Document) -> Vec<String> {
        doc.outlinks().iter().map(ToString::to_string).collect()
    }

    fn extract(url: &str, html: &str) -> Vec<String> {
        let (_, doc) = run(ExtractorOptions::default(), url, html);
        links(&doc)
    }

    #[test]
    fn anchor_href_resolves_against_request_uri() {
        assert_eq!(
            extract("http://h/p/q", r#"<a href="/x">hi</a>"#),
            vec!["http://h/x L a/@href"]
        );
    }

    #[test]
    fn base_href_changes_resolution_and_is_recorded() {
        let (_, doc) = run(
            ExtractorOptions::default(),
            "http://h/p/q",
            r#"<base href="http://b/"><img src="a.png">"#,
        );
        assert_eq!(links(&doc), vec!["http://b/a.png E img/@src"]);
        assert_eq!(doc.data().text(HTML_BASE), Some("http://b/"));
    }

    #[test]
    fn only_the_first_base_takes_effect() {
        let (_, doc) = run(
            ExtractorOptions::default(),
            "http://h/",
            r#"<base href="http://b1/"><base href="http://b2/"><a href="x">go</a>"#,
        );
        assert_eq!(links(&doc), vec!["http://b1/x L a/@href"]);
        assert_eq!(doc.data().text(HTML_BASE), Some("http://b1/"));
    }

    #[test]
    fn meta_robots_nofollow_aborts_extraction() {
        let (completed, doc) = run(
            ExtractorOptions::default(),
            "http://h/",
            r#"<meta name="robots" content="NoFollow"><a href="/x">never seen</a>"#,
        );
        assert!(!completed);
        assert!(doc.outlinks().is_empty());
        assert_eq!(doc.data().text(META_ROBOTS), Some("NoFollow"));
    }

    #[test]
    fn meta_robots_is_recorded_but_ignored_under_ignore_policy() {
        let options = ExtractorOptions {
            robots_policy: RobotsPolicy::Ignore,
            ..ExtractorOptions::default()
        };
        let (completed, doc) = run(
            options,
            "http://h/",
            r#"<meta name="robots" content="nofollow"><a href="/x">seen</a>"#,
        );
        assert!(completed);
        assert_eq!(links(&doc), vec!["http://h/x L a/@href"]);
        assert_eq!(doc.data().text(META_ROBOTS), Some("nofollow"));
    }

    #[test]
    fn srcset_expands_to_one_link_per_candidate() {
        assert_eq!(
            extract("http://h/", r#"<img srcset="a.png 1x, b.png 2x">"#),
            vec!["http://h/a.png E img/@srcset", "http://h/b.png E img/@srcset"]
        );
    }

    #[test]
    fn link_rel_first_terminal_keyword_wins() {
        assert_eq!(
            extract("http://h/", r#"<link rel="stylesheet icon" href="s.css">"#),
            vec!["http://h/s.css E link[rel='stylesheet']/@href"]
        );
    }

    #[test]
    fn link_rel_pingback_is_dropped() {
        assert!(extract("http://h/", r#"<link rel="pingback" href="http://p/">"#).is_empty());
    }

    #[test]
    fn link_rel_connection_hints_are_ignored() {
        assert!(extract("http://h/", r#"<link rel="dns-prefetch" href="//cdn.h">"#).is_empty());
        assert!(extract("http://h/", r#"<link rel="preconnect" href="//cdn.h">"#).is_empty());
    }

    #[test]
    fn link_rel_unknown_keyword_is_a_navlink() {
        assert_eq!(
            extract("http://h/", r#"<link rel="author" href="/me">"#),
            vec!["http://h/me L link/@href"]
        );
    }

    #[test]
    fn link_without_rel_is_a_navlink() {
        assert_eq!(
            extract("http://h/", r#"<link href="/style.css">"#),
            vec!["http://h/style.css L link/@href"]
        );
    }

    #[test]
    fn post_forms_are_dropped_by_default() {
        let html = r#"<form action="/go" method="POST"></form>"#;
        assert!(extract("http://h/", html).is_empty());
        let options = ExtractorOptions {
            extract_only_form_gets: false,
            ..ExtractorOptions::default()
        };
        let (_, doc) = run(options, "http://h/", html);
        assert_eq!(links(&doc), vec!["http://h/go L form/@action"]);
    }

    #[test]
    fn get_and_methodless_forms_are_extracted() {
        assert_eq!(
            extract("http://h/", r#"<form action="/search" method="get"></form>"#),
            vec!["http://h/search L form/@action"]
        );
        assert_eq!(
            extract("http://h/", r#"<form action="/search"></form>"#),
            vec!["http://h/search L form/@action"]
        );
    }

    #[test]
    fn form_actions_can_be_ignored_entirely() {
        let options = ExtractorOptions {
            ignore_form_action_urls: true,
            ..ExtractorOptions::default()
        };
        let (_, doc) = run(options, "http://h/", r#"<form action="/go"></form>"#);
        assert!(doc.outlinks().is_empty());
    }

    #[test]
    fn form_offsets_are_recorded() {
        let (_, doc) = run(
            ExtractorOptions::default(),
            "http://h/",
            r#"<p>x</p><form action="/go"></form>"#,
        );
        assert_eq!(
            doc.data().get(FORM_OFFSETS),
            Some(&DataValue::Offsets(vec![8]))
        );
    }

    #[test]
    fn entities_unescape_before_resolution() {
        assert_eq!(
            extract("http://h/", r#"<a href="/x?a=1&amp;b=2">x</a>"#),
            vec!["http://h/x?a=1&b=2 L a/@href"]
        );
    }

    #[test]
    fn data_uris_are_skipped() {
        assert!(extract("http://h/", r#"<img src="data:image/png;base64,AAAA">"#).is_empty());
    }

    #[test]
    fn frames_obey_the_embed_config() {
        let html = r#"<iframe src="/f.html"></iframe>"#;
        assert_eq!(
            extract("http://h/", html),
            vec!["http://h/f.html E iframe/@src"]
        );
        let options = ExtractorOptions {
            treat_frames_as_embed_links: false,
            ..ExtractorOptions::default()
        };
        let (_, doc) = run(options, "http://h/", html);
        assert_eq!(links(&doc), vec!["http://h/f.html L iframe/@src"]);
    }

    #[test]
    fn codebase_is_emitted_and_used_as_resource_base() {
        assert_eq!(
            extract("http://h/", r#"<object codebase="/java/" data="app.dat"></object>"#),
            vec![
                "http://h/java/ L object/@codebase",
                "http://h/java/app.dat E object",
            ]
        );
    }

    #[test]
    fn applet_archives_resolve_against_codebase() {
        assert_eq!(
            extract(
                "http://h/",
                r#"<applet codebase="/java/" archive="a.jar b.jar" code="App"></applet>"#
            ),
            vec![
                "http://h/java/ L applet/@codebase",
                "http://h/java/a.jar E applet",
                "http://h/java/b.jar E applet",
                "http://h/java/App.class E applet",
            ]
        );
    }

    #[test]
    fn applet_code_keeps_existing_class_suffix() {
        assert_eq!(
            extract("http://h/", r#"<applet code="App.class"></applet>"#),
            vec!["http://h/App.class E applet"]
        );
    }

    #[test]
    fn param_flashvars_values_are_speculative() {
        assert_eq!(
            extract(
                "http://h/",
                r#"<param name="flashvars" value="file=http%3A%2F%2Fh%2Fv.flv&autostart=true">"#
            ),
            vec!["http://h/v.flv X param/@value"]
        );
    }

    #[test]
    fn flashvars_attribute_is_speculative() {
        assert_eq!(
            extract("http://h/", r#"<embed flashvars="file=/media/clip.flv">"#),
            vec!["http://h/media/clip.flv X embed/@flashvars"]
        );
    }

    #[test]
    fn meta_refresh_target_is_a_refer_link() {
        assert_eq!(
            extract("http://h/", r#"<meta http-equiv="refresh" content="5; url='/next'">"#),
            vec!["http://h/next R meta"]
        );
    }

    #[test]
    fn meta_content_uris_are_speculative() {
        assert_eq!(
            extract("http://h/", r#"<meta property="og:image" content="http://h/img.png">"#),
            vec!["http://h/img.png X meta"]
        );
        assert!(extract("http://h/", r#"<meta property="og:title" content="Hello">"#).is_empty());
    }

    #[test]
    fn rel_nofollow_is_obeyed_when_configured() {
        let html = r#"<a href="/x" rel="nofollow">x</a>"#;
        assert_eq!(extract("http://h/", html), vec!["http://h/x L a/@href"]);
        let options = ExtractorOptions {
            obey_rel_nofollow: true,
            ..ExtractorOptions::default()
        };
        let (_, doc) = run(options, "http://h/", html);
        assert!(doc.outlinks().is_empty());
    }

    #[test]
    fn javascript_hrefs_go_to_the_script_extractor() {
        assert_eq!(
            extract("http://h/", r#"<a href="javascript:openWin('/popup.html')">x</a>"#),
            vec!["http://h/popup.html X script-misc"]
        );
    }

    #[test]
    fn inline_handlers_go_to_the_script_extractor() {
        assert_eq!(
            extract("http://h/", r#"<div onclick="location.href='/go/page.html'">x</div>"#),
            vec!["http://h/go/page.html X script-misc"]
        );
    }

    #[test]
    fn script_extraction_can_be_disabled() {
        let options = ExtractorOptions {
            extract_javascript: false,
            ..ExtractorOptions::default()
        };
        let (_, doc) = run(
            options,
            "http://h/",
            r#"<script>var a = "/page.html";</script>"#,
        );
        assert!(doc.outlinks().is_empty());
    }

    #[test]
    fn script_blocks_yield_src_and_body_links() {
        assert_eq!(
            extract(
                "http://h/",
                r#"<script src="/app.js">var next = "/page2.html";</script>"#
            ),
            vec![
                "http://h/app.js E script/@src",
                "http://h/page2.html X script-misc",
            ]
        );
    }

    #[test]
    fn style_blocks_and_attributes_feed_the_css_extractor() {
        assert_eq!(
            extract("http://h/", r#"<div style="background:url('/bg.png')">x</div>"#),
            vec!["http://h/bg.png E style-misc"]
        );
        assert_eq!(
            extract("http://h/", "<style type=\"text/css\">body{background:url(bg2.png)}</style>"),
            vec!["http://h/bg2.png E style-misc"]
        );
    }

    #[test]
    fn value_attributes_are_considered_for_uris() {
        let html = r#"<input type="submit" value="/find/index.html">"#;
        assert_eq!(
            extract("http://h/", html),
            vec!["http://h/find/index.html L input/@value"]
        );
        let options = ExtractorOptions {
            extract_value_attributes: false,
            ..ExtractorOptions::default()
        };
        let (_, doc) = run(options, "http://h/", html);
        assert!(doc.outlinks().is_empty());
    }

    #[test]
    fn data_remote_anchors_are_embeds() {
        assert_eq!(
            extract("http://h/", r#"<a data-remote="true" href="/frag">x</a>"#),
            vec!["http://h/frag E a[data-remote='true']/@href"]
        );
    }

    #[test]
    fn data_lazy_variants_are_embeds() {
        assert_eq!(
            extract("http://h/", r#"<img data-lazy="/lazy.png">"#),
            vec!["http://h/lazy.png E img/@data-lazy"]
        );
        assert_eq!(
            extract("http://h/", r#"<img data-src="/one.png">"#),
            vec!["http://h/one.png E img/@data-src"]
        );
    }

    #[test]
    fn comments_hide_tags_but_conditional_comments_do_not() {
        assert!(extract("http://h/", r#"<!-- <a href="/hidden">x</a> -->"#).is_empty());
        assert_eq!(
            extract(
                "http://h/",
                r#"<!--[if lt IE 9]><link rel="stylesheet" href="/ie.css"><![endif]-->"#
            ),
            vec!["http://h/ie.css E link[rel='stylesheet']/@href"]
        );
    }

    #[test]
    fn unterminated_script_processes_open_tag_only() {
        assert_eq!(
            extract("http://h/", r#"<script src="/app.js">var x = "/not-seen.html";"#),
            vec!["http://h/app.js E script/@src"]
        );
    }

    #[test]
    fn outlink_cap_is_enforced() {
        let options = ExtractorOptions {
            max_outlinks: 2,
            ..ExtractorOptions::default()
        };
        let html = r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a><a href="/4">4</a>"#;
        let (_, doc) = run(options, "http://h/", html);
        assert_eq!(
            links(&doc),
            vec!["http://h/1 L a/@href", "http://h/2 L a/@href"]
        );
    }

    #[test]
    fn bad_uris_are_non_fatal() {
        let (completed, doc) = run(
            ExtractorOptions::default(),
            "http://h/",
            r#"<a href="http://[bad">x</a><a href="/ok">y</a>"#,
        );
        assert!(completed);
        assert_eq!(links(&doc), vec!["http://h/ok L a/@href"]);
        assert_eq!(doc.non_fatal_failures().len(), 1);
    }

    #[test]
    fn extraction_is_deterministic() {
        let html = r#"
            <base href="http://b/"><a href="/x">x</a>
            <img srcset="a.png 1x, b.png 2x">
            <form action="/go"></form>
            <script>fetch("/api/list.json")</script>
        "#;
        let first = extract("http://h/", html);
        let second = extract("http://h/", html);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn unexpected_html_is_gated_by_path_extension() {
        let html = r#"<html><a href="/x">x</a></html>"#;
        let (completed, doc) = run(ExtractorOptions::default(), "http://h/pic.gif", html);
        assert!(!completed);
        assert!(doc.outlinks().is_empty());

        let options = ExtractorOptions {
            ignore_unexpected_html: false,
            ..ExtractorOptions::default()
        };
        let (completed, doc) = run(options, "http://h/pic.gif", html);
        assert!(completed);
        assert_eq!(links(&doc), vec!["http://h/x L a/@href"]);
    }

    #[test]
    fn non_html_mime_is_sniffed_for_html() {
        let mut doc = Document::from_bytes(
            "http://h/",
            "application/octet-stream",
            br#"<html><a href='/x'>x</a></html>"#.to_vec(),
        )
        .unwrap();
        let extractor = HtmlExtractor::new(ExtractorOptions::default());
        assert!(extractor.extract(&mut doc));
        assert_eq!(links(&doc), vec!["http://h/x L a/@href"]);

        let mut doc =
            Document::from_bytes("http://h/", "application/octet-stream", b"binary junk".to_vec())
                .unwrap();
        assert!(!extractor.extract(&mut doc));
    }

    #[test]
    fn cancellation_keeps_partial_results() {
        let mut doc = Document::from_bytes(
            "http://h/",
            "text/html",
            br#"<a href="/1">1</a>"#.to_vec(),
        )
        .unwrap();
        let extractor = HtmlExtractor::new(ExtractorOptions::default());
        let cancelled = AtomicBool::new(true);
        assert!(!extractor.extract_cancellable(&mut doc, &cancelled));
        assert!(doc.outlinks().is_empty());
    }

    #[test]
    fn mixed_case_markup_is_normalized_in_contexts() {
        assert_eq!(
            extract("http://h/", r#"<IMG SRC="A.png">"#),
            vec!["http://h/A.png E img/@src"]
        );
    }

    #[test]
    fn srcset_context_detection() {
        assert!(is_srcset_context(&LinkContext::elem_attr("img", "srcset")));
        assert!(is_srcset_context(&LinkContext::elem_attr("source", "data-srcset")));
        assert!(!is_srcset_context(&LinkContext::elem_attr("img", "src")));
        assert!(!is_srcset_context(&LinkContext::elem_attr("div", "srcset")));
        assert!(!is_srcset_context(&LinkContext::META));
    }

    #[test]
    fn html_expected_gate_cases() {
        let doc = |url: &str| Document::from_bytes(url, "text/html", Vec::new()).unwrap();
        assert!(is_html_expected(&doc("http://h/page")));
        assert!(is_html_expected(&doc("http://h/page.html")));
        assert!(is_html_expected(&doc("http://h/archive.verylongext")));
        assert!(!is_html_expected(&doc("http://h/pic.jpeg")));
        assert!(!is_html_expected(&doc("http://h/movie.mpg")));
    }
}
