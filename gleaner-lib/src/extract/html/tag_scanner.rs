//! Relevant-tag scanning.
//!
//! A single pattern, alternating on `<`, recognizes in priority order:
//! whole `<script>…</script>` blocks, whole `<style>…</style>` blocks,
//! `<meta …>` tags, any other open tag with trailing attribute text, and
//! comments. Bracketless void tags without attributes (`<br>`, `<hr>`) are
//! deliberately not emitted. The pattern is compiled once per extractor
//! (the element-name cap is interpolated) and the regex engine is
//! linear-time, so pathological markup cannot trigger runaway backtracking.
//!
//! Two quirks are handled in the driver rather than the pattern:
//!
//! - Conditional comments (`<!--[if …]>`, `<!-->`) are *not* skipped as
//!   comments; scanning re-enters just past the `<!--` so the tags inside
//!   them are still seen.
//! - An unterminated `<script>`/`<style>` block falls through to the
//!   generic-tag alternative: its open-tag attributes are processed, the
//!   unbounded body is skipped.

use std::sync::atomic::{AtomicBool, Ordering};

use regex::Regex;

/// One relevant tag found in the document.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TagToken<'a> {
    /// A whole script block. `open_tag` is the element name plus attribute
    /// text, `body` the inline code between the tags.
    Script { open_tag: &'a str, body: &'a str },
    /// A whole style block, same shape as `Script`.
    Style { open_tag: &'a str, body: &'a str },
    /// A `<meta …>` tag; `attrs` is the tag body including the element name.
    Meta { attrs: &'a str },
    /// Any other open tag with attribute text. `offset` is the byte
    /// position of the `<` in the document.
    General {
        element: &'a str,
        attrs: &'a str,
        offset: usize,
    },
}

/// Build the relevant-tag pattern with the element-name cap interpolated.
pub(crate) fn tag_pattern(max_element_length: usize) -> Regex {
    Regex::new(&format!(
        "(?is)<(?:\
         (script[^>]*)>(.*?)</script\
         |(style[^>]*)>(.*?)</style\
         |(((meta)|[0-9A-Za-z_]{{1,{max_element_length}}})\\s+[^>]*)\
         |!--(.*?)--\
         )>"
    ))
    .expect("relevant-tag pattern is valid")
}

/// Lazy iterator over the relevant tags of a document. Checks the
/// cancellation flag between matches and stops cleanly when it trips.
pub(crate) struct TagScanner<'r, 'h> {
    pattern: &'r Regex,
    haystack: &'h str,
    pos: usize,
    cancelled: &'r AtomicBool,
}

impl<'r, 'h> TagScanner<'r, 'h> {
    pub(crate) const fn new(
        pattern: &'r Regex,
        haystack: &'h str,
        cancelled: &'r AtomicBool,
    ) -> Self {
        TagScanner {
            pattern,
            haystack,
            pos: 0,
            cancelled,
        }
    }
}

impl<'h> Iterator for TagScanner<'_, 'h> {
    type Item = TagToken<'h>;

    fn next(&mut self) -> Option<TagToken<'h>> {
        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                return None;
            }
            let caps = self.pattern.captures_at(self.haystack, self.pos)?;
            let whole = caps.get(0)?;
            self.pos = whole.end();

            if let Some(comment) = caps.get(8) {
                let body = comment.as_str();
                if body.starts_with("[if") || body.starts_with('>') {
                    // conditional comment: scan the markup inside it
                    self.pos = whole.start() + "<!--".len();
                }
                continue;
            }
            if caps.get(7).is_some() {
                if let Some(attrs) = caps.get(5) {
                    return Some(TagToken::Meta {
                        attrs: attrs.as_str(),
                    });
                }
            } else if let (Some(element), Some(attrs)) = (caps.get(6), caps.get(5)) {
                return Some(TagToken::General {
                    element: element.as_str(),
                    attrs: attrs.as_str(),
                    offset: whole.start(),
                });
            } else if let (Some(open_tag), Some(body)) = (caps.get(1), caps.get(2)) {
                return Some(TagToken::Script {
                    open_tag: open_tag.as_str(),
                    body: body.as_str(),
                });
            } else if let (Some(open_tag), Some(body)) = (caps.get(3), caps.get(4)) {
                return Some(TagToken::Style {
                    open_tag: open_tag.as_str(),
                    body: body.as_str(),
                });
            }
        }
    }
}
