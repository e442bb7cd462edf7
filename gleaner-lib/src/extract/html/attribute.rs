//! Open-tag attribute scanning and classification.
//!
//! Scans the body of an open tag for `name=value` pairs, dequoting values
//! (`"…"`, `'…'`, or a bare run up to whitespace) and unescaping HTML
//! entities. Names and values are capped; over-long runs are truncated,
//! not rejected. Tokens without a `=value` part (boolean attributes, the
//! element name itself) are skipped.

use html_escape::decode_html_entities;

/// The buckets an attribute name can fall into. A name belongs to the
/// first bucket it matches, in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AttrClass {
    /// `href`, `cite`: single URI relative to the base, occasionally
    /// `javascript:`.
    HrefCite,
    /// `action`: form submission target.
    Action,
    /// `on*`: inline script handler.
    ScriptHandler,
    /// `src` and friends: embedded resource URI(s).
    SrcLike,
    /// `codebase`: changes the resolution base for classid/data/archive/
    /// code in the same tag.
    Codebase,
    /// `classid`, `data`: resource relative to the codebase.
    Resource,
    /// `archive`: whitespace-separated resources relative to the codebase.
    Archive,
    /// `code`: resource relative to the codebase; applets get an implicit
    /// `.class` suffix.
    Code,
    /// `value`: possibly URI-like, interpreted at end of tag.
    Value,
    /// `style`: inline CSS.
    Style,
    /// `method`: form method.
    Method,
    /// Anything else; the name is kept for specialized matching.
    Other,
}

pub(crate) fn classify(name: &str) -> AttrClass {
    match name {
        "href" | "cite" => AttrClass::HrefCite,
        "action" => AttrClass::Action,
        n if n.starts_with("on") => AttrClass::ScriptHandler,
        "src" | "srcset" | "lowsrc" | "background" | "longdesc" | "usemap" | "profile"
        | "datasrc" | "data-src" | "data-srcset" | "data-original" | "data-original-set" => {
            AttrClass::SrcLike
        }
        "codebase" => AttrClass::Codebase,
        "classid" | "data" => AttrClass::Resource,
        "archive" => AttrClass::Archive,
        "code" => AttrClass::Code,
        "value" => AttrClass::Value,
        "style" => AttrClass::Style,
        "method" => AttrClass::Method,
        _ => AttrClass::Other,
    }
}

/// One `name=value` attribute from an open-tag body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Attribute {
    pub(crate) class: AttrClass,
    /// Lowercased attribute name, truncated to the configured cap.
    pub(crate) name: String,
    /// Dequoted, entity-unescaped value, truncated to the configured cap.
    pub(crate) value: String,
}

/// Length caps applied while lexing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttrLimits {
    pub(crate) max_name: usize,
    pub(crate) max_value: usize,
}

pub(crate) struct AttrScanner<'a> {
    input: &'a str,
    pos: usize,
    limits: AttrLimits,
}

impl<'a> AttrScanner<'a> {
    pub(crate) const fn new(input: &'a str, limits: AttrLimits) -> Self {
        AttrScanner {
            input,
            pos: 0,
            limits,
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

impl Iterator for AttrScanner<'_> {
    type Item = Attribute;

    fn next(&mut self) -> Option<Attribute> {
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        loop {
            while self.pos < len && !is_name_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= len {
                return None;
            }

            let name_start = self.pos;
            while self.pos < len && is_name_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            let raw_name = &self.input[name_start..self.pos];

            let mut cursor = self.pos;
            while cursor < len && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }
            if cursor >= len || bytes[cursor] != b'=' {
                // token without a value; resume at the next candidate
                self.pos = cursor.max(self.pos);
                continue;
            }
            cursor += 1;
            while cursor < len && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }

            let (raw_value, after) = if cursor < len && (bytes[cursor] == b'"' || bytes[cursor] == b'\'') {
                let quote = bytes[cursor];
                let value_start = cursor + 1;
                match bytes[value_start..].iter().position(|&b| b == quote) {
                    Some(i) => (&self.input[value_start..value_start + i], value_start + i + 1),
                    // unterminated quote: the value runs to the end of the tag body
                    None => (&self.input[value_start..], len),
                }
            } else {
                let value_start = cursor;
                let mut value_end = cursor;
                while value_end < len && !bytes[value_end].is_ascii_whitespace() {
                    value_end += 1;
                }
                (&self.input[value_start..value_end], value_end)
            };
            self.pos = after;

            let name = truncate_chars(raw_name, self.limits.max_name).to_ascii_lowercase();
            let value =
                decode_html_entities(truncate_chars(raw_value, self.limits.max_value)).into_owned();
            return Some(Attribute {
                class: classify(&name),
                name,
                value,
            });
        }
    }
}
