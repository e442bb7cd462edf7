//! Character-set sniffing for HTML documents.
//!
//! A document fetched without a charset parameter in its `Content-Type`
//! header may still declare one inline. The first 1000 decoded characters
//! are searched for the three declaration forms, in order:
//!
//! 1. `<meta http-equiv="content-type" content="…; charset=V">`
//! 2. `<meta charset="V">`
//! 3. `<?xml … encoding="V"?>`
//!
//! A declaration only takes effect if it survives a reflexive check: after
//! re-decoding the prefix with the declared charset, the declaration must
//! still be found. The adopted, rejected, or unknown charset is recorded as
//! an annotation on the document either way.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;

use crate::types::Document;

/// How many decoded characters are searched for a declaration.
const SNIFF_PREFIX_CHARS: usize = 1000;

static META_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*http-equiv\s*=\s*['"]content-type['"][^>]*>"#)
        .expect("meta content-type pattern is valid")
});

static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"charset=([^'";\s>]+)"#).expect("charset parameter pattern is valid")
});

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*charset\s*=\s*['"]([^'";\s>]+)['"]"#)
        .expect("meta charset pattern is valid")
});

static XML_ENCODING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<\?xml\s+[^>]*encoding\s*=\s*['"]([^'"]+)['"]"#)
        .expect("xml encoding pattern is valid")
});

fn declared_charset_name(prefix: &str) -> Option<String> {
    if let Some(meta) = META_CONTENT_TYPE.find(prefix) {
        if let Some(caps) = CHARSET_PARAM.captures(meta.as_str()) {
            return Some(caps[1].to_string());
        }
    }
    if let Some(caps) = META_CHARSET.captures(prefix) {
        return Some(caps[1].to_string());
    }
    XML_ENCODING.captures(prefix).map(|caps| caps[1].to_string())
}

/// The charset declared inside the given content prefix, if any names a
/// known encoding. Unknown names are annotated
/// `unsatisfiableCharsetInHTML:NAME` and treated as no declaration.
pub fn content_declared_charset(doc: &mut Document, prefix: &str) -> Option<&'static Encoding> {
    let name = declared_charset_name(prefix)?;
    match Encoding::for_label(name.as_bytes()) {
        Some(encoding) => Some(encoding),
        None => {
            log::info!("unknown charset `{name}` declared; keeping current");
            doc.annotate(format!("unsatisfiableCharsetInHTML:{name}"));
            None
        }
    }
}

/// Reconcile the recorder's charset with any inline declaration.
///
/// Runs only when the response headers declared no charset. When the
/// declared charset differs from the current one and passes the reflexive
/// check, the recorder is switched over and the document annotated
/// `usingCharsetInHTML:X`; a declaration that disappears once applied is
/// annotated `inconsistentCharsetInHTML:X` and ignored.
pub fn reconcile(doc: &mut Document) {
    if doc.has_content_type_charset() {
        return;
    }
    let prefix = doc.recorder().content_prefix(SNIFF_PREFIX_CHARS);
    let Some(declared) = content_declared_charset(doc, &prefix) else {
        return;
    };
    if declared == doc.recorder().charset() {
        return;
    }
    let redecoded = doc
        .recorder()
        .content_prefix_with(SNIFF_PREFIX_CHARS, declared);
    if content_declared_charset(doc, &redecoded) == Some(declared) {
        doc.annotate(format!("usingCharsetInHTML:{}", declared.name()));
        doc.recorder_mut().set_charset(declared);
    } else {
        doc.annotate(format!("inconsistentCharsetInHTML:{}", declared.name()));
    }
}
