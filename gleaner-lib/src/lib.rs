//! `gleaner-lib` is the library component of `gleaner`: the link-extraction
//! core of a large-scale web crawler.
//!
//! Given a fetched HTML document and its crawl context, it discovers
//! outbound references (navigational links, embedded resources, form
//! actions, meta-refresh targets, style-sheet URLs, and speculative
//! URI-like strings), classifies each by hop type and context, resolves
//! them against the document base, and records them on the document for
//! the crawler to schedule.
//!
//! ```
//! use gleaner_lib::{Document, ExtractorOptions, HtmlExtractor};
//!
//! let extractor = HtmlExtractor::new(ExtractorOptions::default());
//! let mut doc = Document::from_bytes(
//!     "http://example.com/",
//!     "text/html",
//!     br#"<a href="/about">about us</a>"#.to_vec(),
//! )
//! .unwrap();
//!
//! assert!(extractor.extract(&mut doc));
//! assert_eq!(doc.outlinks().len(), 1);
//! assert_eq!(doc.outlinks()[0].target.as_str(), "http://example.com/about");
//! ```
//!
//! Network fetching, the frontier, and persistence are the crawler's
//! concern; this crate only mutates the per-fetch [`Document`] it is
//! handed.
#![warn(clippy::all, clippy::pedantic)]
#![warn(
    absolute_paths_not_starting_with_crate,
    rustdoc::invalid_html_tags,
    missing_copy_implementations,
    missing_debug_implementations,
    semicolon_in_expressions_from_macros,
    unreachable_pub,
    unused_extern_crates,
    variant_size_differences,
    clippy::missing_const_for_fn
)]
#![deny(anonymous_parameters, macro_use_extern_crate)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod charset;
pub mod extract;
pub mod types;
pub mod utils;

pub use extract::{
    CssExtractor, ExtractorOptions, HtmlExtractor, ImpliedUriExtractor, RegexCssExtractor,
    ScriptExtractor, SpeculativeScriptExtractor,
};
pub use types::{
    DataMap, DataValue, Document, ErrorKind, FORM_OFFSETS, HTML_BASE, Hop, LinkContext,
    META_ROBOTS, Outlink, Recorder, ReplayContent, Result, RobotsPolicy,
};
