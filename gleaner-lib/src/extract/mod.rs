//! Link extraction from fetched content.
//!
//! [`html`] holds the primary extractor; [`implied`] the secondary pass
//! over already-discovered URIs. [`script`] and [`css`] are the
//! replaceable capabilities the HTML extractor hands inline code to.

pub mod css;
pub mod html;
pub mod implied;
pub mod script;

pub use css::{CssExtractor, RegexCssExtractor};
pub use html::{ExtractorOptions, HtmlExtractor};
pub use implied::ImpliedUriExtractor;
pub use script::{ScriptExtractor, SpeculativeScriptExtractor};
