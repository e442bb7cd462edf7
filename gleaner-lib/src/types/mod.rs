//! Core types shared by the extractors and the surrounding crawler.

mod context;
mod document;
mod error;
mod hop;
mod link;
mod recorder;
mod robots;

pub use context::LinkContext;
pub use document::{DataMap, DataValue, Document, FORM_OFFSETS, HTML_BASE, META_ROBOTS};
pub use error::{ErrorKind, Result};
pub use hop::Hop;
pub use link::Outlink;
pub use recorder::{Recorder, ReplayContent};
pub use robots::RobotsPolicy;
