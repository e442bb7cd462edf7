//! Small helpers shared across the extractors.

pub mod uri;
pub mod url;
