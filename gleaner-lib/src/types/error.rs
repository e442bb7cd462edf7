use thiserror::Error;

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, ErrorKind>;

/// Recoverable failures recorded on a document during extraction.
///
/// Extraction itself never propagates these: they land in the document's
/// non-fatal failure list and the offending link (or, for read errors, the
/// rest of the document) is dropped.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A discovered reference (or a declared base) could not be parsed or
    /// resolved as a URI.
    #[error("cannot parse `{1}` as a URI: {0}")]
    BadUri(#[source] url::ParseError, String),

    /// I/O failure while reading the content replay buffer.
    #[error("cannot read content replay buffer")]
    ReadError(#[from] std::io::Error),

    /// The content replay produced replacement characters while decoding.
    #[error("content decoding produced {0} replacement character(s)")]
    DecodeError(usize),
}
