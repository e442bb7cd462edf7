use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::types::Result;

/// Replay buffer for a fetched response body.
///
/// Owns the raw bytes of the response together with the charset currently
/// used to decode them. Large bodies may have been spilled to disk by the
/// fetcher; replays then read the spill file on demand instead of pinning
/// the body in memory.
///
/// The decoded text handed out by [`replay`](Recorder::replay) is transient:
/// link records must copy anything they keep.
#[derive(Clone, Debug)]
pub struct Recorder {
    body: Body,
    charset: &'static Encoding,
}

#[derive(Clone, Debug)]
enum Body {
    Memory(Vec<u8>),
    Spilled(PathBuf),
}

/// A fully decoded content replay.
#[derive(Debug)]
pub struct ReplayContent {
    /// The decoded document text.
    pub text: String,
    /// Number of replacement characters the decoder had to substitute.
    pub decode_error_count: usize,
}

impl Recorder {
    /// Wrap an in-memory response body. The initial charset is ISO-8859-1
    /// (decoded as windows-1252), the traditional assumption for responses
    /// that declare nothing.
    #[must_use]
    pub fn from_bytes(body: Vec<u8>) -> Self {
        Recorder {
            body: Body::Memory(body),
            charset: WINDOWS_1252,
        }
    }

    /// Wrap a response body the fetcher spilled to disk.
    #[must_use]
    pub fn from_spill_file(path: PathBuf) -> Self {
        Recorder {
            body: Body::Spilled(path),
            charset: WINDOWS_1252,
        }
    }

    /// Set the initial decoding charset, e.g. from a `Content-Type` header.
    #[must_use]
    pub fn with_charset(mut self, charset: &'static Encoding) -> Self {
        self.charset = charset;
        self
    }

    /// The charset currently used for decoding.
    #[must_use]
    pub const fn charset(&self) -> &'static Encoding {
        self.charset
    }

    /// Switch the decoding charset, e.g. after a successful content sniff.
    pub fn set_charset(&mut self, charset: &'static Encoding) {
        self.charset = charset;
    }

    fn bytes(&self) -> Result<Cow<'_, [u8]>> {
        match &self.body {
            Body::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
            Body::Spilled(path) => Ok(Cow::Owned(fs::read(path)?)),
        }
    }

    /// The first `n` characters of the content, decoded with the current
    /// charset. Read failures yield an empty prefix; they surface later as
    /// a replay error.
    #[must_use]
    pub fn content_prefix(&self, n: usize) -> String {
        self.content_prefix_with(n, self.charset)
    }

    /// The first `n` characters of the content, decoded with the given
    /// charset instead of the current one.
    #[must_use]
    pub fn content_prefix_with(&self, n: usize, charset: &'static Encoding) -> String {
        let bytes = match self.bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("failed to read content prefix: {e}");
                return String::new();
            }
        };
        // No encoding uses more than four bytes per character, so this
        // window is always enough to produce `n` characters.
        let window = &bytes[..bytes.len().min(n.saturating_mul(4))];
        let (text, _, _) = charset.decode(window);
        match text.char_indices().nth(n) {
            Some((end, _)) => text[..end].to_string(),
            None => text.into_owned(),
        }
    }

    /// Decode the whole content with the current charset.
    ///
    /// # Errors
    ///
    /// Returns a read error when a spilled body cannot be re-read.
    pub fn replay(&self) -> Result<ReplayContent> {
        let bytes = self.bytes()?;
        let (text, _, had_errors) = self.charset.decode(&bytes);
        let decode_error_count = if had_errors {
            text.matches(char::REPLACEMENT_CHARACTER).count()
        } else {
            0
        };
        Ok(ReplayContent {
            text: text.into_owned(),
            decode_error_count,
        })
    }
}
