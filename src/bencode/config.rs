use crate::constants::DEFAULT_MAX_DEPTH;

/// Decoder behaviour knobs.
///
/// The default is lenient: it accepts anything the grammar can be parsed
/// from, leaves bytes after the top-level value unread, and keeps the last
/// occurrence of a duplicated dictionary key. [`DecoderConfig::strict`]
/// accepts only canonical bencode.
///
/// ```
/// use bitmeta::bencode::{decode_with, BencodeError, DecoderConfig};
///
/// let strict = DecoderConfig::strict();
/// assert!(matches!(decode_with(b"i03e", &strict), Err(BencodeError::NonCanonical(_))));
/// assert!(decode_with(b"i03e", &DecoderConfig::default()).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum list/dictionary nesting depth.
    pub max_depth: usize,
    /// Fail with `TrailingData` if bytes remain after the top-level value.
    pub reject_trailing: bool,
    /// Reject non-canonical integers, length prefixes and key order.
    pub strict: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing: false,
            strict: false,
        }
    }
}

impl DecoderConfig {
    /// Canonical-only decoding with trailing data rejected.
    pub fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing: true,
            strict: true,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_reject_trailing(mut self, reject_trailing: bool) -> Self {
        self.reject_trailing = reject_trailing;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
