//! Format constants and decoder limits.

// ============================================================================
// Bencode
// ============================================================================

/// Default nesting limit for lists and dictionaries.
///
/// Real metainfo documents rarely nest beyond five levels; the limit keeps
/// adversarial input such as `llllllll...` from exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Longest byte-string length prefix the decoder buffers, in ASCII digits,
/// once redundant leading zeros are dropped.
///
/// `u64::MAX` has twenty digits, so a longer prefix cannot name a real
/// length. The rest of it is skipped unbuffered up to the `:`.
pub const MAX_LENGTH_DIGITS: usize = 20;

/// Longest integer text between `i` and `e` the decoder buffers, once
/// redundant leading zeros are dropped.
///
/// `i64::MIN` needs twenty characters. Anything longer is skipped
/// unbuffered up to the `e` and then rejected.
pub const MAX_INTEGER_DIGITS: usize = 64;

// ============================================================================
// Metainfo
// ============================================================================

/// Size of one SHA-1 piece hash record in the `pieces` string.
pub const PIECE_HASH_LEN: usize = 20;

/// Size of a decoded `md5sum` digest.
pub const MD5_LEN: usize = 16;

/// Size of a v1 info hash.
pub const INFO_HASH_LEN: usize = 20;
