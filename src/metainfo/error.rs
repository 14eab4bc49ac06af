use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when projecting a torrent document.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The document is not valid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// A required field is absent or has the wrong type.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present with the right type but an unusable value.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// An info hash was not 20 bytes (or 40 hex digits).
    #[error("invalid info hash length")]
    InvalidInfoHashLength,
}
