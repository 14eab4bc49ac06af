use thiserror::Error;

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("invalid leading byte")]
    InvalidLeadingByte,

    #[error("invalid length format")]
    InvalidLengthFormat,

    #[error("failed to read length")]
    ReadLengthFailed,

    #[error("failed to read value")]
    ReadValueFailed,

    #[error("invalid ending byte")]
    InvalidEndingByte,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("trailing data after value")]
    TrailingData,

    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("read error: {0}")]
    Io(#[source] std::io::Error),

    #[error("write failed: {0}")]
    WriteFailed(#[from] std::io::Error),
}
