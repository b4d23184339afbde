// src/error.rs
use thiserror::Error;

/// Rejection reasons when building a record from its fields or raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload exceeds maximum length")]
    PayloadTooLong,
    #[error("language code cannot be omitted")]
    LanguageCodeMissing,
    #[error("language code exceeds maximum length")]
    LanguageCodeExceedsMaxLength,
    #[error("payload is not long enough to contain specified language code length")]
    PayloadTooShort,
    #[error("id exceeds maximum length")]
    IdTooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParsingErrorKind {
    #[error("raw byte array too short")]
    RawByteArrayTooShort,
    #[error("multiple message begin flags")]
    MultipleMessageBeginFlags,
    #[error("message begin flag missing")]
    MessageBeginFlagMissing,
    #[error("multiple message end flags")]
    MultipleMessageEndFlags,
    #[error("chunked records not supported")]
    ChunkedRecordsNotSupported,
    #[error("type length missing")]
    TypeLengthMissing,
    #[error("payload length missing")]
    PayloadLengthMissing,
    #[error("id length missing")]
    IdLengthMissing,
    #[error("type field missing")]
    TypeFieldMissing,
    #[error("id field missing")]
    IdFieldMissing,
    #[error("payload field missing")]
    PayloadFieldMissing,
}

/// A structural violation found while parsing a raw NDEF message.
///
/// `index` is the start offset of the offending record; `raw_bytes` is the whole input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("NDEF parsing error at index {index} of {}: {kind}", hex::encode(.raw_bytes))]
pub struct ParsingError {
    pub index: usize,
    pub raw_bytes: Vec<u8>,
    pub kind: ParsingErrorKind,
}

impl ParsingError {
    pub(crate) fn new(index: usize, raw_bytes: &[u8], kind: ParsingErrorKind) -> Self {
        Self {
            index,
            raw_bytes: raw_bytes.to_vec(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    #[error("no NDEF TLV found")]
    NdefTlvMissing,
    #[error("TLV at offset {offset} is truncated")]
    Truncated { offset: usize },
    #[error("NDEF message of {length} bytes does not fit in a TLV")]
    MessageTooLong { length: usize },
}

#[derive(Debug, Error)]
pub enum NdefError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error(transparent)]
    Tlv(#[from] TlvError),
}
