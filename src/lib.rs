// src/lib.rs
//! Codec for NFC Data Exchange Format (NDEF) messages.
//!
//! [`Message::parse`] turns raw bytes into typed [`Record`]s (Text, Uri or Generic) and
//! [`Message::to_bytes`] writes them back in the exact wire format.
pub mod error;
pub mod generic;
pub mod message;
pub mod ndef;
pub mod record;
pub mod text;
pub mod tlv;
pub mod types;
pub mod uri;

pub use error::{NdefError, ParsingError, ParsingErrorKind, TlvError, ValidationError};
pub use generic::GenericRecord;
pub use message::Message;
pub use record::{NdefRecord, Record};
pub use text::TextRecord;
pub use types::{MessageView, RecordView, TextEncoding, TypeNameFormat};
pub use uri::UriRecord;
