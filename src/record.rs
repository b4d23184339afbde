// src/record.rs
use crate::error::ValidationError;
use crate::generic::GenericRecord;
use crate::text::TextRecord;
use crate::types::TypeNameFormat;
use crate::uri::UriRecord;

// Header byte: [MB][ME][CF][SR][IL][TNF(3 bits)]
pub const MESSAGE_BEGIN_MASK: u8 = 0b1000_0000;
pub const MESSAGE_END_MASK: u8 = 0b0100_0000;
pub const CHUNKED_MASK: u8 = 0b0010_0000;
pub const SHORT_RECORD_MASK: u8 = 0b0001_0000;
pub const ID_LENGTH_PRESENT_MASK: u8 = 0b0000_1000;

pub const MAX_SHORT_PAYLOAD_LENGTH: usize = 255;
pub const MAX_ID_LENGTH: usize = 255;

fn length_fits_u32(len: usize) -> bool {
    u32::try_from(len).is_ok()
}

/// Payload length must fit the 4-byte length field of a long record.
pub(crate) fn check_payload(payload: &[u8]) -> Result<(), ValidationError> {
    if length_fits_u32(payload.len()) {
        Ok(())
    } else {
        Err(ValidationError::PayloadTooLong)
    }
}

/// The id length field is a single byte.
pub(crate) fn check_id(id: Option<&[u8]>) -> Result<(), ValidationError> {
    match id {
        Some(id) if id.len() > MAX_ID_LENGTH => Err(ValidationError::IdTooLong),
        _ => Ok(()),
    }
}

/// Fields shared by every record kind, plus the wire framing built on top of them.
pub trait NdefRecord {
    fn tnf(&self) -> TypeNameFormat;
    fn record_type(&self) -> &[u8];
    fn id(&self) -> Option<&[u8]>;
    fn payload(&self) -> &[u8];

    /// Frames this record for the wire. Short-record form is picked when the payload is at
    /// most 255 bytes. The type length is written as a single byte without a range check;
    /// id and payload lengths are checked when the record is built.
    fn to_bytes(&self, message_begin: bool, message_end: bool, chunked: bool) -> Vec<u8> {
        let record_type = self.record_type();
        let id = self.id();
        let payload = self.payload();

        let short_record = payload.len() <= MAX_SHORT_PAYLOAD_LENGTH;

        // 1. Flags and TNF
        let mut header = self.tnf().as_u8();
        if message_begin {
            header |= MESSAGE_BEGIN_MASK;
        }
        if message_end {
            header |= MESSAGE_END_MASK;
        }
        if chunked {
            header |= CHUNKED_MASK;
        }
        if short_record {
            header |= SHORT_RECORD_MASK;
        }
        if id.is_some() {
            header |= ID_LENGTH_PRESENT_MASK;
        }

        let length_field = if short_record { 1 } else { 4 };
        let id_len = id.map_or(0, <[u8]>::len);
        let mut record = Vec::with_capacity(
            2 + length_field
                + usize::from(id.is_some())
                + record_type.len()
                + id_len
                + payload.len(),
        );

        // 2. Type length and payload length
        record.push(header);
        record.push(record_type.len() as u8);
        if short_record {
            record.push(payload.len() as u8);
        } else {
            record.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        }

        // 3. Id length (only when IL is set)
        if let Some(id) = id {
            record.push(id.len() as u8);
        }

        // 4. Type, id, payload
        record.extend_from_slice(record_type);
        if let Some(id) = id {
            record.extend_from_slice(id);
        }
        record.extend_from_slice(payload);

        record
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Text(TextRecord),
    Uri(UriRecord),
    Generic(GenericRecord),
}

impl Record {
    pub fn as_text(&self) -> Option<&TextRecord> {
        match self {
            Record::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&UriRecord> {
        match self {
            Record::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericRecord> {
        match self {
            Record::Generic(generic) => Some(generic),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextRecord> {
        match self {
            Record::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_uri_mut(&mut self) -> Option<&mut UriRecord> {
        match self {
            Record::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn NdefRecord {
        match self {
            Record::Text(text) => text,
            Record::Uri(uri) => uri,
            Record::Generic(generic) => generic,
        }
    }
}

impl NdefRecord for Record {
    fn tnf(&self) -> TypeNameFormat {
        self.inner().tnf()
    }

    fn record_type(&self) -> &[u8] {
        self.inner().record_type()
    }

    fn id(&self) -> Option<&[u8]> {
        self.inner().id()
    }

    fn payload(&self) -> &[u8] {
        self.inner().payload()
    }
}

impl From<TextRecord> for Record {
    fn from(record: TextRecord) -> Self {
        Record::Text(record)
    }
}

impl From<UriRecord> for Record {
    fn from(record: UriRecord) -> Self {
        Record::Uri(record)
    }
}

impl From<GenericRecord> for Record {
    fn from(record: GenericRecord) -> Self {
        Record::Generic(record)
    }
}
