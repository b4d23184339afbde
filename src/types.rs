// src/types.rs
use serde::Serialize;

use crate::message::Message;
use crate::record::{NdefRecord, Record};

// Type Name Format: the 3 least significant bits of the record header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeNameFormat {
    Empty = 0x00,
    WellKnown = 0x01,
    MimeMedia = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
    Reserved = 0x07,
}

impl TypeNameFormat {
    pub const MASK: u8 = 0b0000_0111;

    /// Decodes the TNF from the low 3 bits of `bits`; every value is valid.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0x00 => Self::Empty,
            0x01 => Self::WellKnown,
            0x02 => Self::MimeMedia,
            0x03 => Self::AbsoluteUri,
            0x04 => Self::External,
            0x05 => Self::Unknown,
            0x06 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::WellKnown => "well-known",
            Self::MimeMedia => "mime-media",
            Self::AbsoluteUri => "absolute-uri",
            Self::External => "external",
            Self::Unknown => "unknown",
            Self::Unchanged => "unchanged",
            Self::Reserved => "reserved",
        }
    }
}

// Bit 7 of the Text record status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16,
}

// JSON views handed to the inspector output
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum RecordView {
    Text {
        tnf: &'static str,
        id: Option<String>,
        encoding: TextEncoding,
        language_code: String,
        text: String,
    },
    Uri {
        tnf: &'static str,
        id: Option<String>,
        identifier_code: Option<u8>,
        uri: String,
    },
    Generic {
        tnf: &'static str,
        record_type: String,
        id: Option<String>,
        payload: String,
    },
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageView {
    pub record_count: usize,
    pub byte_length: usize,
    pub records: Vec<RecordView>,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        let tnf = record.tnf().name();
        let id = record.id().map(hex::encode);
        match record {
            Record::Text(text) => RecordView::Text {
                tnf,
                id,
                encoding: text.text_encoding(),
                language_code: text.language_code(),
                text: text.text(),
            },
            Record::Uri(uri) => RecordView::Uri {
                tnf,
                id,
                identifier_code: uri.identifier_code(),
                uri: uri.uri(),
            },
            Record::Generic(generic) => RecordView::Generic {
                tnf,
                record_type: hex::encode(generic.record_type()),
                id,
                payload: hex::encode(generic.payload()),
            },
        }
    }
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        MessageView {
            record_count: message.len(),
            byte_length: message.to_bytes().len(),
            records: message.iter().map(RecordView::from).collect(),
        }
    }
}
