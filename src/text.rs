// src/text.rs
use std::str;

use crate::error::ValidationError;
use crate::record::{NdefRecord, Record, check_id, check_payload};
use crate::types::{TextEncoding, TypeNameFormat};

// Status byte: bit 7 = encoding, bits 0-5 = language code length
const TEXT_ENCODING_MASK: u8 = 0b1000_0000;
const LANGUAGE_CODE_LENGTH_MASK: u8 = 0b0011_1111;
pub const LANGUAGE_CODE_MAX_LENGTH: usize = 63;
const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Well-known "T" record. The payload is the only stored state; every field is read back
/// from it on access.
///
/// The encoding flag is metadata only: text is always written and read as UTF-8, even when
/// the flag says UTF-16.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    id: Option<Vec<u8>>,
    payload: Vec<u8>,
}

impl TextRecord {
    pub const RECORD_TYPE: &'static [u8] = b"T";

    pub fn new(
        text_encoding: TextEncoding,
        language_code: &str,
        text: &str,
        id: Option<Vec<u8>>,
    ) -> Result<Self, ValidationError> {
        validate_language_code(language_code)?;
        check_id(id.as_deref())?;
        Ok(Self {
            id,
            payload: encode_payload(text_encoding, language_code, text),
        })
    }

    pub fn from_payload(payload: Vec<u8>, id: Option<Vec<u8>>) -> Result<Self, ValidationError> {
        check_payload(&payload)?;
        check_id(id.as_deref())?;
        let language_code_len = match payload.first() {
            Some(status) => usize::from(status & LANGUAGE_CODE_LENGTH_MASK),
            None => return Err(ValidationError::LanguageCodeMissing),
        };
        if language_code_len == 0 {
            return Err(ValidationError::LanguageCodeMissing);
        }
        if payload.len() < language_code_len + 1 {
            return Err(ValidationError::PayloadTooShort);
        }
        Ok(Self { id, payload })
    }

    pub fn is_record_type(record: &Record) -> bool {
        matches!(record, Record::Text(_))
    }

    pub fn text_encoding(&self) -> TextEncoding {
        match self.payload.first() {
            Some(status) if status & TEXT_ENCODING_MASK != 0 => TextEncoding::Utf16,
            _ => TextEncoding::Utf8,
        }
    }

    /// Falls back to "en" when the payload is empty or the code is not valid UTF-8.
    pub fn language_code(&self) -> String {
        let Some(&status) = self.payload.first() else {
            return DEFAULT_LANGUAGE_CODE.to_string();
        };
        let end = 1 + usize::from(status & LANGUAGE_CODE_LENGTH_MASK);
        self.payload
            .get(1..end)
            .and_then(|code| str::from_utf8(code).ok())
            .map_or_else(|| DEFAULT_LANGUAGE_CODE.to_string(), str::to_string)
    }

    pub fn text(&self) -> String {
        let Some(&status) = self.payload.first() else {
            return String::new();
        };
        let start = 1 + usize::from(status & LANGUAGE_CODE_LENGTH_MASK);
        self.payload
            .get(start..)
            .and_then(|text| str::from_utf8(text).ok())
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Number of characters in `text()`.
    pub fn text_length(&self) -> usize {
        self.text().chars().count()
    }

    pub fn set_text_encoding(&mut self, text_encoding: TextEncoding) {
        self.payload = encode_payload(text_encoding, &self.language_code(), &self.text());
    }

    /// Rejects an empty or over-long code and leaves the payload untouched in that case.
    pub fn set_language_code(&mut self, language_code: &str) -> Result<(), ValidationError> {
        validate_language_code(language_code)?;
        self.payload = encode_payload(self.text_encoding(), language_code, &self.text());
        Ok(())
    }

    pub fn set_text(&mut self, text: &str) {
        self.payload = encode_payload(self.text_encoding(), &self.language_code(), text);
    }

    /// Replaces the payload verbatim; accessors read from the new bytes.
    pub fn set_payload(&mut self, payload: Vec<u8>) -> Result<(), ValidationError> {
        check_payload(&payload)?;
        self.payload = payload;
        Ok(())
    }

    /// Ids longer than 255 bytes are rejected and the current id is kept.
    pub fn set_id(&mut self, id: Option<Vec<u8>>) -> Result<(), ValidationError> {
        check_id(id.as_deref())?;
        self.id = id;
        Ok(())
    }
}

impl NdefRecord for TextRecord {
    fn tnf(&self) -> TypeNameFormat {
        TypeNameFormat::WellKnown
    }

    fn record_type(&self) -> &[u8] {
        Self::RECORD_TYPE
    }

    fn id(&self) -> Option<&[u8]> {
        self.id.as_deref()
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }
}

fn validate_language_code(language_code: &str) -> Result<(), ValidationError> {
    if language_code.is_empty() {
        return Err(ValidationError::LanguageCodeMissing);
    }
    if language_code.len() > LANGUAGE_CODE_MAX_LENGTH {
        return Err(ValidationError::LanguageCodeExceedsMaxLength);
    }
    Ok(())
}

// Text Record: [Status Byte] + [Lang Code] + [Text]
fn encode_payload(text_encoding: TextEncoding, language_code: &str, text: &str) -> Vec<u8> {
    let lang = language_code.as_bytes();
    let mut status = lang.len() as u8 & LANGUAGE_CODE_LENGTH_MASK;
    if text_encoding == TextEncoding::Utf16 {
        status |= TEXT_ENCODING_MASK;
    }

    let mut payload = Vec::with_capacity(1 + lang.len() + text.len());
    payload.push(status);
    payload.extend_from_slice(lang);
    payload.extend_from_slice(text.as_bytes());
    payload
}
