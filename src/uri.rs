// src/uri.rs
use std::str;

use crate::error::ValidationError;
use crate::record::{NdefRecord, Record, check_id, check_payload};
use crate::types::TypeNameFormat;

// Identifier code -> abbreviated prefix. Lookup is first match in table order, so
// "http://www." wins over "http://" and "urn:" wins over the "urn:epc:" family.
pub const URI_PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Well-known "U" record: `[identifier code][uri suffix]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriRecord {
    id: Option<Vec<u8>>,
    payload: Vec<u8>,
}

impl UriRecord {
    pub const RECORD_TYPE: &'static [u8] = b"U";

    /// Record with an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_payload(payload: Vec<u8>, id: Option<Vec<u8>>) -> Result<Self, ValidationError> {
        check_payload(&payload)?;
        check_id(id.as_deref())?;
        Ok(Self { id, payload })
    }

    /// Only an id longer than 255 bytes is rejected; any URI string is accepted.
    pub fn from_uri(uri: &str, id: Option<Vec<u8>>) -> Result<Self, ValidationError> {
        check_id(id.as_deref())?;
        Ok(Self {
            id,
            payload: encode_payload(uri),
        })
    }

    pub fn is_record_type(record: &Record) -> bool {
        matches!(record, Record::Uri(_))
    }

    pub fn identifier_code(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Payload without the identifier code.
    pub fn raw_uri(&self) -> &[u8] {
        self.payload.get(1..).unwrap_or_default()
    }

    /// Prefix expanded from the identifier code followed by the stored suffix.
    /// An unknown code expands to nothing; a suffix that is not UTF-8 is dropped.
    pub fn uri(&self) -> String {
        let Some(code) = self.identifier_code() else {
            return String::new();
        };
        let mut uri = prefix_for_code(code).to_string();
        if let Ok(suffix) = str::from_utf8(self.raw_uri()) {
            uri.push_str(suffix);
        }
        uri
    }

    pub fn set_uri(&mut self, uri: &str) {
        self.payload = encode_payload(uri);
    }

    pub fn set_payload(&mut self, payload: Vec<u8>) -> Result<(), ValidationError> {
        check_payload(&payload)?;
        self.payload = payload;
        Ok(())
    }

    pub fn set_id(&mut self, id: Option<Vec<u8>>) -> Result<(), ValidationError> {
        check_id(id.as_deref())?;
        self.id = id;
        Ok(())
    }
}

impl NdefRecord for UriRecord {
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

pub fn code_for_uri(uri: &str) -> u8 {
    URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, prefix)| uri.starts_with(**prefix))
        .map_or(0, |(code, _)| code as u8)
}

pub fn prefix_for_code(code: u8) -> &'static str {
    URI_PREFIXES.get(usize::from(code)).copied().unwrap_or("")
}

fn encode_payload(uri: &str) -> Vec<u8> {
    let code = code_for_uri(uri);
    let suffix = &uri[prefix_for_code(code).len()..];

    let mut payload = Vec::with_capacity(1 + suffix.len());
    payload.push(code);
    payload.extend_from_slice(suffix.as_bytes());
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_abbreviated_uri() {
        let payload = [vec![0x02], b"github.com/".to_vec()].concat();
        let record = UriRecord::from_payload(payload, None).unwrap();
        assert_eq!(record.uri(), "https://www.github.com/");
        assert_eq!(record.raw_uri(), b"github.com/");
        assert_eq!(record.identifier_code(), Some(2));
        assert_eq!(record.record_type(), &[0x55]);
    }

    #[test]
    fn empty_record() {
        let record = UriRecord::new();
        assert!(record.payload().is_empty());
        assert_eq!(record.uri(), "");
        assert!(record.raw_uri().is_empty());
        assert_eq!(record.identifier_code(), None);
    }

    #[test]
    fn encodes_with_longest_listed_prefix() {
        let id = Some(b"wc".to_vec());
        let record = UriRecord::from_uri("http://www.mywristcoin.com", id).unwrap();
        assert_eq!(record.payload()[0], 0x01);
        assert_eq!(&record.payload()[1..], b"mywristcoin.com");
        assert_eq!(record.uri(), "http://www.mywristcoin.com");
        assert_eq!(record.id(), Some(&b"wc"[..]));

        assert_eq!(code_for_uri("http://example.com"), 3);
        assert_eq!(code_for_uri("https://example.com"), 4);
        assert_eq!(code_for_uri("tel:+15555550100"), 5);
        assert_eq!(code_for_uri("ftp://ftp.example.com"), 8);
        assert_eq!(code_for_uri("ftp://example.com"), 13);
    }

    #[test]
    fn table_order_breaks_ties() {
        // "urn:" is listed before the longer "urn:epc:" and "urn:nfc:" prefixes.
        assert_eq!(code_for_uri("urn:nfc:wkt:U"), 19);
        assert_eq!(code_for_uri("urn:epc:id:sgtin"), 19);
        let record = UriRecord::from_uri("urn:nfc:wkt:U", None).unwrap();
        assert_eq!(record.raw_uri(), b"nfc:wkt:U");
        assert_eq!(record.uri(), "urn:nfc:wkt:U");
    }

    #[test]
    fn unknown_scheme_uses_code_zero() {
        let record = UriRecord::from_uri("spotify:track:1", None).unwrap();
        assert_eq!(record.payload()[0], 0x00);
        assert_eq!(record.uri(), "spotify:track:1");
    }

    #[test]
    fn out_of_range_code_expands_to_nothing() {
        let record = UriRecord::from_payload(vec![0x24, b'a', b'b'], None).unwrap();
        assert_eq!(record.uri(), "ab");
        assert_eq!(prefix_for_code(35), "urn:nfc:");
        assert_eq!(prefix_for_code(36), "");
    }

    #[test]
    fn invalid_suffix_keeps_prefix() {
        let record = UriRecord::from_payload(vec![0x04, 0xFF, 0xFE], None).unwrap();
        assert_eq!(record.uri(), "https://");
    }

    #[test]
    fn set_uri_rewrites_payload() {
        let mut record = UriRecord::new();
        record.set_uri("mailto:someone@example.com");
        assert_eq!(record.payload()[0], 0x06);
        assert_eq!(record.uri(), "mailto:someone@example.com");

        record.set_payload(vec![0x03, b'x']).unwrap();
        assert_eq!(record.uri(), "http://x");
    }

    #[test]
    fn id_longer_than_255_bytes_is_rejected() {
        let too_long = Some(vec![0x01; 256]);
        assert_eq!(
            UriRecord::from_uri("tel:1", too_long.clone()),
            Err(ValidationError::IdTooLong)
        );
        assert_eq!(
            UriRecord::from_payload(vec![0x05, b'1'], too_long.clone()),
            Err(ValidationError::IdTooLong)
        );

        let mut record = UriRecord::from_uri("tel:1", Some(vec![0x01; 255])).unwrap();
        assert_eq!(record.set_id(too_long), Err(ValidationError::IdTooLong));
        assert_eq!(record.id().map(<[u8]>::len), Some(255));
    }

    #[test]
    fn is_record_type_matches_only_uri() {
        assert!(UriRecord::is_record_type(&Record::Uri(UriRecord::new())));
        let text = crate::text::TextRecord::new(Default::default(), "en", "hi", None).unwrap();
        assert!(!UriRecord::is_record_type(&Record::Text(text)));
    }
}
