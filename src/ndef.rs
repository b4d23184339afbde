// src/ndef.rs
// Entry points for host code: record constructors that log and swallow validation
// failures, plus whole-message and tag-memory encode/decode.
use log::warn;

use crate::error::{NdefError, ParsingError, TlvError};
use crate::generic::GenericRecord;
use crate::message::Message;
use crate::record::Record;
use crate::text::TextRecord;
use crate::tlv;
use crate::types::{TextEncoding, TypeNameFormat};
use crate::uri::UriRecord;

pub fn make_text_record(
    text_encoding: TextEncoding,
    language_code: &str,
    text: &str,
    id: Option<Vec<u8>>,
) -> Option<Record> {
    TextRecord::new(text_encoding, language_code, text, id)
        .map(Record::Text)
        .inspect_err(|err| warn!("Error creating text record: {err}"))
        .ok()
}

pub fn make_text_record_from_payload(payload: Vec<u8>, id: Option<Vec<u8>>) -> Option<Record> {
    TextRecord::from_payload(payload, id)
        .map(Record::Text)
        .inspect_err(|err| warn!("Error creating text record: {err}"))
        .ok()
}

pub fn make_uri_record(uri: &str, id: Option<Vec<u8>>) -> Option<Record> {
    UriRecord::from_uri(uri, id)
        .map(Record::Uri)
        .inspect_err(|err| warn!("Error creating uri record: {err}"))
        .ok()
}

pub fn make_uri_record_from_payload(payload: Vec<u8>, id: Option<Vec<u8>>) -> Option<Record> {
    UriRecord::from_payload(payload, id)
        .map(Record::Uri)
        .inspect_err(|err| warn!("Error creating uri record: {err}"))
        .ok()
}

pub fn make_generic_record(
    tnf: TypeNameFormat,
    record_type: Vec<u8>,
    payload: Vec<u8>,
    id: Option<Vec<u8>>,
) -> Option<Record> {
    GenericRecord::new(tnf, record_type, payload, id)
        .map(Record::Generic)
        .inspect_err(|err| warn!("Error creating generic record: {err}"))
        .ok()
}

pub fn parse_message(data: &[u8]) -> Result<Message, ParsingError> {
    Message::parse(data)
}

pub fn serialize_message(message: &Message) -> Vec<u8> {
    message.to_bytes()
}

/// Finds the NDEF TLV in a tag memory dump and parses the message inside it.
pub fn parse_tag_memory(buffer: &[u8]) -> Result<Message, NdefError> {
    let ndef_bytes = tlv::find_ndef_tlv(buffer)?;
    Ok(Message::parse(ndef_bytes)?)
}

/// Serializes `message` and wraps it in an NDEF TLV followed by a terminator.
pub fn encode_tag_memory(message: &Message) -> Result<Vec<u8>, TlvError> {
    tlv::wrap_in_tlv(&message.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NdefRecord;

    #[test]
    fn rejected_records_become_none() {
        assert!(make_text_record(TextEncoding::Utf8, "", "text", None).is_none());
        assert!(make_text_record_from_payload(vec![0x00], None).is_none());
        assert!(make_uri_record("tel:1", Some(vec![0; 256])).is_none());
        let long_id = Some(vec![0; 256]);
        let generic = make_generic_record(TypeNameFormat::Unknown, Vec::new(), Vec::new(), long_id);
        assert!(generic.is_none());
        assert!(make_text_record(TextEncoding::Utf8, "en", "text", None).is_some());
        assert!(make_uri_record("tel:1", Some(vec![0; 255])).is_some());
        assert!(make_uri_record_from_payload(Vec::new(), None).is_some());
        assert!(make_generic_record(TypeNameFormat::Empty, Vec::new(), Vec::new(), None).is_some());
    }

    #[test]
    fn tag_memory_round_trip() {
        let message = Message::from_records(vec![
            make_uri_record("https://www.github.com/", None).unwrap(),
            make_text_record(TextEncoding::Utf8, "en", "hello", None).unwrap(),
        ]);
        let memory = encode_tag_memory(&message).unwrap();
        assert_eq!(memory[0], 0x03);
        assert_eq!(usize::from(memory[1]), message.to_bytes().len());

        let parsed = parse_tag_memory(&memory).unwrap();
        assert_eq!(parsed, message);
        assert_eq!(parsed.records()[0].payload()[0], 0x02);
    }

    #[test]
    fn tag_memory_errors_are_wrapped() {
        assert!(matches!(parse_tag_memory(&[0xFE]), Err(NdefError::Tlv(TlvError::NdefTlvMissing))));
        assert!(matches!(parse_tag_memory(&[0x03, 0x01, 0xD1, 0xFE]), Err(NdefError::Parsing(_))));
    }
}
