// src/message.rs
use log::debug;

use crate::error::{ParsingError, ParsingErrorKind};
use crate::generic::GenericRecord;
use crate::record::{
    CHUNKED_MASK, ID_LENGTH_PRESENT_MASK, MESSAGE_BEGIN_MASK, MESSAGE_END_MASK, NdefRecord, Record,
    SHORT_RECORD_MASK,
};
use crate::text::TextRecord;
use crate::types::TypeNameFormat;
use crate::uri::UriRecord;

// An empty short record with no ID: header + type length + payload length
const SHORTEST_POSSIBLE_MESSAGE: usize = 3;
const LONG_PAYLOAD_LENGTH_BYTES: usize = 4;

/// Ordered records of one NDEF message. Insertion order is wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    records: Vec<Record>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn append_record(&mut self, record: impl Into<Record>) {
        self.records.push(record.into());
    }

    /// Inserts before `index`; an index past the end appends.
    pub fn insert_record(&mut self, index: usize, record: impl Into<Record>) {
        let index = index.min(self.records.len());
        self.records.insert(index, record.into());
    }

    /// Out-of-range indices leave the message untouched and return `None`.
    pub fn remove_record(&mut self, index: usize) -> Option<Record> {
        if index >= self.records.len() {
            return None;
        }
        Some(self.records.remove(index))
    }

    /// Frames every record; MB goes on the first and ME on the last. Chunking is never used.
    pub fn to_bytes(&self) -> Vec<u8> {
        let last = self.records.len().saturating_sub(1);
        let mut raw = Vec::new();
        for (i, record) in self.records.iter().enumerate() {
            raw.extend(record.to_bytes(i == 0, i == last, false));
        }
        raw
    }

    /// Parses a raw NDEF message in a single pass. The first structural problem aborts
    /// the parse; bytes after the record carrying ME are ignored.
    pub fn parse(data: &[u8]) -> Result<Self, ParsingError> {
        if data.len() < SHORTEST_POSSIBLE_MESSAGE {
            return Err(ParsingError::new(0, data, ParsingErrorKind::RawByteArrayTooShort));
        }

        let mut records = Vec::new();
        let mut found_message_begin = false;
        let mut found_message_end = false;
        let mut cursor = 0;

        while cursor < data.len() {
            let start = cursor;
            let fail = |kind| ParsingError::new(start, data, kind);

            let header = data[cursor];
            let is_mb = header & MESSAGE_BEGIN_MASK != 0;
            let is_me = header & MESSAGE_END_MASK != 0;
            let is_chunked = header & CHUNKED_MASK != 0;
            let is_short_record = header & SHORT_RECORD_MASK != 0;
            let has_id = header & ID_LENGTH_PRESENT_MASK != 0;
            let tnf = TypeNameFormat::from_bits(header);
            cursor += 1;

            if is_chunked {
                return Err(fail(ParsingErrorKind::ChunkedRecordsNotSupported));
            }

            match (is_mb, found_message_begin) {
                (true, false) => found_message_begin = true,
                (true, true) => return Err(fail(ParsingErrorKind::MultipleMessageBeginFlags)),
                (false, false) => return Err(fail(ParsingErrorKind::MessageBeginFlagMissing)),
                (false, true) => {}
            }

            if is_me {
                if found_message_end {
                    return Err(fail(ParsingErrorKind::MultipleMessageEndFlags));
                }
                found_message_end = true;
            }

            // 1. Type Length
            let type_len = usize::from(
                *data
                    .get(cursor)
                    .ok_or_else(|| fail(ParsingErrorKind::TypeLengthMissing))?,
            );
            cursor += 1;

            // 2. Payload Length (1 byte for Short Record, 4 bytes otherwise)
            let payload_len = if is_short_record {
                let len = *data
                    .get(cursor)
                    .ok_or_else(|| fail(ParsingErrorKind::PayloadLengthMissing))?;
                cursor += 1;
                usize::from(len)
            } else {
                let len: [u8; LONG_PAYLOAD_LENGTH_BYTES] = data
                    .get(cursor..cursor + LONG_PAYLOAD_LENGTH_BYTES)
                    .and_then(|bytes| bytes.try_into().ok())
                    .ok_or_else(|| fail(ParsingErrorKind::PayloadLengthMissing))?;
                cursor += LONG_PAYLOAD_LENGTH_BYTES;
                u32::from_be_bytes(len) as usize
            };

            // 3. ID Length (if present)
            let id_len = if has_id {
                let len = *data
                    .get(cursor)
                    .ok_or_else(|| fail(ParsingErrorKind::IdLengthMissing))?;
                cursor += 1;
                usize::from(len)
            } else {
                0
            };

            debug!(
                "record at {start}: tnf={} type_len={type_len} payload_len={payload_len} \
                 id_len={id_len}",
                tnf.name()
            );

            // 4. Type, ID and Payload fields
            let record_type = take(data, &mut cursor, type_len)
                .ok_or_else(|| fail(ParsingErrorKind::TypeFieldMissing))?;
            let id = take(data, &mut cursor, id_len)
                .ok_or_else(|| fail(ParsingErrorKind::IdFieldMissing))?;
            let payload = take(data, &mut cursor, payload_len)
                .ok_or_else(|| fail(ParsingErrorKind::PayloadFieldMissing))?;

            let id = has_id.then(|| id.to_vec());
            records.push(dispatch_record(tnf, record_type.to_vec(), payload.to_vec(), id));

            if is_me {
                break;
            }
        }

        Ok(Self { records })
    }
}

// Advances past `len` bytes, or returns None if the input ends first.
fn take<'a>(data: &'a [u8], cursor: &mut usize, len: usize) -> Option<&'a [u8]> {
    let end = cursor.checked_add(len)?;
    let field = data.get(*cursor..end)?;
    *cursor = end;
    Some(field)
}

// Text/Uri payloads that fail validation are kept as Generic records with the same fields.
fn dispatch_record(
    tnf: TypeNameFormat,
    record_type: Vec<u8>,
    payload: Vec<u8>,
    id: Option<Vec<u8>>,
) -> Record {
    let specialized = if tnf != TypeNameFormat::WellKnown {
        None
    } else if record_type == TextRecord::RECORD_TYPE {
        TextRecord::from_payload(payload.clone(), id.clone())
            .map(Record::Text)
            .inspect_err(|err| debug!("text record kept as generic: {err}"))
            .ok()
    } else if record_type == UriRecord::RECORD_TYPE {
        UriRecord::from_payload(payload.clone(), id.clone())
            .map(Record::Uri)
            .inspect_err(|err| debug!("uri record kept as generic: {err}"))
            .ok()
    } else {
        None
    };

    specialized.unwrap_or_else(|| {
        Record::Generic(GenericRecord::from_raw_parts(tnf, record_type, payload, id))
    })
}

impl TryFrom<&[u8]> for Message {
    type Error = ParsingError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(data)
    }
}

impl FromIterator<Record> for Message {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Message {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Message {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
