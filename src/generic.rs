// src/generic.rs
use crate::error::ValidationError;
use crate::record::{NdefRecord, Record, check_id, check_payload};
use crate::types::TypeNameFormat;

/// Any record without a specialised representation. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRecord {
    tnf: TypeNameFormat,
    record_type: Vec<u8>,
    id: Option<Vec<u8>>,
    payload: Vec<u8>,
}

impl GenericRecord {
    pub fn new(
        tnf: TypeNameFormat,
        record_type: Vec<u8>,
        payload: Vec<u8>,
        id: Option<Vec<u8>>,
    ) -> Result<Self, ValidationError> {
        check_payload(&payload)?;
        check_id(id.as_deref())?;
        Ok(Self::from_raw_parts(tnf, record_type, payload, id))
    }

    // Parsed fields always fit: their lengths came from 1- and 4-byte fields.
    pub(crate) fn from_raw_parts(
        tnf: TypeNameFormat,
        record_type: Vec<u8>,
        payload: Vec<u8>,
        id: Option<Vec<u8>>,
    ) -> Self {
        Self {
            tnf,
            record_type,
            id,
            payload,
        }
    }

    pub fn is_record_type(record: &Record) -> bool {
        matches!(record, Record::Generic(_))
    }
}

impl NdefRecord for GenericRecord {
    fn tnf(&self) -> TypeNameFormat {
        self.tnf
    }

    fn record_type(&self) -> &[u8] {
        &self.record_type
    }

    fn id(&self) -> Option<&[u8]> {
        self.id.as_deref()
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }
}
