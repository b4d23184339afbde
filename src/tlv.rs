// src/tlv.rs
// TLV container used to lay an NDEF message out in tag memory.
use crate::error::TlvError;

pub const NULL_TLV: u8 = 0x00;
pub const NDEF_MESSAGE_TLV: u8 = 0x03;
pub const TERMINATOR_TLV: u8 = 0xFE;

// Lengths >= 0xFF use the 3-byte form: 0xFF followed by a big-endian u16
const THREE_BYTE_LENGTH_MARKER: u8 = 0xFF;
const MAX_TLV_LENGTH: usize = 0xFFFE;

pub fn wrap_in_tlv(ndef_bytes: &[u8]) -> Result<Vec<u8>, TlvError> {
    let len = ndef_bytes.len();
    if len > MAX_TLV_LENGTH {
        return Err(TlvError::MessageTooLong { length: len });
    }

    let mut tlv = Vec::with_capacity(len + 5);
    // T = 0x03 (NDEF Message)
    tlv.push(NDEF_MESSAGE_TLV);

    // L (Length)
    if len < usize::from(THREE_BYTE_LENGTH_MARKER) {
        tlv.push(len as u8);
    } else {
        tlv.push(THREE_BYTE_LENGTH_MARKER);
        tlv.extend_from_slice(&(len as u16).to_be_bytes());
    }

    // V (Value)
    tlv.extend_from_slice(ndef_bytes);

    // Terminator
    tlv.push(TERMINATOR_TLV);

    Ok(tlv)
}

/// Walks the TLV blocks of `buffer` and returns the value of the first NDEF message TLV.
/// NULL TLVs are skipped; other TLVs are stepped over by their length.
pub fn find_ndef_tlv(buffer: &[u8]) -> Result<&[u8], TlvError> {
    let mut cursor = 0;

    while let Some(&tag) = buffer.get(cursor) {
        match tag {
            NULL_TLV => {
                cursor += 1;
                continue;
            }
            TERMINATOR_TLV => break,
            _ => {}
        }

        let offset = cursor;
        let (len, header_len) =
            read_length(buffer, cursor + 1).ok_or(TlvError::Truncated { offset })?;
        let value_start = cursor + 1 + header_len;
        let value = buffer
            .get(value_start..value_start + len)
            .ok_or(TlvError::Truncated { offset })?;

        if tag == NDEF_MESSAGE_TLV {
            return Ok(value);
        }
        cursor = value_start + len;
    }

    Err(TlvError::NdefTlvMissing)
}

// Returns (value length, bytes used by the length field)
fn read_length(buffer: &[u8], at: usize) -> Option<(usize, usize)> {
    let first = *buffer.get(at)?;
    if first == THREE_BYTE_LENGTH_MARKER {
        let bytes = buffer.get(at + 1..at + 3)?;
        Some((usize::from(u16::from_be_bytes([bytes[0], bytes[1]])), 3))
    } else {
        Some((usize::from(first), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_length_form() {
        let tlv = wrap_in_tlv(&[0xD1, 0x01, 0x00, 0x54]).unwrap();
        assert_eq!(tlv, vec![0x03, 0x04, 0xD1, 0x01, 0x00, 0x54, 0xFE]);
        assert_eq!(find_ndef_tlv(&tlv).unwrap(), &[0xD1, 0x01, 0x00, 0x54]);
    }

    #[test]
    fn three_byte_length_form() {
        let message = vec![0xAB; 0x0123];
        let tlv = wrap_in_tlv(&message).unwrap();
        assert_eq!(&tlv[..4], &[0x03, 0xFF, 0x01, 0x23]);
        assert_eq!(tlv.last(), Some(&0xFE));
        assert_eq!(find_ndef_tlv(&tlv).unwrap(), message.as_slice());

        let boundary = vec![0x00; 0xFF];
        assert_eq!(&wrap_in_tlv(&boundary).unwrap()[..4], &[0x03, 0xFF, 0x00, 0xFF]);
        assert_eq!(wrap_in_tlv(&[0x00; 0xFE]).unwrap()[1], 0xFE);
    }

    #[test]
    fn rejects_oversized_message() {
        assert_eq!(
            wrap_in_tlv(&vec![0; MAX_TLV_LENGTH + 1]),
            Err(TlvError::MessageTooLong { length: MAX_TLV_LENGTH + 1 })
        );
    }

    #[test]
    fn skips_null_and_lock_control_tlvs() {
        // NULL, Lock Control TLV (0x01, len 3), then the NDEF TLV
        let buffer = [0x00, 0x00, 0x01, 0x03, 0xA0, 0x10, 0x44, 0x03, 0x02, 0xAA, 0xBB, 0xFE, 0x00];
        assert_eq!(find_ndef_tlv(&buffer).unwrap(), &[0xAA, 0xBB]);
    }

    #[test]
    fn missing_or_truncated() {
        assert_eq!(find_ndef_tlv(&[]), Err(TlvError::NdefTlvMissing));
        assert_eq!(find_ndef_tlv(&[0xFE, 0x03, 0x01, 0xAA]), Err(TlvError::NdefTlvMissing));
        assert_eq!(
            find_ndef_tlv(&[0x00, 0x03, 0x05, 0xAA]),
            Err(TlvError::Truncated { offset: 1 })
        );
        assert_eq!(find_ndef_tlv(&[0x03, 0xFF, 0x01]), Err(TlvError::Truncated { offset: 0 }));
    }
}
