use ndef_codec::{
    GenericRecord, Message, NdefRecord, Record, TextEncoding, TextRecord, TypeNameFormat,
    UriRecord,
};
use proptest::prelude::*;

fn id_strategy() -> impl Strategy<Value = Option<Vec<u8>>> {
    prop::option::of(prop::collection::vec(any::<u8>(), 0..=255))
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop_oneof![
        (any::<bool>(), "[a-z]{1,8}", ".{0,40}", id_strategy()).prop_map(|(utf16, lang, text, id)| {
            let encoding = if utf16 {
                TextEncoding::Utf16
            } else {
                TextEncoding::Utf8
            };
            Record::Text(TextRecord::new(encoding, &lang, &text, id).unwrap())
        }),
        (".{0,40}", id_strategy())
            .prop_map(|(uri, id)| Record::Uri(UriRecord::from_uri(&uri, id).unwrap())),
        (
            0u8..8,
            prop::collection::vec(any::<u8>(), 0..6),
            prop::collection::vec(any::<u8>(), 0..600),
            id_strategy(),
        )
            .prop_map(|(tnf, record_type, payload, id)| {
                Record::Generic(
                    GenericRecord::new(TypeNameFormat::from_bits(tnf), record_type, payload, id)
                        .unwrap(),
                )
            }),
    ]
}

fn fields(record: &Record) -> (TypeNameFormat, Vec<u8>, Option<Vec<u8>>, Vec<u8>) {
    (
        record.tnf(),
        record.record_type().to_vec(),
        record.id().map(<[u8]>::to_vec),
        record.payload().to_vec(),
    )
}

proptest! {
    #[test]
    fn prop_parse_serialize_roundtrip(records in prop::collection::vec(record_strategy(), 1..6)) {
        let message = Message::from_records(records);
        let bytes = message.to_bytes();
        let parsed = Message::parse(&bytes).unwrap();

        prop_assert_eq!(parsed.len(), message.len());
        for (original, decoded) in message.iter().zip(parsed.iter()) {
            prop_assert_eq!(fields(original), fields(decoded));
        }
        prop_assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn prop_uri_text_survive(uri in ".{0,60}", text in ".{0,60}") {
        let uri_record = UriRecord::from_uri(&uri, None).unwrap();
        prop_assert_eq!(uri_record.uri(), uri);

        let text_record = TextRecord::new(TextEncoding::Utf8, "en", &text, None).unwrap();
        prop_assert_eq!(text_record.text_length(), text.chars().count());
        prop_assert_eq!(text_record.text(), text);
    }

    #[test]
    fn prop_parse_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = Message::parse(&data);
    }
}
