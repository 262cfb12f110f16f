//! Property-based tests for codec fidelity.
//!
//! These tests verify that:
//! - decode -> encode of an untouched record reproduces the payload byte for byte
//! - renaming mutates only the name field
//! - dependency order and duplicates survive a rewrite

use prefixer_descriptor::{decode, encode};
use prost::encoding::{WireType, encode_key, encode_varint};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Field {
    Name(String),
    Dependency(String),
    Bytes(u32, Vec<u8>),
    Varint(u32, u64),
    Fixed32(u32, [u8; 4]),
}

fn write_field(field: &Field, out: &mut Vec<u8>) {
    match field {
        Field::Name(s) => write_len(1, s.as_bytes(), out),
        Field::Dependency(s) => write_len(3, s.as_bytes(), out),
        Field::Bytes(tag, b) => write_len(*tag, b, out),
        Field::Varint(tag, v) => {
            encode_key(*tag, WireType::Varint, out);
            encode_varint(*v, out);
        }
        Field::Fixed32(tag, b) => {
            encode_key(*tag, WireType::ThirtyTwoBit, out);
            out.extend_from_slice(b);
        }
    }
}

fn write_len(tag: u32, payload: &[u8], out: &mut Vec<u8>) {
    encode_key(tag, WireType::LengthDelimited, out);
    encode_varint(payload.len() as u64, out);
    out.extend_from_slice(payload);
}

fn arb_proto_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"([a-z]{1,6}/){0,2}[a-z_]{1,10}\.proto").unwrap()
}

/// Tags other than name (1) and dependency (3).
fn arb_other_tag() -> impl Strategy<Value = u32> {
    prop_oneof![Just(2u32), 4u32..=12, 100u32..2000]
}

fn arb_other_field() -> impl Strategy<Value = Field> {
    prop_oneof![
        (arb_other_tag(), prop::collection::vec(any::<u8>(), 0..40))
            .prop_map(|(t, b)| Field::Bytes(t, b)),
        (arb_other_tag(), any::<u64>()).prop_map(|(t, v)| Field::Varint(t, v)),
        (arb_other_tag(), any::<[u8; 4]>()).prop_map(|(t, b)| Field::Fixed32(t, b)),
    ]
}

/// A descriptor payload with the name somewhere among shuffled fields, plus the
/// expected name and dependency order.
fn arb_payload() -> impl Strategy<Value = (Vec<u8>, String, Vec<String>)> {
    (
        arb_proto_name(),
        prop::collection::vec(arb_proto_name(), 0..5),
        prop::collection::vec(arb_other_field(), 0..8),
    )
        .prop_flat_map(|(name, deps, others)| {
            let mut fields = vec![Field::Name(name.clone())];
            fields.extend(deps.iter().cloned().map(Field::Dependency));
            fields.extend(others);
            (Just(fields).prop_shuffle(), Just(name))
        })
        .prop_map(|(fields, name)| {
            let mut out = Vec::new();
            let mut deps = Vec::new();
            for f in &fields {
                if let Field::Dependency(d) = f {
                    deps.push(d.clone());
                }
                write_field(f, &mut out);
            }
            (out, name, deps)
        })
}

proptest! {
    #[test]
    fn untouched_roundtrip_is_byte_identical((payload, _, _) in arb_payload()) {
        let record = decode(&payload).unwrap();
        prop_assert_eq!(encode(&record).unwrap(), payload);
    }

    #[test]
    fn decode_preserves_dependency_order((payload, name, deps) in arb_payload()) {
        let record = decode(&payload).unwrap();
        prop_assert_eq!(record.name, name);
        prop_assert_eq!(record.dependencies, deps);
    }

    #[test]
    fn prefix_changes_only_the_name(
        (payload, name, deps) in arb_payload(),
        prefix in "[a-z]{1,8}/",
    ) {
        let mut record = decode(&payload).unwrap();
        let opaque_before = record.opaque_field_count();
        record.name = format!("{prefix}{}", record.name);

        let renamed = decode(&encode(&record).unwrap()).unwrap();
        prop_assert_eq!(&renamed.name, &format!("{prefix}{name}"));
        prop_assert_eq!(&renamed.dependencies, &deps);
        prop_assert_eq!(renamed.opaque_field_count(), opaque_before);

        // Undoing the rename restores the original bytes.
        let mut restored = renamed;
        restored.name = name;
        prop_assert_eq!(encode(&restored).unwrap(), payload);
    }
}
