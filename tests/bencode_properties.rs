//! Property tests for the bencode codec.
//!
//! - Decoding an encoded value gives the value back
//! - Encoding is canonical: key insertion order never changes the bytes
//! - Canonical bytes survive decode and re-encode unchanged
//! - Arbitrary input never panics the decoder

use std::collections::BTreeMap;

use bitmeta::bencode::{decode, decode_with, encode, encoded_len, Dict, DecoderConfig, Value};
use bytes::Bytes;
use proptest::prelude::*;

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            prop::collection::btree_map(
                prop::collection::vec(any::<u8>(), 0..12).prop_map(Bytes::from),
                inner,
                0..8,
            )
            .prop_map(Value::Dict),
        ]
    })
}

#[test]
fn prop_decode_inverts_encode() {
    proptest!(|(value in value_strategy())| {
        let encoded = encode(&value).unwrap();
        prop_assert_eq!(encoded.len(), encoded_len(&value));
        prop_assert_eq!(decode(&encoded).unwrap(), value);
    });
}

#[test]
fn prop_encoded_values_are_strictly_canonical() {
    proptest!(|(value in value_strategy())| {
        let encoded = encode(&value).unwrap();
        let strict = DecoderConfig::strict();
        prop_assert_eq!(decode_with(&encoded, &strict).unwrap(), value);
    });
}

#[test]
fn prop_canonical_bytes_roundtrip() {
    proptest!(|(value in value_strategy())| {
        let canonical = encode(&value).unwrap();
        let reencoded = encode(&decode(&canonical).unwrap()).unwrap();
        prop_assert_eq!(reencoded, canonical);
    });
}

#[test]
fn prop_key_order_does_not_change_encoding() {
    proptest!(|(pairs in prop::collection::vec(
        (prop::collection::vec(any::<u8>(), 0..8), any::<i64>()),
        0..16,
    ))| {
        // Unique keys, written in generation order and then reversed.
        let unique: BTreeMap<Vec<u8>, i64> = pairs.into_iter().collect();
        let forward: Vec<_> = unique.iter().collect();

        let mut in_order = Vec::from(&b"d"[..]);
        let mut reversed = Vec::from(&b"d"[..]);
        for (key, value) in &forward {
            write_pair(&mut in_order, key, **value);
        }
        for (key, value) in forward.iter().rev() {
            write_pair(&mut reversed, key, **value);
        }
        in_order.push(b'e');
        reversed.push(b'e');

        let a = encode(&decode(&in_order).unwrap()).unwrap();
        let b = encode(&decode(&reversed).unwrap()).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, in_order);
    });
}

fn write_pair(out: &mut Vec<u8>, key: &[u8], value: i64) {
    out.extend_from_slice(format!("{}:", key.len()).as_bytes());
    out.extend_from_slice(key);
    out.extend_from_slice(format!("i{}e", value).as_bytes());
}

#[test]
fn prop_arbitrary_input_never_panics() {
    proptest!(|(data in prop::collection::vec(any::<u8>(), 0..256))| {
        let _ = decode(&data);
        let _ = decode_with(&data, &DecoderConfig::strict());
    });
}

#[test]
fn prop_truncated_input_fails() {
    proptest!(|(value in value_strategy(), cut in any::<prop::sample::Index>())| {
        let encoded = encode(&value).unwrap();
        let len = cut.index(encoded.len());
        prop_assert!(decode(&encoded[..len]).is_err());
    });
}

#[test]
fn empty_dict_encodes_canonically() {
    assert_eq!(encode(&Value::Dict(Dict::new())).unwrap(), b"de");
}
