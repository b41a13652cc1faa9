use super::*;

use bytes::Bytes;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(Value::from),
    ];
    // Depth stays within the default decoder limit.
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            proptest::collection::btree_map(
                proptest::collection::vec(any::<u8>(), 0..8).prop_map(Bytes::from),
                inner,
                0..6,
            )
            .prop_map(Value::Dict),
        ]
    })
}

fn assert_sorted(value: &Value) {
    match value {
        Value::List(l) => l.iter().for_each(assert_sorted),
        Value::Dict(d) => {
            let keys: Vec<&Bytes> = d.keys().collect();
            for pair in keys.windows(2) {
                assert!(pair[0] < pair[1], "dictionary keys must strictly increase");
            }
            d.values().for_each(assert_sorted);
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(value in arb_value()) {
        let encoded = encode(&value).unwrap();
        let decoded = decode(&encoded).unwrap();
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(encode(&decoded).unwrap(), encoded);
    }

    #[test]
    fn prop_decoded_dicts_are_sorted(value in arb_value()) {
        let decoded = decode(&encode(&value).unwrap()).unwrap();
        assert_sorted(&decoded);
    }

    #[test]
    fn prop_builder_keeps_keys_sorted(keys in proptest::collection::vec(".{0,6}", 0..20)) {
        let mut root = Value::Hole;
        let mut expected = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            root.set_key(key, i as i64).unwrap();
            expected.insert(Bytes::copy_from_slice(key.as_bytes()), Value::Integer(i as i64));
        }
        if keys.is_empty() {
            prop_assert!(root.is_hole());
        } else {
            assert_sorted(&root);
            prop_assert_eq!(root, Value::Dict(expected));
        }
    }

    #[test]
    fn prop_arbitrary_input_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(value) = decode(&data) {
            // Whatever the strict decoder accepts is canonical.
            prop_assert_eq!(encode(&value).unwrap(), data);
        }
    }
}
