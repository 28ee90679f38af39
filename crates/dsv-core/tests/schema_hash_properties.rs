//! Property tests for schema content hashing.
//!
//! The validator cache keys on `SchemaHash`, so the hash must depend only on
//! content: the order in which a serializer emits object keys must never
//! leak into it.

use dsv_core::{sha256_hex, CanonicalBytes, SchemaHash};
use proptest::prelude::*;
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        (-1000.0f64..1000.0).prop_map(|f| serde_json::json!(f)),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
    ]
}

fn schema_like() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// A JSON object that serializes its entries in exactly the stored order.
struct OrderedObject(Vec<(String, Value)>);

impl Serialize for OrderedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

fn object_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map("[a-z]{1,8}", schema_like(), 1..8)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn hash_is_deterministic(value in schema_like()) {
        let a = SchemaHash::of(&value).unwrap();
        let b = SchemaHash::of(&value).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn hash_ignores_key_emission_order(entries in object_entries()) {
        let sorted = CanonicalBytes::new(&OrderedObject(entries.clone())).unwrap();
        let mut reversed = entries.clone();
        reversed.reverse();
        let reversed = CanonicalBytes::new(&OrderedObject(reversed)).unwrap();
        prop_assert_eq!(sorted.as_bytes(), reversed.as_bytes());

        let value = Value::Object(entries.into_iter().collect::<Map<String, Value>>());
        let hash = SchemaHash::of(&value).unwrap();
        prop_assert_eq!(sha256_hex(&reversed), hash.as_str());
    }

    #[test]
    fn canonical_bytes_are_valid_json(value in schema_like()) {
        let cb = CanonicalBytes::new(&value).unwrap();
        let parsed: Result<Value, _> = serde_json::from_slice(cb.as_bytes());
        prop_assert!(parsed.is_ok(), "not valid JSON: {:?}", parsed.err());
    }
}
