use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use vdiff_types::{DiffOp, OpKind};

use crate::error::{WireError, WireResult};

/// A flat wire record: `type` plus the op's named fields.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Codec between [`DiffOp`]s and their wire records.
pub struct WireCodec;

impl WireCodec {
    /// Encode one op as a record.
    ///
    /// Fails only when the payload has no JSON form (opaque values,
    /// non-finite floats).
    pub fn encode_op<K, V>(op: &DiffOp<K, V>) -> WireResult<Record>
    where
        K: Serialize,
        V: Serialize,
    {
        match serde_json::to_value(op).map_err(|e| WireError::Serialization(e.to_string()))? {
            serde_json::Value::Object(record) => Ok(record),
            other => Err(WireError::Serialization(format!(
                "op encoded as non-record JSON: {other}"
            ))),
        }
    }

    /// Decode one record.
    ///
    /// Returns `None` for a missing or unknown `type`, or when a field the
    /// declared type requires is missing or has the wrong shape. Unknown
    /// extra fields are ignored.
    pub fn decode_op<K, V>(record: &Record) -> Option<DiffOp<K, V>>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        let tag = record.get("type").and_then(serde_json::Value::as_str)?;
        if OpKind::from_tag(tag).is_none() {
            debug!(tag, "unknown op type");
            return None;
        }
        match serde_json::from_value(serde_json::Value::Object(record.clone())) {
            Ok(op) => Some(op),
            Err(e) => {
                debug!(tag, error = %e, "op record rejected");
                None
            }
        }
    }

    /// Encode a whole script as a JSON array of records.
    pub fn encode_script<K, V>(ops: &[DiffOp<K, V>]) -> WireResult<String>
    where
        K: Serialize,
        V: Serialize,
    {
        let records = ops
            .iter()
            .map(|op| Self::encode_op(op).map(serde_json::Value::Object))
            .collect::<WireResult<Vec<_>>>()?;
        Ok(serde_json::to_string(&records)?)
    }

    /// Decode a JSON array of records.
    ///
    /// Unlike [`WireCodec::decode_op`], a bad record here is an error that
    /// names its position, since a partial script cannot be replayed.
    pub fn decode_script<K, V>(text: &str) -> WireResult<Vec<DiffOp<K, V>>>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        let json: serde_json::Value = serde_json::from_str(text)?;
        let items = match json {
            serde_json::Value::Array(items) => items,
            _ => return Err(WireError::NotAnArray),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_object()
                    .and_then(Self::decode_op)
                    .ok_or(WireError::InvalidRecord { index })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use vdiff_diff::{
        apply_mapping, apply_sequence, default_equals, diff_mappings, diff_sequences_default,
        ValueEquality,
    };
    use vdiff_types::{Key, Value};

    fn arb_key() -> impl Strategy<Value = Key> {
        prop_oneof![(-2i64..3).prop_map(Key::Int), "[xy]{1,2}".prop_map(Key::Text)]
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-2i64..4).prop_map(Value::Int),
            (0i32..3).prop_map(|n| Value::Double(f64::from(n) * 0.5)),
            "[ab]{0,2}".prop_map(Value::Text),
        ];
        leaf.prop_recursive(3, 16, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Seq),
                prop::collection::btree_map(arb_key(), inner, 0..3).prop_map(Value::Map),
            ]
        })
    }

    fn arb_seq() -> impl Strategy<Value = Vec<Value>> {
        prop::collection::vec(arb_value(), 0..6)
    }

    fn arb_map() -> impl Strategy<Value = BTreeMap<Key, Value>> {
        prop::collection::btree_map(arb_key(), arb_value(), 0..6)
    }

    fn record(json: serde_json::Value) -> Record {
        json.as_object().unwrap().clone()
    }

    #[test]
    fn encode_each_variant() {
        let add: DiffOp<usize> = DiffOp::addition(0, Value::Int(1));
        let del: DiffOp<Key> = DiffOp::deletion(Key::from("a"));
        let upd: DiffOp<Key> = DiffOp::update(Key::from("b"), Value::from(vec![1, 2]));
        let mov: DiffOp<usize> = DiffOp::movement(2, 0);

        assert_eq!(
            WireCodec::encode_op(&add).unwrap(),
            record(json!({"type": "addition", "key": 0, "value": 1}))
        );
        assert_eq!(
            WireCodec::encode_op(&del).unwrap(),
            record(json!({"type": "deletion", "key": "a"}))
        );
        assert_eq!(
            WireCodec::encode_op(&upd).unwrap(),
            record(json!({"type": "update", "key": "b", "newValue": [1, 2]}))
        );
        assert_eq!(
            WireCodec::encode_op(&mov).unwrap(),
            record(json!({"type": "movement", "oldKey": 2, "newKey": 0}))
        );
    }

    #[test]
    fn decode_nested_payload() {
        let rec = record(json!({
            "type": "update",
            "key": "cfg",
            "newValue": {"ports": [80, 443], "tls": true}
        }));
        let op: DiffOp<Key> = WireCodec::decode_op(&rec).unwrap();
        match op {
            DiffOp::Update { key, new_value } => {
                assert_eq!(key, Key::from("cfg"));
                assert_eq!(
                    new_value,
                    Value::from_json(json!({"ports": [80, 443], "tls": true}))
                );
            }
            other => panic!("expected Update, got {:?}", other),
        }
    }

    #[test]
    fn null_payload_is_a_value() {
        let rec = record(json!({"type": "addition", "key": 1, "value": null}));
        let op: Option<DiffOp<usize>> = WireCodec::decode_op(&rec);
        assert_eq!(op, Some(DiffOp::addition(1, Value::Null)));
    }

    #[test]
    fn unknown_type_yields_none() {
        let rec = record(json!({"type": "replace", "key": 0, "value": 1}));
        assert!(WireCodec::decode_op::<usize, Value>(&rec).is_none());
    }

    #[test]
    fn missing_type_yields_none() {
        let rec = record(json!({"key": 0, "value": 1}));
        assert!(WireCodec::decode_op::<usize, Value>(&rec).is_none());
    }

    #[test]
    fn missing_required_field_yields_none() {
        for rec in [
            json!({"type": "addition", "key": 0}),
            json!({"type": "update", "key": "a", "value": 1}),
            json!({"type": "movement", "oldKey": 1}),
            json!({"type": "deletion"}),
        ] {
            assert!(
                WireCodec::decode_op::<Key, Value>(&record(rec.clone())).is_none(),
                "should reject {rec}"
            );
        }
    }

    #[test]
    fn ill_typed_position_yields_none() {
        let rec = record(json!({"type": "deletion", "key": "zero"}));
        assert!(WireCodec::decode_op::<usize, Value>(&rec).is_none());
        let rec = record(json!({"type": "deletion", "key": -1}));
        assert!(WireCodec::decode_op::<usize, Value>(&rec).is_none());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let rec = record(json!({"type": "deletion", "key": 3, "note": "surplus"}));
        assert_eq!(
            WireCodec::decode_op::<usize, Value>(&rec),
            Some(DiffOp::deletion(3))
        );
    }

    #[test]
    fn script_roundtrip() {
        let ops: Vec<DiffOp<usize>> = vec![
            DiffOp::movement(1, 0),
            DiffOp::addition(1, Value::from("x")),
            DiffOp::deletion(4),
        ];
        let text = WireCodec::encode_script(&ops).unwrap();
        let decoded: Vec<DiffOp<usize>> = WireCodec::decode_script(&text).unwrap();
        assert_eq!(decoded, ops);
    }

    #[test]
    fn integer_keyed_payload_roundtrip() {
        let mut payload = BTreeMap::new();
        payload.insert(Key::Int(1), Value::Int(2));
        let ops: Vec<DiffOp<usize>> = vec![DiffOp::addition(0, Value::Map(payload))];

        let text = WireCodec::encode_script(&ops).unwrap();
        assert_eq!(text, r#"[{"key":0,"type":"addition","value":{"1":2}}]"#);
        let decoded: Vec<DiffOp<usize>> = WireCodec::decode_script(&text).unwrap();
        assert_eq!(decoded, ops);
    }

    #[test]
    fn script_reports_bad_record_index() {
        let text = r#"[{"type": "deletion", "key": 0}, {"type": "teleport"}]"#;
        let err = WireCodec::decode_script::<usize, Value>(text).unwrap_err();
        assert!(matches!(err, WireError::InvalidRecord { index: 1 }));
    }

    #[test]
    fn script_must_be_array() {
        let err = WireCodec::decode_script::<usize, Value>(r#"{"type": "deletion"}"#).unwrap_err();
        assert!(matches!(err, WireError::NotAnArray));
        let err = WireCodec::decode_script::<usize, Value>("[").unwrap_err();
        assert!(matches!(err, WireError::Json(_)));
    }

    #[test]
    fn opaque_payload_cannot_be_encoded() {
        let op: DiffOp<usize> = DiffOp::addition(0, Value::opaque(7u8));
        assert!(matches!(
            WireCodec::encode_op(&op).unwrap_err(),
            WireError::Serialization(_)
        ));
    }

    proptest! {
        #[test]
        fn decoded_sequence_script_reproduces_target(source in arb_seq(), target in arb_seq()) {
            let ops = diff_sequences_default(&source, &target);
            let text = WireCodec::encode_script(&ops).unwrap();
            let decoded: Vec<DiffOp<usize>> = WireCodec::decode_script(&text).unwrap();
            prop_assert_eq!(&decoded, &ops);

            let patched = apply_sequence(&source, &decoded).unwrap();
            prop_assert!(default_equals(&Value::Seq(patched), &Value::Seq(target)));
        }

        #[test]
        fn decoded_mapping_script_reproduces_target(source in arb_map(), target in arb_map()) {
            let ops = diff_mappings(&source, &target, &ValueEquality::default());
            let text = WireCodec::encode_script(&ops).unwrap();
            let decoded: Vec<DiffOp<Key>> = WireCodec::decode_script(&text).unwrap();
            prop_assert_eq!(&decoded, &ops);

            let patched = apply_mapping(&source, &decoded).unwrap();
            prop_assert!(default_equals(&Value::Map(patched), &Value::Map(target)));
        }
    }
}
