//! Proptest strategies shared by the unit tests.

use std::collections::BTreeMap;

use proptest::prelude::*;
use vdiff_types::{Key, Value};

/// Small-domain values so that generated collections share elements often.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..4).prop_map(Value::Int),
        (0i32..3).prop_map(|n| Value::Double(f64::from(n) * 0.5)),
        "[ab]{0,2}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Seq),
            prop::collection::btree_map((0i64..3).prop_map(Key::Int), inner, 0..3)
                .prop_map(Value::Map),
        ]
    })
}

pub fn arb_seq() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_value(), 0..8)
}

pub fn arb_map() -> impl Strategy<Value = BTreeMap<Key, Value>> {
    prop::collection::btree_map((0i64..6).prop_map(Key::Int), arb_value(), 0..6)
}
