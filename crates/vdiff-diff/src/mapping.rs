//! Mapping diff: compare two keyed collections.
//!
//! Keys present only in the source are `Deletion`s, keys present only in the
//! target are `Addition`s, and keys present in both whose values differ under
//! the comparator are `Update`s. Mapping ops never reference positions, so a
//! mapping script may be applied in any order.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use tracing::{debug, warn};
use vdiff_types::DiffOp;

use crate::equality::Comparator;
use crate::error::{DiffError, DiffResult};

/// A keyed collection the mapping differ can read and the applier can write.
pub trait Mapping: Clone {
    type Key: Clone + fmt::Debug;
    type Value: Clone;

    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn entries(&self) -> Box<dyn Iterator<Item = (&Self::Key, &Self::Value)> + '_>;

    fn set(&mut self, key: Self::Key, value: Self::Value);

    fn unset(&mut self, key: &Self::Key) -> Option<Self::Value>;

    fn contains(&self, key: &Self::Key) -> bool {
        self.lookup(key).is_some()
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn unset(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn unset(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
}

/// Compute the script that turns `source` into `target`.
///
/// Every key of the union is visited exactly once. The order of the returned
/// ops is unspecified; they are independent of each other.
pub fn diff_mappings<M, C>(source: &M, target: &M, cmp: &C) -> Vec<DiffOp<M::Key, M::Value>>
where
    M: Mapping,
    C: Comparator<M::Value> + ?Sized,
{
    let mut ops = Vec::new();

    // Removed and updated keys.
    for (key, old) in source.entries() {
        match target.lookup(key) {
            Some(new) => {
                if !cmp.equals(old, new) {
                    ops.push(DiffOp::update(key.clone(), new.clone()));
                }
            }
            None => ops.push(DiffOp::deletion(key.clone())),
        }
    }

    // Added keys.
    for (key, new) in target.entries() {
        if !source.contains(key) {
            ops.push(DiffOp::addition(key.clone(), new.clone()));
        }
    }

    debug!(ops = ops.len(), "mapping diff computed");
    ops
}

/// Apply `ops` to a copy of `source`.
///
/// `Addition` and `Update` both set the key. `Deletion` of a key that is not
/// present fails with [`DiffError::MissingKey`]; a `Movement` has no meaning
/// for a mapping and fails with [`DiffError::UnsupportedOp`].
pub fn apply_mapping<M: Mapping>(source: &M, ops: &[DiffOp<M::Key, M::Value>]) -> DiffResult<M> {
    let mut result = source.clone();

    for (op_index, op) in ops.iter().enumerate() {
        match op {
            DiffOp::Addition { key, value } | DiffOp::Update { key, new_value: value } => {
                result.set(key.clone(), value.clone());
            }
            DiffOp::Deletion { key } => {
                if result.unset(key).is_none() {
                    warn!(op_index, key = ?key, "deletion of absent key");
                    return Err(DiffError::MissingKey {
                        op_index,
                        key: format!("{key:?}"),
                    });
                }
            }
            DiffOp::Movement { .. } => {
                warn!(op_index, "movement op in a mapping script");
                return Err(DiffError::UnsupportedOp {
                    op_index,
                    kind: op.kind(),
                    collection: "mapping",
                });
            }
        }
    }

    debug!(ops = ops.len(), "mapping script applied");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::{default_equals, NativeEq, ValueEquality};
    use crate::testing::arb_map;
    use proptest::prelude::*;
    use vdiff_types::{Key, OpSummary, Value};

    fn make_map(pairs: &[(&str, Value)]) -> BTreeMap<Key, Value> {
        pairs
            .iter()
            .map(|(k, v)| (Key::from(*k), v.clone()))
            .collect()
    }

    fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn delete_update_add_in_any_order() {
        let source = make_map(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
        let target = make_map(&[("b", Value::Int(3)), ("c", Value::Int(4))]);

        let ops = diff_mappings(&source, &target, &ValueEquality::default());
        assert_eq!(ops.len(), 3);
        assert!(ops.contains(&DiffOp::deletion(Key::from("a"))));
        assert!(ops.contains(&DiffOp::update(Key::from("b"), Value::Int(3))));
        assert!(ops.contains(&DiffOp::addition(Key::from("c"), Value::Int(4))));

        let orders = permutations(&ops);
        assert_eq!(orders.len(), 6);
        for order in orders {
            assert_eq!(apply_mapping(&source, &order).unwrap(), target);
        }
    }

    #[test]
    fn identical_maps_no_ops() {
        let m = make_map(&[("x", Value::from(vec![1, 2])), ("y", Value::Null)]);
        assert!(diff_mappings(&m, &m, &ValueEquality::default()).is_empty());
    }

    #[test]
    fn tolerance_suppresses_update() {
        let old = make_map(&[("pi", Value::Double(3.14159))]);
        let new = make_map(&[("pi", Value::Double(3.14159 + 1e-12))]);
        assert!(diff_mappings(&old, &new, &ValueEquality::default()).is_empty());
        assert_eq!(diff_mappings(&old, &new, &NativeEq).len(), 1);
    }

    #[test]
    fn type_change_is_update() {
        let old = make_map(&[("v", Value::Int(1))]);
        let new = make_map(&[("v", Value::Bool(true))]);
        let ops = diff_mappings(&old, &new, &ValueEquality::default());
        assert_eq!(OpSummary::of(&ops).updates, 1);
    }

    #[test]
    fn hash_map_with_native_values() {
        let source: HashMap<i32, i32> = [(0, 10), (1, 11), (2, 12)].into_iter().collect();
        let target: HashMap<i32, i32> = [(1, 11), (2, 99), (5, 15)].into_iter().collect();

        let ops = diff_mappings(&source, &target, &NativeEq);
        let summary = OpSummary::of(&ops);
        assert_eq!(summary.deletions, 1);
        assert_eq!(summary.updates, 1);
        assert_eq!(summary.additions, 1);
        assert_eq!(apply_mapping(&source, &ops).unwrap(), target);
    }

    #[test]
    fn addition_over_existing_key_overwrites() {
        let source = make_map(&[("k", Value::Int(1))]);
        let ops = vec![DiffOp::addition(Key::from("k"), Value::Int(2))];
        let result = apply_mapping(&source, &ops).unwrap();
        assert_eq!(result[&Key::from("k")], Value::Int(2));
    }

    #[test]
    fn deleting_absent_key_fails() {
        let source = make_map(&[("k", Value::Int(1))]);
        let ops = vec![DiffOp::deletion(Key::from("missing"))];
        let err = apply_mapping(&source, &ops).unwrap_err();
        assert!(matches!(err, DiffError::MissingKey { op_index: 0, .. }));
    }

    #[test]
    fn movement_is_not_a_mapping_op() {
        let source = make_map(&[("k", Value::Int(1))]);
        let ops = vec![DiffOp::movement(Key::from("k"), Key::from("j"))];
        assert!(matches!(
            apply_mapping(&source, &ops).unwrap_err(),
            DiffError::UnsupportedOp { collection: "mapping", .. }
        ));
    }

    proptest! {
        #[test]
        fn patch_reproduces_target(source in arb_map(), target in arb_map()) {
            let ops = diff_mappings(&source, &target, &ValueEquality::default());
            let patched = apply_mapping(&source, &ops).unwrap();
            prop_assert!(default_equals(&Value::Map(patched), &Value::Map(target)));
        }

        #[test]
        fn self_diff_is_empty(source in arb_map()) {
            prop_assert!(diff_mappings(&source, &source, &ValueEquality::default()).is_empty());
        }

        #[test]
        fn op_order_does_not_matter(source in arb_map(), target in arb_map(), shift in 0usize..8) {
            let ops = diff_mappings(&source, &target, &ValueEquality::default());
            let expected = apply_mapping(&source, &ops).unwrap();

            let reversed: Vec<_> = ops.iter().rev().cloned().collect();
            prop_assert_eq!(&apply_mapping(&source, &reversed).unwrap(), &expected);

            let mut rotated = ops.clone();
            if !rotated.is_empty() {
                let by = shift % rotated.len();
                rotated.rotate_left(by);
            }
            prop_assert_eq!(&apply_mapping(&source, &rotated).unwrap(), &expected);
        }
    }
}
