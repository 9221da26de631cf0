//! Method-style access to the differs and appliers.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use vdiff_types::DiffOp;

use crate::equality::Comparator;
use crate::error::DiffResult;
use crate::mapping::{apply_mapping, diff_mappings};
use crate::sequence::{apply_sequence, diff_sequences};

/// A collection that can be diffed against and patched into another of its kind.
///
/// `diff_from` recomputes the script in the opposite direction; there is no
/// way to invert an existing script, because sequence positions depend on the
/// order in which the forward script was produced.
pub trait Diffable: Sized {
    type Key;
    type Item;

    /// Script that turns `self` into `other`.
    fn diff_to<C>(&self, other: &Self, cmp: &C) -> Vec<DiffOp<Self::Key, Self::Item>>
    where
        C: Comparator<Self::Item> + ?Sized;

    /// Script that turns `other` into `self`.
    fn diff_from<C>(&self, other: &Self, cmp: &C) -> Vec<DiffOp<Self::Key, Self::Item>>
    where
        C: Comparator<Self::Item> + ?Sized,
    {
        other.diff_to(self, cmp)
    }

    /// Replay a script against a copy of `self`.
    fn apply_diffs(&self, ops: &[DiffOp<Self::Key, Self::Item>]) -> DiffResult<Self>;
}

impl<V: Clone> Diffable for Vec<V> {
    type Key = usize;
    type Item = V;

    fn diff_to<C>(&self, other: &Self, cmp: &C) -> Vec<DiffOp<usize, V>>
    where
        C: Comparator<V> + ?Sized,
    {
        diff_sequences(self, other, cmp)
    }

    fn apply_diffs(&self, ops: &[DiffOp<usize, V>]) -> DiffResult<Self> {
        apply_sequence(self, ops)
    }
}

impl<K, V> Diffable for BTreeMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    type Key = K;
    type Item = V;

    fn diff_to<C>(&self, other: &Self, cmp: &C) -> Vec<DiffOp<K, V>>
    where
        C: Comparator<V> + ?Sized,
    {
        diff_mappings(self, other, cmp)
    }

    fn apply_diffs(&self, ops: &[DiffOp<K, V>]) -> DiffResult<Self> {
        apply_mapping(self, ops)
    }
}

impl<K, V, S> Diffable for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Key = K;
    type Item = V;

    fn diff_to<C>(&self, other: &Self, cmp: &C) -> Vec<DiffOp<K, V>>
    where
        C: Comparator<V> + ?Sized,
    {
        diff_mappings(self, other, cmp)
    }

    fn apply_diffs(&self, ops: &[DiffOp<K, V>]) -> DiffResult<Self> {
        apply_mapping(self, ops)
    }
}
