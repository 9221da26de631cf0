//! Sequence diff: a greedy positional edit script with move detection.
//!
//! The differ walks the target left to right against a working copy of the
//! source. For each target position it takes the leftmost matching element
//! at or after that position; a match elsewhere becomes a [`DiffOp::Movement`],
//! no match becomes a [`DiffOp::Addition`]. Whatever is left past the end of
//! the target is deleted from the highest position down.
//!
//! The result is stable for already-ordered prefixes but not length-minimal,
//! and costs O(n²) comparisons in the worst case.
//!
//! Positions in the script refer to the working copy as it stands when each
//! op runs, so a script must be replayed in order against the same source.

use tracing::{debug, warn};
use vdiff_types::{DiffOp, Value};

use crate::equality::{Comparator, ValueEquality};
use crate::error::{DiffError, DiffResult};

/// Compute the script that turns `source` into `target`.
pub fn diff_sequences<V, C>(source: &[V], target: &[V], cmp: &C) -> Vec<DiffOp<usize, V>>
where
    V: Clone,
    C: Comparator<V> + ?Sized,
{
    let mut ops = Vec::new();
    let mut working = source.to_vec();

    // Invariant: working.len() >= j at the top of every iteration.
    for (j, wanted) in target.iter().enumerate() {
        let found = working[j..]
            .iter()
            .position(|candidate| cmp.equals(wanted, candidate))
            .map(|offset| j + offset);

        match found {
            None => {
                working.insert(j, wanted.clone());
                ops.push(DiffOp::addition(j, wanted.clone()));
            }
            Some(i) if i == j => {}
            Some(i) => {
                let moved = working.remove(i);
                working.insert(j, moved);
                ops.push(DiffOp::movement(i, j));
            }
        }
    }

    for surplus in (target.len()..working.len()).rev() {
        ops.push(DiffOp::deletion(surplus));
    }

    debug!(
        source_len = source.len(),
        target_len = target.len(),
        ops = ops.len(),
        "sequence diff computed"
    );
    ops
}

/// [`diff_sequences`] with the default [`ValueEquality`].
pub fn diff_sequences_default(source: &[Value], target: &[Value]) -> Vec<DiffOp<usize>> {
    diff_sequences(source, target, &ValueEquality::default())
}

/// Replay `ops` in order against a copy of `source`.
///
/// Every position is checked before the working copy is touched, so a
/// mismatched script fails with [`DiffError::IndexOutOfRange`] instead of
/// corrupting the result. `source` itself is never modified.
pub fn apply_sequence<V: Clone>(source: &[V], ops: &[DiffOp<usize, V>]) -> DiffResult<Vec<V>> {
    let mut working = source.to_vec();

    for (op_index, op) in ops.iter().enumerate() {
        let len = working.len();
        match op {
            DiffOp::Addition { key, value } => {
                ensure_in_range(op_index, *key, len + 1, len)?;
                working.insert(*key, value.clone());
            }
            DiffOp::Deletion { key } => {
                ensure_in_range(op_index, *key, len, len)?;
                working.remove(*key);
            }
            DiffOp::Movement { old_key, new_key } => {
                ensure_in_range(op_index, *old_key, len, len)?;
                ensure_in_range(op_index, *new_key, len, len)?;
                let moved = working.remove(*old_key);
                working.insert(*new_key, moved);
            }
            DiffOp::Update { .. } => {
                warn!(op_index, "update op in a sequence script");
                return Err(DiffError::UnsupportedOp {
                    op_index,
                    kind: op.kind(),
                    collection: "sequence",
                });
            }
        }
    }

    debug!(
        source_len = source.len(),
        result_len = working.len(),
        ops = ops.len(),
        "sequence script applied"
    );
    Ok(working)
}

fn ensure_in_range(op_index: usize, index: usize, bound: usize, len: usize) -> DiffResult<()> {
    if index < bound {
        Ok(())
    } else {
        warn!(op_index, index, len, "sequence op out of range");
        Err(DiffError::IndexOutOfRange {
            op_index,
            index,
            len,
        })
    }
}
