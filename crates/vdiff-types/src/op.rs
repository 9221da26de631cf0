//! Edit-script operations.
//!
//! A script is a list of [`DiffOp`]s. Sequence scripts use `usize` positions
//! that are relative to the evolving working copy at the time each op runs,
//! so they form an ordered program. Mapping scripts use stable keys and are
//! order-insensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A single edit-script operation.
///
/// The serde form is the flat wire record: a `type` discriminator plus the
/// variant's named fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffOp<K, V = Value> {
    /// Insert `value` at `key`.
    Addition { key: K, value: V },
    /// Remove whatever occupies `key`.
    Deletion { key: K },
    /// Replace the value at `key`. Mapping scripts only.
    Update {
        key: K,
        #[serde(rename = "newValue")]
        new_value: V,
    },
    /// Relocate the element at `old_key` to `new_key`. Sequence scripts only.
    Movement {
        #[serde(rename = "oldKey")]
        old_key: K,
        #[serde(rename = "newKey")]
        new_key: K,
    },
}

impl<K, V> DiffOp<K, V> {
    pub fn addition(key: K, value: V) -> Self {
        DiffOp::Addition { key, value }
    }

    pub fn deletion(key: K) -> Self {
        DiffOp::Deletion { key }
    }

    pub fn update(key: K, new_value: V) -> Self {
        DiffOp::Update { key, new_value }
    }

    pub fn movement(old_key: K, new_key: K) -> Self {
        DiffOp::Movement { old_key, new_key }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            DiffOp::Addition { .. } => OpKind::Addition,
            DiffOp::Deletion { .. } => OpKind::Deletion,
            DiffOp::Update { .. } => OpKind::Update,
            DiffOp::Movement { .. } => OpKind::Movement,
        }
    }

    /// The key this op primarily addresses (`old_key` for a movement).
    pub fn key(&self) -> &K {
        match self {
            DiffOp::Addition { key, .. }
            | DiffOp::Deletion { key }
            | DiffOp::Update { key, .. } => key,
            DiffOp::Movement { old_key, .. } => old_key,
        }
    }

    /// The payload carried by an addition or update.
    pub fn payload(&self) -> Option<&V> {
        match self {
            DiffOp::Addition { value, .. } => Some(value),
            DiffOp::Update { new_value, .. } => Some(new_value),
            DiffOp::Deletion { .. } | DiffOp::Movement { .. } => None,
        }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for DiffOp<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffOp::Addition { key, value } => write!(f, "Addition({key}, {value})"),
            DiffOp::Deletion { key } => write!(f, "Deletion({key})"),
            DiffOp::Update { key, new_value } => write!(f, "Update({key}, {new_value})"),
            DiffOp::Movement { old_key, new_key } => {
                write!(f, "Movement({old_key}, {new_key})")
            }
        }
    }
}

/// Discriminant of a [`DiffOp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpKind {
    Addition,
    Deletion,
    Update,
    Movement,
}

impl OpKind {
    /// The wire discriminator for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            OpKind::Addition => "addition",
            OpKind::Deletion => "deletion",
            OpKind::Update => "update",
            OpKind::Movement => "movement",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "addition" => Some(OpKind::Addition),
            "deletion" => Some(OpKind::Deletion),
            "update" => Some(OpKind::Update),
            "movement" => Some(OpKind::Movement),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-kind operation counts for a script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpSummary {
    pub additions: usize,
    pub deletions: usize,
    pub updates: usize,
    pub movements: usize,
}

impl OpSummary {
    pub fn of<K, V>(ops: &[DiffOp<K, V>]) -> Self {
        let mut summary = Self::default();
        for op in ops {
            match op.kind() {
                OpKind::Addition => summary.additions += 1,
                OpKind::Deletion => summary.deletions += 1,
                OpKind::Update => summary.updates += 1,
                OpKind::Movement => summary.movements += 1,
            }
        }
        summary
    }

    /// Total number of operations.
    pub fn total(&self) -> usize {
        self.additions + self.deletions + self.updates + self.movements
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
