//! Diff engine for vdiff.
//!
//! Computes edit scripts between two ordered sequences or two keyed mappings
//! and replays them to reconstruct the target collection.
//!
//! # Key Types
//!
//! - [`ValueEquality`] / [`Comparator`] -- Deep, type-aware equality and the injectable comparator seam
//! - [`diff_sequences`] / [`apply_sequence`] -- Greedy positional diff with move detection
//! - [`diff_mappings`] / [`apply_mapping`] -- Keyed diff over any [`Mapping`]
//! - [`Diffable`] -- `diff_to` / `diff_from` / `apply_diffs` on collections
//! - [`EqualityConfig`] -- Float tolerances, loadable from TOML

pub mod config;
pub mod diffable;
pub mod equality;
pub mod error;
pub mod mapping;
pub mod sequence;

pub use config::EqualityConfig;
pub use diffable::Diffable;
pub use equality::{default_equals, Comparator, NativeEq, ValueEquality};
pub use error::{DiffError, DiffResult};
pub use mapping::{apply_mapping, diff_mappings, Mapping};
pub use sequence::{apply_sequence, diff_sequences, diff_sequences_default};

#[cfg(test)]
pub(crate) mod testing;
