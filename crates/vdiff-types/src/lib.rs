//! Foundation types for vdiff.
//!
//! This crate provides the value model that every diff and patch operates on,
//! plus the operation type that diffs are expressed in. Every other vdiff
//! crate depends on `vdiff-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- Closed recursive union of diffable data (null, bool, numbers, text, sequences, mappings, opaque)
//! - [`Key`] -- Mapping key (integer or text)
//! - [`Opaque`] -- Extension point for application-specific comparables
//! - [`DiffOp`] -- A single edit-script operation (addition, deletion, update, movement)
//! - [`OpSummary`] -- Per-kind operation counts for a script

pub mod error;
pub mod op;
pub mod opaque;
pub mod value;

pub use error::TypeError;
pub use op::{DiffOp, OpKind, OpSummary};
pub use opaque::{Opaque, OpaqueValue};
pub use value::{Key, Value};
