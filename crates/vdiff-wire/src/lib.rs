//! Wire format for vdiff.
//!
//! Each [`DiffOp`](vdiff_types::DiffOp) travels as a flat JSON record: a
//! `type` discriminator (`"addition"`, `"deletion"`, `"update"`,
//! `"movement"`) plus the named fields of that case. A record that cannot be
//! decoded yields no op rather than an error from deep inside the parser.

pub mod codec;
pub mod error;

pub use codec::{Record, WireCodec};
pub use error::{WireError, WireResult};
