//! Error types for the diff crate.

use vdiff_types::OpKind;

/// Errors that can occur while applying a script or loading configuration.
///
/// Diffing itself never fails; every error here is a contract violation by
/// the caller or a bad configuration file.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A sequence op addressed a position outside the working copy.
    #[error("op #{op_index}: position {index} out of range for length {len}")]
    IndexOutOfRange {
        op_index: usize,
        index: usize,
        len: usize,
    },

    /// A mapping deletion named a key that is not present.
    #[error("op #{op_index}: key {key} not present")]
    MissingKey { op_index: usize, key: String },

    /// The op kind has no meaning for this collection kind.
    #[error("op #{op_index}: {kind} is not supported on a {collection}")]
    UnsupportedOp {
        op_index: usize,
        kind: OpKind,
        collection: &'static str,
    },

    /// Configuration could not be parsed or holds an invalid value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
