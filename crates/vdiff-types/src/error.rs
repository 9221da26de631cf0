use thiserror::Error;

/// Errors produced by value conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{kind} values have no JSON representation")]
    Unrepresentable { kind: &'static str },

    #[error("non-finite float cannot be represented in JSON")]
    NonFiniteFloat,
}
