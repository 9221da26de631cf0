//! Opaque values: anything outside the closed [`Value`](crate::Value) union.
//!
//! An opaque value is compared only by its own native equality, and only
//! against another opaque value of the same concrete type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A comparable payload that the value model does not understand.
///
/// Blanket-implemented for every `T: PartialEq + Debug + Send + Sync + 'static`,
/// so applications never implement it by hand.
pub trait OpaqueValue: Any + fmt::Debug + Send + Sync {
    /// Upcast for type-checked comparison.
    fn as_any(&self) -> &dyn Any;

    /// Native equality. Returns `false` when `other` is a different concrete type.
    fn eq_opaque(&self, other: &dyn OpaqueValue) -> bool;

    /// Name of the concrete type, used for display and error messages.
    fn type_name(&self) -> &'static str;
}

impl<T> OpaqueValue for T
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_opaque(&self, other: &dyn OpaqueValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Shared handle to an immutable opaque payload.
#[derive(Clone)]
pub struct Opaque(Arc<dyn OpaqueValue>);

impl Opaque {
    /// Wrap any natively comparable value.
    pub fn new<T: OpaqueValue>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the payload as `T`, if that is its concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_opaque(other.0.as_ref())
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:?})", self.0)
    }
}
