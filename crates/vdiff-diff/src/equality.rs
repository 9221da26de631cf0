//! Deep, type-aware equality over [`Value`].
//!
//! [`ValueEquality`] is the default comparator for every differ. It is total:
//! kinds it does not know how to pair are simply unequal.

use vdiff_types::Value;

/// Default tolerance for double-precision floats.
pub const DOUBLE_TOLERANCE: f64 = 1e-9;

/// Default tolerance for single-precision floats.
pub const SINGLE_TOLERANCE: f32 = 1e-6;

/// An equality strategy used to decide whether two elements are "the same".
///
/// Implemented for any `Fn(&V, &V) -> bool`, so closures can be passed
/// wherever a comparator is expected.
pub trait Comparator<V: ?Sized> {
    fn equals(&self, a: &V, b: &V) -> bool;
}

impl<V: ?Sized, F> Comparator<V> for F
where
    F: Fn(&V, &V) -> bool,
{
    fn equals(&self, a: &V, b: &V) -> bool {
        self(a, b)
    }
}

/// Comparator that defers to `PartialEq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeEq;

impl<V: PartialEq + ?Sized> Comparator<V> for NativeEq {
    fn equals(&self, a: &V, b: &V) -> bool {
        a == b
    }
}

/// Deep equality with float tolerances.
///
/// Rules, in order:
/// - `Null` equals only `Null`.
/// - Mappings are equal when their key sets match and every paired value is
///   equal; sequences when lengths match and elements are pairwise equal.
/// - Text, booleans and integers use native equality. A boolean never equals
///   a number.
/// - Doubles are equal within `double_tolerance`, singles within
///   `single_tolerance`. A double against a single is compared in double
///   precision with the single tolerance.
/// - Opaque values defer to their own equality when the concrete types match.
/// - Every other pairing is unequal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueEquality {
    pub double_tolerance: f64,
    pub single_tolerance: f32,
}

impl Default for ValueEquality {
    fn default() -> Self {
        Self {
            double_tolerance: DOUBLE_TOLERANCE,
            single_tolerance: SINGLE_TOLERANCE,
        }
    }
}

impl ValueEquality {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,

            (Value::Map(left), Value::Map(right)) => {
                left.len() == right.len()
                    && left.iter().all(|(key, lv)| {
                        right.get(key).map_or(false, |rv| self.equals(lv, rv))
                    })
            }
            (Value::Seq(left), Value::Seq(right)) => {
                left.len() == right.len()
                    && left.iter().zip(right).all(|(l, r)| self.equals(l, r))
            }

            (Value::Text(l), Value::Text(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Int(l), Value::Int(r)) => l == r,

            (Value::Double(l), Value::Double(r)) => (l - r).abs() < self.double_tolerance,
            (Value::Single(l), Value::Single(r)) => (l - r).abs() < self.single_tolerance,
            (Value::Double(d), Value::Single(s)) | (Value::Single(s), Value::Double(d)) => {
                (d - f64::from(*s)).abs() < f64::from(self.single_tolerance)
            }

            (Value::Opaque(l), Value::Opaque(r)) => l == r,

            _ => false,
        }
    }

    /// Compare possibly-absent values; absence is treated as `Null`.
    pub fn equals_optional(&self, a: Option<&Value>, b: Option<&Value>) -> bool {
        let a = a.unwrap_or(&Value::Null);
        let b = b.unwrap_or(&Value::Null);
        self.equals(a, b)
    }
}

impl Comparator<Value> for ValueEquality {
    fn equals(&self, a: &Value, b: &Value) -> bool {
        ValueEquality::equals(self, a, b)
    }
}

/// Deep equality with the default tolerances.
pub fn default_equals(a: &Value, b: &Value) -> bool {
    ValueEquality::default().equals(a, b)
}
