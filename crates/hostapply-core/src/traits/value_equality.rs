//! Equality semantics for attribute values.
//!
//! Two rules agree on an attribute when their values are the same under the
//! active strategy. The strategy is handed to the planner explicitly.

use crate::models::AttributeValue;

/// Decides whether two attribute values count as the same.
pub trait ValueEquality: Send + Sync {
    /// Whether `a` and `b` are the same value.
    fn same(&self, a: &AttributeValue, b: &AttributeValue) -> bool;

    /// Strategy name for logs.
    fn name(&self) -> &str;
}

/// Structural equality, no coercion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictEquality;

impl ValueEquality for StrictEquality {
    fn same(&self, a: &AttributeValue, b: &AttributeValue) -> bool {
        a == b
    }

    fn name(&self) -> &str {
        "strict"
    }
}

/// Type-aware equality.
///
/// - `Int` equals `Float` only when the float is integral, inside the `i64`
///   range, and converts to exactly that integer. The relation is transitive.
/// - Strings compare after trimming surrounding whitespace.
/// - `IdList` compares element-wise, order included.
/// - Floats use total ordering, so `NaN` equals itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedEquality;

impl ValueEquality for TypedEquality {
    fn same(&self, a: &AttributeValue, b: &AttributeValue) -> bool {
        use AttributeValue::*;

        match (a, b) {
            (Int(x), Float(y)) | (Float(y), Int(x)) => int_equals_float(*x, *y),
            (Float(x), Float(y)) => x.total_cmp(y).is_eq(),
            (Str(x), Str(y)) => x.trim() == y.trim(),
            _ => a == b,
        }
    }

    fn name(&self) -> &str {
        "typed"
    }
}

/// Lower and upper (exclusive) bounds of `i64` as exact `f64` values.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

fn int_equals_float(x: i64, y: f64) -> bool {
    y.fract() == 0.0 && (I64_MIN_F64..I64_END_F64).contains(&y) && y as i64 == x
}
