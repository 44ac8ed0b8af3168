use std::cmp::Ordering;

use super::{Offsettable, ScalarDomain};

/// Finite and infinite `f64` values. `NaN` is not a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloatDomain;

impl ScalarDomain for FloatDomain {
    type Value = f64;

    fn name(&self) -> &'static str {
        "float"
    }

    fn is_member(&self, value: &f64) -> bool {
        !value.is_nan()
    }

    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        // only NaN is unordered, and it is never a member
        a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
    }
}

impl Offsettable for FloatDomain {
    type Offset = f64;

    fn offset(&self, value: &f64, by: &f64) -> Option<f64> {
        let shifted = value + by;
        self.is_member(&shifted).then_some(shifted)
    }
}
