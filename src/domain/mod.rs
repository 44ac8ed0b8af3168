//! Scalar domains describe the values a [Range](crate::Range) ranges over.
//!
//! A domain is a configuration value, not a type hierarchy: two ranges are compatible only
//! if they carry equal domain descriptors. Optional behavior is exposed as capabilities:
//!
//! - [Discrete]: successor/predecessor stepping, queried at runtime through [ScalarDomain::discrete].
//!   Ranges over discrete domains are normalized to half-open form and can be enumerated.
//! - [Offsettable]: shifting values by an offset, checked statically.

#[cfg(feature = "dates")]
mod date;
mod float;
mod int;
mod string;

use std::{cmp::Ordering, fmt::Debug};

#[cfg(feature = "dates")]
pub use date::{CalendarUnit, DateDomain, DateTimeDomain, DurationDomain, Period, WeekStart};
pub use float::FloatDomain;
pub use int::IntDomain;
pub use string::StrDomain;

/// A totally ordered set of scalar values.
pub trait ScalarDomain: Clone + Debug + PartialEq {
    /// The values of this domain.
    type Value: Clone + Debug + PartialOrd;

    /// A short name used in error messages, e.g. `"int"`.
    fn name(&self) -> &'static str;

    /// Returns whether `value` belongs to this domain.
    fn is_member(&self, _value: &Self::Value) -> bool {
        true
    }

    /// Compares two members of this domain.
    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    /// Returns the stepping capability of this domain, if it is discrete.
    fn discrete(&self) -> Option<&dyn Discrete<Self::Value>> {
        None
    }
}

/// Successor and predecessor of values in a discrete domain.
///
/// Both return `None` if the step would leave the domain.
pub trait Discrete<T> {
    fn successor(&self, value: &T) -> Option<T>;

    fn predecessor(&self, value: &T) -> Option<T>;

    /// Returns the last value of the sequence `first`, `successor(first)`, ... that orders before `end`,
    /// or `None` if `first` itself does not.
    ///
    /// The default walks the sequence. Domains whose steps can be undone by [predecessor](Self::predecessor)
    /// override it with a direct computation.
    fn last_before(&self, first: &T, end: &T) -> Option<T>
    where
        T: Clone + PartialOrd,
    {
        step_until(self, first, end)
    }
}

/// Steps from `first` while the successor orders before `end`.
pub(crate) fn step_until<T, S>(stepper: &S, first: &T, end: &T) -> Option<T>
where
    T: Clone + PartialOrd,
    S: Discrete<T> + ?Sized,
{
    if !(first < end) {
        return None;
    }
    let mut last = first.clone();
    while let Some(next) = stepper.successor(&last) {
        if !(next < *end) {
            break;
        }
        last = next;
    }
    Some(last)
}

/// Domains whose values can be shifted by an offset.
pub trait Offsettable: ScalarDomain {
    type Offset: Debug;

    /// Shifts `value` by `by`. Returns `None` if the result is not in the domain.
    fn offset(&self, value: &Self::Value, by: &Self::Offset) -> Option<Self::Value>;
}
