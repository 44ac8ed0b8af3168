//! Ordering of range bounds.
//!
//! Lower and upper bounds order differently when their values are equal: an inclusive lower
//! bound starts earlier than an exclusive one, while an inclusive upper bound ends later.
//! An unbounded lower bound is the smallest lower bound, an unbounded upper bound the largest upper bound.

use std::{cmp::Ordering, ops::Bound};

use Bound::{Excluded, Included, Unbounded};

use crate::domain::ScalarDomain;

/// Returns the value of a bound, if it has one.
pub(crate) fn value<T>(bound: &Bound<T>) -> Option<&T> {
    match bound {
        Included(v) | Excluded(v) => Some(v),
        Unbounded => None,
    }
}

/// Swaps the inclusivity of a bound. Unbounded stays unbounded.
pub(crate) fn flip<T>(bound: Bound<T>) -> Bound<T> {
    match bound {
        Included(v) => Excluded(v),
        Excluded(v) => Included(v),
        Unbounded => Unbounded,
    }
}

pub(crate) fn cmp_lower<D: ScalarDomain>(
    domain: &D,
    a: Bound<&D::Value>,
    b: Bound<&D::Value>,
) -> Ordering {
    match (a, b) {
        (Unbounded, Unbounded) => Ordering::Equal,
        (Unbounded, _) => Ordering::Less,
        (_, Unbounded) => Ordering::Greater,
        (Included(x), Included(y)) | (Excluded(x), Excluded(y)) => domain.compare(x, y),
        (Included(x), Excluded(y)) => domain.compare(x, y).then(Ordering::Less),
        (Excluded(x), Included(y)) => domain.compare(x, y).then(Ordering::Greater),
    }
}

pub(crate) fn cmp_upper<D: ScalarDomain>(
    domain: &D,
    a: Bound<&D::Value>,
    b: Bound<&D::Value>,
) -> Ordering {
    match (a, b) {
        (Unbounded, Unbounded) => Ordering::Equal,
        (Unbounded, _) => Ordering::Greater,
        (_, Unbounded) => Ordering::Less,
        (Included(x), Included(y)) | (Excluded(x), Excluded(y)) => domain.compare(x, y),
        (Included(x), Excluded(y)) => domain.compare(x, y).then(Ordering::Greater),
        (Excluded(x), Included(y)) => domain.compare(x, y).then(Ordering::Less),
    }
}

/// Returns whether the bounds hold the same value with the same inclusivity.
pub(crate) fn same<D: ScalarDomain>(domain: &D, a: Bound<&D::Value>, b: Bound<&D::Value>) -> bool {
    match (a, b) {
        (Unbounded, Unbounded) => true,
        (Included(x), Included(y)) | (Excluded(x), Excluded(y)) => {
            domain.compare(x, y) == Ordering::Equal
        }
        _ => false,
    }
}
