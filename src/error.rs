use std::fmt::{self, Display};

use thiserror::Error;

/// The side of a range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Lower,
    Upper,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Lower => write!(f, "lower"),
            Side::Upper => write!(f, "upper"),
        }
    }
}

/// Errors raised by range and range set operations.
///
/// None of these are recovered internally, with one exception: [RangeError::SplitDifference]
/// is handled by [RangeSet::remove](crate::RangeSet::remove), which splits the affected element instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A bound value is not a member of the range's domain.
    #[error("invalid {side} bound for {domain} range: {value}")]
    InvalidBound {
        side: Side,
        domain: &'static str,
        value: String,
    },

    /// The upper bound orders before the lower bound.
    #[error("upper bound {upper} is less than lower bound {lower}")]
    InvertedBounds { lower: String, upper: String },

    /// A binary operation received an operand bound to a differently configured domain.
    #[error("expected an operand from {expected}, got one from {found}")]
    DomainMismatch { expected: String, found: String },

    /// A scalar comparand is not a member of the range's domain.
    #[error("unsupported operand for `{op}` on {domain} range: {value}")]
    UnsupportedOperand {
        op: &'static str,
        domain: &'static str,
        value: String,
    },

    /// The union of two ranges that neither overlap nor touch.
    #[error("ranges must be either adjacent or overlapping")]
    DisjointUnion,

    /// The difference would split the range into two fragments.
    #[error("other range must not be strictly within this range")]
    SplitDifference,

    /// A stepping operation was requested on a continuous domain.
    #[error("{domain} domain is not discrete")]
    NotDiscrete { domain: &'static str },

    /// Stepping or offsetting a value left the domain.
    #[error("stepping {value} leaves the {domain} domain")]
    Overflow { domain: &'static str, value: String },

    /// Enumeration was requested on a range with an unbounded side.
    #[error("cannot enumerate an unbounded range")]
    Unbounded,
}
