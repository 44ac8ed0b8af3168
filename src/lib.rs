//! Ranges over ordered scalar domains and canonical sets of ranges.
//!
//! A [Range] is an immutable value bound to a [domain::ScalarDomain]. Ranges over discrete domains
//! (integers, strings, calendar dates) are normalized to half-open form and can be enumerated.
//! A [RangeSet] keeps its ranges sorted and merged, so that no two of them overlap or touch.
//!
//! # Example
//! ```
//! use range_algebra::{domain::IntDomain, Range, RangeSet};
//!
//! let int = |l, u| Range::new(IntDomain::default(), Some(l), Some(u)).unwrap();
//!
//! let a = RangeSet::from_ranges(IntDomain::default(), [int(1, 5), int(20, 30)]).unwrap();
//! let b = RangeSet::from_ranges(IntDomain::default(), [int(5, 10), int(20, 100)]).unwrap();
//! let d = a.difference([&b]).unwrap();
//! assert_eq!(d.to_string(), "{[1,5)}");
//! assert_eq!(d.values().unwrap().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
//! ```

pub mod domain;
mod error;
mod range;
mod set;

pub use error::{RangeError, Side};
pub use range::{Range, RangeBuilder, Steps};
pub use set::RangeSet;
