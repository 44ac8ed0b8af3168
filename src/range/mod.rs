mod bound;
mod discrete;

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::Bound,
};

use num_traits::PrimInt;
use quickcheck::Arbitrary;
use smallvec::{smallvec, SmallVec};

use Bound::{Excluded, Included, Unbounded};

pub use discrete::Steps;

use crate::{
    domain::{IntDomain, Offsettable, ScalarDomain},
    RangeError, Side,
};

/// A range of values of a [ScalarDomain], possibly empty and possibly unbounded on either side.
///
/// Ranges are values: every operation returns a new range and leaves its operands untouched.
/// Ranges over a [discrete](ScalarDomain::discrete) domain are normalized to the half-open form
/// `[lower, upper)` when they are created.
///
/// Binary operations require both operands to carry equal domains and fail with
/// [RangeError::DomainMismatch] otherwise. Scalar operands must be members of the domain.
///
/// # Example
/// ```
/// use range_algebra::{domain::IntDomain, Range};
///
/// let a = Range::new(IntDomain::default(), Some(1), Some(10)).unwrap();
/// let b = Range::new(IntDomain::default(), Some(5), Some(18)).unwrap();
/// assert!(a.overlap(&b).unwrap());
/// assert_eq!(a.union(&b).unwrap(), Range::new(IntDomain::default(), Some(1), Some(18)).unwrap());
/// assert_eq!(a.to_string(), "[1,10)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Range<D: ScalarDomain> {
    domain: D,
    /// `None` if the range is empty.
    bounds: Option<(Bound<D::Value>, Bound<D::Value>)>,
}

impl<D: ScalarDomain> Range<D> {
    /// Creates the range `[lower, upper)`. A `None` bound leaves that side unbounded.
    pub fn new(
        domain: D,
        lower: Option<D::Value>,
        upper: Option<D::Value>,
    ) -> Result<Self, RangeError> {
        Self::from_bounds(
            domain,
            lower.map_or(Unbounded, Included),
            upper.map_or(Unbounded, Excluded),
        )
    }

    /// Creates a range from explicit bounds.
    ///
    /// Fails if a bound is not a member of the domain or if the upper bound orders before the lower bound.
    /// Equal bounds produce an empty range unless both are inclusive.
    pub fn from_bounds(
        domain: D,
        lower: Bound<D::Value>,
        upper: Bound<D::Value>,
    ) -> Result<Self, RangeError> {
        for (side, b) in [(Side::Lower, &lower), (Side::Upper, &upper)] {
            if let Some(v) = bound::value(b) {
                if !domain.is_member(v) {
                    return Err(RangeError::InvalidBound {
                        side,
                        domain: domain.name(),
                        value: format!("{v:?}"),
                    });
                }
            }
        }
        if let (Some(l), Some(u)) = (bound::value(&lower), bound::value(&upper)) {
            if domain.compare(l, u) == Ordering::Greater {
                return Err(RangeError::InvertedBounds {
                    lower: format!("{l:?}"),
                    upper: format!("{u:?}"),
                });
            }
        }

        let (lower, upper) = match domain.discrete() {
            Some(stepper) => discrete::canonicalize(domain.name(), stepper, lower, upper)?,
            None => (lower, upper),
        };

        let empty = match (&lower, &upper) {
            (Included(l), Included(u)) => domain.compare(l, u) == Ordering::Greater,
            (Included(l) | Excluded(l), Included(u) | Excluded(u)) => {
                domain.compare(l, u) != Ordering::Less
            }
            _ => false,
        };
        Ok(Range {
            domain,
            bounds: (!empty).then_some((lower, upper)),
        })
    }

    /// The empty range. It contains no values and is distinct from the [full](Self::full) range.
    pub fn empty(domain: D) -> Self {
        Range {
            domain,
            bounds: None,
        }
    }

    /// The range containing every value of the domain.
    pub fn full(domain: D) -> Self {
        Range {
            domain,
            bounds: Some((Unbounded, Unbounded)),
        }
    }

    /// The range `[value, value]`.
    pub fn singleton(domain: D, value: D::Value) -> Result<Self, RangeError> {
        Self::from_bounds(domain, Included(value.clone()), Included(value))
    }

    /// Starts building a range, see [RangeBuilder].
    pub fn builder(domain: D) -> RangeBuilder<D> {
        RangeBuilder {
            domain,
            lower: None,
            upper: None,
            lower_inc: true,
            upper_inc: false,
        }
    }

    /// Returns a builder initialized with this range's bounds. Fields set on the builder replace
    /// the corresponding fields of this range; [RangeBuilder::build] validates the result again.
    ///
    /// # Example
    /// ```
    /// use range_algebra::{domain::FloatDomain, Range};
    ///
    /// let r = Range::new(FloatDomain, Some(1.0), Some(2.0)).unwrap();
    /// let r = r.replace().upper(10.0).upper_inc(true).build().unwrap();
    /// assert_eq!(r.to_string(), "[1,10]");
    /// assert!(r.replace().lower(11.0).build().is_err());
    /// ```
    pub fn replace(&self) -> RangeBuilder<D> {
        let mut builder = Self::builder(self.domain.clone());
        if let Some(v) = self.lower() {
            builder = builder.lower(v.clone()).lower_inc(self.lower_inc());
        }
        if let Some(v) = self.upper() {
            builder = builder.upper(v.clone()).upper_inc(self.upper_inc());
        }
        builder
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// The lower bound. Empty ranges report [Bound::Unbounded].
    pub fn lower_bound(&self) -> Bound<&D::Value> {
        match &self.bounds {
            Some((lower, _)) => lower.as_ref(),
            None => Unbounded,
        }
    }

    /// The upper bound. Empty ranges report [Bound::Unbounded].
    pub fn upper_bound(&self) -> Bound<&D::Value> {
        match &self.bounds {
            Some((_, upper)) => upper.as_ref(),
            None => Unbounded,
        }
    }

    /// The lower bound value, or `None` if the range is empty or unbounded below.
    pub fn lower(&self) -> Option<&D::Value> {
        bound::value(&self.lower_bound()).copied()
    }

    /// The upper bound value, or `None` if the range is empty or unbounded above.
    pub fn upper(&self) -> Option<&D::Value> {
        bound::value(&self.upper_bound()).copied()
    }

    pub fn lower_inc(&self) -> bool {
        matches!(self.lower_bound(), Included(_))
    }

    pub fn upper_inc(&self) -> bool {
        matches!(self.upper_bound(), Included(_))
    }

    /// Returns whether `other` is bound to the same domain as this range.
    pub fn is_valid_range(&self, other: &Self) -> bool {
        self.domain == other.domain
    }

    /// Returns whether `value` is a member of this range's domain.
    pub fn is_valid_scalar(&self, value: &D::Value) -> bool {
        self.domain.is_member(value)
    }

    fn check_range(&self, other: &Self) -> Result<(), RangeError> {
        if self.is_valid_range(other) {
            Ok(())
        } else {
            Err(RangeError::DomainMismatch {
                expected: format!("{:?}", self.domain),
                found: format!("{:?}", other.domain),
            })
        }
    }

    fn check_scalar(&self, op: &'static str, value: &D::Value) -> Result<(), RangeError> {
        if self.is_valid_scalar(value) {
            Ok(())
        } else {
            Err(RangeError::UnsupportedOperand {
                op,
                domain: self.domain.name(),
                value: format!("{value:?}"),
            })
        }
    }

    fn cmp(&self, a: &D::Value, b: &D::Value) -> Ordering {
        self.domain.compare(a, b)
    }

    /// Returns whether every value of `other` is in this range. The empty range is contained in every range.
    pub fn contains(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        if other.is_empty() {
            return Ok(true);
        }
        if self.is_empty() {
            return Ok(false);
        }
        Ok(other.starts_after(self)? && other.ends_before(self)?)
    }

    /// Returns whether `value` lies within the bounds of this range.
    pub fn contains_value(&self, value: &D::Value) -> Result<bool, RangeError> {
        self.check_scalar("contains", value)?;
        let Some((lower, upper)) = &self.bounds else {
            return Ok(false);
        };
        let above = match lower {
            Unbounded => true,
            Included(l) => self.cmp(l, value) != Ordering::Greater,
            Excluded(l) => self.cmp(l, value) == Ordering::Less,
        };
        let below = match upper {
            Unbounded => true,
            Included(u) => self.cmp(u, value) != Ordering::Less,
            Excluded(u) => self.cmp(u, value) == Ordering::Greater,
        };
        Ok(above && below)
    }

    /// Returns whether the two ranges share at least one value.
    pub fn overlap(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(false);
        }
        let (a, b) = if self.ends_before(other)? {
            (self, other)
        } else {
            (other, self)
        };
        Ok(match (a.upper_bound(), b.lower_bound()) {
            (Unbounded, _) | (_, Unbounded) => true,
            (Included(u), Included(l)) => self.cmp(u, l) != Ordering::Less,
            (Included(u) | Excluded(u), Included(l) | Excluded(l)) => {
                self.cmp(u, l) == Ordering::Greater
            }
        })
    }

    /// Returns whether the ranges share no value but leave no gap between them, i.e.
    /// one ends exactly where the other starts and exactly one of the touching bounds is inclusive.
    pub fn adjacent(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(false);
        }
        let touches = |upper: Bound<&D::Value>, lower: Bound<&D::Value>| match (upper, lower) {
            (Included(u), Excluded(l)) | (Excluded(u), Included(l)) => {
                self.cmp(u, l) == Ordering::Equal
            }
            _ => false,
        };
        Ok(touches(self.upper_bound(), other.lower_bound())
            || touches(other.upper_bound(), self.lower_bound()))
    }

    /// Returns the smallest range covering both ranges.
    /// Fails with [RangeError::DisjointUnion] unless the ranges overlap or are adjacent.
    pub fn union(&self, other: &Self) -> Result<Self, RangeError> {
        self.check_range(other)?;
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if !(self.overlap(other)? || self.adjacent(other)?) {
            return Err(RangeError::DisjointUnion);
        }
        let lower = if self.starts_after(other)? {
            other.lower_bound()
        } else {
            self.lower_bound()
        };
        let upper = if self.ends_before(other)? {
            other.upper_bound()
        } else {
            self.upper_bound()
        };
        Self::from_bounds(self.domain.clone(), lower.cloned(), upper.cloned())
    }

    /// Removes the values of `other` from this range.
    ///
    /// Fails with [RangeError::SplitDifference] if `other` lies strictly inside this range, touching neither
    /// of its ends, since the result would consist of two fragments. See [subtract](Self::subtract) for
    /// a variant that returns the fragments instead.
    pub fn difference(&self, other: &Self) -> Result<Self, RangeError> {
        self.check_range(other)?;
        if self.is_empty() || other.is_empty() || !self.overlap(other)? {
            return Ok(self.clone());
        }
        if other.contains(self)? {
            return Ok(Self::empty(self.domain.clone()));
        }
        if self.contains(other)? && !(self.starts_with(other)? || self.ends_with(other)?) {
            return Err(RangeError::SplitDifference);
        }
        if self.ends_before(other)? {
            self.with_upper(bound::flip(other.lower_bound().cloned()))
        } else if self.starts_after(other)? {
            self.with_lower(bound::flip(other.upper_bound().cloned()))
        } else {
            Ok(Self::empty(self.domain.clone()))
        }
    }

    /// Removes the values of `other` from this range, returning zero, one, or two fragments in ascending order.
    ///
    /// # Example
    /// ```
    /// use range_algebra::{domain::IntDomain, Range};
    ///
    /// let r = Range::new(IntDomain::default(), Some(0), Some(10)).unwrap();
    /// let hole = Range::new(IntDomain::default(), Some(3), Some(5)).unwrap();
    /// let fragments = r.subtract(&hole).unwrap();
    /// assert_eq!(fragments.len(), 2);
    /// assert_eq!(fragments[0].to_string(), "[0,3)");
    /// assert_eq!(fragments[1].to_string(), "[5,10)");
    /// ```
    pub fn subtract(&self, other: &Self) -> Result<SmallVec<[Self; 2]>, RangeError> {
        match self.difference(other) {
            Ok(r) if r.is_empty() => Ok(SmallVec::new()),
            Ok(r) => Ok(smallvec![r]),
            Err(RangeError::SplitDifference) => {
                let left = self.with_upper(bound::flip(other.lower_bound().cloned()))?;
                let right = self.with_lower(bound::flip(other.upper_bound().cloned()))?;
                Ok(smallvec![left, right])
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the range of values shared by both ranges, empty if there are none.
    pub fn intersection(&self, other: &Self) -> Result<Self, RangeError> {
        self.check_range(other)?;
        if !self.overlap(other)? {
            return Ok(Self::empty(self.domain.clone()));
        }
        let lower = if self.starts_after(other)? {
            self.lower_bound()
        } else {
            other.lower_bound()
        };
        let upper = if self.ends_before(other)? {
            self.upper_bound()
        } else {
            other.upper_bound()
        };
        Self::from_bounds(self.domain.clone(), lower.cloned(), upper.cloned())
    }

    /// Returns whether both ranges have the same lower bound, including its inclusivity.
    pub fn starts_with(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(self.is_empty() && other.is_empty());
        }
        Ok(bound::same(
            &self.domain,
            self.lower_bound(),
            other.lower_bound(),
        ))
    }

    /// Returns whether this range has the inclusive lower bound `value`.
    pub fn starts_with_value(&self, value: &D::Value) -> Result<bool, RangeError> {
        self.check_scalar("starts_with", value)?;
        Ok(matches!(self.lower_bound(), Included(l) if self.cmp(l, value) == Ordering::Equal))
    }

    /// Returns whether both ranges have the same upper bound, including its inclusivity.
    pub fn ends_with(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(self.is_empty() && other.is_empty());
        }
        Ok(bound::same(
            &self.domain,
            self.upper_bound(),
            other.upper_bound(),
        ))
    }

    /// Returns whether `value` is the last value of this range.
    ///
    /// For discrete domains this compares against [last](Self::last), otherwise the upper bound
    /// must be inclusive and equal to `value`.
    pub fn ends_with_value(&self, value: &D::Value) -> Result<bool, RangeError> {
        self.check_scalar("ends_with", value)?;
        if self.domain.discrete().is_some() {
            return Ok(self
                .last()?
                .is_some_and(|last| self.cmp(&last, value) == Ordering::Equal));
        }
        Ok(matches!(self.upper_bound(), Included(u) if self.cmp(u, value) == Ordering::Equal))
    }

    /// Returns whether this range starts no earlier than `other`.
    ///
    /// On equal bound values, an inclusive lower bound starts earlier than an exclusive one.
    pub fn starts_after(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        Ok(
            bound::cmp_lower(&self.domain, self.lower_bound(), other.lower_bound())
                != Ordering::Less,
        )
    }

    /// Returns whether the lower bound is at least `value`. An unbounded lower bound never starts after a value.
    pub fn starts_after_value(&self, value: &D::Value) -> Result<bool, RangeError> {
        self.check_scalar("starts_after", value)?;
        Ok(match self.lower_bound() {
            Included(l) | Excluded(l) => self.cmp(l, value) != Ordering::Less,
            Unbounded => false,
        })
    }

    /// Returns whether this range ends no later than `other`.
    ///
    /// On equal bound values, an inclusive upper bound ends later than an exclusive one.
    pub fn ends_before(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        Ok(
            bound::cmp_upper(&self.domain, self.upper_bound(), other.upper_bound())
                != Ordering::Greater,
        )
    }

    /// Returns whether the upper bound is at most `value`. An unbounded upper bound never ends before a value.
    pub fn ends_before_value(&self, value: &D::Value) -> Result<bool, RangeError> {
        self.check_scalar("ends_before", value)?;
        Ok(match self.upper_bound() {
            Included(u) | Excluded(u) => self.cmp(u, value) != Ordering::Greater,
            Unbounded => false,
        })
    }

    /// Returns whether every value of this range is smaller than every value of `other`.
    pub fn left_of(&self, other: &Self) -> Result<bool, RangeError> {
        self.check_range(other)?;
        Ok(self.ends_before(other)? && !self.overlap(other)?)
    }

    /// Returns whether every value of this range is greater than every value of `other`.
    pub fn right_of(&self, other: &Self) -> Result<bool, RangeError> {
        other.left_of(self)
    }

    fn with_lower(&self, lower: Bound<D::Value>) -> Result<Self, RangeError> {
        Self::from_bounds(self.domain.clone(), lower, self.upper_bound().cloned())
    }

    fn with_upper(&self, upper: Bound<D::Value>) -> Result<Self, RangeError> {
        Self::from_bounds(self.domain.clone(), self.lower_bound().cloned(), upper)
    }

    /// The range from the lower bound of `self` to the upper bound of `last`, without validation.
    pub(crate) fn join(&self, last: &Self) -> Self {
        Range {
            domain: self.domain.clone(),
            bounds: Some((self.lower_bound().cloned(), last.upper_bound().cloned())),
        }
    }
}

impl<D: Offsettable> Range<D> {
    /// Shifts both bounds by `by`, keeping their inclusivity.
    ///
    /// # Example
    /// ```
    /// use range_algebra::{domain::IntDomain, Range};
    ///
    /// let r = Range::new(IntDomain::default(), Some(5), Some(10)).unwrap();
    /// let shifted = r.offset(&-5).unwrap();
    /// assert_eq!(shifted.lower(), Some(&0));
    /// assert_eq!(shifted.upper(), Some(&5));
    /// ```
    pub fn offset(&self, by: &D::Offset) -> Result<Self, RangeError> {
        let Some((lower, upper)) = &self.bounds else {
            return Ok(self.clone());
        };
        let lower = self.shift(lower, by)?;
        let upper = self.shift(upper, by)?;
        Self::from_bounds(self.domain.clone(), lower, upper)
    }

    fn shift(&self, b: &Bound<D::Value>, by: &D::Offset) -> Result<Bound<D::Value>, RangeError> {
        let shift = |v: &D::Value| {
            self.domain
                .offset(v, by)
                .ok_or_else(|| RangeError::Overflow {
                    domain: self.domain.name(),
                    value: format!("{v:?} + {by:?}"),
                })
        };
        Ok(match b {
            Included(v) => Included(shift(v)?),
            Excluded(v) => Excluded(shift(v)?),
            Unbounded => Unbounded,
        })
    }
}

impl<T: PrimInt + fmt::Debug> Range<IntDomain<T>> {
    /// The distance between the bounds, zero for the empty range.
    /// Fails if the range is unbounded or the distance does not fit in `T`.
    pub fn length(&self) -> Result<T, RangeError> {
        match &self.bounds {
            None => Ok(T::zero()),
            Some((Included(l) | Excluded(l), Included(u) | Excluded(u))) => {
                u.checked_sub(l).ok_or_else(|| RangeError::Overflow {
                    domain: self.domain.name(),
                    value: format!("{u:?} - {l:?}"),
                })
            }
            Some(_) => Err(RangeError::Unbounded),
        }
    }
}

impl<D: ScalarDomain> Display for Range<D>
where
    D::Value: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((lower, upper)) = &self.bounds else {
            return write!(f, "empty");
        };
        match lower {
            Included(v) => write!(f, "[{v}")?,
            Excluded(v) => write!(f, "({v}")?,
            Unbounded => write!(f, "(")?,
        }
        write!(f, ",")?;
        match upper {
            Included(v) => write!(f, "{v}]"),
            Excluded(v) => write!(f, "{v})"),
            Unbounded => write!(f, ")"),
        }
    }
}

/// Builds a [Range] field by field.
///
/// Unset bounds are unbounded. The lower bound defaults to inclusive and the upper bound to exclusive;
/// inclusivity flags only matter for bounds that have a value.
///
/// # Example
/// ```
/// use range_algebra::{domain::FloatDomain, Range};
///
/// let r = Range::builder(FloatDomain)
///     .lower(0.5)
///     .lower_inc(false)
///     .upper(2.0)
///     .upper_inc(true)
///     .build()
///     .unwrap();
/// assert_eq!(r.to_string(), "(0.5,2]");
/// ```
#[derive(Debug, Clone)]
pub struct RangeBuilder<D: ScalarDomain> {
    domain: D,
    lower: Option<D::Value>,
    upper: Option<D::Value>,
    lower_inc: bool,
    upper_inc: bool,
}

impl<D: ScalarDomain> RangeBuilder<D> {
    pub fn lower(mut self, value: D::Value) -> Self {
        self.lower = Some(value);
        self
    }

    /// Removes the lower bound.
    pub fn unbounded_lower(mut self) -> Self {
        self.lower = None;
        self
    }

    pub fn upper(mut self, value: D::Value) -> Self {
        self.upper = Some(value);
        self
    }

    /// Removes the upper bound.
    pub fn unbounded_upper(mut self) -> Self {
        self.upper = None;
        self
    }

    pub fn lower_inc(mut self, inclusive: bool) -> Self {
        self.lower_inc = inclusive;
        self
    }

    pub fn upper_inc(mut self, inclusive: bool) -> Self {
        self.upper_inc = inclusive;
        self
    }

    /// Validates the settings and creates the range, see [Range::from_bounds].
    pub fn build(self) -> Result<Range<D>, RangeError> {
        let lower = match (self.lower, self.lower_inc) {
            (Some(v), true) => Included(v),
            (Some(v), false) => Excluded(v),
            (None, _) => Unbounded,
        };
        let upper = match (self.upper, self.upper_inc) {
            (Some(v), true) => Included(v),
            (Some(v), false) => Excluded(v),
            (None, _) => Unbounded,
        };
        Range::from_bounds(self.domain, lower, upper)
    }
}

impl Arbitrary for Range<IntDomain<i64>> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let a = i64::from(i8::arbitrary(g));
        let b = i64::from(i8::arbitrary(g));
        let mut side = |v: i64| match u8::arbitrary(g) % 5 {
            0 => Unbounded,
            1 | 2 => Included(v),
            _ => Excluded(v),
        };
        let lower = side(a.min(b));
        let upper = side(a.max(b));
        Range::from_bounds(IntDomain::default(), lower, upper)
            .unwrap_or_else(|_| Range::empty(IntDomain::default()))
    }
}
