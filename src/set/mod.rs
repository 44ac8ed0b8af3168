use std::fmt::{self, Display};

use itertools::Itertools;
use quickcheck::Arbitrary;
use tracing::{debug, trace};

use crate::{
    domain::{IntDomain, ScalarDomain},
    Range, RangeError,
};

/// An ordered set of [Range]s over one [ScalarDomain], representing their union.
///
/// The set keeps the invariant that its elements are non-empty, sorted ascending, and pairwise neither
/// overlapping nor adjacent. [add](Self::add) merges a new range with every element it overlaps or touches,
/// [remove](Self::remove) trims, drops or splits the elements it overlaps.
///
/// # Example
/// ```
/// use range_algebra::{domain::IntDomain, Range, RangeSet};
///
/// let int = |l, u| Range::new(IntDomain::default(), Some(l), Some(u)).unwrap();
///
/// let mut set = RangeSet::new(IntDomain::default());
/// set.add(int(1, 5)).unwrap();
/// set.add(int(10, 15)).unwrap();
/// set.add(int(5, 10)).unwrap();
/// assert_eq!(set.to_string(), "{[1,15)}");
///
/// set.remove(&int(3, 12)).unwrap();
/// assert_eq!(set.to_string(), "{[1,3), [12,15)}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSet<D: ScalarDomain> {
    domain: D,
    ranges: Vec<Range<D>>,
}

impl<D: ScalarDomain> RangeSet<D> {
    /// Creates an empty set over `domain`.
    pub fn new(domain: D) -> Self {
        RangeSet {
            domain,
            ranges: Vec::new(),
        }
    }

    /// Creates a set by [adding](Self::add) every range in order.
    pub fn from_ranges(
        domain: D,
        ranges: impl IntoIterator<Item = Range<D>>,
    ) -> Result<Self, RangeError> {
        let mut set = Self::new(domain);
        for r in ranges {
            set.add(r)?;
        }
        Ok(set)
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The number of ranges in the set.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Removes all ranges.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// The range with the smallest values.
    pub fn first(&self) -> Option<&Range<D>> {
        self.ranges.first()
    }

    /// The range with the largest values.
    pub fn last(&self) -> Option<&Range<D>> {
        self.ranges.last()
    }

    /// Iterates over the ranges in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Range<D>> {
        self.ranges.iter()
    }

    fn check(&self, domain: &D) -> Result<(), RangeError> {
        if &self.domain == domain {
            Ok(())
        } else {
            Err(RangeError::DomainMismatch {
                expected: format!("{:?}", self.domain),
                found: format!("{domain:?}"),
            })
        }
    }

    /// Adds a range to the set.
    ///
    /// Every element that overlaps or is adjacent to `item` is taken out of the set and merged into it.
    /// Merging is repeated until the merged range has no more neighbours to absorb, at which point it is
    /// inserted before the first element strictly to its right.
    pub fn add(&mut self, item: Range<D>) -> Result<(), RangeError> {
        self.check(item.domain())?;
        if item.is_empty() {
            return Ok(());
        }
        let mut item = item;
        loop {
            let mut absorbed = Vec::new();
            let mut at = self.ranges.len();
            let mut i = 0;
            while i < self.ranges.len() {
                let r = &self.ranges[i];
                if r.overlap(&item)? || r.adjacent(&item)? {
                    absorbed.push(self.ranges.remove(i));
                } else if item.left_of(r)? {
                    at = i;
                    break;
                } else {
                    i += 1;
                }
            }
            if absorbed.is_empty() {
                self.ranges.insert(at, item);
                return Ok(());
            }
            trace!(merged = absorbed.len(), "absorbing neighbours of {:?}", item);
            for r in &absorbed {
                item = item.union(r)?;
            }
        }
    }

    /// Removes the values of `item` from the set.
    ///
    /// Elements covered by `item` are dropped, elements partially overlapping it are trimmed.
    /// An element that strictly contains `item` is split in two.
    pub fn remove(&mut self, item: &Range<D>) -> Result<(), RangeError> {
        self.check(item.domain())?;
        if item.is_empty() {
            return Ok(());
        }
        let mut i = 0;
        while i < self.ranges.len() {
            let r = &self.ranges[i];
            if item.left_of(r)? {
                break;
            }
            if !r.overlap(item)? {
                i += 1;
                continue;
            }
            let fragments = r.subtract(item)?;
            let kept = fragments.len();
            if kept == 0 {
                trace!("dropping {:?}", r);
            } else if kept == 2 {
                debug!("splitting {:?} around {:?}", r, item);
            }
            self.ranges.splice(i..=i, fragments);
            if kept == 2 {
                break;
            }
            i += kept;
        }
        Ok(())
    }

    /// Returns whether some element contains `item`. The empty range is contained in every set.
    pub fn contains(&self, item: &Range<D>) -> Result<bool, RangeError> {
        self.check(item.domain())?;
        if item.is_empty() {
            return Ok(true);
        }
        for r in &self.ranges {
            if r.contains(item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns whether some element contains `value`.
    pub fn contains_value(&self, value: &D::Value) -> Result<bool, RangeError> {
        if !self.domain.is_member(value) {
            return Err(RangeError::UnsupportedOperand {
                op: "contains",
                domain: self.domain.name(),
                value: format!("{value:?}"),
            });
        }
        for r in &self.ranges {
            if r.contains_value(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The smallest range covering every element, from the lower bound of the first element
    /// to the upper bound of the last. Empty if the set is empty.
    pub fn span(&self) -> Range<D> {
        match (self.ranges.first(), self.ranges.last()) {
            (Some(first), Some(last)) => first.join(last),
            _ => Range::empty(self.domain.clone()),
        }
    }

    /// Returns a set containing the values of this set and of every set in `others`.
    pub fn union<'a>(&self, others: impl IntoIterator<Item = &'a Self>) -> Result<Self, RangeError>
    where
        D: 'a,
    {
        let mut result = self.clone();
        for other in others {
            self.check(&other.domain)?;
            for r in &other.ranges {
                result.add(r.clone())?;
            }
        }
        Ok(result)
    }

    /// Returns a set containing the values of this set that are in none of the sets in `others`.
    pub fn difference<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Self>,
    ) -> Result<Self, RangeError>
    where
        D: 'a,
    {
        let mut result = self.clone();
        for other in others {
            self.check(&other.domain)?;
            for r in &other.ranges {
                result.remove(r)?;
            }
        }
        Ok(result)
    }

    /// Returns a set containing the values shared by this set and every set in `others`.
    ///
    /// # Example
    /// ```
    /// use range_algebra::{domain::IntDomain, Range, RangeSet};
    ///
    /// let int = |l, u| Range::new(IntDomain::default(), Some(l), Some(u)).unwrap();
    ///
    /// let a = RangeSet::from_ranges(IntDomain::default(), [int(0, 10), int(20, 30)]).unwrap();
    /// let b = RangeSet::from_ranges(IntDomain::default(), [int(5, 25)]).unwrap();
    /// assert_eq!(a.intersection([&b]).unwrap().to_string(), "{[5,10), [20,25)}");
    /// ```
    pub fn intersection<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Self>,
    ) -> Result<Self, RangeError>
    where
        D: 'a,
    {
        let mut result = self.clone();
        for other in others {
            self.check(&other.domain)?;
            let mut next = Self::new(self.domain.clone());
            for a in &result.ranges {
                for b in &other.ranges {
                    next.add(a.intersection(b)?)?;
                }
            }
            if next.is_empty() {
                return Ok(next);
            }
            result = next;
        }
        Ok(result)
    }

    /// Enumerates every value of every element in ascending order.
    /// Fails if the domain is not discrete or the set has an unbounded element.
    pub fn values(&self) -> Result<impl Iterator<Item = D::Value> + '_, RangeError> {
        if self.domain.discrete().is_none() {
            return Err(RangeError::NotDiscrete {
                domain: self.domain.name(),
            });
        }
        let steps = self
            .ranges
            .iter()
            .map(Range::iter)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(steps.into_iter().flatten())
    }

    /// Checks that the elements are non-empty, belong to this set's domain, are sorted ascending,
    /// and that no two consecutive elements overlap or touch.
    pub fn is_canonical(&self) -> bool {
        let elements_valid = self
            .ranges
            .iter()
            .all(|r| !r.is_empty() && r.domain() == &self.domain);
        elements_valid
            && self.ranges.iter().tuple_windows().all(|(a, b)| {
                matches!(
                    (a.left_of(b), a.adjacent(b)),
                    (Ok(true), Ok(false))
                )
            })
    }
}

impl<'a, D: ScalarDomain> IntoIterator for &'a RangeSet<D> {
    type Item = &'a Range<D>;
    type IntoIter = std::slice::Iter<'a, Range<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl<D: ScalarDomain> Display for RangeSet<D>
where
    D::Value: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.ranges.iter().format(", "))
    }
}

impl Arbitrary for RangeSet<IntDomain<i64>> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let ranges: Vec<Range<IntDomain<i64>>> = Arbitrary::arbitrary(g);
        RangeSet::from_ranges(IntDomain::default(), ranges)
            .unwrap_or_else(|_| RangeSet::new(IntDomain::default()))
    }
}
