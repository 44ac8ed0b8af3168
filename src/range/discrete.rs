use std::{cmp::Ordering, fmt::Debug, iter::FusedIterator, ops::Bound};

use Bound::{Excluded, Included, Unbounded};

use super::Range;
use crate::{
    domain::{Discrete, ScalarDomain},
    RangeError,
};

/// Rewrites bounds into the half-open form `[lower, upper)`.
/// An exclusive lower bound and an inclusive upper bound are both advanced to their successor.
pub(crate) fn canonicalize<T: Debug>(
    domain: &'static str,
    stepper: &dyn Discrete<T>,
    lower: Bound<T>,
    upper: Bound<T>,
) -> Result<(Bound<T>, Bound<T>), RangeError> {
    let advance = |v: T| {
        stepper.successor(&v).ok_or_else(|| RangeError::Overflow {
            domain,
            value: format!("{v:?}"),
        })
    };
    let lower = match lower {
        Excluded(v) => Included(advance(v)?),
        b => b,
    };
    let upper = match upper {
        Included(v) => Excluded(advance(v)?),
        b => b,
    };
    Ok((lower, upper))
}

impl<D: ScalarDomain> Range<D> {
    fn stepper(&self) -> Result<&dyn Discrete<D::Value>, RangeError> {
        self.domain.discrete().ok_or(RangeError::NotDiscrete {
            domain: self.domain.name(),
        })
    }

    fn overflow(&self, value: &D::Value) -> RangeError {
        RangeError::Overflow {
            domain: self.domain.name(),
            value: format!("{value:?}"),
        }
    }

    /// Returns the value following `value` in this range's domain.
    pub fn next(&self, value: &D::Value) -> Result<D::Value, RangeError> {
        self.stepper()?
            .successor(value)
            .ok_or_else(|| self.overflow(value))
    }

    /// Returns the value preceding `value` in this range's domain.
    pub fn prev(&self, value: &D::Value) -> Result<D::Value, RangeError> {
        self.stepper()?
            .predecessor(value)
            .ok_or_else(|| self.overflow(value))
    }

    /// Returns the last value reached by stepping from the lower bound, or `None` if the range is empty
    /// or has no upper bound. Fails if the domain is not discrete.
    ///
    /// # Example
    /// ```
    /// use range_algebra::{domain::IntDomain, Range};
    ///
    /// let r = Range::new(IntDomain::default(), Some(4), Some(8)).unwrap();
    /// assert_eq!(r.last(), Ok(Some(7)));
    /// let r = Range::new(IntDomain::with_step(3), Some(0), Some(8)).unwrap();
    /// assert_eq!(r.last(), Ok(Some(6)));
    /// let r = Range::new(IntDomain::default(), Some(4), None).unwrap();
    /// assert_eq!(r.last(), Ok(None));
    /// ```
    pub fn last(&self) -> Result<Option<D::Value>, RangeError> {
        let stepper = self.stepper()?;
        match (self.lower_bound(), self.upper_bound()) {
            (_, Unbounded) => Ok(None),
            (Included(l), Excluded(u)) => Ok(stepper.last_before(l, u)),
            (Excluded(l), Excluded(u)) => Ok(stepper.last_before(&self.next(l)?, u)),
            (Unbounded, Excluded(u)) => self.prev(u).map(Some),
            // canonical discrete ranges never carry an inclusive upper bound
            (_, Included(u)) => Ok(Some(u.clone())),
        }
    }

    /// Returns an iterator over every value of the range, stepping from the lower bound
    /// while the values stay below the upper bound.
    ///
    /// Every call starts a fresh traversal. Fails if the domain is not discrete or the range is unbounded
    /// on either side.
    ///
    /// # Example
    /// ```
    /// use range_algebra::{domain::IntDomain, Range};
    ///
    /// let r = Range::new(IntDomain::default(), Some(5), Some(10)).unwrap();
    /// assert_eq!(r.iter().unwrap().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    /// ```
    pub fn iter(&self) -> Result<Steps<'_, D>, RangeError> {
        let stepper = self.stepper()?;
        if self.is_empty() {
            return Ok(Steps {
                domain: &self.domain,
                stepper,
                current: None,
                end: Unbounded,
            });
        }
        let first = match self.lower_bound() {
            Included(l) => l.clone(),
            Excluded(l) => self.next(l)?,
            Unbounded => return Err(RangeError::Unbounded),
        };
        let end = match self.upper_bound() {
            Unbounded => return Err(RangeError::Unbounded),
            b => b.cloned(),
        };
        Ok(Steps {
            domain: &self.domain,
            stepper,
            current: Some(first),
            end,
        })
    }
}

/// An iterator over the values of a discrete [Range], see [Range::iter].
pub struct Steps<'a, D: ScalarDomain> {
    domain: &'a D,
    stepper: &'a dyn Discrete<D::Value>,
    current: Option<D::Value>,
    end: Bound<D::Value>,
}

impl<D: ScalarDomain> Iterator for Steps<'_, D> {
    type Item = D::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let within = match &self.end {
            Excluded(e) => self.domain.compare(&current, e) == Ordering::Less,
            Included(e) => self.domain.compare(&current, e) != Ordering::Greater,
            Unbounded => true,
        };
        if !within {
            return None;
        }
        self.current = self.stepper.successor(&current);
        Some(current)
    }
}

impl<D: ScalarDomain> FusedIterator for Steps<'_, D> {}

#[cfg(test)]
mod tests {
    use std::ops::Bound::{Excluded, Included, Unbounded};

    use quickcheck_macros::quickcheck;

    use crate::{
        domain::{FloatDomain, IntDomain, StrDomain},
        Range, RangeError,
    };

    fn int(lower: Option<i64>, upper: Option<i64>) -> Range<IntDomain> {
        Range::new(IntDomain::default(), lower, upper).unwrap()
    }

    #[test]
    fn normalizes_to_half_open() {
        let r = Range::from_bounds(IntDomain::default(), Excluded(2), Included(5)).unwrap();
        assert_eq!(r.lower_bound(), Included(&3));
        assert_eq!(r.upper_bound(), Excluded(&6));
        assert_eq!(r, int(Some(3), Some(6)));
    }

    #[test]
    fn normalization_of_default_bounds() {
        let r = Range::builder(IntDomain::default())
            .lower(2)
            .lower_inc(false)
            .build()
            .unwrap();
        assert_eq!(r.lower(), Some(&3));
        assert!(r.lower_inc());
        assert!(!r.upper_inc());
    }

    #[test]
    fn equal_bounds_normalize_to_empty() {
        assert!(int(Some(3), Some(3)).is_empty());
        let r = Range::from_bounds(IntDomain::default(), Excluded(3), Included(3)).unwrap();
        assert!(r.is_empty());
        let r = Range::from_bounds(IntDomain::default(), Included(3), Included(3)).unwrap();
        assert_eq!(r, int(Some(3), Some(4)));
    }

    #[test]
    fn normalization_overflow() {
        let r = Range::from_bounds(IntDomain::<u8>::default(), Included(0), Included(u8::MAX));
        assert!(matches!(r, Err(RangeError::Overflow { domain: "int", .. })));
    }

    #[test]
    fn next_prev_delegate_to_domain() {
        let r = int(Some(0), Some(10));
        assert_eq!(r.next(&4), Ok(5));
        assert_eq!(r.prev(&4), Ok(3));
        assert!(matches!(r.next(&i64::MAX), Err(RangeError::Overflow { .. })));

        let s = Range::new(StrDomain::default(), Some("a".to_string()), Some("c".to_string()))
            .unwrap();
        assert_eq!(s.next(&"a".to_string()), Ok("b".to_string()));
        assert_eq!(s.prev(&"AbC".to_string()), Ok("AbB".to_string()));
    }

    #[test]
    fn continuous_domains_do_not_step() {
        let r = Range::new(FloatDomain, Some(0.0), Some(1.0)).unwrap();
        assert_eq!(r.next(&0.5), Err(RangeError::NotDiscrete { domain: "float" }));
        assert_eq!(r.last(), Err(RangeError::NotDiscrete { domain: "float" }));
    }

    #[test]
    fn last_element() {
        assert_eq!(int(Some(5), Some(10)).last(), Ok(Some(9)));
        assert_eq!(int(Some(5), None).last(), Ok(None));
        assert_eq!(int(Some(5), Some(5)).last(), Ok(None));

        let s = Range::new(StrDomain::default(), Some("d".to_string()), Some("k".to_string()))
            .unwrap();
        assert_eq!(s.last(), Ok(Some("j".to_string())));
        let s = Range::new(StrDomain::default(), Some("h".to_string()), None).unwrap();
        assert_eq!(s.last(), Ok(None));
    }

    #[test]
    fn iteration() {
        let r = int(Some(5), Some(10));
        assert_eq!(r.iter().unwrap().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
        // restartable
        assert_eq!(r.iter().unwrap().count(), 5);
        assert_eq!(int(Some(5), Some(5)).iter().unwrap().count(), 0);
    }

    #[test]
    fn iteration_with_step() {
        let r = Range::new(IntDomain::with_step(3), Some(0), Some(9)).unwrap();
        assert_eq!(r.iter().unwrap().collect::<Vec<_>>(), vec![0, 3, 6]);

        let r = Range::new(IntDomain::with_step(3), Some(0), Some(8)).unwrap();
        assert_eq!(r.iter().unwrap().collect::<Vec<_>>(), vec![0, 3, 6]);
        assert_eq!(r.last(), Ok(Some(6)));
        assert!(r.ends_with_value(&6).unwrap());
        assert!(!r.ends_with_value(&7).unwrap());
    }

    #[test]
    fn iteration_up_to_domain_max() {
        let r = Range::from_bounds(IntDomain::<u8>::default(), Included(250), Excluded(u8::MAX))
            .unwrap();
        assert_eq!(r.iter().unwrap().collect::<Vec<_>>(), vec![250, 251, 252, 253, 254]);
    }

    #[test]
    fn iteration_of_unbounded_fails() {
        assert!(matches!(int(Some(5), None).iter(), Err(RangeError::Unbounded)));
        assert!(matches!(int(None, Some(5)).iter(), Err(RangeError::Unbounded)));
        let full = Range::from_bounds(IntDomain::<i64>::default(), Unbounded, Unbounded).unwrap();
        assert!(matches!(full.iter(), Err(RangeError::Unbounded)));
    }

    #[test]
    fn ends_with_last_element() {
        let r = int(Some(1), Some(10));
        assert!(r.ends_with_value(&9).unwrap());
        assert!(!r.ends_with_value(&10).unwrap());
        assert!(!int(Some(1), None).ends_with_value(&10).unwrap());
    }

    #[quickcheck]
    fn iteration_matches_contains(r: Range<IntDomain>) -> bool {
        match r.iter() {
            Ok(steps) => {
                let values: Vec<i64> = steps.collect();
                (-140..140).all(|p| values.contains(&p) == r.contains_value(&p).unwrap())
            }
            Err(RangeError::Unbounded) => r.lower().is_none() || r.upper().is_none(),
            Err(_) => false,
        }
    }
}
