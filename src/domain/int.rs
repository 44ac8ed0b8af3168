use num_traits::PrimInt;

use super::{Discrete, Offsettable, ScalarDomain};

/// Integers of type `T`, stepped by a fixed `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntDomain<T = i64> {
    step: T,
}

impl<T: PrimInt> IntDomain<T> {
    /// Creates a domain stepping by `step`. A non-positive step is replaced by one.
    pub fn with_step(step: T) -> Self {
        if step <= T::zero() {
            Self::default()
        } else {
            IntDomain { step }
        }
    }

    /// The distance between two consecutive values.
    pub fn step(&self) -> T {
        self.step
    }

    /// `value` modulo the step, in `0..step`.
    fn residue(&self, value: T) -> T {
        let r = value % self.step;
        if r < T::zero() {
            r + self.step
        } else {
            r
        }
    }
}

impl<T: PrimInt> Default for IntDomain<T> {
    fn default() -> Self {
        IntDomain { step: T::one() }
    }
}

impl<T: PrimInt + std::fmt::Debug> ScalarDomain for IntDomain<T> {
    type Value = T;

    fn name(&self) -> &'static str {
        "int"
    }

    fn discrete(&self) -> Option<&dyn Discrete<T>> {
        Some(self)
    }
}

impl<T: PrimInt> Discrete<T> for IntDomain<T> {
    fn successor(&self, value: &T) -> Option<T> {
        value.checked_add(&self.step)
    }

    fn predecessor(&self, value: &T) -> Option<T> {
        value.checked_sub(&self.step)
    }

    fn last_before(&self, first: &T, end: &T) -> Option<T> {
        if first >= end {
            return None;
        }
        if self.step == T::one() {
            return self.predecessor(end);
        }
        // the largest value below `end` congruent to `first` modulo the step
        let high = end.checked_sub(&T::one())?;
        let (rh, rf) = (self.residue(high), self.residue(*first));
        let gap = if rh >= rf {
            rh - rf
        } else {
            rh + (self.step - rf)
        };
        high.checked_sub(&gap)
    }
}

impl<T: PrimInt + std::fmt::Debug> Offsettable for IntDomain<T> {
    type Offset = T;

    fn offset(&self, value: &T, by: &T) -> Option<T> {
        value.checked_add(by)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::domain::step_until;

    #[quickcheck]
    fn successor_predecessor_inverse(v: i64) -> TestResult {
        let domain = IntDomain::<i64>::default();
        match domain.successor(&v) {
            Some(next) => {
                assert_eq!(domain.predecessor(&next), Some(v));
                TestResult::passed()
            }
            None => TestResult::discard(),
        }
    }

    #[test]
    fn step_overflow() {
        let domain = IntDomain::<u8>::default();
        assert_eq!(domain.successor(&u8::MAX), None);
        assert_eq!(domain.predecessor(&0), None);
        assert_eq!(domain.successor(&7), Some(8));
    }

    #[test]
    fn custom_step() {
        let domain = IntDomain::with_step(5i32);
        assert_eq!(domain.step(), 5);
        assert_eq!(domain.successor(&10), Some(15));
        assert_eq!(domain.predecessor(&10), Some(5));
        assert_eq!(IntDomain::with_step(-3i32), IntDomain::default());
    }

    #[test]
    fn last_before_respects_step() {
        let domain = IntDomain::with_step(3i64);
        assert_eq!(domain.last_before(&0, &10), Some(9));
        assert_eq!(domain.last_before(&0, &9), Some(6));
        assert_eq!(domain.last_before(&-5, &-4), Some(-5));
        assert_eq!(domain.last_before(&4, &4), None);
        assert_eq!(IntDomain::<i64>::default().last_before(&0, &10), Some(9));
        let wide = IntDomain::with_step(2u128);
        assert_eq!(wide.last_before(&0, &u128::MAX), Some(u128::MAX - 1));
        let signed = IntDomain::with_step(4i64);
        assert_eq!(signed.last_before(&i64::MIN, &i64::MAX), Some(i64::MAX - 3));
    }

    #[quickcheck]
    fn last_before_matches_walk(first: i16, end: i16, step: u8) -> bool {
        let domain = IntDomain::with_step(i64::from(step));
        let (first, end) = (i64::from(first), i64::from(end));
        domain.last_before(&first, &end) == step_until(&domain, &first, &end)
    }
}
