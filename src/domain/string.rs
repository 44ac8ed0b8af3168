use super::{step_until, Discrete, ScalarDomain};

/// Strings over an alphabet of characters between `min` and `max` (both inclusively).
///
/// Strings are ordered lexicographically. Stepping treats a string as a big-endian number whose
/// digits are its characters: the successor increments the last character, carrying into the
/// character before it when the last character is already `max`. The predecessor borrows
/// symmetrically. A carry (or borrow) out of the first character has no result.
///
/// # Example
/// ```
/// use range_algebra::domain::{Discrete, StrDomain};
///
/// let lower = StrDomain::new('\0', 'z');
/// assert_eq!(lower.successor(&"ab".to_string()), Some("ac".to_string()));
/// assert_eq!(lower.successor(&"az".to_string()), Some("b\0".to_string()));
/// assert_eq!(lower.predecessor(&"b\0".to_string()), Some("az".to_string()));
/// assert_eq!(lower.successor(&"zz".to_string()), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrDomain {
    min: char,
    max: char,
}

impl StrDomain {
    /// Creates a domain over the characters between `min` and `max`.
    /// The arguments are swapped if `min` is greater than `max`.
    pub fn new(min: char, max: char) -> Self {
        StrDomain {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// The smallest character of the alphabet.
    pub fn min(&self) -> char {
        self.min
    }

    /// The largest character of the alphabet.
    pub fn max(&self) -> char {
        self.max
    }

    fn next_unit(&self, c: char) -> Option<char> {
        if c >= self.max {
            return None;
        }
        let mut code = c as u32 + 1;
        if (0xD800..=0xDFFF).contains(&code) {
            code = 0xE000;
        }
        char::from_u32(code)
    }

    fn prev_unit(&self, c: char) -> Option<char> {
        if c <= self.min {
            return None;
        }
        let mut code = c as u32 - 1;
        if (0xD800..=0xDFFF).contains(&code) {
            code = 0xD7FF;
        }
        char::from_u32(code)
    }
}

impl Default for StrDomain {
    fn default() -> Self {
        StrDomain {
            min: '\0',
            max: char::MAX,
        }
    }
}

impl ScalarDomain for StrDomain {
    type Value = String;

    fn name(&self) -> &'static str {
        "str"
    }

    fn is_member(&self, value: &String) -> bool {
        value.chars().all(|c| self.min <= c && c <= self.max)
    }

    fn discrete(&self) -> Option<&dyn Discrete<String>> {
        Some(self)
    }
}

impl Discrete<String> for StrDomain {
    fn successor(&self, value: &String) -> Option<String> {
        let mut units: Vec<char> = value.chars().collect();
        for i in (0..units.len()).rev() {
            match self.next_unit(units[i]) {
                Some(next) => {
                    units[i] = next;
                    return Some(units.into_iter().collect());
                }
                None => units[i] = self.min,
            }
        }
        None
    }

    fn predecessor(&self, value: &String) -> Option<String> {
        let mut units: Vec<char> = value.chars().collect();
        for i in (0..units.len()).rev() {
            match self.prev_unit(units[i]) {
                Some(prev) => {
                    units[i] = prev;
                    return Some(units.into_iter().collect());
                }
                None => units[i] = self.max,
            }
        }
        None
    }

    fn last_before(&self, first: &String, end: &String) -> Option<String> {
        // strings of one length are stepped through exhaustively
        if first.chars().count() == end.chars().count() {
            return (first < end).then(|| self.predecessor(end)).flatten();
        }
        step_until(self, first, end)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn successor_increments_last_unit() {
        let domain = StrDomain::default();
        assert_eq!(domain.successor(&"a".to_string()), Some("b".to_string()));
        assert_eq!(domain.successor(&"abc".to_string()), Some("abd".to_string()));
        assert_eq!(domain.successor(&"AbC".to_string()), Some("AbD".to_string()));
    }

    #[test]
    fn predecessor_decrements_last_unit() {
        let domain = StrDomain::default();
        assert_eq!(domain.predecessor(&"d".to_string()), Some("c".to_string()));
        assert_eq!(domain.predecessor(&"7".to_string()), Some("6".to_string()));
        assert_eq!(domain.predecessor(&"AbC".to_string()), Some("AbB".to_string()));
    }

    #[test]
    fn empty_string_has_no_neighbours() {
        let domain = StrDomain::default();
        assert_eq!(domain.successor(&String::new()), None);
        assert_eq!(domain.predecessor(&String::new()), None);
    }

    #[test]
    fn carry_over_max_unit() {
        let domain = StrDomain::new('\0', 'z');
        assert_eq!(domain.successor(&"az".to_string()), Some("b\0".to_string()));
        assert_eq!(domain.successor(&"azz".to_string()), Some("b\0\0".to_string()));
        assert_eq!(domain.predecessor(&"b\0".to_string()), Some("az".to_string()));
        assert_eq!(domain.predecessor(&"\0\0".to_string()), None);
    }

    #[test]
    fn steps_skip_surrogates() {
        let domain = StrDomain::default();
        assert_eq!(
            domain.successor(&"\u{D7FF}".to_string()),
            Some("\u{E000}".to_string())
        );
        assert_eq!(
            domain.predecessor(&"\u{E000}".to_string()),
            Some("\u{D7FF}".to_string())
        );
    }

    #[test]
    fn membership() {
        let domain = StrDomain::new('a', 'z');
        assert!(domain.is_member(&"hello".to_string()));
        assert!(domain.is_member(&String::new()));
        assert!(!domain.is_member(&"Hello".to_string()));
        assert_eq!(StrDomain::new('z', 'a'), domain);
    }

    #[test]
    fn last_before_across_lengths() {
        let domain = StrDomain::new('a', 'e');
        assert_eq!(
            domain.last_before(&"b".to_string(), &"d".to_string()),
            Some("c".to_string())
        );
        assert_eq!(
            domain.last_before(&"ab".to_string(), &"b".to_string()),
            Some("ae".to_string())
        );
        assert_eq!(
            domain.last_before(&"a".to_string(), &"bc".to_string()),
            Some("b".to_string())
        );
        assert_eq!(domain.last_before(&"c".to_string(), &"c".to_string()), None);
    }

    #[quickcheck]
    fn successor_predecessor_inverse(s: String) -> TestResult {
        let domain = StrDomain::default();
        match domain.successor(&s) {
            Some(next) => {
                assert_eq!(domain.predecessor(&next), Some(s));
                TestResult::passed()
            }
            None => TestResult::discard(),
        }
    }
}
