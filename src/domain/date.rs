use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeDelta};

use super::{step_until, Discrete, Offsettable, ScalarDomain};
use crate::{Range, RangeError};

/// The calendar granularity a [DateDomain] steps by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// The first day of a calendar week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WeekStart {
    #[default]
    Monday,
    /// The "american" week.
    Sunday,
}

/// A calendar period containing a given date, see [DateDomain::span].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Week(WeekStart),
    Month,
    Quarter,
    Year,
}

/// Calendar dates, stepped by one [CalendarUnit].
///
/// Stepping is calendar aware: adding a month to January 31st yields the last day of February.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateDomain {
    unit: CalendarUnit,
}

impl DateDomain {
    /// Dates stepped by `unit`.
    pub fn with_unit(unit: CalendarUnit) -> Self {
        DateDomain { unit }
    }

    pub fn unit(&self) -> CalendarUnit {
        self.unit
    }

    /// Returns the half-open range covering the `period` that contains `date`.
    ///
    /// Weeks begin on the given [WeekStart], months on their first day, quarters in January,
    /// April, July and October, and years on January 1st.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use range_algebra::domain::{DateDomain, Period, WeekStart};
    ///
    /// let domain = DateDomain::default();
    /// // 2000-01-01 was a Saturday
    /// let saturday = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    /// let week = domain.span(saturday, Period::Week(WeekStart::Monday)).unwrap();
    /// assert_eq!(week.lower(), NaiveDate::from_ymd_opt(1999, 12, 27).as_ref());
    /// assert_eq!(week.upper(), NaiveDate::from_ymd_opt(2000, 1, 3).as_ref());
    /// ```
    pub fn span(&self, date: NaiveDate, period: Period) -> Result<Range<Self>, RangeError> {
        let overflow = || RangeError::Overflow {
            domain: self.name(),
            value: date.to_string(),
        };
        let (start, end) = match period {
            Period::Day => (date, date.checked_add_days(Days::new(1))),
            Period::Week(week_start) => {
                let offset = match week_start {
                    WeekStart::Monday => date.weekday().num_days_from_monday(),
                    WeekStart::Sunday => date.weekday().num_days_from_sunday(),
                };
                let start = date
                    .checked_sub_days(Days::new(offset.into()))
                    .ok_or_else(overflow)?;
                (start, start.checked_add_days(Days::new(7)))
            }
            Period::Month => {
                let start = date.with_day(1).ok_or_else(overflow)?;
                (start, start.checked_add_months(Months::new(1)))
            }
            Period::Quarter => {
                let month = date.month0() / 3 * 3 + 1;
                let start = NaiveDate::from_ymd_opt(date.year(), month, 1).ok_or_else(overflow)?;
                (start, start.checked_add_months(Months::new(3)))
            }
            Period::Year => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or_else(overflow)?;
                (start, start.checked_add_months(Months::new(12)))
            }
        };
        let end = end.ok_or_else(overflow)?;
        Range::new(*self, Some(start), Some(end))
    }

    fn months(&self) -> Option<u32> {
        match self.unit {
            CalendarUnit::Day | CalendarUnit::Week => None,
            CalendarUnit::Month => Some(1),
            CalendarUnit::Quarter => Some(3),
            CalendarUnit::Year => Some(12),
        }
    }

    fn days(&self) -> u64 {
        match self.unit {
            CalendarUnit::Week => 7,
            _ => 1,
        }
    }
}

impl ScalarDomain for DateDomain {
    type Value = NaiveDate;

    fn name(&self) -> &'static str {
        "date"
    }

    fn discrete(&self) -> Option<&dyn Discrete<NaiveDate>> {
        Some(self)
    }
}

impl Discrete<NaiveDate> for DateDomain {
    fn successor(&self, value: &NaiveDate) -> Option<NaiveDate> {
        match self.months() {
            Some(n) => value.checked_add_months(Months::new(n)),
            None => value.checked_add_days(Days::new(self.days())),
        }
    }

    fn predecessor(&self, value: &NaiveDate) -> Option<NaiveDate> {
        match self.months() {
            Some(n) => value.checked_sub_months(Months::new(n)),
            None => value.checked_sub_days(Days::new(self.days())),
        }
    }

    fn last_before(&self, first: &NaiveDate, end: &NaiveDate) -> Option<NaiveDate> {
        if first >= end {
            return None;
        }
        match self.unit {
            CalendarUnit::Day => self.predecessor(end),
            CalendarUnit::Week => {
                let days = end.signed_duration_since(*first).num_days() - 1;
                let whole_weeks = u64::try_from(days / 7 * 7).ok()?;
                first.checked_add_days(Days::new(whole_weeks))
            }
            // month arithmetic clamps to the month end, so steps cannot be undone
            _ => step_until(self, first, end),
        }
    }
}

impl Offsettable for DateDomain {
    type Offset = TimeDelta;

    /// Shifts by the whole days of `by`.
    fn offset(&self, value: &NaiveDate, by: &TimeDelta) -> Option<NaiveDate> {
        value.checked_add_signed(*by)
    }
}

impl Range<DateDomain> {
    /// The number of days between the bounds, zero for the empty range.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use range_algebra::{domain::DateDomain, Range, RangeError};
    ///
    /// let jan = Range::new(
    ///     DateDomain::default(),
    ///     NaiveDate::from_ymd_opt(2000, 1, 1),
    ///     NaiveDate::from_ymd_opt(2000, 2, 1),
    /// )
    /// .unwrap();
    /// assert_eq!(jan.length(), Ok(31));
    /// ```
    pub fn length(&self) -> Result<i64, RangeError> {
        if self.is_empty() {
            return Ok(0);
        }
        match (self.lower(), self.upper()) {
            (Some(l), Some(u)) => Ok(u.signed_duration_since(*l).num_days()),
            _ => Err(RangeError::Unbounded),
        }
    }
}

/// Dates with a time of day. Continuous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateTimeDomain;

impl ScalarDomain for DateTimeDomain {
    type Value = NaiveDateTime;

    fn name(&self) -> &'static str {
        "datetime"
    }
}

impl Offsettable for DateTimeDomain {
    type Offset = TimeDelta;

    fn offset(&self, value: &NaiveDateTime, by: &TimeDelta) -> Option<NaiveDateTime> {
        value.checked_add_signed(*by)
    }
}

/// Signed time spans. Continuous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DurationDomain;

impl ScalarDomain for DurationDomain {
    type Value = TimeDelta;

    fn name(&self) -> &'static str {
        "timedelta"
    }
}

impl Offsettable for DurationDomain {
    type Offset = TimeDelta;

    fn offset(&self, value: &TimeDelta, by: &TimeDelta) -> Option<TimeDelta> {
        value.checked_add(by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RangeSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_stepping() {
        let domain = DateDomain::default();
        assert_eq!(domain.successor(&ymd(2000, 2, 28)), Some(ymd(2000, 2, 29)));
        assert_eq!(domain.successor(&ymd(2001, 2, 28)), Some(ymd(2001, 3, 1)));
        assert_eq!(domain.predecessor(&ymd(2000, 3, 1)), Some(ymd(2000, 2, 29)));
    }

    #[test]
    fn month_stepping_clamps_to_month_end() {
        let domain = DateDomain::with_unit(CalendarUnit::Month);
        assert_eq!(domain.successor(&ymd(2000, 1, 31)), Some(ymd(2000, 2, 29)));
        assert_eq!(domain.predecessor(&ymd(2000, 3, 31)), Some(ymd(2000, 2, 29)));
    }

    #[test]
    fn coarse_units() {
        let week = DateDomain::with_unit(CalendarUnit::Week);
        assert_eq!(week.successor(&ymd(2000, 1, 1)), Some(ymd(2000, 1, 8)));
        let quarter = DateDomain::with_unit(CalendarUnit::Quarter);
        assert_eq!(quarter.successor(&ymd(2000, 11, 15)), Some(ymd(2001, 2, 15)));
        let year = DateDomain::with_unit(CalendarUnit::Year);
        assert_eq!(year.successor(&ymd(2000, 2, 29)), Some(ymd(2001, 2, 28)));
        assert_eq!(year.predecessor(&ymd(2001, 1, 1)), Some(ymd(2000, 1, 1)));
    }

    #[test]
    fn week_span_monday_start() {
        let domain = DateDomain::default();
        let span = domain
            .span(ymd(2000, 1, 1), Period::Week(WeekStart::Monday))
            .unwrap();
        assert_eq!(span.lower(), Some(&ymd(1999, 12, 27)));
        assert_eq!(span.upper(), Some(&ymd(2000, 1, 3)));
        assert!(span.lower_inc());
        assert!(!span.upper_inc());
    }

    #[test]
    fn week_span_sunday_start() {
        let domain = DateDomain::default();
        let span = domain
            .span(ymd(2000, 1, 1), Period::Week(WeekStart::Sunday))
            .unwrap();
        assert_eq!(span.lower(), Some(&ymd(1999, 12, 26)));
        assert_eq!(span.upper(), Some(&ymd(2000, 1, 2)));
    }

    #[test]
    fn weeks_of_either_start_share_a_set() {
        let domain = DateDomain::default();
        let mut weeks = RangeSet::new(domain);
        weeks
            .add(domain.span(ymd(2000, 1, 1), Period::Week(WeekStart::Monday)).unwrap())
            .unwrap();
        weeks
            .add(domain.span(ymd(2000, 1, 1), Period::Week(WeekStart::Sunday)).unwrap())
            .unwrap();
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks.span().lower(), Some(&ymd(1999, 12, 26)));
        assert_eq!(weeks.span().upper(), Some(&ymd(2000, 1, 3)));
    }

    #[test]
    fn week_span_on_week_start() {
        let domain = DateDomain::default();
        let span = domain
            .span(ymd(2000, 1, 3), Period::Week(WeekStart::default()))
            .unwrap();
        assert_eq!(span.lower(), Some(&ymd(2000, 1, 3)));
        assert_eq!(span.upper(), Some(&ymd(2000, 1, 10)));
    }

    #[test]
    fn month_quarter_year_spans() {
        let domain = DateDomain::default();

        let month = domain.span(ymd(2000, 2, 14), Period::Month).unwrap();
        assert_eq!(month.lower(), Some(&ymd(2000, 2, 1)));
        assert_eq!(month.upper(), Some(&ymd(2000, 3, 1)));
        assert_eq!(month.iter().unwrap().count(), 29);

        let quarter = domain.span(ymd(2000, 8, 20), Period::Quarter).unwrap();
        assert_eq!(quarter.lower(), Some(&ymd(2000, 7, 1)));
        assert_eq!(quarter.upper(), Some(&ymd(2000, 10, 1)));

        let year = domain.span(ymd(2000, 8, 20), Period::Year).unwrap();
        assert_eq!(year.lower(), Some(&ymd(2000, 1, 1)));
        assert_eq!(year.upper(), Some(&ymd(2001, 1, 1)));
        assert_eq!(year.iter().unwrap().count(), 366);
    }

    #[test]
    fn day_span_is_single_date() {
        let domain = DateDomain::default();
        let day = domain.span(ymd(2017, 6, 11), Period::Day).unwrap();
        assert_eq!(day.last().unwrap(), Some(ymd(2017, 6, 11)));
        assert!(day.contains_value(&ymd(2017, 6, 11)).unwrap());
        assert!(!day.contains_value(&ymd(2017, 6, 12)).unwrap());
    }

    #[test]
    fn month_steps_from_month_end() {
        let months = DateDomain::with_unit(CalendarUnit::Month);
        let jan31 = ymd(2000, 1, 31);
        let r = Range::singleton(months, jan31).unwrap();
        assert_eq!(r.upper(), Some(&ymd(2000, 2, 29)));
        assert_eq!(r.last(), Ok(Some(jan31)));
        assert_eq!(r.iter().unwrap().collect::<Vec<_>>(), vec![jan31]);
        assert!(r.ends_with_value(&jan31).unwrap());

        let r = Range::new(months, Some(jan31), Some(ymd(2000, 4, 30))).unwrap();
        assert_eq!(
            r.iter().unwrap().collect::<Vec<_>>(),
            vec![jan31, ymd(2000, 2, 29), ymd(2000, 3, 29), ymd(2000, 4, 29)]
        );
        assert_eq!(r.last(), Ok(Some(ymd(2000, 4, 29))));
    }

    #[test]
    fn week_steps_stop_before_upper() {
        let weeks = DateDomain::with_unit(CalendarUnit::Week);
        let r = Range::new(weeks, Some(ymd(2000, 1, 1)), Some(ymd(2000, 1, 17))).unwrap();
        assert_eq!(
            r.iter().unwrap().collect::<Vec<_>>(),
            vec![ymd(2000, 1, 1), ymd(2000, 1, 8), ymd(2000, 1, 15)]
        );
        assert_eq!(r.last(), Ok(Some(ymd(2000, 1, 15))));
    }

    #[test]
    fn date_offset() {
        let domain = DateDomain::default();
        let low = Range::new(domain, Some(ymd(2000, 1, 1)), Some(ymd(2000, 1, 6))).unwrap();
        let high = Range::new(domain, Some(ymd(2000, 1, 5)), Some(ymd(2000, 1, 10))).unwrap();
        assert_ne!(low, high);
        assert_eq!(low.offset(&TimeDelta::days(4)).unwrap(), high);
        assert_eq!(high.offset(&TimeDelta::days(-4)).unwrap(), low);
        assert_eq!(low.offset(&TimeDelta::hours(12)).unwrap(), low);
        assert!(matches!(
            low.offset(&TimeDelta::days(1_000_000_000)),
            Err(RangeError::Overflow { domain: "date", .. })
        ));
    }

    #[test]
    fn date_length() {
        let domain = DateDomain::default();
        let jan = Range::new(domain, Some(ymd(2000, 1, 1)), Some(ymd(2000, 2, 1))).unwrap();
        assert_eq!(jan.length(), Ok(31));
        assert_eq!(Range::empty(domain).length(), Ok(0));
        let open = Range::new(domain, Some(ymd(2000, 3, 18)), None).unwrap();
        assert_eq!(open.length(), Err(RangeError::Unbounded));
    }

    #[test]
    fn datetime_offset() {
        let start = ymd(2000, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        let end = ymd(2000, 1, 2).and_hms_opt(12, 0, 0).unwrap();
        let r = Range::new(DateTimeDomain, Some(start), Some(end)).unwrap();
        let shifted = r.offset(&TimeDelta::hours(12)).unwrap();
        assert_eq!(shifted.lower(), ymd(2000, 1, 2).and_hms_opt(0, 0, 0).as_ref());
        assert_eq!(shifted.upper(), ymd(2000, 1, 3).and_hms_opt(0, 0, 0).as_ref());
    }

    #[test]
    fn duration_ranges_are_continuous() {
        let r = Range::new(
            DurationDomain,
            Some(TimeDelta::minutes(1)),
            Some(TimeDelta::minutes(2)),
        )
        .unwrap();
        assert!(r.contains_value(&TimeDelta::seconds(90)).unwrap());
        assert!(matches!(
            r.iter(),
            Err(RangeError::NotDiscrete { domain: "timedelta" })
        ));
    }
}
