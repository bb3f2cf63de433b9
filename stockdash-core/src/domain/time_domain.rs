//! TimeDomain: the active `[start, end]` window shared by the panels.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDomain {
    start: NaiveDate,
    end: NaiveDate,
}

impl TimeDomain {
    /// Build a domain from two dates in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Smallest domain covering every date, or `None` for an empty iterator.
    pub fn extent<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some(Self { start: d, end: d }),
            Some(dom) => Some(Self {
                start: dom.start.min(d),
                end: dom.end.max(d),
            }),
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Raise the start to `floor`, or `None` when that leaves nothing.
    pub fn clip_start(&self, floor: NaiveDate) -> Option<Self> {
        let start = self.start.max(floor);
        (start <= self.end).then_some(Self {
            start,
            end: self.end,
        })
    }

    /// Length in days (0 for a single-day domain).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_orders_endpoints() {
        let dom = TimeDomain::new(d(2020, 5, 1), d(2020, 1, 1));
        assert_eq!(dom.start(), d(2020, 1, 1));
        assert_eq!(dom.end(), d(2020, 5, 1));
    }

    #[test]
    fn contains_is_inclusive() {
        let dom = TimeDomain::new(d(2020, 1, 1), d(2020, 1, 31));
        assert!(dom.contains(d(2020, 1, 1)));
        assert!(dom.contains(d(2020, 1, 31)));
        assert!(!dom.contains(d(2020, 2, 1)));
        assert!(!dom.contains(d(2019, 12, 31)));
    }

    #[test]
    fn extent_of_empty_is_none() {
        assert!(TimeDomain::extent(Vec::<NaiveDate>::new()).is_none());
        let dom = TimeDomain::extent(vec![d(2021, 3, 3), d(2019, 1, 1), d(2020, 6, 6)]).unwrap();
        assert_eq!(dom, TimeDomain::new(d(2019, 1, 1), d(2021, 3, 3)));
    }

    #[test]
    fn clip_start_past_end_is_none() {
        let dom = TimeDomain::new(d(2010, 1, 1), d(2012, 1, 1));
        assert!(dom.clip_start(d(2016, 1, 1)).is_none());
        let clipped = dom.clip_start(d(2011, 1, 1)).unwrap();
        assert_eq!(clipped.start(), d(2011, 1, 1));
        assert_eq!(dom.clip_start(d(2000, 1, 1)).unwrap(), dom);
    }
}
