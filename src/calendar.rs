//! Date Bucketing
//!
//! Week and month ranges over `CalendarDate`. Weeks start on Sunday and
//! span seven days; months run from the 1st to their last day. All ranges
//! are inclusive on both ends.

use serde::{Deserialize, Serialize};

use crate::domain::CalendarDate;

/// Inclusive day range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the range in order
    pub fn days(&self) -> Vec<CalendarDate> {
        let mut days = Vec::new();
        let mut day = self.start;
        while day <= self.end {
            days.push(day);
            day = day.add_days(1);
        }
        days
    }
}

/// Sunday that starts the week containing `date`
pub fn bucket_for(date: CalendarDate) -> CalendarDate {
    date.add_days(-i64::from(date.weekday_index()))
}

pub fn week_range(reference: CalendarDate) -> DateRange {
    let start = bucket_for(reference);
    DateRange::new(start, start.add_days(6))
}

pub fn month_range(reference: CalendarDate) -> DateRange {
    DateRange::new(reference.first_of_month(), reference.last_of_month())
}

/// Seven consecutive days starting at `start`
pub fn week_days(start: CalendarDate) -> [CalendarDate; 7] {
    std::array::from_fn(|i| start.add_days(i as i64))
}

pub fn shift_week(anchor: CalendarDate, weeks: i64) -> CalendarDate {
    anchor.add_days(weeks * 7)
}

pub fn shift_month(anchor: CalendarDate, months: i32) -> CalendarDate {
    anchor.add_months(months)
}

/// Month grid for a Sunday-first calendar: one `None` per weekday slot before
/// the 1st, then every day of the month.
pub fn month_grid(anchor: CalendarDate) -> Vec<Option<CalendarDate>> {
    let range = month_range(anchor);
    let leading = range.start.weekday_index() as usize;
    std::iter::repeat(None)
        .take(leading)
        .chain(range.days().into_iter().map(Some))
        .collect()
}

/// Week buckets touching the month of `anchor`, each clipped to the month
pub fn weeks_of_month(anchor: CalendarDate) -> Vec<DateRange> {
    let month = month_range(anchor);
    let mut weeks = Vec::new();
    let mut week_start = bucket_for(month.start);
    while week_start <= month.end {
        let week_end = week_start.add_days(6);
        weeks.push(DateRange::new(
            week_start.max(month.start),
            week_end.min(month.end),
        ));
        week_start = week_start.add_days(7);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_week_range_is_sunday_anchored() {
        let range = week_range(d("2023-12-06"));
        assert_eq!(range.start, d("2023-12-03"));
        assert_eq!(range.end, d("2023-12-09"));

        // A Sunday is its own bucket
        assert_eq!(bucket_for(d("2023-12-03")), d("2023-12-03"));
        // Crosses a month boundary
        assert_eq!(bucket_for(d("2023-12-01")), d("2023-11-26"));
    }

    #[test]
    fn test_month_range() {
        let range = month_range(d("2024-02-17"));
        assert_eq!(range.start, d("2024-02-01"));
        assert_eq!(range.end, d("2024-02-29"));
        assert!(range.contains(d("2024-02-29")));
        assert!(!range.contains(d("2024-03-01")));
    }

    #[test]
    fn test_week_days_are_consecutive() {
        let days = week_days(d("2023-12-31"));
        assert_eq!(days[0], d("2023-12-31"));
        assert_eq!(days[1], d("2024-01-01"));
        assert_eq!(days[6], d("2024-01-06"));
    }

    #[test]
    fn test_month_grid_leading_slots() {
        // 2023-12-01 is a Friday: five empty slots
        let grid = month_grid(d("2023-12-15"));
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 5);
        assert_eq!(grid[5], Some(d("2023-12-01")));
        assert_eq!(grid.len(), 5 + 31);
    }

    #[test]
    fn test_weeks_of_month_cover_month_exactly() {
        let weeks = weeks_of_month(d("2023-12-15"));
        assert_eq!(weeks.first().unwrap().start, d("2023-12-01"));
        assert_eq!(weeks.first().unwrap().end, d("2023-12-02"));
        assert_eq!(weeks.last().unwrap().end, d("2023-12-31"));
        let covered: usize = weeks.iter().map(|w| w.days().len()).sum();
        assert_eq!(covered, 31);
        assert_eq!(weeks.len(), 6);
    }

    #[test]
    fn test_navigation() {
        assert_eq!(shift_week(d("2023-12-03"), 1), d("2023-12-10"));
        assert_eq!(shift_week(d("2023-12-03"), -1), d("2023-11-26"));
        assert_eq!(shift_month(d("2023-12-31"), 2), d("2024-02-29"));
    }
}
