//! Calendar Date
//!
//! A day without time or zone, always written as zero-padded `YYYY-MM-DD`.
//! Parsing rejects any other shape, so ordering of `CalendarDate` and
//! lexical ordering of its string form always agree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

const FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse a strict `YYYY-MM-DD` string
    pub fn parse(s: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidDate(s.to_string());
        if s.len() != 10 {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(s, FORMAT).map_err(|_| invalid())?;
        // chrono accepts unpadded fields; only the canonical spelling is a valid date here
        if date.format(FORMAT).to_string() != s {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> DomainResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    /// Today in the local time zone
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day index within a Sunday-first week (0 = Sunday)
    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn add_days(&self, days: i64) -> Self {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        Self(shifted.unwrap_or(self.0))
    }

    /// Shift by whole months, clamping the day to the target month's length
    pub fn add_months(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        Self(shifted.unwrap_or(self.0))
    }

    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn last_of_month(&self) -> Self {
        self.first_of_month().add_months(1).add_days(-1)
    }

    /// Short weekday name, Sunday first
    pub fn weekday_short(&self) -> &'static str {
        WEEKDAY_SHORT[self.weekday_index() as usize]
    }
}

/// Weekday labels in Sunday-first order
pub const WEEKDAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
