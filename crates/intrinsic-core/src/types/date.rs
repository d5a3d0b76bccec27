//! Date type for credit calculations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A calendar date for credit calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing
/// financial-specific operations and ensuring type safety.
///
/// # Example
///
/// ```rust
/// use intrinsic_core::types::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// let future = date.add_months(6).unwrap();
/// assert_eq!(future.year(), 2025);
/// assert_eq!(future.month(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        // Clamp day to valid range for new month
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let new_year = self.year() + years;
        let max_day = days_in_month(new_year, self.month());
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, self.month(), new_day)
    }

    /// Calculates the number of calendar days between two dates.
    ///
    /// Positive when `other` is after `self`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the next standard CDS roll date after adding a tenor.
    ///
    /// Credit index and single-name CDS contracts mature on the 20th of
    /// March, June, September, or December. This adds `tenor_months` to
    /// the date, then rolls forward to the first such date on or after
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use intrinsic_core::types::Date;
    ///
    /// let trade = Date::from_ymd(2007, 8, 1).unwrap();
    /// let maturity = trade.next_cds_date(60).unwrap();
    /// assert_eq!(maturity, Date::from_ymd(2012, 9, 20).unwrap());
    /// ```
    pub fn next_cds_date(&self, tenor_months: i32) -> CoreResult<Self> {
        let start = self.add_months(tenor_months)?;

        let mut year = start.year();
        let mut month = start.month();
        loop {
            if matches!(month, 3 | 6 | 9 | 12) {
                let candidate = Self::from_ymd(year, month, 20)?;
                if candidate >= start {
                    return Ok(candidate);
                }
            }
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Returns the number of days in a given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|d| d.leap_year()) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd_valid() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_from_ymd_invalid() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_parse() {
        let date = Date::parse("2024-02-29").unwrap();
        assert_eq!(date, Date::from_ymd(2024, 2, 29).unwrap());
        assert!(Date::parse("not-a-date").is_err());
    }

    #[test]
    fn test_add_months_rolls_back_day() {
        let date = Date::from_ymd(2025, 1, 31).unwrap();
        let next = date.add_months(1).unwrap();
        assert_eq!(next, Date::from_ymd(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_add_months_negative() {
        let date = Date::from_ymd(2025, 3, 15).unwrap();
        let prev = date.add_months(-4).unwrap();
        assert_eq!(prev, Date::from_ymd(2024, 11, 15).unwrap());
    }

    #[test]
    fn test_days_between() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 4, 1).unwrap();
        assert_eq!(a.days_between(&b), 90);
        assert_eq!(b.days_between(&a), -90);
    }

    #[test]
    fn test_next_cds_date_rolls_forward() {
        let trade = Date::from_ymd(2007, 8, 1).unwrap();

        // 3Y: 2010-08-01 rolls to 2010-09-20
        assert_eq!(
            trade.next_cds_date(36).unwrap(),
            Date::from_ymd(2010, 9, 20).unwrap()
        );
        // 10Y: 2017-08-01 rolls to 2017-09-20
        assert_eq!(
            trade.next_cds_date(120).unwrap(),
            Date::from_ymd(2017, 9, 20).unwrap()
        );
    }

    #[test]
    fn test_next_cds_date_on_roll_date() {
        // 2025-03-20 plus zero months is already a roll date
        let date = Date::from_ymd(2025, 3, 20).unwrap();
        assert_eq!(date.next_cds_date(0).unwrap(), date);

        // One day past the roll date moves to the next quarter
        let past = Date::from_ymd(2025, 3, 21).unwrap();
        assert_eq!(
            past.next_cds_date(0).unwrap(),
            Date::from_ymd(2025, 6, 20).unwrap()
        );
    }

    #[test]
    fn test_ordering() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 1, 2).unwrap();
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a, a);
    }

    #[test]
    fn test_serde_round_trip() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, back);
    }
}
