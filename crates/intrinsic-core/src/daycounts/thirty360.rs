//! 30E/360 (Eurobond basis) day count convention.

use super::DayCount;
use crate::types::Date;

/// 30E/360 (Eurobond basis) day count convention.
///
/// Both start and end days are capped at 30; months are assumed to have
/// 30 days and years 360.
///
/// # Usage
///
/// - Eurobonds and some fixed swap legs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = start.day().min(30) as i64;
        let d2 = end.day().min(30) as i64;

        360 * (end.year() - start.year()) as i64
            + 30 * (end.month() as i64 - start.month() as i64)
            + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thirty360e_half_year() {
        let dc = Thirty360E;
        let start = Date::from_ymd(2025, 1, 15).unwrap();
        let end = Date::from_ymd(2025, 7, 15).unwrap();

        assert_eq!(dc.day_count(start, end), 180);
        assert_relative_eq!(dc.year_fraction(start, end), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_thirty360e_caps_month_end() {
        let dc = Thirty360E;
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 2, 28).unwrap();

        // Day 31 is treated as 30
        assert_eq!(dc.day_count(start, end), 28);
    }
}
