//! Day count conventions for credit calculations.
//!
//! Day count conventions determine how accrued premium and hazard-rate
//! integration periods are measured, by specifying how to count days
//! between two dates and the year basis.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - CDS premium accrual (market standard)
//! - [`Act365Fixed`]: Actual/365 Fixed - hazard-rate and survival time
//! - [`Thirty360E`]: 30E/360 - Eurobond basis, used by some swap legs
//!
//! # Usage
//!
//! ```rust
//! use intrinsic_core::daycounts::{Act360, DayCount};
//! use intrinsic_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::Thirty360E;

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Can be negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; for 30/360
    /// conventions it uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Provides a convenient way to select conventions at runtime and
/// convert to boxed trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - CDS premium legs, money market instruments.
    Act360,
    /// Actual/365 Fixed - survival-probability time measurement.
    Act365Fixed,
    /// 30E/360 (Eurobond basis).
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            Self::Act360 => Box::new(Act360),
            Self::Act365Fixed => Box::new(Act365Fixed),
            Self::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Calculates the year fraction between two dates under this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            Self::Act360 => Act360.year_fraction(start, end),
            Self::Act365Fixed => Act365Fixed.year_fraction(start, end),
            Self::Thirty360E => Thirty360E.year_fraction(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_dispatch() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        let via_enum = DayCountConvention::Act365Fixed.year_fraction(start, end);
        let via_trait = Act365Fixed.year_fraction(start, end);
        assert!((via_enum - via_trait).abs() < f64::EPSILON);
        assert!((via_enum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_day_count_names() {
        assert_eq!(DayCountConvention::Act360.to_day_count().name(), "ACT/360");
        assert_eq!(
            DayCountConvention::Thirty360E.to_day_count().name(),
            "30E/360"
        );
    }
}
