//! Discount curve abstraction and reference implementations.
//!
//! Credit pricing only needs one thing from the rates world: a discount
//! factor for an arbitrary future date. The [`DiscountProvider`] trait is
//! that seam, so the pricing core stays independent of how the funding
//! curve was built.

use intrinsic_core::daycounts::{Act365Fixed, DayCount};
use intrinsic_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CreditError, CreditResult};

/// Source of risk-free discount factors.
///
/// Implementations must return `1.0` for dates on or before their
/// valuation date and strictly positive factors everywhere else.
pub trait DiscountProvider: Send + Sync {
    /// Returns the discount factor from the valuation date to `date`.
    fn discount_factor(&self, date: Date) -> f64;
}

/// Flat continuously compounded discount curve.
///
/// Discounts with `exp(-r * t)` where `t` is the ACT/365F year fraction
/// from the valuation date. Mostly used in tests and as a stand-in when no
/// bootstrapped funding curve is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatDiscountCurve {
    valuation_date: Date,
    rate: f64,
}

impl FlatDiscountCurve {
    /// Creates a flat discount curve at the given continuously compounded rate.
    #[must_use]
    pub fn new(valuation_date: Date, rate: f64) -> Self {
        Self {
            valuation_date,
            rate,
        }
    }

    /// The curve's valuation date.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// The continuously compounded flat rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl DiscountProvider for FlatDiscountCurve {
    fn discount_factor(&self, date: Date) -> f64 {
        if date <= self.valuation_date {
            return 1.0;
        }
        let t = Act365Fixed.year_fraction(self.valuation_date, date);
        (-self.rate * t).exp()
    }
}

/// Discount curve defined by discrete pillar discount factors.
///
/// Interpolates log-linearly in the discount factor between pillars, which
/// is equivalent to a piecewise-constant forward rate. Beyond the last
/// pillar the final forward rate is held flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteDiscountCurve {
    valuation_date: Date,
    /// Pillar times in ACT/365F years paired with discount factors,
    /// strictly increasing in time.
    pillars: Vec<(f64, f64)>,
}

impl DiscreteDiscountCurve {
    /// Creates a discount curve from dated pillar discount factors.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] if no pillars are supplied,
    /// pillar dates are not strictly increasing and after the valuation
    /// date, or any discount factor is outside `(0, 1]`.
    pub fn new(valuation_date: Date, pillars: &[(Date, f64)]) -> CreditResult<Self> {
        if pillars.is_empty() {
            return Err(CreditError::invalid_curve(
                "discount curve requires at least one pillar",
            ));
        }

        let mut times = Vec::with_capacity(pillars.len());
        let mut prev_t = 0.0;
        for (i, &(date, df)) in pillars.iter().enumerate() {
            if date <= valuation_date {
                return Err(CreditError::invalid_curve(format!(
                    "pillar {i} date {date} is not after valuation date {valuation_date}"
                )));
            }
            if !df.is_finite() || df <= 0.0 || df > 1.0 {
                return Err(CreditError::invalid_curve(format!(
                    "pillar {i} discount factor {df} is outside (0, 1]"
                )));
            }
            let t = Act365Fixed.year_fraction(valuation_date, date);
            if t <= prev_t {
                return Err(CreditError::invalid_curve(format!(
                    "pillar {i} date {date} is not strictly increasing"
                )));
            }
            times.push((t, df));
            prev_t = t;
        }

        Ok(Self {
            valuation_date,
            pillars: times,
        })
    }

    /// The curve's valuation date.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn log_df_at(&self, t: f64) -> f64 {
        // (0, 1) is an implicit anchor pillar
        let mut t0 = 0.0;
        let mut ln0 = 0.0;
        for &(ti, dfi) in &self.pillars {
            let lni = dfi.ln();
            if t <= ti {
                let w = (t - t0) / (ti - t0);
                return ln0 + w * (lni - ln0);
            }
            t0 = ti;
            ln0 = lni;
        }

        // Flat-forward extrapolation past the last pillar
        let (t_last, df_last) = self.pillars[self.pillars.len() - 1];
        let fwd = if self.pillars.len() >= 2 {
            let (t_prev, df_prev) = self.pillars[self.pillars.len() - 2];
            -(df_last.ln() - df_prev.ln()) / (t_last - t_prev)
        } else {
            -df_last.ln() / t_last
        };
        df_last.ln() - fwd * (t - t_last)
    }
}

impl DiscountProvider for DiscreteDiscountCurve {
    fn discount_factor(&self, date: Date) -> f64 {
        if date <= self.valuation_date {
            return 1.0;
        }
        let t = Act365Fixed.year_fraction(self.valuation_date, date);
        self.log_df_at(t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_flat_curve_on_valuation_date() {
        let curve = FlatDiscountCurve::new(d(2024, 1, 2), 0.05);

        assert_relative_eq!(curve.discount_factor(d(2024, 1, 2)), 1.0);
        assert_relative_eq!(curve.discount_factor(d(2023, 12, 29)), 1.0);
    }

    #[test]
    fn test_flat_curve_one_year() {
        let curve = FlatDiscountCurve::new(d(2024, 1, 2), 0.05);

        // 2025-01-02 is 366 days away (2024 is a leap year)
        let expected = (-0.05_f64 * 366.0 / 365.0).exp();
        assert_relative_eq!(curve.discount_factor(d(2025, 1, 2)), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_unit() {
        let curve = FlatDiscountCurve::new(d(2024, 1, 2), 0.0);

        assert_relative_eq!(curve.discount_factor(d(2034, 1, 2)), 1.0);
    }

    #[test]
    fn test_discrete_curve_recovers_pillars() {
        let valuation = d(2024, 1, 2);
        let pillars = vec![(d(2025, 1, 2), 0.95), (d(2026, 1, 2), 0.90)];
        let curve = DiscreteDiscountCurve::new(valuation, &pillars).unwrap();

        assert_relative_eq!(curve.discount_factor(d(2025, 1, 2)), 0.95, epsilon = 1e-12);
        assert_relative_eq!(curve.discount_factor(d(2026, 1, 2)), 0.90, epsilon = 1e-12);
    }

    #[test]
    fn test_discrete_curve_interpolates_log_linearly() {
        let valuation = d(2024, 1, 2);
        let pillars = vec![(d(2025, 1, 2), 0.95), (d(2026, 1, 2), 0.90)];
        let curve = DiscreteDiscountCurve::new(valuation, &pillars).unwrap();

        let df = curve.discount_factor(d(2025, 7, 2));
        assert!(df < 0.95 && df > 0.90);

        // Between pillars the forward rate is constant, so ln(df) is
        // linear in time
        let t1 = Act365Fixed.year_fraction(valuation, d(2025, 1, 2));
        let t2 = Act365Fixed.year_fraction(valuation, d(2026, 1, 2));
        let t = Act365Fixed.year_fraction(valuation, d(2025, 7, 2));
        let w = (t - t1) / (t2 - t1);
        let expected = (0.95_f64.ln() + w * (0.90_f64.ln() - 0.95_f64.ln())).exp();
        assert_relative_eq!(df, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_discrete_curve_extrapolates_flat_forward() {
        let valuation = d(2024, 1, 2);
        let pillars = vec![(d(2025, 1, 2), 0.95), (d(2026, 1, 2), 0.90)];
        let curve = DiscreteDiscountCurve::new(valuation, &pillars).unwrap();

        let df = curve.discount_factor(d(2027, 1, 2));
        assert!(df < 0.90);
        assert!(df > 0.0);
    }

    #[test]
    fn test_discrete_curve_rejects_bad_pillars() {
        let valuation = d(2024, 1, 2);

        assert!(DiscreteDiscountCurve::new(valuation, &[]).is_err());
        assert!(DiscreteDiscountCurve::new(valuation, &[(d(2023, 1, 2), 0.95)]).is_err());
        assert!(DiscreteDiscountCurve::new(valuation, &[(d(2025, 1, 2), 1.05)]).is_err());
        assert!(DiscreteDiscountCurve::new(
            valuation,
            &[(d(2026, 1, 2), 0.95), (d(2025, 1, 2), 0.90)]
        )
        .is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let curve = FlatDiscountCurve::new(d(2024, 1, 2), 0.05);

        let json = serde_json::to_string(&curve).unwrap();
        let back: FlatDiscountCurve = serde_json::from_str(&json).unwrap();

        assert_eq!(curve, back);
    }
}
