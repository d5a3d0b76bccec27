//! Single-name CDS contract valuation.
//!
//! A contract prices against any [`SurvivalCurve`] and [`DiscountProvider`]
//! passed in at call time, so one contract definition can be repriced under
//! many curve scenarios without rebuilding it.

use intrinsic_core::daycounts::DayCountConvention;
use intrinsic_core::types::{Date, Frequency};
use serde::{Deserialize, Serialize};

use crate::discount::DiscountProvider;
use crate::error::{CreditError, CreditResult};
use crate::survival::SurvivalCurve;

/// Step size of the protection-leg integration grid, in calendar days.
const PROTECTION_STEP_DAYS: i64 = 30;

/// Present values of the two CDS legs, per unit notional.
///
/// `annuity` is the risky annuity (RPV01): the value of receiving one
/// unit of spread on the premium schedule, including the expected accrued
/// premium paid on default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsLegs {
    /// Expected discounted loss of the protection leg
    pub protection: f64,
    /// Risky annuity of the premium leg
    pub annuity: f64,
}

/// A single-name credit default swap.
///
/// # Example
///
/// ```rust
/// use intrinsic_credit::prelude::*;
/// use intrinsic_core::types::Date;
///
/// let valuation_date = Date::from_ymd(2024, 1, 2).unwrap();
/// let maturity = valuation_date.next_cds_date(60).unwrap();
/// let cds = CdsContract::new(valuation_date.add_days(1), maturity, 0.0100);
///
/// let curve = SurvivalCurve::new(valuation_date, vec![(maturity, 0.02)], 0.40).unwrap();
/// let discount = FlatDiscountCurve::new(valuation_date, 0.05);
///
/// let spread = cds.par_spread(valuation_date, &curve, &discount).unwrap();
/// assert!(spread > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsContract {
    step_in_date: Date,
    maturity_date: Date,
    coupon: f64,
    notional: f64,
    frequency: Frequency,
    premium_day_count: DayCountConvention,
    recovery_override: Option<f64>,
}

impl CdsContract {
    /// Creates a CDS with market-standard conventions: unit notional,
    /// quarterly premiums accruing ACT/360, recovery taken from the curve.
    ///
    /// `coupon` is the running premium as a decimal (100bp = `0.01`).
    #[must_use]
    pub fn new(step_in_date: Date, maturity_date: Date, coupon: f64) -> Self {
        Self {
            step_in_date,
            maturity_date,
            coupon,
            notional: 1.0,
            frequency: Frequency::Quarterly,
            premium_day_count: DayCountConvention::Act360,
            recovery_override: None,
        }
    }

    /// Sets the contract notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the premium payment frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the premium accrual day count convention.
    #[must_use]
    pub fn with_premium_day_count(mut self, convention: DayCountConvention) -> Self {
        self.premium_day_count = convention;
        self
    }

    /// Overrides the recovery rate, taking precedence over the curve's.
    #[must_use]
    pub fn with_recovery_override(mut self, recovery_rate: f64) -> Self {
        self.recovery_override = Some(recovery_rate);
        self
    }

    /// The protection effective date.
    pub fn step_in_date(&self) -> Date {
        self.step_in_date
    }

    /// The contract maturity date.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// The running premium as a decimal.
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// The contract notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Premium periods as `(accrual_start, accrual_end)` pairs.
    ///
    /// Periods are generated backward from maturity at the payment
    /// frequency; the stub, if any, sits at the front and starts on the
    /// step-in date. Premium is paid at each period end.
    pub fn premium_periods(&self) -> CreditResult<Vec<(Date, Date)>> {
        if self.maturity_date <= self.step_in_date {
            return Err(CreditError::valuation(format!(
                "maturity {} is not after step-in date {}",
                self.maturity_date, self.step_in_date
            )));
        }

        let step = self.frequency.months_per_period();
        let mut ends = Vec::new();
        let mut date = self.maturity_date;
        while date > self.step_in_date {
            ends.push(date);
            date = date.add_months(-step).map_err(|e| {
                CreditError::valuation(format!("premium schedule generation failed: {e}"))
            })?;
        }
        ends.reverse();

        let mut periods = Vec::with_capacity(ends.len());
        let mut start = self.step_in_date;
        for end in ends {
            periods.push((start, end));
            start = end;
        }
        Ok(periods)
    }

    /// Prices both legs per unit notional.
    ///
    /// The premium leg discounts each coupon to the period end weighted by
    /// survival, plus half the period coupon discounted to the period
    /// midpoint weighted by the probability of default within the period
    /// (accrued-on-default). The protection leg integrates discounted
    /// losses over an approximately monthly grid, discounting each step to
    /// its midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::ValuationError`] if the contract dates are
    /// inconsistent with `valuation_date` or the recovery rate in effect
    /// is outside `[0, 1)`.
    pub fn legs(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<CdsLegs> {
        if self.maturity_date <= valuation_date {
            return Err(CreditError::valuation(format!(
                "maturity {} is not after valuation date {}",
                self.maturity_date, valuation_date
            )));
        }
        let recovery = self.recovery_override.unwrap_or_else(|| curve.recovery_rate());
        if !(0.0..1.0).contains(&recovery) {
            return Err(CreditError::valuation(format!(
                "recovery rate {recovery} is outside [0, 1)"
            )));
        }

        let mut annuity = 0.0;
        for (start, end) in self.premium_periods()? {
            if end <= valuation_date {
                continue;
            }
            let alpha = self.premium_day_count.year_fraction(start, end);
            let q_start = curve.survival_probability(start);
            let q_end = curve.survival_probability(end);
            let mid = start.add_days(start.days_between(&end) / 2);

            annuity += alpha * discount.discount_factor(end) * q_end;
            annuity += 0.5 * alpha * discount.discount_factor(mid) * (q_start - q_end);
        }

        let protection_start = self.step_in_date.max(valuation_date);
        let mut protection = 0.0;
        let mut grid_start = protection_start;
        while grid_start < self.maturity_date {
            let grid_end = grid_start
                .add_days(PROTECTION_STEP_DAYS)
                .min(self.maturity_date);
            let q_start = curve.survival_probability(grid_start);
            let q_end = curve.survival_probability(grid_end);
            let mid = grid_start.add_days(grid_start.days_between(&grid_end) / 2);

            protection += discount.discount_factor(mid) * (q_start - q_end);
            grid_start = grid_end;
        }
        protection *= 1.0 - recovery;

        Ok(CdsLegs {
            protection,
            annuity,
        })
    }

    /// Risky annuity (RPV01) per unit notional.
    pub fn risky_annuity(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        Ok(self.legs(valuation_date, curve, discount)?.annuity)
    }

    /// Protection leg present value per unit notional.
    pub fn protection_leg_pv(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        Ok(self.legs(valuation_date, curve, discount)?.protection)
    }

    /// Premium leg present value including notional and coupon.
    pub fn premium_leg_pv(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        Ok(self.coupon * self.notional * self.legs(valuation_date, curve, discount)?.annuity)
    }

    /// Par spread: the running premium that makes the contract worth zero.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::ValuationError`] if the risky annuity is not
    /// strictly positive.
    pub fn par_spread(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        let legs = self.legs(valuation_date, curve, discount)?;
        if legs.annuity <= 0.0 {
            return Err(CreditError::valuation(format!(
                "risky annuity {} is not strictly positive",
                legs.annuity
            )));
        }
        Ok(legs.protection / legs.annuity)
    }

    /// Mark-to-market of an upfront-quoted contract: the running-coupon
    /// value net of the upfront points paid at inception.
    ///
    /// `upfront` is quoted as a decimal of notional, positive when the
    /// protection buyer pays points.
    pub fn pv_with_upfront(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
        upfront: f64,
    ) -> CreditResult<f64> {
        Ok(self.pv(valuation_date, curve, discount)? - upfront * self.notional)
    }

    /// Mark-to-market from the protection buyer's perspective.
    pub fn pv(
        &self,
        valuation_date: Date,
        curve: &SurvivalCurve,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        let legs = self.legs(valuation_date, curve, discount)?;
        Ok((legs.protection - self.coupon * legs.annuity) * self.notional)
    }
}
