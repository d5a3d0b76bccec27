//! Credit index aggregation across issuer curves.
//!
//! An index (e.g. CDX.NA.IG, iTraxx Europe) references a basket of
//! single-name curves. This module computes portfolio-level spreads from
//! the constituent curves by pricing a standard CDS on each name and
//! combining the legs.

use intrinsic_core::daycounts::DayCountConvention;
use intrinsic_core::types::{Date, Frequency};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::contract::{CdsContract, CdsLegs};
use crate::discount::DiscountProvider;
use crate::error::{CreditError, CreditResult};
use crate::survival::SurvivalCurve;

/// The survival curves of an index's constituents.
///
/// All curves must share a valuation date; the set is validated once at
/// construction so aggregation can assume consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerCurveSet {
    curves: Vec<SurvivalCurve>,
}

impl IssuerCurveSet {
    /// Creates a curve set from constituent curves.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] if `curves` is empty or the
    /// curves do not share a valuation date.
    pub fn new(curves: Vec<SurvivalCurve>) -> CreditResult<Self> {
        if curves.is_empty() {
            return Err(CreditError::invalid_curve(
                "issuer curve set requires at least one curve",
            ));
        }
        let valuation_date = curves[0].valuation_date();
        for (i, curve) in curves.iter().enumerate() {
            if curve.valuation_date() != valuation_date {
                return Err(CreditError::invalid_curve(format!(
                    "curve {i} valuation date {} differs from {}",
                    curve.valuation_date(),
                    valuation_date
                )));
            }
        }
        Ok(Self { curves })
    }

    /// The shared valuation date of the constituent curves.
    pub fn valuation_date(&self) -> Date {
        self.curves[0].valuation_date()
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the set is empty. Always `false` for a validated set; kept
    /// for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The constituent curves.
    pub fn curves(&self) -> &[SurvivalCurve] {
        &self.curves
    }

    /// Consumes the set, returning the constituent curves.
    #[must_use]
    pub fn into_curves(self) -> Vec<SurvivalCurve> {
        self.curves
    }
}

/// Computes portfolio-level spreads for a credit index.
///
/// # Example
///
/// ```rust
/// use intrinsic_credit::prelude::*;
/// use intrinsic_core::types::Date;
///
/// let valuation_date = Date::from_ymd(2024, 1, 2).unwrap();
/// let maturity = valuation_date.next_cds_date(60).unwrap();
/// let curves = IssuerCurveSet::new(vec![
///     SurvivalCurve::new(valuation_date, vec![(maturity, 0.01)], 0.40).unwrap(),
///     SurvivalCurve::new(valuation_date, vec![(maturity, 0.03)], 0.40).unwrap(),
/// ]).unwrap();
/// let discount = FlatDiscountCurve::new(valuation_date, 0.05);
///
/// let aggregator = IndexAggregator::new();
/// let avg = aggregator
///     .average_spread(valuation_date, valuation_date.add_days(1), maturity, &curves, &discount)
///     .unwrap();
/// assert!(avg > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct IndexAggregator {
    frequency: Frequency,
    premium_day_count: DayCountConvention,
}

impl Default for IndexAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexAggregator {
    /// Creates an aggregator with market-standard contract conventions
    /// (quarterly premiums, ACT/360 accrual).
    #[must_use]
    pub fn new() -> Self {
        Self {
            frequency: Frequency::Quarterly,
            premium_day_count: DayCountConvention::Act360,
        }
    }

    /// Sets the premium frequency of the per-name contracts.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the premium day count of the per-name contracts.
    #[must_use]
    pub fn with_premium_day_count(mut self, convention: DayCountConvention) -> Self {
        self.premium_day_count = convention;
        self
    }

    fn name_contract(&self, step_in_date: Date, maturity_date: Date) -> CdsContract {
        // The coupon does not enter par-spread or leg calculations
        CdsContract::new(step_in_date, maturity_date, 0.0)
            .with_frequency(self.frequency)
            .with_premium_day_count(self.premium_day_count)
    }

    /// Prices the standard contract on every constituent, in issuer order.
    fn name_legs(
        &self,
        valuation_date: Date,
        step_in_date: Date,
        maturity_date: Date,
        curves: &IssuerCurveSet,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<Vec<CdsLegs>> {
        let contract = self.name_contract(step_in_date, maturity_date);

        #[cfg(feature = "parallel")]
        {
            curves
                .curves()
                .par_iter()
                .map(|curve| contract.legs(valuation_date, curve, discount))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            curves
                .curves()
                .iter()
                .map(|curve| contract.legs(valuation_date, curve, discount))
                .collect()
        }
    }

    /// Unweighted average of the constituents' par spreads.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::ValuationError`] if any constituent's risky
    /// annuity is not strictly positive, or the dates are inconsistent.
    pub fn average_spread(
        &self,
        valuation_date: Date,
        step_in_date: Date,
        maturity_date: Date,
        curves: &IssuerCurveSet,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        let legs = self.name_legs(valuation_date, step_in_date, maturity_date, curves, discount)?;

        let mut total = 0.0;
        for (i, leg) in legs.iter().enumerate() {
            if leg.annuity <= 0.0 {
                return Err(CreditError::valuation(format!(
                    "constituent {i} risky annuity {} is not strictly positive",
                    leg.annuity
                )));
            }
            total += leg.protection / leg.annuity;
        }
        Ok(total / legs.len() as f64)
    }

    /// Intrinsic (annuity-weighted) spread of the basket: total expected
    /// protection over total risky annuity.
    ///
    /// This is the fair running spread of the basket traded as one
    /// contract, and weights riskier names less than [`Self::average_spread`]
    /// because their annuities are shorter.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::ValuationError`] if the total risky annuity
    /// is not strictly positive, or the dates are inconsistent.
    pub fn intrinsic_spread(
        &self,
        valuation_date: Date,
        step_in_date: Date,
        maturity_date: Date,
        curves: &IssuerCurveSet,
        discount: &dyn DiscountProvider,
    ) -> CreditResult<f64> {
        let legs = self.name_legs(valuation_date, step_in_date, maturity_date, curves, discount)?;

        let total_protection: f64 = legs.iter().map(|l| l.protection).sum();
        let total_annuity: f64 = legs.iter().map(|l| l.annuity).sum();
        if total_annuity <= 0.0 {
            return Err(CreditError::valuation(format!(
                "total risky annuity {total_annuity} is not strictly positive"
            )));
        }
        Ok(total_protection / total_annuity)
    }
}
