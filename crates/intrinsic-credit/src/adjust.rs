//! Hazard-rate adjustment of issuer curves to traded index levels.
//!
//! Index levels trade away from the intrinsic spread of the constituent
//! curves. This module calibrates the basket to the market: for each index
//! tenor, in increasing maturity order, it scales every issuer's hazard
//! rates on the segment between the previous tenor and this one by a
//! common factor, solved so the basket reprices the index quote exactly.
//!
//! Before solving, every curve is refined with value-preserving nodes at
//! each index maturity. Tenor boundaries then fall on node boundaries, so
//! solving a later tenor cannot move survival probabilities at or before
//! an earlier one, and each matched tenor stays matched.

use intrinsic_core::daycounts::DayCountConvention;
use intrinsic_core::types::{Date, Frequency};
use intrinsic_math::solvers::{brent, SolverConfig};
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::contract::{CdsContract, CdsLegs};
use crate::discount::DiscountProvider;
use crate::error::{CreditError, CreditResult};
use crate::index::IssuerCurveSet;
use crate::survival::SurvivalCurve;

/// Search bracket for the per-tenor hazard scale factor. The lower bound
/// is kept strictly positive so scaled curves stay valid.
const FACTOR_LOWER_BOUND: f64 = 1e-6;
const FACTOR_UPPER_BOUND: f64 = 100.0;

/// A traded index level at one tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// Index maturity date
    pub maturity_date: Date,
    /// Running coupon of the index contract as a decimal
    pub coupon: f64,
    /// Upfront points as a decimal of notional; zero for on-market quotes
    pub upfront: f64,
}

impl IndexQuote {
    /// Creates an on-market index quote with zero upfront.
    #[must_use]
    pub fn new(maturity_date: Date, coupon: f64) -> Self {
        Self {
            maturity_date,
            coupon,
            upfront: 0.0,
        }
    }

    /// Creates an index quote with upfront points.
    #[must_use]
    pub fn with_upfront(maturity_date: Date, coupon: f64, upfront: f64) -> Self {
        Self {
            maturity_date,
            coupon,
            upfront,
        }
    }
}

/// Calibrates issuer curves to a term structure of index quotes.
#[derive(Debug, Clone)]
pub struct HazardAdjustmentEngine {
    recovery_rate: f64,
    frequency: Frequency,
    premium_day_count: DayCountConvention,
    config: SolverConfig,
}

impl HazardAdjustmentEngine {
    /// Creates an engine pricing the index contract with the given
    /// recovery rate, converging each tenor to `tolerance` with at most
    /// 100 solver iterations.
    #[must_use]
    pub fn new(recovery_rate: f64, tolerance: f64) -> Self {
        Self {
            recovery_rate,
            frequency: Frequency::Quarterly,
            premium_day_count: DayCountConvention::Act360,
            config: SolverConfig::default().with_tolerance(tolerance),
        }
    }

    /// Sets the premium frequency of the index contract.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the solver iteration cap per tenor.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Adjusts the curve set so its intrinsic level reprices every index
    /// quote. The input set is not modified; the adjusted curves are
    /// returned as a new set.
    ///
    /// # Errors
    ///
    /// - [`CreditError::InvalidQuoteOrdering`] if quote maturities are not
    ///   strictly increasing and after `valuation_date`
    /// - [`CreditError::InvalidCurve`] if no quotes are supplied or a
    ///   quote's coupon is negative or non-finite
    /// - [`CreditError::AdjustmentNonConvergence`] if a tenor cannot be
    ///   matched; the error carries the curves with all earlier tenors
    ///   already solved
    pub fn adjust_to_index(
        &self,
        valuation_date: Date,
        step_in_date: Date,
        curves: &IssuerCurveSet,
        quotes: &[IndexQuote],
        discount: &dyn DiscountProvider,
    ) -> CreditResult<IssuerCurveSet> {
        if quotes.is_empty() {
            return Err(CreditError::invalid_curve(
                "adjustment requires at least one index quote",
            ));
        }
        for (i, quote) in quotes.iter().enumerate() {
            if !quote.coupon.is_finite() || quote.coupon < 0.0 {
                return Err(CreditError::invalid_curve(format!(
                    "index quote {i} coupon {} is negative or non-finite",
                    quote.coupon
                )));
            }
            let previous = if i == 0 {
                valuation_date
            } else {
                quotes[i - 1].maturity_date
            };
            if quote.maturity_date <= previous {
                return Err(CreditError::InvalidQuoteOrdering {
                    index: i,
                    previous,
                    current: quote.maturity_date,
                });
            }
        }

        // Pin every index maturity as a node so per-tenor scaling windows
        // align with hazard segments
        let mut working: Vec<SurvivalCurve> = curves
            .curves()
            .iter()
            .map(|curve| {
                quotes.iter().fold(curve.clone(), |acc, quote| {
                    acc.with_breakpoint(quote.maturity_date)
                })
            })
            .collect();

        let n = working.len() as f64;
        let mut window_start = valuation_date;
        for (tenor_index, quote) in quotes.iter().enumerate() {
            let contract = CdsContract::new(step_in_date, quote.maturity_date, quote.coupon)
                .with_frequency(self.frequency)
                .with_premium_day_count(self.premium_day_count)
                .with_recovery_override(self.recovery_rate);

            // Surface pricing problems before entering the solver
            basket_legs(&contract, valuation_date, &working, discount)?;

            let objective = |factor: f64| {
                self.tenor_objective(
                    factor,
                    valuation_date,
                    window_start,
                    quote,
                    n,
                    &contract,
                    &working,
                    discount,
                )
            };

            let solution = brent(objective, FACTOR_LOWER_BOUND, FACTOR_UPPER_BOUND, &self.config)
                .map_err(|source| {
                    warn!(
                        "hazard adjustment failed at tenor {} ({}): {}",
                        tenor_index, quote.maturity_date, source
                    );
                    CreditError::AdjustmentNonConvergence {
                        tenor_index,
                        maturity: quote.maturity_date,
                        source,
                        partial: working.clone(),
                    }
                })?;

            debug!(
                "adjusted tenor {} ({}): hazard factor {:.6} in {} iterations",
                tenor_index, quote.maturity_date, solution.root, solution.iterations
            );

            working = scale_window(&working, solution.root, window_start, quote.maturity_date)?;
            window_start = quote.maturity_date;
        }

        IssuerCurveSet::new(working)
    }

    /// Repricing residual of one index tenor as a function of the hazard
    /// scale factor on its window: the basket's fair running spread net of
    /// upfront, minus the quoted coupon.
    #[allow(clippy::too_many_arguments)]
    fn tenor_objective(
        &self,
        factor: f64,
        valuation_date: Date,
        window_start: Date,
        quote: &IndexQuote,
        n: f64,
        contract: &CdsContract,
        working: &[SurvivalCurve],
        discount: &dyn DiscountProvider,
    ) -> f64 {
        // Inputs were validated before the solver started; poison the
        // bracket check on an internal inconsistency rather than panic
        let priced = scale_window(working, factor, window_start, quote.maturity_date)
            .and_then(|candidates| basket_legs(contract, valuation_date, &candidates, discount));
        match priced {
            Ok(legs) => {
                let total_protection: f64 = legs.iter().map(|l| l.protection).sum();
                let total_annuity: f64 = legs.iter().map(|l| l.annuity).sum();
                if total_annuity <= 0.0 {
                    return f64::INFINITY;
                }
                (total_protection - n * quote.upfront) / total_annuity - quote.coupon
            }
            Err(_) => f64::INFINITY,
        }
    }
}

/// Adjusts issuer curves to index quotes with default contract
/// conventions in one call.
///
/// Equivalent to [`HazardAdjustmentEngine::new`] followed by
/// [`HazardAdjustmentEngine::adjust_to_index`].
pub fn adjust_curves_to_index(
    valuation_date: Date,
    step_in_date: Date,
    curves: &IssuerCurveSet,
    quotes: &[IndexQuote],
    recovery_rate: f64,
    tolerance: f64,
    discount: &dyn DiscountProvider,
) -> CreditResult<IssuerCurveSet> {
    HazardAdjustmentEngine::new(recovery_rate, tolerance).adjust_to_index(
        valuation_date,
        step_in_date,
        curves,
        quotes,
        discount,
    )
}

fn scale_window(
    curves: &[SurvivalCurve],
    factor: f64,
    after: Date,
    through: Date,
) -> CreditResult<Vec<SurvivalCurve>> {
    curves
        .iter()
        .map(|curve| curve.scaled_in_window(factor, after, through))
        .collect()
}

fn basket_legs(
    contract: &CdsContract,
    valuation_date: Date,
    curves: &[SurvivalCurve],
    discount: &dyn DiscountProvider,
) -> CreditResult<Vec<CdsLegs>> {
    #[cfg(feature = "parallel")]
    {
        curves
            .par_iter()
            .map(|curve| contract.legs(valuation_date, curve, discount))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        curves
            .iter()
            .map(|curve| contract.legs(valuation_date, curve, discount))
            .collect()
    }
}
