//! Sequential hazard-curve bootstrapping from CDS quotes.
//!
//! Quotes are processed in increasing maturity order. Each pillar's hazard
//! rate is implied by a one-dimensional root search that reprices the
//! quoted contract to fair value, holding all earlier pillars fixed.

use intrinsic_core::types::{Date, Frequency};
use intrinsic_math::solvers::{brent, SolverConfig};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::contract::CdsContract;
use crate::discount::DiscountProvider;
use crate::error::{CreditError, CreditResult};
use crate::survival::SurvivalCurve;

/// Upper bound of the hazard-rate search bracket. A hazard of 5.0 implies
/// near-certain default within a year, beyond any quotable spread.
const HAZARD_UPPER_BOUND: f64 = 5.0;

/// A CDS market quote used as a bootstrap input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsQuote {
    /// Contract maturity date
    pub maturity_date: Date,
    /// Quoted running spread as a decimal (100bp = `0.01`)
    pub spread: f64,
    /// Upfront points as a decimal of notional, for quotes with a fixed
    /// running coupon; `None` for pure par-spread quotes
    pub upfront: Option<f64>,
}

impl CdsQuote {
    /// Creates a par-spread quote with no upfront.
    #[must_use]
    pub fn new(maturity_date: Date, spread: f64) -> Self {
        Self {
            maturity_date,
            spread,
            upfront: None,
        }
    }

    /// Creates a quote with a fixed running coupon and upfront points.
    #[must_use]
    pub fn with_upfront(maturity_date: Date, coupon: f64, upfront: f64) -> Self {
        Self {
            maturity_date,
            spread: coupon,
            upfront: Some(upfront),
        }
    }
}

/// Bootstraps a [`SurvivalCurve`] from a term structure of CDS quotes.
#[derive(Debug, Clone)]
pub struct CurveBootstrapper {
    valuation_date: Date,
    step_in_date: Date,
    recovery_rate: f64,
    frequency: Frequency,
    config: SolverConfig,
}

impl CurveBootstrapper {
    /// Creates a bootstrapper with the default root-finder settings
    /// (tolerance `1e-10`, at most 100 iterations per pillar).
    #[must_use]
    pub fn new(valuation_date: Date, step_in_date: Date, recovery_rate: f64) -> Self {
        Self {
            valuation_date,
            step_in_date,
            recovery_rate,
            frequency: Frequency::Quarterly,
            config: SolverConfig::default(),
        }
    }

    /// Sets the premium frequency of the repriced contracts.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the root-finder configuration.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Bootstraps the curve, one pillar per quote.
    ///
    /// # Errors
    ///
    /// - [`CreditError::InvalidQuoteOrdering`] if quote maturities are not
    ///   strictly increasing
    /// - [`CreditError::InvalidCurve`] if no quotes are supplied or a
    ///   quote's spread is negative or non-finite
    /// - [`CreditError::BootstrapNonConvergence`] if the root search fails
    ///   for a pillar
    pub fn bootstrap(
        &self,
        quotes: &[CdsQuote],
        discount: &dyn DiscountProvider,
    ) -> CreditResult<SurvivalCurve> {
        if quotes.is_empty() {
            return Err(CreditError::invalid_curve(
                "bootstrap requires at least one quote",
            ));
        }
        for (i, quote) in quotes.iter().enumerate() {
            if !quote.spread.is_finite() || quote.spread < 0.0 {
                return Err(CreditError::invalid_curve(format!(
                    "quote {i} spread {} is negative or non-finite",
                    quote.spread
                )));
            }
            let previous = if i == 0 {
                self.valuation_date
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

        let mut nodes: Vec<(Date, f64)> = Vec::with_capacity(quotes.len());
        for (i, quote) in quotes.iter().enumerate() {
            let contract =
                CdsContract::new(self.step_in_date, quote.maturity_date, quote.spread)
                    .with_frequency(self.frequency);

            // Surface schedule and date problems before entering the solver
            let trial = self.candidate_curve(&nodes, quote.maturity_date, 0.01)?;
            contract.legs(self.valuation_date, &trial, discount)?;

            let objective = |hazard: f64| {
                self.pillar_objective(&nodes, quote, &contract, hazard, discount)
            };

            let solution = brent(objective, 0.0, HAZARD_UPPER_BOUND, &self.config).map_err(
                |source| {
                    warn!(
                        "bootstrap failed at pillar {} ({}): {}",
                        i, quote.maturity_date, source
                    );
                    CreditError::BootstrapNonConvergence {
                        index: i,
                        maturity: quote.maturity_date,
                        source,
                    }
                },
            )?;

            debug!(
                "bootstrapped pillar {} ({}): hazard {:.6} in {} iterations",
                i, quote.maturity_date, solution.root, solution.iterations
            );
            nodes.push((quote.maturity_date, solution.root));
        }

        SurvivalCurve::new(self.valuation_date, nodes, self.recovery_rate)
    }

    fn candidate_curve(
        &self,
        nodes: &[(Date, f64)],
        maturity: Date,
        hazard: f64,
    ) -> CreditResult<SurvivalCurve> {
        let mut candidate = nodes.to_vec();
        candidate.push((maturity, hazard));
        SurvivalCurve::new(self.valuation_date, candidate, self.recovery_rate)
    }

    /// Fair-value residual of one quote as a function of its pillar hazard.
    ///
    /// Par-spread quotes use the spread residual; upfront quotes use the
    /// mark-to-market net of the upfront payment. Both are increasing in
    /// the hazard rate, negative at zero hazard for any positive quote.
    fn pillar_objective(
        &self,
        nodes: &[(Date, f64)],
        quote: &CdsQuote,
        contract: &CdsContract,
        hazard: f64,
        discount: &dyn DiscountProvider,
    ) -> f64 {
        // Inputs were validated before the solver started; a failure here
        // would mean an internal inconsistency, so poison the bracket
        // check rather than panic.
        let priced = self
            .candidate_curve(nodes, quote.maturity_date, hazard)
            .and_then(|curve| contract.legs(self.valuation_date, &curve, discount));
        match priced {
            Ok(legs) => match quote.upfront {
                Some(upfront) => {
                    legs.protection - quote.spread * legs.annuity - upfront
                }
                None => {
                    if legs.annuity <= 0.0 {
                        return f64::INFINITY;
                    }
                    legs.protection / legs.annuity - quote.spread
                }
            },
            Err(_) => f64::INFINITY,
        }
    }
}

/// Bootstraps a survival curve with default conventions in one call.
///
/// Equivalent to [`CurveBootstrapper::new`] followed by
/// [`CurveBootstrapper::bootstrap`].
pub fn bootstrap_curve(
    valuation_date: Date,
    step_in_date: Date,
    quotes: &[CdsQuote],
    discount: &dyn DiscountProvider,
    recovery_rate: f64,
) -> CreditResult<SurvivalCurve> {
    CurveBootstrapper::new(valuation_date, step_in_date, recovery_rate).bootstrap(quotes, discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::FlatDiscountCurve;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn market() -> (Date, Date, FlatDiscountCurve) {
        let valuation = d(2024, 1, 2);
        (
            valuation,
            valuation.add_days(1),
            FlatDiscountCurve::new(valuation, 0.05),
        )
    }

    #[test]
    fn test_reprices_input_quotes() {
        let (valuation, step_in, discount) = market();
        let quotes = vec![
            CdsQuote::new(valuation.next_cds_date(12).unwrap(), 0.0030),
            CdsQuote::new(valuation.next_cds_date(36).unwrap(), 0.0050),
            CdsQuote::new(valuation.next_cds_date(60).unwrap(), 0.0065),
            CdsQuote::new(valuation.next_cds_date(120).unwrap(), 0.0080),
        ];

        let curve = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40).unwrap();

        assert_eq!(curve.nodes().len(), quotes.len());
        for quote in &quotes {
            let cds = CdsContract::new(step_in, quote.maturity_date, quote.spread);
            let par = cds.par_spread(valuation, &curve, &discount).unwrap();
            assert_relative_eq!(par, quote.spread, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_single_quote_matches_credit_triangle() {
        let (valuation, step_in, discount) = market();
        let quotes = vec![CdsQuote::new(valuation.next_cds_date(60).unwrap(), 0.0060)];

        let curve = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40).unwrap();

        // spread ~= hazard * (1 - recovery)
        assert_relative_eq!(
            curve.nodes()[0].hazard,
            0.0060 / 0.60,
            max_relative = 0.01
        );
    }

    #[test]
    fn test_inverted_curve_bootstraps() {
        // Distressed names quote downward-sloping spreads
        let (valuation, step_in, discount) = market();
        let quotes = vec![
            CdsQuote::new(valuation.next_cds_date(12).unwrap(), 0.0400),
            CdsQuote::new(valuation.next_cds_date(60).unwrap(), 0.0250),
        ];

        let curve = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40).unwrap();

        assert!(curve.nodes()[1].hazard < curve.nodes()[0].hazard);
    }

    #[test]
    fn test_rejects_unsorted_quotes() {
        let (valuation, step_in, discount) = market();
        let quotes = vec![
            CdsQuote::new(valuation.next_cds_date(60).unwrap(), 0.0065),
            CdsQuote::new(valuation.next_cds_date(36).unwrap(), 0.0050),
        ];

        let result = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40);

        assert!(matches!(
            result,
            Err(CreditError::InvalidQuoteOrdering { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_maturities() {
        let (valuation, step_in, discount) = market();
        let maturity = valuation.next_cds_date(60).unwrap();
        let quotes = vec![
            CdsQuote::new(maturity, 0.0050),
            CdsQuote::new(maturity, 0.0065),
        ];

        let result = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40);

        assert!(matches!(
            result,
            Err(CreditError::InvalidQuoteOrdering { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_and_negative() {
        let (valuation, step_in, discount) = market();

        assert!(bootstrap_curve(valuation, step_in, &[], &discount, 0.40).is_err());

        let negative = vec![CdsQuote::new(valuation.next_cds_date(60).unwrap(), -0.001)];
        assert!(bootstrap_curve(valuation, step_in, &negative, &discount, 0.40).is_err());
    }

    #[test]
    fn test_zero_spread_gives_zero_hazard() {
        let (valuation, step_in, discount) = market();
        let quotes = vec![CdsQuote::new(valuation.next_cds_date(60).unwrap(), 0.0)];

        let curve = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40).unwrap();

        assert_relative_eq!(curve.nodes()[0].hazard, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_upfront_quote_reprices() {
        let (valuation, step_in, discount) = market();
        let maturity = valuation.next_cds_date(60).unwrap();

        // Imply the upfront of a 100bp-coupon contract on a known curve,
        // then bootstrap from that upfront quote and compare survival
        let reference =
            SurvivalCurve::new(valuation, vec![(maturity, 0.03)], 0.40).unwrap();
        let cds = CdsContract::new(step_in, maturity, 0.0100);
        let upfront = cds.pv(valuation, &reference, &discount).unwrap();

        let quotes = vec![CdsQuote::with_upfront(maturity, 0.0100, upfront)];
        let curve = bootstrap_curve(valuation, step_in, &quotes, &discount, 0.40).unwrap();

        assert_relative_eq!(curve.nodes()[0].hazard, 0.03, epsilon = 1e-7);
    }
}
