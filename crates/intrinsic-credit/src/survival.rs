//! Survival curves with piecewise-constant hazard rates.

use intrinsic_core::daycounts::{Act365Fixed, DayCount};
use intrinsic_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CreditError, CreditResult};

/// One pillar of a survival curve: the hazard rate applies on the interval
/// from the previous node's date (exclusive) to this node's date (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveNode {
    /// End of the interval this hazard rate covers
    pub date: Date,
    /// Annualized hazard rate on the interval
    pub hazard: f64,
}

/// Survival probability term structure for a single reference entity.
///
/// The curve is a piecewise-constant hazard rate function anchored at the
/// valuation date, where survival is `1.0` by construction. The hazard of
/// the last node extends flat beyond it. Times are measured in ACT/365F
/// year fractions from the valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    valuation_date: Date,
    nodes: Vec<CurveNode>,
    recovery_rate: f64,
}

impl SurvivalCurve {
    /// Creates a survival curve from `(date, hazard)` pillars.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] if `nodes` is empty, node
    /// dates are not strictly increasing and after `valuation_date`, any
    /// hazard rate is negative or non-finite, or `recovery_rate` is
    /// outside `[0, 1)`.
    pub fn new(
        valuation_date: Date,
        nodes: Vec<(Date, f64)>,
        recovery_rate: f64,
    ) -> CreditResult<Self> {
        if nodes.is_empty() {
            return Err(CreditError::invalid_curve(
                "survival curve requires at least one node",
            ));
        }
        if !(0.0..1.0).contains(&recovery_rate) {
            return Err(CreditError::invalid_curve(format!(
                "recovery rate {recovery_rate} is outside [0, 1)"
            )));
        }

        let mut prev = valuation_date;
        for (i, &(date, hazard)) in nodes.iter().enumerate() {
            if date <= prev {
                return Err(CreditError::invalid_curve(format!(
                    "node {i} date {date} is not strictly after {prev}"
                )));
            }
            if !hazard.is_finite() || hazard < 0.0 {
                return Err(CreditError::invalid_curve(format!(
                    "node {i} hazard rate {hazard} is negative or non-finite"
                )));
            }
            prev = date;
        }

        Ok(Self {
            valuation_date,
            nodes: nodes
                .into_iter()
                .map(|(date, hazard)| CurveNode { date, hazard })
                .collect(),
            recovery_rate,
        })
    }

    /// The curve's valuation date, where survival is `1.0`.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// The assumed recovery rate on default.
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// The curve pillars, in increasing date order.
    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    fn year_fraction(&self, from: Date, to: Date) -> f64 {
        Act365Fixed.year_fraction(from, to)
    }

    /// Survival probability to `date`.
    ///
    /// Returns `1.0` for dates on or before the valuation date. Beyond the
    /// last node the final hazard rate is extrapolated flat.
    #[must_use]
    pub fn survival_probability(&self, date: Date) -> f64 {
        if date <= self.valuation_date {
            return 1.0;
        }

        let mut integral = 0.0;
        let mut segment_start = self.valuation_date;
        for node in &self.nodes {
            if date <= node.date {
                integral += node.hazard * self.year_fraction(segment_start, date);
                return (-integral).exp();
            }
            integral += node.hazard * self.year_fraction(segment_start, node.date);
            segment_start = node.date;
        }

        let last = self.nodes[self.nodes.len() - 1];
        integral += last.hazard * self.year_fraction(segment_start, date);
        (-integral).exp()
    }

    /// The hazard rate applying at `date`.
    ///
    /// Dates on or before the first node get the first hazard; dates beyond
    /// the last node get the last hazard.
    #[must_use]
    pub fn hazard_rate_at(&self, date: Date) -> f64 {
        for node in &self.nodes {
            if date <= node.date {
                return node.hazard;
            }
        }
        self.nodes[self.nodes.len() - 1].hazard
    }

    /// Returns a copy of this curve with the same node dates but new
    /// hazard rates.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] if the number of hazards does
    /// not match the number of nodes, or any hazard is invalid.
    pub fn with_hazards(&self, hazards: &[f64]) -> CreditResult<Self> {
        if hazards.len() != self.nodes.len() {
            return Err(CreditError::invalid_curve(format!(
                "expected {} hazard rates, got {}",
                self.nodes.len(),
                hazards.len()
            )));
        }
        let nodes = self
            .nodes
            .iter()
            .zip(hazards)
            .map(|(node, &hazard)| (node.date, hazard))
            .collect();
        Self::new(self.valuation_date, nodes, self.recovery_rate)
    }

    /// Returns a copy with hazards of nodes dated in `(after, through]`
    /// multiplied by `factor`. Nodes outside the window are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] if `factor` is negative or
    /// non-finite.
    pub fn scaled_in_window(&self, factor: f64, after: Date, through: Date) -> CreditResult<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(CreditError::invalid_curve(format!(
                "hazard scale factor {factor} is negative or non-finite"
            )));
        }
        let hazards: Vec<f64> = self
            .nodes
            .iter()
            .map(|node| {
                if node.date > after && node.date <= through {
                    node.hazard * factor
                } else {
                    node.hazard
                }
            })
            .collect();
        self.with_hazards(&hazards)
    }

    /// Returns a copy with a node inserted at `date`, leaving survival
    /// probabilities unchanged at every date.
    ///
    /// The inserted node carries the hazard rate of the segment it splits,
    /// or the last hazard rate when `date` lies beyond the final node. If
    /// `date` is on or before the valuation date or already a node, the
    /// curve is returned unchanged.
    #[must_use]
    pub fn with_breakpoint(&self, date: Date) -> Self {
        if date <= self.valuation_date || self.nodes.iter().any(|n| n.date == date) {
            return self.clone();
        }

        let hazard = self.hazard_rate_at(date);
        let mut nodes = self.nodes.clone();
        let position = nodes.partition_point(|n| n.date < date);
        nodes.insert(position, CurveNode { date, hazard });

        Self {
            valuation_date: self.valuation_date,
            nodes,
            recovery_rate: self.recovery_rate,
        }
    }
}
