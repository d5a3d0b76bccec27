//! Error types for credit pricing operations.

use intrinsic_core::types::Date;
use intrinsic_math::error::MathError;
use thiserror::Error;

use crate::survival::SurvivalCurve;

/// Errors that can occur during curve construction, pricing, and calibration.
#[derive(Error, Debug, Clone)]
pub enum CreditError {
    /// Curve inputs are structurally invalid (empty nodes, unsorted dates,
    /// negative hazards, recovery out of range).
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of the validation failure
        reason: String,
    },

    /// CDS quotes are not in strictly increasing maturity order.
    #[error(
        "Invalid quote ordering at index {index}: maturity {current} does not follow {previous}"
    )]
    InvalidQuoteOrdering {
        /// Position of the offending quote
        index: usize,
        /// Maturity of the preceding quote
        previous: Date,
        /// Maturity of the offending quote
        current: Date,
    },

    /// A pricing request is inconsistent with the contract dates.
    #[error("Valuation error: {reason}")]
    ValuationError {
        /// Description of the inconsistency
        reason: String,
    },

    /// The bootstrapper failed to imply a hazard rate for a quote pillar.
    #[error("Bootstrap failed to converge for quote {index} (maturity {maturity}): {source}")]
    BootstrapNonConvergence {
        /// Position of the quote whose pillar failed
        index: usize,
        /// Maturity of the failing pillar
        maturity: Date,
        /// The underlying solver failure
        #[source]
        source: MathError,
    },

    /// The hazard adjustment failed to match an index tenor. Tenors solved
    /// before the failure are carried in `partial` for diagnostics.
    #[error("Hazard adjustment failed to converge for tenor {tenor_index} (maturity {maturity}): {source}")]
    AdjustmentNonConvergence {
        /// Position of the index tenor that failed
        tenor_index: usize,
        /// Maturity of the failing tenor
        maturity: Date,
        /// The underlying solver failure
        #[source]
        source: MathError,
        /// Issuer curves with all earlier tenors already matched
        partial: Vec<SurvivalCurve>,
    },
}

impl CreditError {
    /// Creates an invalid curve error.
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Creates a valuation error.
    pub fn valuation(reason: impl Into<String>) -> Self {
        Self::ValuationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for credit operations.
pub type CreditResult<T> = Result<T, CreditError>;
