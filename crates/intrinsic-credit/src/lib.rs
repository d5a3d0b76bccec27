//! # Intrinsic Credit
//!
//! CDS pricing, hazard-curve bootstrapping, and credit-index calibration.
//!
//! This crate is the pricing core of the Intrinsic library:
//!
//! - **Survival Curves**: piecewise-constant hazard-rate term structures
//! - **CDS Valuation**: premium/protection legs, par spreads, mark-to-market
//! - **Bootstrapping**: hazard curves from a term structure of CDS quotes
//! - **Index Aggregation**: average and intrinsic spreads across issuers
//! - **Hazard Adjustment**: calibrating issuer curves to traded index levels
//!
//! ## Quick Start
//!
//! ```rust
//! use intrinsic_credit::prelude::*;
//! use intrinsic_core::types::Date;
//!
//! let valuation_date = Date::from_ymd(2024, 1, 2).unwrap();
//! let step_in_date = valuation_date.add_days(1);
//! let discount = FlatDiscountCurve::new(valuation_date, 0.05);
//!
//! let quotes = vec![
//!     CdsQuote::new(valuation_date.next_cds_date(36).unwrap(), 0.0050),
//!     CdsQuote::new(valuation_date.next_cds_date(60).unwrap(), 0.0060),
//! ];
//!
//! let curve = bootstrap_curve(valuation_date, step_in_date, &quotes, &discount, 0.40).unwrap();
//! assert!(curve.survival_probability(step_in_date) <= 1.0);
//! ```
//!
//! ## Concurrency
//!
//! All pricing is synchronous and CPU-bound. Per-name pricing inside the
//! index aggregation is independent across issuers; with the `parallel`
//! feature it runs on rayon, with per-name results collected in issuer
//! order before a sequential reduction so results are reproducible.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod adjust;
pub mod bootstrap;
pub mod contract;
pub mod discount;
pub mod error;
pub mod index;
pub mod survival;

pub use error::{CreditError, CreditResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adjust::{adjust_curves_to_index, HazardAdjustmentEngine, IndexQuote};
    pub use crate::bootstrap::{bootstrap_curve, CdsQuote, CurveBootstrapper};
    pub use crate::contract::CdsContract;
    pub use crate::discount::{DiscountProvider, DiscreteDiscountCurve, FlatDiscountCurve};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::index::{IndexAggregator, IssuerCurveSet};
    pub use crate::survival::SurvivalCurve;
}
