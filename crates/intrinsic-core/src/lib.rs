//! # Intrinsic Core
//!
//! Core types and abstractions for the Intrinsic credit analytics library.
//!
//! This crate provides the foundational building blocks used throughout
//! Intrinsic:
//!
//! - **Types**: the [`types::Date`] newtype and premium [`types::Frequency`]
//! - **Day Count Conventions**: industry-standard year-fraction calculations
//! - **CDS Dates**: the IMM-style credit date roll used by index contracts
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: newtypes prevent mixing incompatible values
//! - **Explicit Over Implicit**: clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use intrinsic_core::prelude::*;
//!
//! let trade_date = Date::from_ymd(2007, 8, 1).unwrap();
//! let maturity_5y = trade_date.next_cds_date(60).unwrap();
//!
//! let dc = Act360;
//! let accrual = dc.year_fraction(trade_date, maturity_5y);
//! assert!(accrual > 5.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::Date;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{
        Act360, Act365Fixed, DayCount, DayCountConvention, Thirty360E,
    };
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Frequency};
}
