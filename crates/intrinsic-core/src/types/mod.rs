//! Core domain types.

mod date;
mod frequency;

pub use date::Date;
pub use frequency::Frequency;
