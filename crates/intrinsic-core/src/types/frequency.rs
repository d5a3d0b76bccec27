//! Payment frequency for premium schedules.

use serde::{Deserialize, Serialize};

/// Payment frequency of a periodic leg.
///
/// CDS premium legs are quarterly by market convention; the other
/// frequencies exist for non-standard schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// One payment per year.
    Annual,
    /// Two payments per year.
    SemiAnnual,
    /// Four payments per year (the CDS standard).
    Quarterly,
    /// Twelve payments per year.
    Monthly,
}

impl Frequency {
    /// Returns the number of payments per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Annual => 1,
            Self::SemiAnnual => 2,
            Self::Quarterly => 4,
            Self::Monthly => 12,
        }
    }

    /// Returns the number of months in one period.
    #[must_use]
    pub fn months_per_period(&self) -> i32 {
        12 / self.periods_per_year() as i32
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Quarterly
    }
}
