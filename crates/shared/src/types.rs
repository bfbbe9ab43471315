//! Reporting window, chart resolution, and sign-convention types.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// An inclusive date range over which metrics are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    /// First date of the window (inclusive).
    pub start: NaiveDate,
    /// Last date of the window (inclusive).
    pub end: NaiveDate,
}

impl ReportingWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if start > end {
            return Err(EngineError::Validation(format!(
                "window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Creates a trailing window of `months` calendar months ending at `end`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if the start date would underflow
    /// the calendar.
    pub fn trailing_months(end: NaiveDate, months: u32) -> Result<Self, EngineError> {
        let start = end
            .checked_sub_months(Months::new(months))
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .ok_or_else(|| {
                EngineError::Validation(format!("cannot compute {months} months before {end}"))
            })?;
        Self::new(start, end)
    }

    /// Returns true if the given date falls within this window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Chart resolution, mapped to a target downsampled point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Coarse chart, ~2 points per month over a year.
    Low,
    /// Default chart density.
    Standard,
    /// One point per day over a year.
    High,
}

impl Resolution {
    /// Target number of points after downsampling.
    #[must_use]
    pub const fn target_points(self) -> usize {
        match self {
            Self::Low => 60,
            Self::Standard => 120,
            Self::High => 365,
        }
    }

    /// Stable identifier used in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Standard => "standard",
            Self::High => "high",
        }
    }
}

/// Sign convention applied to provisions in the running WIP balance.
///
/// The canonical rule subtracts provisions alongside billing. One legacy
/// rollup added them instead; that behavior survives only as an explicitly
/// configured compatibility mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionSign {
    /// Provisions reduce the running balance (canonical).
    #[default]
    Subtract,
    /// Provisions increase the running balance (legacy compatibility).
    Add,
}

impl ProvisionSign {
    /// Stable identifier used in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subtract => "subtract",
            Self::Add => "add",
        }
    }
}
