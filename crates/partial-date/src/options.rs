//! Per-host configuration for partial dates.

use serde::{Deserialize, Serialize};

/// Year written into the calendar date when the real year is not known.
pub const DEFAULT_UNKNOWN_YEAR: i32 = 1900;

/// Options for parsing and deriving partial dates.
///
/// Each host entity picks its own unknown-year sentinel. The sentinel only
/// keeps the calendar date constructible; it is never reported as a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialDateOptions {
    /// Sentinel year used when the year component is unknown.
    pub unknown_year: i32,
    /// Years below this value are treated as unknown when a single known
    /// date is assigned.
    pub year_cutoff: Option<i32>,
}

impl Default for PartialDateOptions {
    fn default() -> Self {
        Self {
            unknown_year: DEFAULT_UNKNOWN_YEAR,
            year_cutoff: None,
        }
    }
}

impl PartialDateOptions {
    pub fn with_unknown_year(mut self, year: i32) -> Self {
        self.unknown_year = year;
        self
    }

    pub fn with_year_cutoff(mut self, cutoff: i32) -> Self {
        self.year_cutoff = Some(cutoff);
        self
    }

    /// Whether `year` falls below the configured cutoff.
    pub fn is_before_cutoff(&self, year: i32) -> bool {
        self.year_cutoff.is_some_and(|cutoff| year < cutoff)
    }
}
