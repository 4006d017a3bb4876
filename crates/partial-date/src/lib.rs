//! # partial-date
//!
//! Calendar dates whose year, month, or day may be unknown.
//!
//! Cataloguing records rarely know every date exactly: a lending event may
//! be known only to a month, an address only to a year, a birthday only to
//! a month and day. This crate models such values as a concrete calendar
//! date plus a set of precision flags, and provides the notation used to
//! enter and display them.
//!
//! ## Modules
//!
//! - [`precision`] - YEAR / MONTH / DAY flags and their integer encoding
//! - [`notation`] - Parse and format `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, `--MM-DD`
//! - [`value`] - The partial-date value and its stored (date, precision) pair
//! - [`field`] - Get/set accessors for host entities, and start/end pairs
//! - [`range`] - Derive a partial date from bounding dates; render ranges
//! - [`query`] - The known-year filter predicate for storage layers
//! - [`options`] - Per-host configuration (unknown-year sentinel, year cutoff)
//! - [`error`] - Error types
//!
//! Every operation is a pure function of its inputs. Nothing here holds
//! shared state, so values can be used freely across threads.

pub mod error;
pub mod field;
pub mod notation;
pub mod options;
pub mod precision;
pub mod query;
pub mod range;
pub mod value;

pub use error::{PartialDateError, Result};
pub use field::{
    PartialDateField, PartialDateRange, DATE_PRECISION_FIELD, END_PRECISION_FIELD,
    START_PRECISION_FIELD,
};
pub use notation::{format_partial_date, parse_partial_date, parse_partial_date_with_options};
pub use options::{PartialDateOptions, DEFAULT_UNKNOWN_YEAR};
pub use precision::{DateComponent, PrecisionFlags};
pub use query::{KnownYear, PrecisionColumns};
pub use range::{combine_range, derive_partial_date, DateEvidence, UNKNOWN_SIDE};
pub use value::{PartialDateValue, StoredPartialDate};
