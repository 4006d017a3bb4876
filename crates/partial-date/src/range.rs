//! Deriving a partial date from evidence, and rendering start/end pairs.
//!
//! [`derive_partial_date`] turns either a pair of bounding dates or a
//! single known date into the best partial date that can be asserted.
//! [`combine_range`] joins a start and end value into one display string.

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::notation::parse_partial_date_with_options;
use crate::options::PartialDateOptions;
use crate::precision::PrecisionFlags;
use crate::value::PartialDateValue;

/// Placeholder for an unset side of a range.
pub const UNKNOWN_SIDE: &str = "??";

/// What is known about an event's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEvidence<'a> {
    /// A single date in notation form.
    Known(&'a str),
    /// Earliest and latest possible true dates, e.g. computed from
    /// corroborating events with fully known dates.
    Bounds {
        earliest: NaiveDate,
        latest: NaiveDate,
    },
}

/// Derive the best partial date supported by `evidence`.
///
/// # Bounds
///
/// The earliest date is kept as the calendar date. Each component is known
/// only when both bounds agree on it, compared independently: bounds in
/// different years with the same month and day give a month/day value with
/// no year. When no component agrees the result is "no date".
///
/// # Known
///
/// The notation goes through the parser. If the resulting year falls below
/// `options.year_cutoff`, the year is treated as unknown and its flag is
/// dropped, since such years were entered as stand-ins for "year unknown".
/// The date's year is then replaced by `options.unknown_year`, except for a
/// Feb 29 the sentinel year cannot hold.
///
/// # Errors
///
/// Returns [`crate::PartialDateError::MalformedPartialDate`] when a known
/// date does not parse. Bounds never fail.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use partial_date::{derive_partial_date, DateEvidence, PartialDateOptions};
///
/// let evidence = DateEvidence::Bounds {
///     earliest: NaiveDate::from_ymd_opt(1930, 11, 5).unwrap(),
///     latest: NaiveDate::from_ymd_opt(1930, 11, 25).unwrap(),
/// };
/// let value = derive_partial_date(evidence, &PartialDateOptions::default()).unwrap();
/// assert_eq!(value.unwrap().to_string(), "1930-11");
/// ```
pub fn derive_partial_date(
    evidence: DateEvidence<'_>,
    options: &PartialDateOptions,
) -> Result<Option<PartialDateValue>> {
    match evidence {
        DateEvidence::Known(notation) => derive_from_known(notation, options),
        DateEvidence::Bounds { earliest, latest } => Ok(derive_from_bounds(earliest, latest)),
    }
}

fn derive_from_bounds(earliest: NaiveDate, latest: NaiveDate) -> Option<PartialDateValue> {
    let mut precision = PrecisionFlags::empty();
    precision.set(PrecisionFlags::YEAR, earliest.year() == latest.year());
    precision.set(PrecisionFlags::MONTH, earliest.month() == latest.month());
    precision.set(PrecisionFlags::DAY, earliest.day() == latest.day());

    let value = PartialDateValue::from_parts(earliest, precision);
    if value.is_none() {
        tracing::debug!(%earliest, %latest, "bounding dates share no components");
    }
    value
}

fn derive_from_known(
    notation: &str,
    options: &PartialDateOptions,
) -> Result<Option<PartialDateValue>> {
    let Some(value) = parse_partial_date_with_options(notation, options)? else {
        return Ok(None);
    };
    match value.year() {
        Some(year) if options.is_before_cutoff(year) => {
            tracing::debug!(
                year,
                cutoff = ?options.year_cutoff,
                "year below cutoff treated as unknown"
            );
            Ok(value.without(PrecisionFlags::YEAR, options))
        }
        _ => Ok(Some(value)),
    }
}

/// Render a start/end pair as one string.
///
/// Identical start and end collapse to a single notation; otherwise the
/// result is `start/end` with [`UNKNOWN_SIDE`] standing in for an unset side.
///
/// # Examples
///
/// ```
/// use partial_date::{combine_range, PartialDateValue};
///
/// let start: PartialDateValue = "1930-01-01".parse().unwrap();
/// assert_eq!(combine_range(Some(&start), Some(&start)), "1930-01-01");
/// assert_eq!(combine_range(Some(&start), None), "1930-01-01/??");
/// ```
pub fn combine_range(start: Option<&PartialDateValue>, end: Option<&PartialDateValue>) -> String {
    let start = start.map(ToString::to_string);
    let end = end.map(ToString::to_string);
    match (start, end) {
        (Some(start), Some(end)) if start == end => start,
        (start, end) => format!(
            "{}/{}",
            start.as_deref().unwrap_or(UNKNOWN_SIDE),
            end.as_deref().unwrap_or(UNKNOWN_SIDE)
        ),
    }
}
