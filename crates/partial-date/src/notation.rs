//! Compact partial-date notation: parsing and formatting.
//!
//! Exactly five shapes are accepted:
//!
//! | Notation     | Known components  |
//! | ------------ | ----------------- |
//! | `YYYY-MM-DD` | year, month, day  |
//! | `YYYY-MM`    | year, month       |
//! | `YYYY`       | year              |
//! | `--MM-DD`    | month, day        |
//! | (empty)      | none ("no date")  |
//!
//! Matching is case-sensitive, ASCII digits and hyphens only, with no
//! surrounding whitespace. Anything else is rejected rather than guessed at,
//! including a lone day or month and a year with a day but no month.
//!
//! [`format_partial_date`] is the exact inverse of [`parse_partial_date`]
//! for every value the parser produces.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{PartialDateError, Result};
use crate::options::PartialDateOptions;
use crate::precision::{DateComponent, PrecisionFlags};
use crate::value::PartialDateValue;

/// Year token written when the year is unknown.
const UNKNOWN_YEAR_TOKEN: &str = "-";

static NOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>[0-9]{4}|-)(?:-(?P<month>[0-9]{2}))?(?:-(?P<day>[0-9]{2}))?$")
        .expect("valid partial date notation regex")
});

// ── parse ──────────────────────────────────────────────────────────────────

/// Parse a notation string using the default [`PartialDateOptions`].
///
/// # Returns
///
/// `Ok(None)` for the empty string (the explicit "no date" signal), or the
/// parsed [`PartialDateValue`].
///
/// # Errors
///
/// Returns [`PartialDateError::MalformedPartialDate`] for any input outside
/// the accepted shapes or naming an impossible calendar date.
///
/// # Examples
///
/// ```
/// use partial_date::{parse_partial_date, PrecisionFlags};
///
/// let value = parse_partial_date("--05-03").unwrap().unwrap();
/// assert_eq!(value.precision(), PrecisionFlags::MONTH | PrecisionFlags::DAY);
/// assert!(parse_partial_date("").unwrap().is_none());
/// assert!(parse_partial_date("1901--03").is_err());
/// ```
pub fn parse_partial_date(input: &str) -> Result<Option<PartialDateValue>> {
    parse_partial_date_with_options(input, &PartialDateOptions::default())
}

/// Parse a notation string, filling an unknown year with
/// `options.unknown_year`.
///
/// See [`parse_partial_date`] for the accepted grammar.
pub fn parse_partial_date_with_options(
    input: &str,
    options: &PartialDateOptions,
) -> Result<Option<PartialDateValue>> {
    if input.is_empty() {
        return Ok(None);
    }

    let caps = NOTATION_RE.captures(input).ok_or_else(|| malformed(input))?;

    let year = numeric_group(&caps, "year", input)?;
    let month = numeric_group(&caps, "month", input)?;
    let day = numeric_group(&caps, "day", input)?;

    // Without a year, only the month+day pair identifies anything
    if year.is_none() && (month.is_none() || day.is_none()) {
        return Err(malformed(input));
    }
    if day.is_some() && month.is_none() {
        return Err(malformed(input));
    }

    let precision: PrecisionFlags = [
        year.map(|_| DateComponent::Year),
        month.map(|_| DateComponent::Month),
        day.map(|_| DateComponent::Day),
    ]
    .into_iter()
    .flatten()
    .collect();

    let year = match year {
        Some(y) => i32::try_from(y).map_err(|_| malformed(input))?,
        None => options.unknown_year,
    };
    let date = NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
        .ok_or_else(|| malformed(input))?;

    Ok(PartialDateValue::from_parts(date, precision))
}

/// Integer value of a numeric capture group; the year placeholder and
/// absent groups yield `None`.
fn numeric_group(caps: &Captures<'_>, name: &str, input: &str) -> Result<Option<u32>> {
    match caps.name(name).map(|m| m.as_str()) {
        None | Some(UNKNOWN_YEAR_TOKEN) => Ok(None),
        Some(digits) => digits
            .parse::<u32>()
            .map(Some)
            .map_err(|_| malformed(input)),
    }
}

fn malformed(input: &str) -> PartialDateError {
    tracing::debug!(input, "rejected partial date notation");
    PartialDateError::MalformedPartialDate(input.to_string())
}

// ── format ─────────────────────────────────────────────────────────────────

/// Render a partial date as notation; "no date" renders as the empty string.
///
/// # Examples
///
/// ```
/// use partial_date::{format_partial_date, parse_partial_date};
///
/// let value = parse_partial_date("1901-05").unwrap();
/// assert_eq!(format_partial_date(value.as_ref()), "1901-05");
/// assert_eq!(format_partial_date(None), "");
/// ```
pub fn format_partial_date(value: Option<&PartialDateValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// Write the notation for `date` restricted to the components in `precision`.
pub(crate) fn write_notation<W: fmt::Write>(
    out: &mut W,
    date: NaiveDate,
    precision: PrecisionFlags,
) -> fmt::Result {
    if precision.is_empty() {
        return Ok(());
    }
    if precision.contains(PrecisionFlags::YEAR) {
        write!(out, "{:04}", date.year())?;
    } else {
        out.write_str(UNKNOWN_YEAR_TOKEN)?;
    }
    if precision.contains(PrecisionFlags::MONTH) {
        write!(out, "-{:02}", date.month())?;
    }
    if precision.contains(PrecisionFlags::DAY) {
        write!(out, "-{:02}", date.day())?;
    }
    Ok(())
}
