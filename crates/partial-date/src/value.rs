//! The partial-date value and its two-column storage form.
//!
//! A [`PartialDateValue`] pairs a concrete [`NaiveDate`] with the
//! [`PrecisionFlags`] saying which of its components are real. Unknown
//! components are still present in the date (sentinel year, month 1,
//! day 1) so that it stays constructible; the flags are the only source of
//! truth. Values are built by the parser, the range deriver, or by reading
//! back a stored row. There is no public constructor taking raw parts.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PartialDateError, Result};
use crate::notation;
use crate::options::PartialDateOptions;
use crate::precision::PrecisionFlags;

/// Leap year used to read back a year-less `--02-29` during deserialization
/// when the default sentinel cannot hold that day.
const LEAP_UNKNOWN_YEAR: i32 = 2000;

/// A calendar date with some components possibly unknown.
///
/// The precision is never empty: "no date" is `Option::<PartialDateValue>::None`.
/// Equality and hashing look at the known components only, so two values
/// with different sentinel years but the same notation are equal.
#[derive(Debug, Clone, Copy)]
pub struct PartialDateValue {
    date: NaiveDate,
    precision: PrecisionFlags,
}

/// The persisted pair for one semantic date field.
///
/// `precision: None` means no flags were recorded, which is distinct from
/// `Some(0)` (flags recorded, nothing known).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPartialDate {
    pub date: Option<NaiveDate>,
    pub precision: Option<u8>,
}

impl StoredPartialDate {
    /// Both columns cleared.
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.precision.is_none()
    }
}

impl PartialDateValue {
    /// Pair a date with its flags, or `None` when nothing is known.
    pub(crate) fn from_parts(date: NaiveDate, precision: PrecisionFlags) -> Option<Self> {
        if precision.is_empty() {
            None
        } else {
            Some(Self { date, precision })
        }
    }

    /// Drop `flags` from the known set, yielding "no date" if nothing is left.
    ///
    /// Dropping the year writes `options.unknown_year` into the date. When
    /// the sentinel cannot hold the day (Feb 29 in a common year) the
    /// original year is kept.
    pub(crate) fn without(
        self,
        flags: PrecisionFlags,
        options: &PartialDateOptions,
    ) -> Option<Self> {
        let precision = self.precision - flags;
        let date = if precision.contains(PrecisionFlags::YEAR) {
            self.date
        } else {
            self.date
                .with_year(options.unknown_year)
                .unwrap_or(self.date)
        };
        Self::from_parts(date, precision)
    }

    fn known_components(&self) -> (PrecisionFlags, Option<i32>, Option<u32>, Option<u32>) {
        (self.precision, self.year(), self.month(), self.day())
    }

    /// The underlying calendar date, including any sentinel or default fields.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn precision(&self) -> PrecisionFlags {
        self.precision
    }

    pub fn has_known_year(&self) -> bool {
        self.precision.contains(PrecisionFlags::YEAR)
    }

    pub fn year(&self) -> Option<i32> {
        self.has_known_year().then(|| self.date.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.precision
            .contains(PrecisionFlags::MONTH)
            .then(|| self.date.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.precision
            .contains(PrecisionFlags::DAY)
            .then(|| self.date.day())
    }

    /// First concrete day covered by this value, if the year is known.
    pub fn earliest(&self) -> Option<NaiveDate> {
        let year = self.year()?;
        match (self.month(), self.day()) {
            (Some(_), Some(_)) => Some(self.date),
            (Some(month), None) => NaiveDate::from_ymd_opt(year, month, 1),
            (None, _) => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }

    /// Last concrete day covered by this value, if the year is known.
    pub fn latest(&self) -> Option<NaiveDate> {
        let year = self.year()?;
        match (self.month(), self.day()) {
            (Some(_), Some(_)) => Some(self.date),
            (Some(month), None) => last_day_of_month(year, month),
            (None, _) => NaiveDate::from_ymd_opt(year, 12, 31),
        }
    }

    /// The two columns to persist.
    pub fn to_stored(&self) -> StoredPartialDate {
        StoredPartialDate {
            date: Some(self.date),
            precision: Some(self.precision.bits()),
        }
    }

    /// Read a stored row back.
    ///
    /// A row with a date and no recorded precision is a legacy full date.
    /// A row without a date, or with an empty precision, is "no date".
    ///
    /// # Errors
    ///
    /// Returns [`PartialDateError::InvalidPrecision`] when the stored integer
    /// carries unknown bits.
    pub fn from_stored(stored: &StoredPartialDate) -> Result<Option<Self>> {
        let Some(date) = stored.date else {
            return Ok(None);
        };
        let precision = match stored.precision {
            None => PrecisionFlags::full(),
            Some(bits) => PrecisionFlags::decode(bits)?,
        };
        Ok(Self::from_parts(date, precision))
    }
}

/// Last day of the given month (e.g. Feb 28/29).
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

impl PartialEq for PartialDateValue {
    fn eq(&self, other: &Self) -> bool {
        self.known_components() == other.known_components()
    }
}

impl Eq for PartialDateValue {}

impl Hash for PartialDateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.known_components().hash(state);
    }
}

impl fmt::Display for PartialDateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        notation::write_notation(f, self.date, self.precision)
    }
}

impl FromStr for PartialDateValue {
    type Err = PartialDateError;

    /// Parse with default options. The empty string is rejected here since
    /// it denotes "no date"; use [`notation::parse_partial_date`] to accept it.
    fn from_str(s: &str) -> Result<Self> {
        notation::parse_partial_date(s)?
            .ok_or_else(|| PartialDateError::MalformedPartialDate(s.to_string()))
    }
}

impl Serialize for PartialDateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PartialDateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>()
            .or_else(|err| {
                let leap = PartialDateOptions::default().with_unknown_year(LEAP_UNKNOWN_YEAR);
                notation::parse_partial_date_with_options(&s, &leap)
                    .ok()
                    .flatten()
                    .ok_or(err)
            })
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── accessors ──────────────────────────────────────────────────────

    #[test]
    fn test_components_hidden_when_unknown() {
        let value: PartialDateValue = "--05-03".parse().unwrap();
        assert_eq!(value.year(), None);
        assert_eq!(value.month(), Some(5));
        assert_eq!(value.day(), Some(3));
        // Sentinel year is still present in the raw date
        assert_eq!(value.date(), ymd(1900, 5, 3));
    }

    #[test]
    fn test_year_month_defaults_day() {
        let value: PartialDateValue = "1901-05".parse().unwrap();
        assert_eq!(value.date(), ymd(1901, 5, 1));
        assert_eq!(value.day(), None);
    }

    #[test]
    fn test_from_parts_empty_is_none() {
        assert!(PartialDateValue::from_parts(ymd(1930, 1, 1), PrecisionFlags::empty()).is_none());
    }

    // ── earliest / latest ──────────────────────────────────────────────

    #[test]
    fn test_bounds_year_only() {
        let value: PartialDateValue = "1930".parse().unwrap();
        assert_eq!(value.earliest(), Some(ymd(1930, 1, 1)));
        assert_eq!(value.latest(), Some(ymd(1930, 12, 31)));
    }

    #[test]
    fn test_bounds_year_month_leap_february() {
        let value: PartialDateValue = "1932-02".parse().unwrap();
        assert_eq!(value.earliest(), Some(ymd(1932, 2, 1)));
        assert_eq!(value.latest(), Some(ymd(1932, 2, 29)));
    }

    #[test]
    fn test_bounds_december() {
        let value: PartialDateValue = "1930-12".parse().unwrap();
        assert_eq!(value.latest(), Some(ymd(1930, 12, 31)));
    }

    #[test]
    fn test_bounds_full_date() {
        let value: PartialDateValue = "1930-11-05".parse().unwrap();
        assert_eq!(value.earliest(), Some(ymd(1930, 11, 5)));
        assert_eq!(value.latest(), Some(ymd(1930, 11, 5)));
    }

    #[test]
    fn test_bounds_unknown_year() {
        let value: PartialDateValue = "--11-05".parse().unwrap();
        assert_eq!(value.earliest(), None);
        assert_eq!(value.latest(), None);
    }

    // ── storage ────────────────────────────────────────────────────────

    #[test]
    fn test_to_stored() {
        let value: PartialDateValue = "1930-11".parse().unwrap();
        let stored = value.to_stored();
        assert_eq!(stored.date, Some(ymd(1930, 11, 1)));
        assert_eq!(stored.precision, Some(3));
        assert_eq!(PartialDateValue::from_stored(&stored).unwrap(), Some(value));
    }

    #[test]
    fn test_from_stored_legacy_row_is_full_precision() {
        let stored = StoredPartialDate {
            date: Some(ymd(1925, 3, 14)),
            precision: None,
        };
        let value = PartialDateValue::from_stored(&stored).unwrap().unwrap();
        assert_eq!(value.precision(), PrecisionFlags::full());
        assert_eq!(value.to_string(), "1925-03-14");
    }

    #[test]
    fn test_from_stored_empty_precision_is_no_date() {
        let stored = StoredPartialDate {
            date: Some(ymd(1925, 3, 14)),
            precision: Some(0),
        };
        assert_eq!(PartialDateValue::from_stored(&stored).unwrap(), None);
    }

    #[test]
    fn test_from_stored_without_date_is_no_date() {
        assert_eq!(
            PartialDateValue::from_stored(&StoredPartialDate::default()).unwrap(),
            None
        );
    }

    #[test]
    fn test_from_stored_rejects_unknown_bits() {
        let stored = StoredPartialDate {
            date: Some(ymd(1925, 3, 14)),
            precision: Some(0b1000),
        };
        assert_eq!(
            PartialDateValue::from_stored(&stored),
            Err(PartialDateError::InvalidPrecision(8))
        );
    }

    // ── serde ──────────────────────────────────────────────────────────

    #[test]
    fn test_serde_as_notation() {
        let value: PartialDateValue = "--05-03".parse().unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""--05-03""#);
        let back: PartialDateValue = serde_json::from_str(r#""--05-03""#).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<PartialDateValue>(r#""1901--03""#).is_err());
        assert!(serde_json::from_str::<PartialDateValue>(r#""""#).is_err());
    }

    #[test]
    fn test_stored_serializes_dates_as_iso() {
        let stored = StoredPartialDate {
            date: Some(ymd(1930, 11, 5)),
            precision: Some(7),
        };
        let json = serde_json::to_value(stored).unwrap();
        assert_eq!(json["date"], "1930-11-05");
        assert_eq!(json["precision"], 7);
    }

    #[test]
    fn test_serde_round_trip_with_custom_sentinel() {
        let options = PartialDateOptions::default().with_unknown_year(1);
        let value = notation::parse_partial_date_with_options("--05-03", &options)
            .unwrap()
            .unwrap();
        let json = serde_json::to_string(&value).unwrap();
        let back: PartialDateValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
        assert_eq!(back.to_string(), "--05-03");
    }

    #[test]
    fn test_serde_round_trip_leap_day_without_year() {
        let options = PartialDateOptions::default().with_unknown_year(2000);
        let value = notation::parse_partial_date_with_options("--02-29", &options)
            .unwrap()
            .unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""--02-29""#);
        let back: PartialDateValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
        // FromStr keeps the default sentinel and still rejects it
        assert!("--02-29".parse::<PartialDateValue>().is_err());
    }

    // ── equality ───────────────────────────────────────────────────────

    #[test]
    fn test_equality_ignores_sentinel_year() {
        use std::collections::hash_map::DefaultHasher;

        let a = notation::parse_partial_date_with_options(
            "--05-03",
            &PartialDateOptions::default().with_unknown_year(1),
        )
        .unwrap()
        .unwrap();
        let b: PartialDateValue = "--05-03".parse().unwrap();
        assert_ne!(a.date(), b.date());
        assert_eq!(a, b);

        let hash = |v: &PartialDateValue| {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_equality_ignores_unknown_month_and_day() {
        let a = PartialDateValue::from_parts(ymd(1930, 3, 9), PrecisionFlags::YEAR).unwrap();
        let b: PartialDateValue = "1930".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(b, "1931".parse().unwrap());
        assert_ne!(b, "1930-01".parse().unwrap());
    }

    // ── without ────────────────────────────────────────────────────────

    #[test]
    fn test_without_year_writes_sentinel() {
        let options = PartialDateOptions::default().with_unknown_year(1);
        let value: PartialDateValue = "1901-05-03".parse().unwrap();
        let downgraded = value.without(PrecisionFlags::YEAR, &options).unwrap();
        assert_eq!(downgraded.date(), ymd(1, 5, 3));
        assert_eq!(downgraded.precision(), PrecisionFlags::MONTH | PrecisionFlags::DAY);
    }

    #[test]
    fn test_without_year_keeps_leap_day_when_sentinel_cannot() {
        let value: PartialDateValue = "1904-02-29".parse().unwrap();
        let downgraded = value
            .without(PrecisionFlags::YEAR, &PartialDateOptions::default())
            .unwrap();
        assert_eq!(downgraded.date(), ymd(1904, 2, 29));
        assert_eq!(downgraded.to_string(), "--02-29");
    }
}
