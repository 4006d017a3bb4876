//! Filtering stored partial dates by whether their year is known.
//!
//! [`KnownYear`] defines the truth table once and translates it for
//! storage layers: an in-memory predicate and a SQL `WHERE` fragment.
//!
//! A row whose precision column is NULL counts as having a known year.
//! Older rows were written before precision was recorded and are full,
//! accurate dates.

use crate::error::{PartialDateError, Result};
use crate::field::{
    PartialDateRange, DATE_PRECISION_FIELD, END_PRECISION_FIELD, START_PRECISION_FIELD,
};
use crate::precision::PrecisionFlags;
use crate::value::StoredPartialDate;

/// Access to raw stored precision columns by name.
pub trait PrecisionColumns {
    /// Names of the precision columns this row type has.
    const COLUMNS: &'static [&'static str];

    /// The raw precision stored in `field`; the outer `None` means this row
    /// type has no such column, the inner `None` is a NULL column.
    fn precision_bits(&self, field: &str) -> Option<Option<u8>>;
}

impl PrecisionColumns for StoredPartialDate {
    const COLUMNS: &'static [&'static str] = &[DATE_PRECISION_FIELD];

    fn precision_bits(&self, field: &str) -> Option<Option<u8>> {
        (field == DATE_PRECISION_FIELD).then_some(self.precision)
    }
}

impl PrecisionColumns for PartialDateRange {
    const COLUMNS: &'static [&'static str] = &[START_PRECISION_FIELD, END_PRECISION_FIELD];

    fn precision_bits(&self, field: &str) -> Option<Option<u8>> {
        match field {
            START_PRECISION_FIELD => Some(self.start().stored().precision),
            END_PRECISION_FIELD => Some(self.end().stored().precision),
            _ => None,
        }
    }
}

/// The `knownyear` lookup on one precision column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownYear {
    field: String,
    known: bool,
}

impl KnownYear {
    /// Build the predicate for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`PartialDateError::InvalidFieldName`] unless `field` is a
    /// plain identifier (ASCII letter or `_`, then letters, digits or `_`).
    pub fn new(field: impl Into<String>, known: bool) -> Result<Self> {
        let field = field.into();
        if !is_identifier(&field) {
            return Err(PartialDateError::InvalidFieldName(field));
        }
        Ok(Self { field, known })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn known(&self) -> bool {
        self.known
    }

    /// Evaluate against a raw stored precision integer.
    pub fn matches_bits(&self, bits: Option<u8>) -> bool {
        let year_known = match bits {
            None => true,
            Some(bits) => bits & PrecisionFlags::YEAR.bits() != 0,
        };
        year_known == self.known
    }

    /// Evaluate against decoded flags; `None` is a NULL column.
    pub fn matches(&self, precision: Option<PrecisionFlags>) -> bool {
        self.matches_bits(precision.map(|p| p.bits()))
    }

    /// Keep the rows whose column satisfies this predicate.
    ///
    /// # Errors
    ///
    /// Returns [`PartialDateError::UnknownField`] when `R` has no precision
    /// column named by this predicate.
    pub fn filter<'a, R, I>(&'a self, rows: I) -> Result<impl Iterator<Item = &'a R> + 'a>
    where
        R: PrecisionColumns + 'a,
        I: IntoIterator<Item = &'a R>,
        I::IntoIter: 'a,
    {
        if !R::COLUMNS.contains(&self.field.as_str()) {
            return Err(PartialDateError::UnknownField(self.field.clone()));
        }
        Ok(rows
            .into_iter()
            .filter(move |row| self.matches_bits(row.precision_bits(&self.field).flatten())))
    }

    /// Render as a SQL boolean expression using a bitwise AND on the column.
    ///
    /// NULL compares as unknown in SQL, so the `false` form excludes NULL
    /// rows without an explicit check.
    pub fn to_sql(&self) -> String {
        let year = PrecisionFlags::YEAR.bits();
        if self.known {
            format!(
                "({field} IS NULL OR ({field} & {year}) = {year})",
                field = self.field
            )
        } else {
            format!("({field} & {year}) = 0", field = self.field)
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
