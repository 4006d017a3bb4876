//! Partial-date fields as owned by host entities.
//!
//! A [`PartialDateField`] wraps the two persisted columns of one semantic
//! date. Reads always go through the formatter and writes always go through
//! the parser (or the range deriver), so the stored precision can only ever
//! hold what one of those produced. [`PartialDateRange`] is the start/end
//! pair most hosts (events, addresses, editions) carry.

use crate::error::Result;
use crate::notation::parse_partial_date_with_options;
use crate::options::PartialDateOptions;
use crate::range::{combine_range, derive_partial_date, DateEvidence};
use crate::value::{PartialDateValue, StoredPartialDate};

/// Column name of the precision in a single [`StoredPartialDate`] row.
pub const DATE_PRECISION_FIELD: &str = "date_precision";
/// Column name of the start precision, as seen by [`crate::KnownYear`].
pub const START_PRECISION_FIELD: &str = "start_date_precision";
/// Column name of the end precision, as seen by [`crate::KnownYear`].
pub const END_PRECISION_FIELD: &str = "end_date_precision";

/// One partial date backed by a (date, precision) column pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDateField {
    stored: StoredPartialDate,
    value: Option<PartialDateValue>,
    options: PartialDateOptions,
}

impl PartialDateField {
    pub fn new(options: PartialDateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Load a field from its persisted columns.
    ///
    /// The row is kept as-is until the next write, so a legacy row without a
    /// recorded precision is written back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PartialDateError::InvalidPrecision`] if the stored
    /// precision has unknown bits.
    pub fn from_stored(stored: StoredPartialDate, options: PartialDateOptions) -> Result<Self> {
        let value = PartialDateValue::from_stored(&stored)?;
        Ok(Self {
            stored,
            value,
            options,
        })
    }

    /// The notation for this field, or `None` if no date is stored.
    pub fn get(&self) -> Option<String> {
        self.value.as_ref().map(ToString::to_string)
    }

    /// Parse `notation` and store it. `None` or `""` clears both columns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PartialDateError::MalformedPartialDate`] and leaves
    /// the field untouched when the notation is rejected.
    pub fn set(&mut self, notation: Option<&str>) -> Result<()> {
        let value = match notation {
            Some(notation) => parse_partial_date_with_options(notation, &self.options)?,
            None => None,
        };
        self.assign(value);
        Ok(())
    }

    /// Store the best partial date supported by `evidence`.
    ///
    /// See [`derive_partial_date`] for how bounds and single dates resolve.
    pub fn calculate(&mut self, evidence: DateEvidence<'_>) -> Result<()> {
        let value = derive_partial_date(evidence, &self.options)?;
        self.assign(value);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.assign(None);
    }

    pub fn value(&self) -> Option<&PartialDateValue> {
        self.value.as_ref()
    }

    /// The two columns to persist.
    pub fn stored(&self) -> StoredPartialDate {
        self.stored
    }

    pub fn options(&self) -> &PartialDateOptions {
        &self.options
    }

    fn assign(&mut self, value: Option<PartialDateValue>) {
        self.stored = value
            .as_ref()
            .map(PartialDateValue::to_stored)
            .unwrap_or_default();
        self.value = value;
    }
}

/// A start/end pair of partial dates owned by one host entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDateRange {
    start: PartialDateField,
    end: PartialDateField,
}

impl PartialDateRange {
    pub fn new(options: PartialDateOptions) -> Self {
        Self {
            start: PartialDateField::new(options),
            end: PartialDateField::new(options),
        }
    }

    /// Load both fields from persisted columns.
    pub fn from_stored(
        start: StoredPartialDate,
        end: StoredPartialDate,
        options: PartialDateOptions,
    ) -> Result<Self> {
        Ok(Self {
            start: PartialDateField::from_stored(start, options)?,
            end: PartialDateField::from_stored(end, options)?,
        })
    }

    pub fn start(&self) -> &PartialDateField {
        &self.start
    }

    pub fn start_mut(&mut self) -> &mut PartialDateField {
        &mut self.start
    }

    pub fn end(&self) -> &PartialDateField {
        &self.end
    }

    pub fn end_mut(&mut self) -> &mut PartialDateField {
        &mut self.end
    }

    /// The pair as one display string, e.g. `1930-01-01/??`.
    pub fn date_range(&self) -> String {
        combine_range(self.start.value(), self.end.value())
    }
}
