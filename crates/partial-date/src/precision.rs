//! Which components of a partial date are actually known.
//!
//! [`PrecisionFlags`] is a three-bit set over YEAR, MONTH and DAY. The
//! empty set means "nothing known", which every other module treats as
//! "no date". Storage uses the raw bits: bit 0 = YEAR, bit 1 = MONTH,
//! bit 2 = DAY.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PartialDateError, Result};

bitflags! {
    /// Known components of a partial date.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PrecisionFlags: u8 {
        const YEAR = 1 << 0;
        const MONTH = 1 << 1;
        const DAY = 1 << 2;
    }
}

/// A single calendar component, used to build flags from the list of
/// groups present in a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateComponent {
    Year,
    Month,
    Day,
}

impl DateComponent {
    /// The flag bit recording this component as known.
    pub fn flag(self) -> PrecisionFlags {
        match self {
            DateComponent::Year => PrecisionFlags::YEAR,
            DateComponent::Month => PrecisionFlags::MONTH,
            DateComponent::Day => PrecisionFlags::DAY,
        }
    }
}

impl PrecisionFlags {
    /// Build flags from the components that were present.
    pub fn from_components<I>(components: I) -> Self
    where
        I: IntoIterator<Item = DateComponent>,
    {
        components
            .into_iter()
            .fold(PrecisionFlags::empty(), |acc, c| acc | c.flag())
    }

    /// Decode a stored precision integer.
    ///
    /// # Errors
    ///
    /// Returns [`PartialDateError::InvalidPrecision`] when `bits` has any bit
    /// set outside YEAR, MONTH and DAY.
    pub fn decode(bits: u8) -> Result<Self> {
        PrecisionFlags::from_bits(bits).ok_or(PartialDateError::InvalidPrecision(bits))
    }

    /// Full precision: year, month and day all known.
    pub fn full() -> Self {
        PrecisionFlags::all()
    }
}

impl FromIterator<DateComponent> for PrecisionFlags {
    fn from_iter<T: IntoIterator<Item = DateComponent>>(iter: T) -> Self {
        PrecisionFlags::from_components(iter)
    }
}

impl Serialize for PrecisionFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for PrecisionFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        PrecisionFlags::decode(bits).map_err(serde::de::Error::custom)
    }
}
