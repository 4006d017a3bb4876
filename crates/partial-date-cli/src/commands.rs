use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use partial_date::{
    combine_range, derive_partial_date, format_partial_date, parse_partial_date_with_options,
    DateEvidence, PartialDateOptions, PartialDateValue, StoredPartialDate,
};
use serde::Serialize;

/// JSON shape printed by `parse` and `derive`.
#[derive(Serialize)]
struct DateOutput {
    notation: String,
    #[serde(flatten)]
    stored: StoredPartialDate,
}

impl DateOutput {
    fn new(value: Option<&PartialDateValue>) -> Self {
        Self {
            notation: format_partial_date(value),
            stored: value.map(PartialDateValue::to_stored).unwrap_or_default(),
        }
    }

    fn print(&self) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(std::io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Parse {
    /// Notation to parse (empty string means "no date")
    pub notation: String,
}

impl Parse {
    pub fn execute(&self, options: &PartialDateOptions) -> Result<()> {
        let value = parse_partial_date_with_options(&self.notation, options)
            .with_context(|| format!("cannot parse '{}'", self.notation))?;
        DateOutput::new(value.as_ref()).print()
    }
}

#[derive(Args, Debug)]
pub struct Format {
    /// Stored calendar date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Stored precision integer (bit 0 = year, 1 = month, 2 = day); omit for a legacy row
    #[arg(long)]
    pub precision: Option<u8>,
}

impl Format {
    pub fn execute(&self) -> Result<()> {
        let stored = StoredPartialDate {
            date: Some(self.date),
            precision: self.precision,
        };
        let value = PartialDateValue::from_stored(&stored).context("cannot read stored date")?;
        writeln!(std::io::stdout(), "{}", format_partial_date(value.as_ref()))?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Derive {
    /// Earliest possible date (YYYY-MM-DD)
    #[arg(required_unless_present = "single", requires = "latest")]
    pub earliest: Option<NaiveDate>,

    /// Latest possible date (YYYY-MM-DD)
    #[arg(required_unless_present = "single")]
    pub latest: Option<NaiveDate>,

    /// A single known date notation, subject to --year-cutoff
    #[arg(long, conflicts_with_all = ["earliest", "latest"])]
    pub single: Option<String>,
}

impl Derive {
    pub fn execute(&self, options: &PartialDateOptions) -> Result<()> {
        let evidence = match (&self.single, self.earliest, self.latest) {
            (Some(notation), _, _) => DateEvidence::Known(notation),
            (None, Some(earliest), Some(latest)) => DateEvidence::Bounds { earliest, latest },
            _ => bail!("either --single or both EARLIEST and LATEST are required"),
        };
        let value = derive_partial_date(evidence, options).context("cannot derive date")?;
        DateOutput::new(value.as_ref()).print()
    }
}

#[derive(Args, Debug)]
pub struct Range {
    /// Start notation (empty string for unset)
    pub start: String,

    /// End notation; omitted or empty for unset
    pub end: Option<String>,
}

impl Range {
    pub fn execute(&self, options: &PartialDateOptions) -> Result<()> {
        let start = parse_partial_date_with_options(&self.start, options)
            .with_context(|| format!("cannot parse start '{}'", self.start))?;
        let end = match self.end.as_deref() {
            Some(end) => parse_partial_date_with_options(end, options)
                .with_context(|| format!("cannot parse end '{end}'"))?,
            None => None,
        };
        writeln!(
            std::io::stdout(),
            "{}",
            combine_range(start.as_ref(), end.as_ref())
        )?;
        Ok(())
    }
}
