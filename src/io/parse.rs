//! Numeric list parsing and validation.
//!
//! Inputs arrive either as free text (pasted from a spreadsheet or a digitizer
//! export) or as an already-numeric list. Both paths end in a `NumericSeries`.
//!
//! Text rules:
//! - `,` `;` tab and newline are all element separators, in any mixture
//! - whitespace around tokens is ignored, empty tokens are dropped
//! - every remaining token must parse as a finite `f64`

use crate::domain::NumericSeries;
use crate::error::ZthError;

const SEPARATORS: [char; 4] = [',', ';', '\t', '\n'];

/// Parse a delimited string into a validated series.
pub fn parse_number_list(raw: &str) -> Result<NumericSeries, ZthError> {
    let mut values = Vec::new();
    for token in raw.split(SEPARATORS).map(str::trim).filter(|t| !t.is_empty()) {
        let value = token.parse::<f64>().map_err(|_| {
            ZthError::InvalidInput(format!("Could not convert '{token}' to a number."))
        })?;
        values.push(value);
    }
    NumericSeries::new(values)
}

/// Validate an already-numeric sequence.
pub fn parse_number_values<I>(values: I) -> Result<NumericSeries, ZthError>
where
    I: IntoIterator<Item = f64>,
{
    NumericSeries::new(values.into_iter().collect())
}
