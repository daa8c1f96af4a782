//! Overlay requests.
//!
//! A request carries the six numeric fields plus `order` and an optional grid
//! resolution. Each numeric field may be a delimited string (as typed into a
//! form) or a JSON array of numbers:
//!
//! ```json
//! {
//!   "tp": "0.001, 0.01, 0.1, 1, 10",
//!   "zth": [0.05, 0.15, 0.25, 0.32, 0.35],
//!   "foster_r": "0.1;0.2", "foster_c": "0.01;1.0",
//!   "cauer_r": [0.1, 0.2], "cauer_c": [0.01, 1.0],
//!   "order": 2
//! }
//! ```
//!
//! Missing numeric fields behave like empty strings and are rejected by the
//! parser.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::domain::NumericSeries;
use crate::error::{AppError, EXIT_INPUT, ZthError};
use crate::io::parse::{parse_number_list, parse_number_values};
use crate::overlay::{CurveInputs, DEFAULT_GRID_POINTS};

/// A numeric list as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Values(Vec<f64>),
    Text(String),
}

impl Default for NumberInput {
    fn default() -> Self {
        NumberInput::Text(String::new())
    }
}

impl NumberInput {
    pub fn parse(&self) -> Result<NumericSeries, ZthError> {
        match self {
            NumberInput::Values(values) => parse_number_values(values.iter().copied()),
            NumberInput::Text(raw) => parse_number_list(raw),
        }
    }
}

/// An integer that may arrive as a number or as text (query-string style).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Number(i64),
    Text(String),
}

impl IntegerInput {
    pub fn parse(&self, field: &str) -> Result<i64, ZthError> {
        match self {
            IntegerInput::Number(v) => Ok(*v),
            IntegerInput::Text(raw) => raw.trim().parse::<i64>().map_err(|_| {
                ZthError::InvalidInput(format!("{field} must be an integer (got '{raw}')."))
            }),
        }
    }
}

/// One overlay request, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurveRequest {
    #[serde(default)]
    pub tp: NumberInput,
    #[serde(default)]
    pub zth: NumberInput,
    #[serde(default)]
    pub foster_r: NumberInput,
    #[serde(default)]
    pub foster_c: NumberInput,
    #[serde(default)]
    pub cauer_r: NumberInput,
    #[serde(default)]
    pub cauer_c: NumberInput,
    #[serde(default)]
    pub order: Option<IntegerInput>,
    #[serde(default)]
    pub n_grid: Option<IntegerInput>,
}

impl CurveRequest {
    /// Parse every field, failing on the first invalid one.
    ///
    /// `default_order` and `default_grid` apply when the request omits them.
    pub fn to_inputs(&self, default_order: i64, default_grid: usize) -> Result<CurveInputs, ZthError> {
        let order = match &self.order {
            Some(v) => v.parse("order")?,
            None => default_order,
        };
        let n_grid = match &self.n_grid {
            Some(v) => {
                let n = v.parse("n_grid")?;
                usize::try_from(n).map_err(|_| {
                    ZthError::InvalidInput(format!("n_grid must be non-negative (got {n})."))
                })?
            }
            None => default_grid,
        };

        Ok(CurveInputs {
            tp_actual: field("tp", &self.tp)?,
            zth_actual: field("zth", &self.zth)?,
            foster_r: field("foster_r", &self.foster_r)?,
            foster_c: field("foster_c", &self.foster_c)?,
            cauer_r: field("cauer_r", &self.cauer_r)?,
            cauer_c: field("cauer_c", &self.cauer_c)?,
            order,
            n_grid,
        })
    }

    /// Parse with the built-in defaults (`order = 1`, 450 grid points).
    pub fn to_default_inputs(&self) -> Result<CurveInputs, ZthError> {
        self.to_inputs(1, DEFAULT_GRID_POINTS)
    }
}

fn field(name: &str, input: &NumberInput) -> Result<NumericSeries, ZthError> {
    input.parse().map_err(|err| match err {
        ZthError::InvalidInput(msg) => ZthError::InvalidInput(format!("{name}: {msg}")),
        other => other,
    })
}

/// Read a request JSON file.
pub fn read_request_json(path: &Path) -> Result<CurveRequest, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to open request JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid request JSON '{}': {e}", path.display())))
}
