//! Error types.
//!
//! - `ZthError` is the closed set of failures the numeric core can signal.
//!   Every variant is a caller-input problem; none are retryable.
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

use crate::domain::NetworkKind;

/// Exit code for invalid caller input (bad numbers, bad request files).
pub const EXIT_INPUT: u8 = 2;

/// Exit code for I/O and terminal failures.
pub const EXIT_IO: u8 = 4;

/// Failure kinds of the curve pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZthError {
    /// Empty, unparseable, or non-finite numeric sequence.
    #[error("{0}")]
    InvalidInput(String),

    /// Non-positive resistance or capacitance in a supplied network.
    #[error("{network} R/C values must be positive ({reason}).")]
    InvalidNetwork { network: NetworkKind, reason: String },

    #[error("tp and zth must have same length (tp={tp}, zth={zth}).")]
    ShapeMismatch { tp: usize, zth: usize },

    #[error("All tp values must be > 0 for log-scale plotting (tp[{index}]={value}).")]
    NonPositiveTime { index: usize, value: f64 },

    #[error("order must be >= 1 (got {0}).")]
    InvalidOrder(i64),

    #[error("{network} r/c must have at least 'order' elements (order={order}, r={r_len}, c={c_len}).")]
    InsufficientStages {
        network: NetworkKind,
        order: usize,
        r_len: usize,
        c_len: usize,
    },

    /// The ladder eigen-analysis did not produce a passive pole-residue set.
    #[error("Cauer to Foster conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Grid resolution must be between 2 and {max} points (got {0}).", max = crate::math::MAX_GRID_POINTS)]
    InvalidGridSize(usize),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ZthError> for AppError {
    fn from(err: ZthError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_input_exit_code() {
        let err: AppError = ZthError::ShapeMismatch { tp: 3, zth: 2 }.into();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert_eq!(err.message(), "tp and zth must have same length (tp=3, zth=2).");
    }

    #[test]
    fn insufficient_stages_names_the_network() {
        let err = ZthError::InsufficientStages {
            network: NetworkKind::Cauer,
            order: 3,
            r_len: 2,
            c_len: 3,
        };
        assert!(err.to_string().starts_with("Cauer r/c must have at least"));
    }
}
