//! Shared domain types.
//!
//! All types here are immutable once constructed. Constructors validate their
//! invariants so downstream code (evaluation, conversion, rendering) can rely on
//! them without re-checking.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::error::ZthError;

/// An ordered, finite, non-empty sequence of real numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NumericSeries(Vec<f64>);

impl NumericSeries {
    /// Validate and wrap a sequence.
    pub fn new(values: Vec<f64>) -> Result<Self, ZthError> {
        if values.is_empty() {
            return Err(ZthError::InvalidInput(
                "Expected a non-empty 1D numeric list.".to_string(),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ZthError::InvalidInput(format!(
                "Input contains non-finite values (index {pos}: {}).",
                values[pos]
            )));
        }
        Ok(Self(values))
    }

    /// Wrap values computed by the pipeline itself (grid points, Zth samples).
    pub(crate) fn from_computed(values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert!(values.iter().all(|v| v.is_finite()));
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Smallest element.
    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest element.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Deref for NumericSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for NumericSeries {
    type Error = ZthError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Which network form a value or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Foster,
    Cauer,
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::Foster => f.write_str("Foster"),
            NetworkKind::Cauer => f.write_str("Cauer"),
        }
    }
}

/// One RC stage of a network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RcStage {
    pub r: f64,
    pub c: f64,
}

impl RcStage {
    /// Time constant `τ = R·C`.
    pub fn tau(&self) -> f64 {
        self.r * self.c
    }
}

/// `n` independent parallel RC stages.
///
/// The thermal step response is `Σ R[i]·(1 - exp(-t / (R[i]·C[i])))`.
#[derive(Debug, Clone, PartialEq)]
pub struct FosterNetwork {
    r: Vec<f64>,
    c: Vec<f64>,
}

impl FosterNetwork {
    pub fn new(r: &[f64], c: &[f64]) -> Result<Self, ZthError> {
        validate_rc(NetworkKind::Foster, r, c)?;
        Ok(Self {
            r: r.to_vec(),
            c: c.to_vec(),
        })
    }

    /// Number of stages.
    pub fn order(&self) -> usize {
        self.r.len()
    }

    pub fn r(&self) -> &[f64] {
        &self.r
    }

    pub fn c(&self) -> &[f64] {
        &self.c
    }

    pub fn stages(&self) -> impl Iterator<Item = RcStage> + '_ {
        self.r.iter().zip(&self.c).map(|(&r, &c)| RcStage { r, c })
    }

    /// Asymptotic thermal resistance `Σ R[i]` (the `t → ∞` limit of Zth).
    pub fn total_resistance(&self) -> f64 {
        self.r.iter().sum()
    }
}

/// An `n`-stage ladder of series resistances and shunt capacitances.
///
/// Stage 0 sits at the heat source: power enters node 0, `R[i]` joins node `i`
/// to node `i + 1`, `R[n-1]` joins the last node to ambient, and `C[i]` shunts
/// node `i` to ambient.
///
/// Ladders listed from the ambient side (ambient coupled through `R[0]`) must be
/// reversed before construction, e.g. `r.iter().rev()` for both lists. The two
/// readings describe different networks and give different Zth curves.
#[derive(Debug, Clone, PartialEq)]
pub struct CauerNetwork {
    r: Vec<f64>,
    c: Vec<f64>,
}

impl CauerNetwork {
    pub fn new(r: &[f64], c: &[f64]) -> Result<Self, ZthError> {
        validate_rc(NetworkKind::Cauer, r, c)?;
        Ok(Self {
            r: r.to_vec(),
            c: c.to_vec(),
        })
    }

    /// Number of ladder stages.
    pub fn order(&self) -> usize {
        self.r.len()
    }

    pub fn r(&self) -> &[f64] {
        &self.r
    }

    pub fn c(&self) -> &[f64] {
        &self.c
    }

    pub fn stages(&self) -> impl Iterator<Item = RcStage> + '_ {
        self.r.iter().zip(&self.c).map(|(&r, &c)| RcStage { r, c })
    }

    /// Junction-to-ambient resistance `Σ R[i]`.
    pub fn total_resistance(&self) -> f64 {
        self.r.iter().sum()
    }
}

fn validate_rc(network: NetworkKind, r: &[f64], c: &[f64]) -> Result<(), ZthError> {
    if r.is_empty() || r.len() != c.len() {
        return Err(ZthError::InvalidNetwork {
            network,
            reason: format!(
                "need matching non-empty R and C lists, got r={} c={}",
                r.len(),
                c.len()
            ),
        });
    }
    for (label, values) in [("R", r), ("C", c)] {
        if let Some(i) = values.iter().position(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ZthError::InvalidNetwork {
                network,
                reason: format!("{label}[{i}]={}", values[i]),
            });
        }
    }
    Ok(())
}

/// Measured points plus the two model curves on a shared log-spaced grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveBundle {
    /// Measured times, sorted ascending.
    pub tp_actual: NumericSeries,
    /// Measured Zth, permuted together with `tp_actual`.
    pub zth_actual: NumericSeries,
    pub tp_grid: NumericSeries,
    /// Foster network evaluated on `tp_grid`.
    pub zth_foster: NumericSeries,
    /// Cauer network (via its Foster equivalent) evaluated on `tp_grid`.
    pub zth_cauer: NumericSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_series_rejects_empty_and_non_finite() {
        assert!(matches!(
            NumericSeries::new(vec![]),
            Err(ZthError::InvalidInput(_))
        ));
        assert!(matches!(
            NumericSeries::new(vec![1.0, f64::NAN]),
            Err(ZthError::InvalidInput(_))
        ));
        assert!(matches!(
            NumericSeries::try_from(vec![1.0, f64::INFINITY]),
            Err(ZthError::InvalidInput(_))
        ));
    }

    #[test]
    fn numeric_series_min_max() {
        let s = NumericSeries::new(vec![3.0, -1.0, 2.0]).unwrap();
        assert_eq!(s.min(), -1.0);
        assert_eq!(s.max(), 3.0);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn networks_reject_non_positive_values() {
        for (r, c) in [
            (vec![1.0, 0.0], vec![1.0, 1.0]),
            (vec![1.0, 2.0], vec![1.0, -0.5]),
        ] {
            assert!(matches!(
                FosterNetwork::new(&r, &c),
                Err(ZthError::InvalidNetwork {
                    network: NetworkKind::Foster,
                    ..
                })
            ));
            assert!(matches!(
                CauerNetwork::new(&r, &c),
                Err(ZthError::InvalidNetwork {
                    network: NetworkKind::Cauer,
                    ..
                })
            ));
        }
    }

    #[test]
    fn networks_reject_mismatched_lengths() {
        assert!(FosterNetwork::new(&[1.0, 2.0], &[1.0]).is_err());
        assert!(CauerNetwork::new(&[], &[]).is_err());
    }

    #[test]
    fn network_equality_is_value_equality() {
        let a = FosterNetwork::new(&[0.1, 0.2], &[0.01, 1.0]).unwrap();
        let b = FosterNetwork::new(&[0.1, 0.2], &[0.01, 1.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.order(), 2);
        assert!((a.total_resistance() - 0.3).abs() < 1e-15);
        let taus: Vec<f64> = a.stages().map(|s| s.tau()).collect();
        assert_eq!(taus, vec![0.1 * 0.01, 0.2 * 1.0]);
    }
}
