//! Cauer ladder networks and their Foster equivalents.
//!
//! The ladder is a linear time-invariant system with one temperature state per
//! capacitor. With `C = diag(C[i])` and the tridiagonal conductance matrix `G`
//! implied by the series resistances, the node temperatures obey
//!
//! ```text
//! C · dT/dt = -G · T + e0 · P        Zth(t) = T[0](t) for a unit step P = 1
//! ```
//!
//! so the state matrix is `A = -C⁻¹ G`. Instead of decomposing `A` directly we
//! decompose the similar symmetric matrix `S = C^{-1/2} G C^{-1/2}`, which has
//! the spectrum of `-A` and yields orthonormal eigenvectors `v_k`. Mode `k` then
//! contributes
//!
//! ```text
//! τ_k = 1 / λ_k        R_k = v_k[0]² / (C[0] · λ_k)
//! ```
//!
//! which is exactly a Foster stage with `C_k = τ_k / R_k`.

use nalgebra::{DMatrix, SymmetricEigen};

use crate::domain::{CauerNetwork, FosterNetwork};
use crate::error::ZthError;

/// Conductance matrix `G` of the ladder (node 0 at the heat source).
pub fn conductance_matrix(network: &CauerNetwork) -> DMatrix<f64> {
    let n = network.order();
    let mut g = DMatrix::<f64>::zeros(n, n);
    for (i, &r) in network.r().iter().enumerate() {
        let gi = 1.0 / r;
        g[(i, i)] += gi;
        if i + 1 < n {
            g[(i + 1, i + 1)] += gi;
            g[(i, i + 1)] -= gi;
            g[(i + 1, i)] -= gi;
        }
    }
    g
}

/// State matrix `A = -C⁻¹ G` of the ladder.
pub fn state_matrix(network: &CauerNetwork) -> DMatrix<f64> {
    let mut a = -conductance_matrix(network);
    for (i, &c) in network.c().iter().enumerate() {
        a.row_mut(i).scale_mut(1.0 / c);
    }
    a
}

/// Convert a Cauer ladder to the Foster network with the same step response.
///
/// Output stages are ordered by ascending time constant. Fails with
/// `ConversionFailed` if any pole is not strictly negative or any residue is not
/// strictly positive (ill-conditioning at extreme R/C ratios).
pub fn cauer_to_foster(network: &CauerNetwork) -> Result<FosterNetwork, ZthError> {
    let c = network.c();
    let n = network.order();

    let scale: Vec<f64> = c.iter().map(|v| v.sqrt().recip()).collect();
    let mut s = conductance_matrix(network);
    for i in 0..n {
        for j in 0..n {
            s[(i, j)] *= scale[i] * scale[j];
        }
    }

    let eig = SymmetricEigen::new(s);

    let mut modes = Vec::with_capacity(n);
    for (k, &rate) in eig.eigenvalues.iter().enumerate() {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ZthError::ConversionFailed(format!(
                "mode {k} has pole {} (expected strictly negative)",
                -rate
            )));
        }
        let v0 = eig.eigenvectors[(0, k)];
        let residue = v0 * v0 / (c[0] * rate);
        let tau = rate.recip();
        if !(residue.is_finite() && residue > 0.0 && tau.is_finite()) {
            return Err(ZthError::ConversionFailed(format!(
                "mode {k} has residue {residue} for tau {tau} (expected strictly positive)"
            )));
        }
        modes.push((tau, residue));
    }
    modes.sort_by(|a, b| a.0.total_cmp(&b.0));

    let r_out: Vec<f64> = modes.iter().map(|&(_, r)| r).collect();
    let c_out: Vec<f64> = modes.iter().map(|&(tau, r)| tau / r).collect();
    FosterNetwork::new(&r_out, &c_out).map_err(|e| ZthError::ConversionFailed(e.to_string()))
}

/// Laplace-domain input impedance of the ladder for real `s ≥ 0`.
///
/// Evaluated as a continued fraction from the ambient end inwards.
pub fn cauer_impedance(network: &CauerNetwork, s: f64) -> f64 {
    let mut z = 0.0;
    for (&r, &c) in network.r().iter().zip(network.c()).rev() {
        let behind = r + z;
        z = 1.0 / (s * c + 1.0 / behind);
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{foster_impedance, zth_at};
    use approx::assert_relative_eq;

    #[test]
    fn single_stage_is_identity() {
        let cauer = CauerNetwork::new(&[0.7], &[0.03]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();
        assert_eq!(foster.order(), 1);
        assert_relative_eq!(foster.r()[0], 0.7, max_relative = 1e-12);
        assert_relative_eq!(foster.c()[0], 0.03, max_relative = 1e-12);
    }

    #[test]
    fn two_stage_poles_match_characteristic_polynomial() {
        let (r1, r2, c1, c2) = (0.1, 0.2, 0.01, 1.0);
        let cauer = CauerNetwork::new(&[r1, r2], &[c1, c2]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();

        // det(sC + G) = C1C2 s² + (C1(g1+g2) + C2 g1) s + g1 g2
        let (g1, g2) = (1.0 / r1, 1.0 / r2);
        let rates: Vec<f64> = foster.stages().map(|s| 1.0 / s.tau()).collect();
        assert_relative_eq!(rates[0] * rates[1], g1 * g2 / (c1 * c2), max_relative = 1e-10);
        assert_relative_eq!(
            rates[0] + rates[1],
            (c1 * (g1 + g2) + c2 * g1) / (c1 * c2),
            max_relative = 1e-10
        );
    }

    #[test]
    fn residues_sum_to_ladder_resistance() {
        let cauer = CauerNetwork::new(&[0.05, 0.1, 0.3, 0.8], &[0.002, 0.05, 0.4, 6.0]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();
        assert_eq!(foster.order(), 4);
        assert_relative_eq!(
            foster.total_resistance(),
            cauer.total_resistance(),
            max_relative = 1e-10
        );
    }

    #[test]
    fn impedance_matches_ladder_continued_fraction() {
        let cauer = CauerNetwork::new(&[0.05, 0.1, 0.3, 0.8], &[0.002, 0.05, 0.4, 6.0]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();
        for s in [0.0, 0.01, 0.3, 2.0, 50.0, 1e4] {
            assert_relative_eq!(
                foster_impedance(&foster, s),
                cauer_impedance(&cauer, s),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn stages_are_sorted_by_time_constant() {
        let cauer = CauerNetwork::new(&[1.0, 0.01, 5.0], &[3.0, 0.2, 0.001]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();
        let taus: Vec<f64> = foster.stages().map(|s| s.tau()).collect();
        assert!(taus.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn eigenvalues_of_state_matrix_are_the_poles() {
        let cauer = CauerNetwork::new(&[0.1, 0.2, 0.4], &[0.01, 1.0, 3.0]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();

        let mut poles: Vec<f64> = state_matrix(&cauer)
            .complex_eigenvalues()
            .iter()
            .map(|e| {
                assert!(e.im.abs() < 1e-9);
                e.re
            })
            .collect();
        poles.sort_by(|a, b| b.total_cmp(a));

        let mut expected: Vec<f64> = foster.stages().map(|s| -1.0 / s.tau()).collect();
        expected.sort_by(|a, b| b.total_cmp(a));

        for (p, e) in poles.iter().zip(&expected) {
            assert!(*p < 0.0);
            assert_relative_eq!(*p, *e, max_relative = 1e-8);
        }
    }

    #[test]
    fn converted_step_response_saturates_at_ladder_resistance() {
        let cauer = CauerNetwork::new(&[0.1, 0.2], &[0.01, 1.0]).unwrap();
        let foster = cauer_to_foster(&cauer).unwrap();
        assert_eq!(zth_at(&foster, 0.0), 0.0);
        assert!((zth_at(&foster, 1e4) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn ladder_orientation_changes_the_response() {
        // Same stages listed junction-first and ambient-first.
        let junction_first = cauer_to_foster(&CauerNetwork::new(&[0.1, 0.2], &[0.01, 1.0]).unwrap()).unwrap();
        let ambient_first = cauer_to_foster(&CauerNetwork::new(&[0.2, 0.1], &[1.0, 0.01]).unwrap()).unwrap();

        assert_relative_eq!(
            junction_first.total_resistance(),
            ambient_first.total_resistance(),
            max_relative = 1e-12
        );
        // Early on the heat source only sees C[0].
        assert_relative_eq!(zth_at(&junction_first, 1e-3), 0.0633, max_relative = 1e-2);
        assert_relative_eq!(zth_at(&ambient_first, 1e-3), 0.000998, max_relative = 1e-2);
    }
}
