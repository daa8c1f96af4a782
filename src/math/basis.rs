//! Exponential saturation basis for RC step responses.
//!
//! Each RC stage contributes `R · g(t, τ)` with
//!
//! - `g(t, τ) = 1 - exp(-t/τ)`
//!
//! Numerical notes:
//! - For small `x = t/τ`, `1 - exp(-x)` suffers from catastrophic cancellation.
//!   We evaluate it as `-expm1(-x)`, which keeps full relative precision.
//! - `g(0, τ) = 0` exactly and `g → 1` as `t → ∞`.

/// Compute `1 - exp(-t/τ)` in a numerically stable way.
pub fn saturation(t: f64, tau: f64) -> f64 {
    let x = t / tau;
    -(-x).exp_m1()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn saturation_limits() {
        assert_eq!(saturation(0.0, 2.0), 0.0);
        assert_relative_eq!(saturation(1e6, 1.0), 1.0);
    }

    #[test]
    fn saturation_keeps_precision_for_tiny_ratios() {
        // 1 - exp(-x) ≈ x - x²/2 for small x.
        let x = 1e-12;
        assert_relative_eq!(saturation(x, 1.0), x - x * x / 2.0, max_relative = 1e-12);
    }
}
