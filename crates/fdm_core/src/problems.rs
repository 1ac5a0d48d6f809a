//! Manufactured problems with polynomial exact solutions, used to exercise
//! every scheme against a known answer. Each one satisfies its governing
//! equation identically, so the reported max error measures the scheme alone.

use crate::traits::{HeatProblem, PoissonProblem, TwoPointBvp, WaveProblem};

/// `y'' − 3x·y = −(3x⁴ + x² + 3x)` on [0, 1], `y(0) = 3`, `y(1) = 13/3`,
/// exact solution `y = x³ + x/3 + 3`.
///
/// The exact solution is cubic, for which the second-order central stencil
/// is exact, so the discrete solve reproduces it to rounding at any N.
#[derive(Debug, Clone, Copy)]
pub struct CubicBvp;

impl TwoPointBvp for CubicBvp {
    fn q(&self, x: f64) -> f64 {
        3.0 * x
    }

    fn f(&self, x: f64) -> f64 {
        3.0 * x.powi(4) + x.powi(2) + 3.0 * x
    }

    fn left_value(&self) -> f64 {
        3.0
    }

    fn right_value(&self) -> f64 {
        13.0 / 3.0
    }

    fn exact(&self, x: f64) -> Option<f64> {
        Some(x.powi(3) + x / 3.0 + 3.0)
    }
}

/// `−Δu = −18x₁ − 6x₂` on the unit square, Dirichlet boundary from the
/// exact solution `u = 3x₁³ + x₂³ + 3x₁ + x₂ + 3`.
#[derive(Debug, Clone, Copy)]
pub struct PolynomialPoisson;

impl PolynomialPoisson {
    fn u(x1: f64, x2: f64) -> f64 {
        3.0 * x1.powi(3) + x2.powi(3) + 3.0 * x1 + x2 + 3.0
    }
}

impl PoissonProblem for PolynomialPoisson {
    fn source(&self, x1: f64, x2: f64) -> f64 {
        -18.0 * x1 - 6.0 * x2
    }

    fn boundary(&self, x1: f64, x2: f64) -> f64 {
        Self::u(x1, x2)
    }

    fn exact(&self, x1: f64, x2: f64) -> Option<f64> {
        Some(Self::u(x1, x2))
    }
}

/// `u_t − u_xx = 2x²t + 3x − 2t²` on [0, 1] × [0, T], exact solution
/// `u = x²t² + 3xt + x + 3`.
#[derive(Debug, Clone, Copy)]
pub struct PolynomialHeat;

impl HeatProblem for PolynomialHeat {
    fn initial(&self, x: f64) -> f64 {
        x + 3.0
    }

    fn left(&self, _t: f64) -> f64 {
        3.0
    }

    fn right(&self, t: f64) -> f64 {
        t * t + 3.0 * t + 4.0
    }

    fn source(&self, x: f64, t: f64) -> f64 {
        2.0 * x * x * t + 3.0 * x - 2.0 * t * t
    }

    fn exact(&self, x: f64, t: f64) -> Option<f64> {
        Some(x * x * t * t + 3.0 * x * t + x + 3.0)
    }
}

/// `u_tt − u_xx = 6x³t − 6xt³` on [0, 1] × [0, T], exact solution
/// `u = x³t³ + 3xt + x + 3`, initial velocity `∂u/∂t(x, 0) = 3x`.
#[derive(Debug, Clone, Copy)]
pub struct CubicWave;

impl WaveProblem for CubicWave {
    fn initial(&self, x: f64) -> f64 {
        x + 3.0
    }

    fn initial_velocity(&self, x: f64) -> f64 {
        3.0 * x
    }

    fn left(&self, _t: f64) -> f64 {
        3.0
    }

    fn right(&self, t: f64) -> f64 {
        t.powi(3) + 3.0 * t + 4.0
    }

    fn source(&self, x: f64, t: f64) -> f64 {
        6.0 * x.powi(3) * t - 6.0 * x * t.powi(3)
    }

    fn exact(&self, x: f64, t: f64) -> Option<f64> {
        Some(x.powi(3) * t.powi(3) + 3.0 * x * t + x + 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{CubicBvp, CubicWave, PolynomialHeat, PolynomialPoisson};
    use crate::traits::{HeatProblem, PoissonProblem, TwoPointBvp, WaveProblem};

    #[test]
    fn bvp_exact_solution_satisfies_the_equation() {
        // y'' − 3x·y + f(x) should vanish for the manufactured cubic.
        for x in [0.1, 0.5, 0.9] {
            let y = CubicBvp.exact(x).unwrap();
            let y_second = 6.0 * x;
            let residual = y_second - CubicBvp.q(x) * y + CubicBvp.f(x);
            assert!(residual.abs() < 1e-12, "x={x}: residual {residual}");
        }
    }

    #[test]
    fn bvp_boundary_values_match_the_exact_solution() {
        assert_eq!(CubicBvp.exact(0.0).unwrap(), CubicBvp.left_value());
        assert!((CubicBvp.exact(1.0).unwrap() - CubicBvp.right_value()).abs() < 1e-15);
    }

    #[test]
    fn poisson_source_is_minus_laplacian_of_exact() {
        for (x1, x2) in [(0.25, 0.75), (0.5, 0.5)] {
            let laplacian = 18.0 * x1 + 6.0 * x2;
            assert!((PolynomialPoisson.source(x1, x2) + laplacian).abs() < 1e-12);
        }
    }

    #[test]
    fn heat_and_wave_data_are_consistent_with_exact() {
        for x in [0.0, 0.3, 1.0] {
            assert_eq!(PolynomialHeat.exact(x, 0.0).unwrap(), PolynomialHeat.initial(x));
            assert_eq!(CubicWave.exact(x, 0.0).unwrap(), CubicWave.initial(x));
        }
        for t in [0.0, 0.5, 1.0] {
            assert_eq!(PolynomialHeat.exact(0.0, t).unwrap(), PolynomialHeat.left(t));
            assert!((PolynomialHeat.exact(1.0, t).unwrap() - PolynomialHeat.right(t)).abs() < 1e-12);
            assert_eq!(CubicWave.exact(0.0, t).unwrap(), CubicWave.left(t));
            assert!((CubicWave.exact(1.0, t).unwrap() - CubicWave.right(t)).abs() < 1e-12);
        }
    }
}
