use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the difference solvers.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Stationary two-point boundary-value problem on [0, L]:
///
///   y'' - q(x)·y = -f(x),   y(0) = left, y(L) = right.
pub trait TwoPointBvp {
    fn q(&self, x: f64) -> f64;
    fn f(&self, x: f64) -> f64;
    fn left_value(&self) -> f64;
    fn right_value(&self) -> f64;

    /// Known exact solution, if any, used for error aggregation.
    fn exact(&self, _x: f64) -> Option<f64> {
        None
    }
}

/// Elliptic problem -Δu = f on the unit square with Dirichlet boundary.
pub trait PoissonProblem {
    fn source(&self, x1: f64, x2: f64) -> f64;
    fn boundary(&self, x1: f64, x2: f64) -> f64;

    fn exact(&self, _x1: f64, _x2: f64) -> Option<f64> {
        None
    }
}

/// Parabolic problem u_t - u_xx = f(x, t) on [0, L] × [0, T].
pub trait HeatProblem {
    /// u(x, 0)
    fn initial(&self, x: f64) -> f64;
    /// u(0, t)
    fn left(&self, t: f64) -> f64;
    /// u(L, t)
    fn right(&self, t: f64) -> f64;
    fn source(&self, x: f64, t: f64) -> f64;

    fn exact(&self, _x: f64, _t: f64) -> Option<f64> {
        None
    }
}

/// Hyperbolic problem u_tt - u_xx = f(x, t) on [0, L] × [0, T].
///
/// Needs both an initial displacement and an initial velocity; the second
/// time layer is bootstrapped from the velocity by a Taylor step.
pub trait WaveProblem {
    /// u(x, 0)
    fn initial(&self, x: f64) -> f64;
    /// ∂u/∂t(x, 0)
    fn initial_velocity(&self, x: f64) -> f64;
    /// u(0, t)
    fn left(&self, t: f64) -> f64;
    /// u(L, t)
    fn right(&self, t: f64) -> f64;
    fn source(&self, x: f64, t: f64) -> f64;

    fn exact(&self, _x: f64, _t: f64) -> Option<f64> {
        None
    }
}
