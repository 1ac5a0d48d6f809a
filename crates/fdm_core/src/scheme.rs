//! Assembles per-step difference equations from a continuous problem
//! definition and drives the full solve: direct tridiagonal elimination for
//! the 1-D stationary and implicit evolution paths, point relaxation for the
//! 2-D elliptic path, pointwise updates for the explicit paths.

use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::mesh::{Grid2d, GridFunction, Mesh, TimeAxis, TimeGrid};
use crate::relaxation::{relax_poisson, RelaxationOutcome, RelaxationSettings, SweepOrder};
use crate::traits::{HeatProblem, PoissonProblem, TwoPointBvp, WaveProblem};
use crate::tridiagonal::solve_tridiagonal;

/// Result of a stationary 1-D boundary-value solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryReport {
    pub grid: GridFunction,
    /// Maximum absolute deviation from the problem's exact solution over all
    /// nodes, when one is supplied.
    pub max_error: Option<f64>,
}

/// Result of a 2-D elliptic solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipticReport {
    pub grid: Grid2d,
    pub outcome: RelaxationOutcome,
    /// Maximum absolute deviation over interior nodes, when an exact
    /// solution is supplied.
    pub max_error: Option<f64>,
}

/// Result of an evolution (parabolic or hyperbolic) solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub grid: TimeGrid,
    /// Time steps actually advanced.
    pub time_steps: usize,
    /// Running maximum of the deviation from the exact solution across every
    /// layer, when one is supplied.
    pub max_error: Option<f64>,
}

/// Solves the two-point boundary-value problem
/// `y'' − q(x)·y = −f(x)`, `y(0) = left`, `y(L) = right`
/// with the second-order central stencil and one tridiagonal elimination.
///
/// Interior coefficients are `A = B = 1/h²`, `C = −2/h² − q(x_i)`; the
/// Dirichlet ends are folded into the first and last right-hand sides.
pub fn solve_two_point_bvp(
    problem: &impl TwoPointBvp,
    mesh: Mesh,
) -> Result<StationaryReport, SolverError> {
    let n = mesh.steps();
    let h = mesh.step();
    let mut grid = GridFunction::zeros(mesh);
    grid.set(0, problem.left_value());
    grid.set(n, problem.right_value());

    if n >= 2 {
        let unknowns = n - 1;
        let off = 1.0 / (h * h);
        let mut sub = vec![off; unknowns];
        let mut main = vec![0.0; unknowns];
        let mut sup = vec![off; unknowns];
        let mut rhs = vec![0.0; unknowns];
        sub[0] = 0.0;
        sup[unknowns - 1] = 0.0;

        for k in 0..unknowns {
            let x = mesh.coord(k + 1);
            main[k] = -2.0 / (h * h) - problem.q(x);
            rhs[k] = -problem.f(x);
        }
        rhs[0] -= off * problem.left_value();
        rhs[unknowns - 1] -= off * problem.right_value();

        let interior = solve_tridiagonal(&sub, &main, &sup, &rhs)?;
        for (k, v) in interior.into_iter().enumerate() {
            grid.set(k + 1, v);
        }
    }

    let max_error = problem
        .exact(0.0)
        .map(|_| grid.max_error_against(|x| problem.exact(x).unwrap_or(f64::NAN)));
    Ok(StationaryReport { grid, max_error })
}

/// Solves `−Δu = f` on the unit square by point relaxation of the five-point
/// stencil, with the boundary ring taken from the problem definition.
pub fn solve_poisson(
    problem: &impl PoissonProblem,
    mesh: Mesh,
    order: SweepOrder,
    settings: RelaxationSettings,
) -> Result<EllipticReport, SolverError> {
    settings.validate()?;
    let mut grid = Grid2d::zeros(mesh);
    grid.fill_boundary(|x1, x2| problem.boundary(x1, x2));

    let outcome = relax_poisson(
        &mut grid,
        |x1, x2| problem.source(x1, x2),
        order,
        settings,
    )?;

    let max_error = problem
        .exact(0.0, 0.0)
        .map(|_| grid.interior_max_error(|x1, x2| problem.exact(x1, x2).unwrap_or(f64::NAN)));
    Ok(EllipticReport {
        grid,
        outcome,
        max_error,
    })
}

/// Advances the parabolic problem `u_t − u_xx = f` with the σ-weighted
/// scheme: σ = 0 is the explicit pointwise update (source sampled at the
/// half-step `t_j + τ/2`), σ = 1 fully implicit, 0 < σ < 1 the weighted
/// blend, each implicit layer one tridiagonal solve.
///
/// The configured τ = T/M is honored for every σ; respecting the explicit
/// stability bound τ ≤ h²/2 is the caller's responsibility. No Courant-type
/// condition is enforced.
pub fn solve_heat(
    problem: &impl HeatProblem,
    mesh: Mesh,
    time: TimeAxis,
    sigma: f64,
) -> Result<EvolutionReport, SolverError> {
    validate_sigma(sigma)?;
    let n = mesh.steps();
    let m = time.steps();
    let h = mesh.step();
    let tau = time.tau();

    let mut y = TimeGrid::zeros(mesh, time);
    y.fill_initial(|x| problem.initial(x));
    y.fill_boundaries(|t| problem.left(t), |t| problem.right(t));

    if sigma == 0.0 {
        let r = tau / (h * h);
        for j in 0..m {
            let t_mid = time.time(j) + tau / 2.0;
            for i in 1..n {
                let next = (1.0 - 2.0 * r) * y.value(j, i)
                    + r * (y.value(j, i - 1) + y.value(j, i + 1))
                    + tau * problem.source(mesh.coord(i), t_mid);
                y.set(j + 1, i, next);
            }
        }
    } else if n >= 2 {
        let a = sigma * tau / (h * h);
        let diag = 1.0 + 2.0 * a;
        for j in 0..m {
            let t = time.time(j);
            let unknowns = n - 1;
            let mut sub = vec![-a; unknowns];
            let mut sup = vec![-a; unknowns];
            let mut rhs = vec![0.0; unknowns];
            sub[0] = 0.0;
            sup[unknowns - 1] = 0.0;

            for k in 0..unknowns {
                let i = k + 1;
                rhs[k] = y.value(j, i)
                    + (1.0 - sigma) * tau * second_difference(&y, j, i) / (h * h)
                    + tau * problem.source(mesh.coord(i), t);
            }
            rhs[0] += a * y.value(j + 1, 0);
            rhs[unknowns - 1] += a * y.value(j + 1, n);

            let interior = solve_tridiagonal(&sub, &vec![diag; unknowns], &sup, &rhs)
                .map_err(|e| e.at_step(j + 1))?;
            for (k, v) in interior.into_iter().enumerate() {
                y.set(j + 1, k + 1, v);
            }
        }
    }

    finish_evolution(problem_exact_heat(problem), y, m)
}

/// Advances the hyperbolic problem `u_tt − u_xx = f` with the σ-weighted
/// three-layer scheme. The first layer beyond the initial one is computed by
/// an explicit Taylor bootstrap from the initial velocity, since the
/// two-layer recurrence needs two known layers to start.
///
/// As with the heat path, explicit stability (τ ≤ h) is the caller's
/// responsibility.
pub fn solve_wave(
    problem: &impl WaveProblem,
    mesh: Mesh,
    time: TimeAxis,
    sigma: f64,
) -> Result<EvolutionReport, SolverError> {
    validate_sigma(sigma)?;
    let n = mesh.steps();
    let m = time.steps();
    let h = mesh.step();
    let tau = time.tau();

    let mut y = TimeGrid::zeros(mesh, time);
    y.fill_initial(|x| problem.initial(x));

    // Taylor bootstrap: y¹ = y⁰ + τ·v + τ²/2·(Λy⁰ + f(·, 0)).
    for i in 1..n {
        let x = mesh.coord(i);
        let next = y.value(0, i)
            + tau * problem.initial_velocity(x)
            + 0.5 * tau * tau * (second_difference(&y, 0, i) / (h * h) + problem.source(x, 0.0));
        y.set(1, i, next);
    }
    y.fill_boundaries(|t| problem.left(t), |t| problem.right(t));

    if sigma == 0.0 {
        for j in 1..m {
            let t = time.time(j);
            for i in 1..n {
                let next = 2.0 * y.value(j, i) - y.value(j - 1, i)
                    + tau * tau
                        * (second_difference(&y, j, i) / (h * h)
                            + problem.source(mesh.coord(i), t));
                y.set(j + 1, i, next);
            }
        }
    } else if n >= 2 {
        let a = sigma * tau * tau / (h * h);
        let diag = 1.0 + 2.0 * a;
        for j in 1..m {
            let t = time.time(j);
            let unknowns = n - 1;
            let mut sub = vec![-a; unknowns];
            let mut sup = vec![-a; unknowns];
            let mut rhs = vec![0.0; unknowns];
            sub[0] = 0.0;
            sup[unknowns - 1] = 0.0;

            for k in 0..unknowns {
                let i = k + 1;
                rhs[k] = 2.0 * y.value(j, i) - y.value(j - 1, i)
                    + tau * tau
                        * ((1.0 - 2.0 * sigma) * second_difference(&y, j, i) / (h * h)
                            + sigma * second_difference(&y, j - 1, i) / (h * h)
                            + problem.source(mesh.coord(i), t));
            }
            rhs[0] += a * y.value(j + 1, 0);
            rhs[unknowns - 1] += a * y.value(j + 1, n);

            let interior = solve_tridiagonal(&sub, &vec![diag; unknowns], &sup, &rhs)
                .map_err(|e| e.at_step(j + 1))?;
            for (k, v) in interior.into_iter().enumerate() {
                y.set(j + 1, k + 1, v);
            }
        }
    }

    finish_evolution(problem_exact_wave(problem), y, m)
}

/// Central second difference `y[j][i+1] − 2·y[j][i] + y[j][i−1]`
/// (the caller divides by h²).
fn second_difference(y: &TimeGrid, j: usize, i: usize) -> f64 {
    y.value(j, i + 1) - 2.0 * y.value(j, i) + y.value(j, i - 1)
}

fn validate_sigma(sigma: f64) -> Result<(), SolverError> {
    if !(0.0..=1.0).contains(&sigma) {
        return Err(SolverError::invalid(
            "sigma",
            format!("scheme weight must lie in [0, 1], got {sigma}"),
        ));
    }
    Ok(())
}

fn problem_exact_heat(problem: &impl HeatProblem) -> Option<impl Fn(f64, f64) -> f64 + '_> {
    problem
        .exact(0.0, 0.0)
        .map(|_| move |x: f64, t: f64| problem.exact(x, t).unwrap_or(f64::NAN))
}

fn problem_exact_wave(problem: &impl WaveProblem) -> Option<impl Fn(f64, f64) -> f64 + '_> {
    problem
        .exact(0.0, 0.0)
        .map(|_| move |x: f64, t: f64| problem.exact(x, t).unwrap_or(f64::NAN))
}

fn finish_evolution(
    exact: Option<impl Fn(f64, f64) -> f64>,
    y: TimeGrid,
    m: usize,
) -> Result<EvolutionReport, SolverError> {
    let max_error = exact.map(|e| y.max_error_against(e));
    Ok(EvolutionReport {
        grid: y,
        time_steps: m,
        max_error,
    })
}

#[cfg(test)]
mod tests {
    use super::{solve_heat, solve_poisson, solve_two_point_bvp, solve_wave};
    use crate::error::SolverError;
    use crate::mesh::{Mesh, TimeAxis};
    use crate::problems::{CubicBvp, CubicWave, PolynomialHeat, PolynomialPoisson};
    use crate::relaxation::{RelaxationSettings, SweepOrder};
    use crate::traits::WaveProblem;

    fn sor(omega: f64) -> RelaxationSettings {
        RelaxationSettings {
            omega,
            tolerance: 1e-6,
            max_sweeps: 10_000,
        }
    }

    #[test]
    fn bvp_cubic_exact_solution_is_reproduced_to_rounding() {
        // The central stencil is exact for cubics, so the elimination hands
        // back the exact solution independent of N.
        for n in [10, 20, 40] {
            let report = solve_two_point_bvp(&CubicBvp, Mesh::unit(n).unwrap()).unwrap();
            let err = report.max_error.expect("exact solution is known");
            assert!(err < 1e-9, "N={n}: error {err}");
        }
    }

    #[test]
    fn bvp_boundary_values_are_exact() {
        let report = solve_two_point_bvp(&CubicBvp, Mesh::unit(10).unwrap()).unwrap();
        assert_eq!(report.grid.value(0), 3.0);
        assert_eq!(report.grid.value(10), 13.0 / 3.0);
    }

    #[test]
    fn poisson_sor_converges_with_small_interior_error() {
        let mesh = Mesh::unit(10).unwrap();
        let report =
            solve_poisson(&PolynomialPoisson, mesh, SweepOrder::GaussSeidel, sor(1.7)).unwrap();

        assert!(report.outcome.sweeps <= 100, "sweeps {}", report.outcome.sweeps);
        let err = report.max_error.expect("exact solution is known");
        assert!(err < 1e-5, "error {err}");
    }

    #[test]
    fn poisson_over_relaxation_beats_gauss_seidel() {
        let mesh = Mesh::unit(10).unwrap();
        let gs = solve_poisson(&PolynomialPoisson, mesh, SweepOrder::GaussSeidel, sor(1.0))
            .unwrap()
            .outcome;
        let over = solve_poisson(&PolynomialPoisson, mesh, SweepOrder::GaussSeidel, sor(1.5))
            .unwrap()
            .outcome;
        assert!(over.sweeps < gs.sweeps, "{} !< {}", over.sweeps, gs.sweeps);
    }

    #[test]
    fn poisson_boundary_ring_matches_boundary_function() {
        let mesh = Mesh::unit(8).unwrap();
        let report =
            solve_poisson(&PolynomialPoisson, mesh, SweepOrder::GaussSeidel, sor(1.5)).unwrap();
        let n = mesh.steps();
        for k in 0..=n {
            let x = mesh.coord(k);
            assert_eq!(report.grid.value(0, k), 3.0 * 0.0 + x.powi(3) + 0.0 + x + 3.0);
            assert_eq!(report.grid.value(k, 0), 3.0 * x.powi(3) + 3.0 * x + 3.0);
        }
    }

    #[test]
    fn implicit_heat_matches_reference_error_levels() {
        let mesh = Mesh::unit(10).unwrap();

        let coarse = solve_heat(&PolynomialHeat, mesh, TimeAxis::new(1.0, 10).unwrap(), 1.0)
            .unwrap()
            .max_error
            .unwrap();
        assert!((coarse - 0.0386377).abs() < 1e-4, "got {coarse}");

        let fine = solve_heat(&PolynomialHeat, mesh, TimeAxis::new(1.0, 100).unwrap(), 1.0)
            .unwrap()
            .max_error
            .unwrap();
        assert!((fine - 0.0040876).abs() < 1e-4, "got {fine}");
        assert!(fine < coarse);
    }

    #[test]
    fn crank_nicolson_heat_beats_fully_implicit() {
        let mesh = Mesh::unit(10).unwrap();
        let time = TimeAxis::new(1.0, 10).unwrap();
        let implicit = solve_heat(&PolynomialHeat, mesh, time, 1.0).unwrap().max_error.unwrap();
        let weighted = solve_heat(&PolynomialHeat, mesh, time, 0.5).unwrap().max_error.unwrap();
        assert!(weighted < implicit);
    }

    #[test]
    fn explicit_heat_error_halves_with_the_time_step() {
        // τ = h²/2 at N=10, M=200 sits exactly on the stability bound.
        let mesh = Mesh::unit(10).unwrap();
        let coarse = solve_heat(&PolynomialHeat, mesh, TimeAxis::new(1.0, 200).unwrap(), 0.0)
            .unwrap()
            .max_error
            .unwrap();
        let fine = solve_heat(&PolynomialHeat, mesh, TimeAxis::new(1.0, 400).unwrap(), 0.0)
            .unwrap()
            .max_error
            .unwrap();

        assert!((coarse - 1.1203e-3).abs() < 1e-5, "got {coarse}");
        let ratio = coarse / fine;
        assert!((1.8..2.2).contains(&ratio), "first-order ratio was {ratio}");
    }

    #[test]
    fn explicit_wave_converges_at_second_order() {
        let coarse = solve_wave(
            &CubicWave,
            Mesh::unit(10).unwrap(),
            TimeAxis::new(1.0, 10).unwrap(),
            0.0,
        )
        .unwrap()
        .max_error
        .unwrap();
        let fine = solve_wave(
            &CubicWave,
            Mesh::unit(20).unwrap(),
            TimeAxis::new(1.0, 20).unwrap(),
            0.0,
        )
        .unwrap()
        .max_error
        .unwrap();

        assert!((coarse - 1.225e-3).abs() < 1e-5, "got {coarse}");
        assert!((fine - 3.109e-4).abs() < 1e-5, "got {fine}");
        let ratio = coarse / fine;
        assert!(ratio > 3.0, "second-order ratio was {ratio}");
    }

    #[test]
    fn implicit_wave_matches_reference_error_level() {
        let err = solve_wave(
            &CubicWave,
            Mesh::unit(10).unwrap(),
            TimeAxis::new(1.0, 10).unwrap(),
            1.0,
        )
        .unwrap()
        .max_error
        .unwrap();
        assert!((err - 0.0226679).abs() < 1e-4, "got {err}");
    }

    #[test]
    fn wave_boundaries_equal_boundary_functions_on_every_layer() {
        let time = TimeAxis::new(1.0, 10).unwrap();
        let report = solve_wave(&CubicWave, Mesh::unit(10).unwrap(), time, 0.5).unwrap();
        for j in 0..time.layers() {
            let t = time.time(j);
            assert_eq!(report.grid.value(j, 0), CubicWave.left(t));
            assert_eq!(report.grid.value(j, 10), CubicWave.right(t));
        }
    }

    #[test]
    fn identical_inputs_give_bit_identical_grids() {
        let mesh = Mesh::unit(10).unwrap();
        let time = TimeAxis::new(1.0, 10).unwrap();
        let first = solve_wave(&CubicWave, mesh, time, 0.5).unwrap();
        let second = solve_wave(&CubicWave, mesh, time, 0.5).unwrap();
        assert_eq!(first.grid, second.grid);

        let heat_a = solve_heat(&PolynomialHeat, mesh, time, 1.0).unwrap();
        let heat_b = solve_heat(&PolynomialHeat, mesh, time, 1.0).unwrap();
        assert_eq!(heat_a.grid, heat_b.grid);
    }

    #[test]
    fn out_of_range_sigma_is_rejected_at_entry() {
        let mesh = Mesh::unit(10).unwrap();
        let time = TimeAxis::new(1.0, 10).unwrap();
        for sigma in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                solve_heat(&PolynomialHeat, mesh, time, sigma),
                Err(SolverError::InvalidParameter { name: "sigma", .. })
            ));
            assert!(matches!(
                solve_wave(&CubicWave, mesh, time, sigma),
                Err(SolverError::InvalidParameter { name: "sigma", .. })
            ));
        }
    }
}
