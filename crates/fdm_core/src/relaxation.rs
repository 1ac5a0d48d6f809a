use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::mesh::Grid2d;

/// Which values a sweep reads for indices below the one being updated.
///
/// `Jacobi` reads only the previous full iterate; `GaussSeidel` reads values
/// already updated within the same sweep (row-major, lowest index first).
/// Successive over-relaxation is `GaussSeidel` with `omega != 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepOrder {
    Jacobi,
    GaussSeidel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelaxationSettings {
    /// Relaxation parameter ω; 1.0 reduces SOR to plain Gauss-Seidel.
    pub omega: f64,
    /// Convergence threshold on the maximum pointwise change per sweep.
    pub tolerance: f64,
    /// Sweep cap bounding runaway non-convergence.
    pub max_sweeps: usize,
}

impl Default for RelaxationSettings {
    fn default() -> Self {
        Self {
            omega: 1.0,
            tolerance: 1e-6,
            max_sweeps: 10_000,
        }
    }
}

impl RelaxationSettings {
    pub(crate) fn validate(&self) -> Result<(), SolverError> {
        if !(self.omega > 0.0) {
            return Err(SolverError::invalid(
                "omega",
                format!("must be positive, got {}", self.omega),
            ));
        }
        if !(self.tolerance > 0.0) {
            return Err(SolverError::invalid(
                "tolerance",
                format!("must be positive, got {}", self.tolerance),
            ));
        }
        if self.max_sweeps == 0 {
            return Err(SolverError::invalid("max_sweeps", "must be at least 1"));
        }
        Ok(())
    }
}

/// How a relaxation run ended: sweeps actually used and the max pointwise
/// change achieved on the last sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelaxationOutcome {
    pub sweeps: usize,
    pub max_change: f64,
}

/// Point relaxation on a dense linear system `A·x = b` in row-wise residual
/// form: `x_i ← (b_i − Σ_{j≠i} A_ij·x_j) / A_ii`, blended with the prior
/// value via ω.
///
/// Returns the converged iterate together with the sweep count. A zero
/// diagonal entry is a singular pivot; exceeding `max_sweeps` or producing a
/// non-finite iterate reports [`SolverError::NonConvergence`] carrying the
/// last achieved max-change, never a silently unconverged result.
pub fn relax_dense(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    x0: &DVector<f64>,
    order: SweepOrder,
    settings: RelaxationSettings,
) -> Result<(DVector<f64>, RelaxationOutcome), SolverError> {
    settings.validate()?;
    let n = a.nrows();
    if a.ncols() != n || b.len() != n || x0.len() != n {
        return Err(SolverError::invalid(
            "system",
            format!(
                "shape mismatch: A is {}x{}, b has {}, x0 has {}",
                a.nrows(),
                a.ncols(),
                b.len(),
                x0.len()
            ),
        ));
    }
    for i in 0..n {
        let pivot = a[(i, i)];
        if pivot.abs() <= f64::EPSILON {
            return Err(SolverError::SingularSystem {
                row: i,
                pivot,
                step: None,
            });
        }
    }

    let mut x = x0.clone();
    let mut max_change = f64::INFINITY;

    for sweep in 1..=settings.max_sweeps {
        let mut next = x.clone();
        max_change = 0.0;

        for i in 0..n {
            let mut sum = b[i];
            for j in 0..n {
                if j == i {
                    continue;
                }
                let read = match order {
                    SweepOrder::GaussSeidel if j < i => next[j],
                    _ => x[j],
                };
                sum -= a[(i, j)] * read;
            }
            let candidate = sum / a[(i, i)];
            let updated = (1.0 - settings.omega) * x[i] + settings.omega * candidate;
            // A diverged iterate must not be mistaken for convergence:
            // NaN diffs would be ignored by the running max below.
            if !updated.is_finite() {
                return Err(SolverError::NonConvergence {
                    sweeps: sweep,
                    max_change: f64::INFINITY,
                });
            }
            max_change = max_change.max((updated - x[i]).abs());
            next[i] = updated;
        }

        x = next;
        if max_change < settings.tolerance {
            return Ok((
                x,
                RelaxationOutcome {
                    sweeps: sweep,
                    max_change,
                },
            ));
        }
    }

    Err(SolverError::NonConvergence {
        sweeps: settings.max_sweeps,
        max_change,
    })
}

/// Point relaxation of the five-point Laplacian stencil on a 2-D grid whose
/// boundary ring is already filled:
///
///   `u_ij ← (u_W + u_E + u_S + u_N + h²·f_ij) / 4`
///
/// blended with the prior value via ω. Only interior nodes are updated; the
/// boundary ring is never touched.
pub fn relax_poisson(
    grid: &mut Grid2d,
    source: impl Fn(f64, f64) -> f64,
    order: SweepOrder,
    settings: RelaxationSettings,
) -> Result<RelaxationOutcome, SolverError> {
    settings.validate()?;
    let mesh = grid.mesh();
    let n = mesh.steps();
    let h2 = mesh.step() * mesh.step();
    let mut max_change = f64::INFINITY;

    for sweep in 1..=settings.max_sweeps {
        // Jacobi reads the frozen previous iterate for every neighbor.
        let previous = match order {
            SweepOrder::Jacobi => Some(grid.clone()),
            SweepOrder::GaussSeidel => None,
        };
        let read = |g: &Grid2d, i: usize, j: usize| match &previous {
            Some(prev) => prev.value(i, j),
            None => g.value(i, j),
        };

        max_change = 0.0;
        for i in 1..n {
            for j in 1..n {
                let old = grid.value(i, j);
                let stencil = read(grid, i - 1, j)
                    + read(grid, i + 1, j)
                    + read(grid, i, j - 1)
                    + read(grid, i, j + 1)
                    + h2 * source(mesh.coord(i), mesh.coord(j));
                let candidate = stencil / 4.0;
                let updated = (1.0 - settings.omega) * old + settings.omega * candidate;
                if !updated.is_finite() {
                    return Err(SolverError::NonConvergence {
                        sweeps: sweep,
                        max_change: f64::INFINITY,
                    });
                }
                grid.set(i, j, updated);
                max_change = max_change.max((updated - old).abs());
            }
        }

        if max_change < settings.tolerance {
            return Ok(RelaxationOutcome {
                sweeps: sweep,
                max_change,
            });
        }
    }

    Err(SolverError::NonConvergence {
        sweeps: settings.max_sweeps,
        max_change,
    })
}
