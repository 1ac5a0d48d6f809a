//! Convergence verification helpers: run a scheme over a ladder of grid
//! refinements and report how the max error shrinks between levels.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// One rung of a refinement ladder and the error it achieved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinementLevel {
    pub space_steps: usize,
    pub time_steps: usize,
    pub max_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementStudy {
    pub levels: Vec<RefinementLevel>,
}

impl RefinementStudy {
    /// Successive error ratios `e[k] / e[k+1]`. A scheme of order p on a
    /// halving ladder should show ratios near 2^p.
    pub fn ratios(&self) -> Vec<f64> {
        self.levels
            .windows(2)
            .map(|pair| pair[0].max_error / pair[1].max_error)
            .collect()
    }
}

/// Runs `solve` once per `(N, M)` rung, collecting the max error of each
/// level. The closure returns the solve's max error against the exact
/// solution; a solver failure aborts the study with the rung attached as
/// context.
pub fn refinement_study(
    ladder: &[(usize, usize)],
    mut solve: impl FnMut(usize, usize) -> Result<f64, SolverError>,
) -> Result<RefinementStudy> {
    if ladder.len() < 2 {
        return Err(anyhow!("a refinement study needs at least two levels"));
    }

    let mut levels = Vec::with_capacity(ladder.len());
    for &(n, m) in ladder {
        let max_error =
            solve(n, m).with_context(|| format!("refinement level N={n}, M={m} failed"))?;
        levels.push(RefinementLevel {
            space_steps: n,
            time_steps: m,
            max_error,
        });
    }
    Ok(RefinementStudy { levels })
}
