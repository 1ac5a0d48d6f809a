use crate::error::SolverError;
use crate::traits::Scalar;

/// Solves the tridiagonal system with sub-diagonal `a`, main diagonal `b`,
/// super-diagonal `c` and right-hand side `d` by the Thomas algorithm.
///
/// All four slices must have the number-of-unknowns length `n`; `a[0]` and
/// `c[n-1]` are ignored. O(n) time and auxiliary space, pure over its inputs.
///
/// Diagonal dominance is not checked, but every pivot is: a denominator
/// within a numerical-noise threshold of zero aborts with
/// [`SolverError::SingularSystem`] instead of letting NaN/inf propagate
/// through the back-substitution.
pub fn solve_tridiagonal<T: Scalar>(
    a: &[T],
    b: &[T],
    c: &[T],
    d: &[T],
) -> Result<Vec<T>, SolverError> {
    let n = b.len();
    if n == 0 {
        return Err(SolverError::invalid("n", "system must have at least one unknown"));
    }
    if a.len() != n || c.len() != n || d.len() != n {
        return Err(SolverError::invalid(
            "diagonals",
            format!(
                "length mismatch: a={}, b={}, c={}, d={}",
                a.len(),
                n,
                c.len(),
                d.len()
            ),
        ));
    }

    let mut c_prime = vec![T::zero(); n];
    let mut d_prime = vec![T::zero(); n];

    check_pivot(b[0], T::one(), 0)?;
    c_prime[0] = c[0] / b[0];
    d_prime[0] = d[0] / b[0];

    for i in 1..n {
        let coupling = a[i] * c_prime[i - 1];
        let denom = b[i] - coupling;
        check_pivot(denom, b[i].abs().max(coupling.abs()), i)?;
        c_prime[i] = c[i] / denom;
        d_prime[i] = (d[i] - a[i] * d_prime[i - 1]) / denom;
    }

    let mut x = vec![T::zero(); n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }
    Ok(x)
}

fn check_pivot<T: Scalar>(pivot: T, magnitude: T, row: usize) -> Result<(), SolverError> {
    let scale = T::one().max(magnitude);
    if pivot.abs() <= T::epsilon() * scale {
        return Err(SolverError::SingularSystem {
            row,
            pivot: pivot.to_f64().unwrap_or(f64::NAN),
            step: None,
        });
    }
    Ok(())
}
