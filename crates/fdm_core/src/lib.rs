//! The `fdm_core` crate solves boundary- and initial-value problems for
//! ordinary and partial differential equations on uniform 1-D and 2-D grids
//! by finite differences.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction) and the problem
//!   definitions (`TwoPointBvp`, `PoissonProblem`, `HeatProblem`,
//!   `WaveProblem`).
//! - **Mesh**: uniform meshes, grid functions and the layered evolution
//!   buffer, with boundary fill and max-error comparison.
//! - **Tridiagonal**: Thomas elimination with explicit singular-pivot
//!   detection.
//! - **Relaxation**: Jacobi / Gauss-Seidel / SOR point relaxation for dense
//!   systems and the five-point Poisson stencil, with a bounded sweep cap.
//! - **Scheme**: assembles the per-step difference equations, dispatches to
//!   the direct or iterative solver, and aggregates the error against a
//!   known exact solution.
//! - **Verify**: refinement ladders for observing convergence orders.

pub mod error;
pub mod mesh;
pub mod problems;
pub mod relaxation;
pub mod scheme;
pub mod traits;
pub mod tridiagonal;
pub mod verify;
