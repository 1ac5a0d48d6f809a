use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Uniform spatial mesh on [0, length] with `steps` equal intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    length: f64,
    steps: usize,
}

impl Mesh {
    pub fn new(length: f64, steps: usize) -> Result<Self, SolverError> {
        if !(length > 0.0) {
            return Err(SolverError::invalid(
                "length",
                format!("must be positive, got {length}"),
            ));
        }
        if steps == 0 {
            return Err(SolverError::invalid("steps", "must be at least 1"));
        }
        Ok(Self { length, steps })
    }

    /// Mesh on the unit interval [0, 1].
    pub fn unit(steps: usize) -> Result<Self, SolverError> {
        Self::new(1.0, steps)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of nodes, `steps + 1`.
    pub fn points(&self) -> usize {
        self.steps + 1
    }

    /// Spacing h = length / steps.
    pub fn step(&self) -> f64 {
        self.length / self.steps as f64
    }

    /// Coordinate of node `i`, computed as `i·h` so index arithmetic
    /// reproduces h exactly.
    pub fn coord(&self, i: usize) -> f64 {
        i as f64 * self.step()
    }
}

/// Uniform time axis on [0, total] with `steps` layers beyond the initial one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    total: f64,
    steps: usize,
}

impl TimeAxis {
    pub fn new(total: f64, steps: usize) -> Result<Self, SolverError> {
        if !(total > 0.0) {
            return Err(SolverError::invalid(
                "total_time",
                format!("must be positive, got {total}"),
            ));
        }
        if steps == 0 {
            return Err(SolverError::invalid("time_steps", "must be at least 1"));
        }
        Ok(Self { total, steps })
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of time layers, `steps + 1`.
    pub fn layers(&self) -> usize {
        self.steps + 1
    }

    /// Step τ = total / steps.
    pub fn tau(&self) -> f64 {
        self.total / self.steps as f64
    }

    pub fn time(&self, j: usize) -> f64 {
        j as f64 * self.tau()
    }
}

/// Grid function over a 1-D mesh: one scalar per node, zero-initialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFunction {
    mesh: Mesh,
    values: Vec<f64>,
}

impl GridFunction {
    pub fn zeros(mesh: Mesh) -> Self {
        Self {
            values: vec![0.0; mesh.points()],
            mesh,
        }
    }

    pub fn mesh(&self) -> Mesh {
        self.mesh
    }

    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    pub fn set(&mut self, i: usize, v: f64) {
        self.values[i] = v;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Maximum absolute deviation from `exact` over every node.
    pub fn max_error_against(&self, exact: impl Fn(f64) -> f64) -> f64 {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (v - exact(self.mesh.coord(i))).abs())
            .fold(0.0, f64::max)
    }
}

/// Evolution buffer: one row of nodes per time layer, `y[j][i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    mesh: Mesh,
    time: TimeAxis,
    layers: Vec<Vec<f64>>,
}

impl TimeGrid {
    pub fn zeros(mesh: Mesh, time: TimeAxis) -> Self {
        Self {
            layers: vec![vec![0.0; mesh.points()]; time.layers()],
            mesh,
            time,
        }
    }

    pub fn mesh(&self) -> Mesh {
        self.mesh
    }

    pub fn time_axis(&self) -> TimeAxis {
        self.time
    }

    pub fn layer(&self, j: usize) -> &[f64] {
        &self.layers[j]
    }

    pub fn value(&self, j: usize, i: usize) -> f64 {
        self.layers[j][i]
    }

    pub fn set(&mut self, j: usize, i: usize, v: f64) {
        self.layers[j][i] = v;
    }

    /// Writes the initial layer from `initial(x)`.
    pub fn fill_initial(&mut self, initial: impl Fn(f64) -> f64) {
        for i in 0..self.mesh.points() {
            self.layers[0][i] = initial(self.mesh.coord(i));
        }
    }

    /// Writes both spatial boundaries on every layer from `left(t)`/`right(t)`.
    /// Interior updates never touch these nodes again.
    pub fn fill_boundaries(&mut self, left: impl Fn(f64) -> f64, right: impl Fn(f64) -> f64) {
        let n = self.mesh.steps();
        for j in 0..self.time.layers() {
            let t = self.time.time(j);
            self.layers[j][0] = left(t);
            self.layers[j][n] = right(t);
        }
    }

    /// Running maximum of `|exact(x, t) - y|` over all layers and nodes.
    pub fn max_error_against(&self, exact: impl Fn(f64, f64) -> f64) -> f64 {
        let mut max = 0.0f64;
        for (j, layer) in self.layers.iter().enumerate() {
            let t = self.time.time(j);
            for (i, &v) in layer.iter().enumerate() {
                max = max.max((v - exact(self.mesh.coord(i), t)).abs());
            }
        }
        max
    }
}

/// Grid function on the square mesh × mesh, row-major, `u[i][j]` at
/// `(coord(i), coord(j))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid2d {
    mesh: Mesh,
    values: Vec<f64>,
}

impl Grid2d {
    pub fn zeros(mesh: Mesh) -> Self {
        Self {
            values: vec![0.0; mesh.points() * mesh.points()],
            mesh,
        }
    }

    pub fn mesh(&self) -> Mesh {
        self.mesh
    }

    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.mesh.points() + j
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[self.idx(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        let k = self.idx(i, j);
        self.values[k] = v;
    }

    /// Fills the boundary ring from `g(x1, x2)`; interior nodes stay zero.
    pub fn fill_boundary(&mut self, g: impl Fn(f64, f64) -> f64) {
        let n = self.mesh.steps();
        for i in 0..=n {
            for j in 0..=n {
                if i == 0 || i == n || j == 0 || j == n {
                    let v = g(self.mesh.coord(i), self.mesh.coord(j));
                    self.set(i, j, v);
                }
            }
        }
    }

    /// Maximum absolute deviation from `exact` over interior nodes only.
    pub fn interior_max_error(&self, exact: impl Fn(f64, f64) -> f64) -> f64 {
        let n = self.mesh.steps();
        let mut max = 0.0f64;
        for i in 1..n {
            for j in 1..n {
                let e = (self.value(i, j) - exact(self.mesh.coord(i), self.mesh.coord(j))).abs();
                max = max.max(e);
            }
        }
        max
    }
}
