use thiserror::Error;

/// Failure modes of the difference solvers.
///
/// Lower-level solvers never retry; the scheme engine surfaces the first
/// failure immediately, since continuing with a corrupted layer would
/// invalidate every subsequent layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// A parameter was rejected at solve entry, before any work was done.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Elimination hit a zero (or numerically negligible) pivot.
    #[error("singular system: pivot {pivot:e} at row {row}{}", step_suffix(.step))]
    SingularSystem {
        row: usize,
        pivot: f64,
        /// Time layer during which the elimination failed, when applicable.
        step: Option<usize>,
    },

    /// Relaxation exceeded its sweep cap (or diverged to non-finite values)
    /// without reaching the requested tolerance.
    #[error("relaxation did not converge after {sweeps} sweeps (max change {max_change:e})")]
    NonConvergence { sweeps: usize, max_change: f64 },
}

fn step_suffix(step: &Option<usize>) -> String {
    match step {
        Some(j) => format!(" (time layer {j})"),
        None => String::new(),
    }
}

impl SolverError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Attaches the failing time-layer index to a `SingularSystem` error.
    /// Other variants pass through unchanged.
    pub fn at_step(self, layer: usize) -> Self {
        match self {
            Self::SingularSystem { row, pivot, .. } => Self::SingularSystem {
                row,
                pivot,
                step: Some(layer),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SolverError;

    #[test]
    fn singular_system_message_names_row_and_layer() {
        let err = SolverError::SingularSystem {
            row: 4,
            pivot: 0.0,
            step: None,
        };
        let message = format!("{err}");
        assert!(message.contains("row 4"), "got \"{message}\"");
        assert!(!message.contains("layer"), "got \"{message}\"");

        let message = format!("{}", err.at_step(7));
        assert!(message.contains("time layer 7"), "got \"{message}\"");
    }

    #[test]
    fn at_step_leaves_other_variants_alone() {
        let err = SolverError::NonConvergence {
            sweeps: 10_000,
            max_change: 1.0,
        };
        assert_eq!(err.clone().at_step(3), err);
    }
}
