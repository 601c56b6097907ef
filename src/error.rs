//! Error type shared by every fallible operation in the crate.

use std::fmt;
use thiserror::Error;

/// Errors returned by configuration, validation and sampling.
///
/// Every variant aborts the current run; no partial chain is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliceError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("initial state has length {found}, expected dimension {expected}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("log-density evaluated to NaN during {phase}")]
    DensityEvaluation { phase: Phase },
    #[error("log-density at the current state is {value}; slice height is undefined")]
    UndefinedSliceHeight { value: f64 },
    #[error("shrinkage along axis {axis} found no point inside the slice after {max_iters} candidates")]
    NonConvergence { axis: usize, max_iters: usize },
}

impl SliceError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Where a density evaluation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Evaluating the initial state.
    Initial,
    /// Computing the slice height or probing bracket endpoints.
    StepOut,
    /// Evaluating candidates inside the bracket.
    Shrinkage,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initial => "initial evaluation",
            Phase::StepOut => "step-out",
            Phase::Shrinkage => "shrinkage",
        };
        f.write_str(name)
    }
}
