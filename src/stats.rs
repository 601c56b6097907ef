//! Cost counters accumulated while a slice-sampling chain runs.

use std::fmt;
use std::ops::AddAssign;

/// How much work the sampler did. These count density evaluations and bracket
/// operations; they say nothing about mixing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceStats {
    /// Completed coordinate moves.
    pub moves: u64,
    /// Log-density evaluations, including slice heights and the initial state.
    pub evaluations: u64,
    /// Bracket expansions during step-out, both sides combined.
    pub expansions: u64,
    /// Shrinkage candidates that fell outside the slice.
    pub rejections: u64,
}

impl SliceStats {
    pub fn evaluations_per_move(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.evaluations as f64 / self.moves as f64
        }
    }

    /// Counters accumulated since `earlier` was recorded.
    pub fn since(&self, earlier: &SliceStats) -> SliceStats {
        SliceStats {
            moves: self.moves - earlier.moves,
            evaluations: self.evaluations - earlier.evaluations,
            expansions: self.expansions - earlier.expansions,
            rejections: self.rejections - earlier.rejections,
        }
    }
}

impl AddAssign for SliceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.moves += rhs.moves;
        self.evaluations += rhs.evaluations;
        self.expansions += rhs.expansions;
        self.rejections += rhs.rejections;
    }
}

impl fmt::Display for SliceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moves={} evals={} evals/move={:.2} expansions={} rejections={}",
            self.moves,
            self.evaluations,
            self.evaluations_per_move(),
            self.expansions,
            self.rejections
        )
    }
}
