//! Tuning parameters for the slice sampler.

use num_traits::Float;

use crate::error::SliceError;

/// Chain length used by the demos when none is given.
pub const DEFAULT_CHAIN_LENGTH: usize = 1_000;
/// Default maximum number of bracket expansions `m`.
pub const DEFAULT_MAX_EXPANSIONS: usize = 10;
/// Default cap on rejected shrinkage candidates per move.
pub const DEFAULT_MAX_SHRINK_ITERS: usize = 1_000;

/// Which log-density the likelihood trace stores for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikelihoodConvention {
    /// Entry `i` holds the log-density of the state *before* the move that produced
    /// row `i`, i.e. the value the slice height was drawn under.
    #[default]
    PreMove,
    /// Entry `i` holds the log-density of row `i` itself.
    PostMove,
}

/**
Configuration of a slice-sampling run.

```rust
use slice_mcmc::config::{LikelihoodConvention, SliceConfig};

let config = SliceConfig::new(1.0, 10)
    .with_max_shrink_iters(200)
    .with_likelihood(LikelihoodConvention::PostMove);
assert!(config.validate().is_ok());
assert!(SliceConfig::new(0.0, 10).validate().is_err());
```
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceConfig<T> {
    /// Step-out width `w`.
    pub width: T,
    /// Total expansion budget `m`, split randomly between the two sides.
    /// Zero disables stepping out.
    pub max_expansions: usize,
    /// Number of rejected candidates after which shrinkage gives up.
    pub max_shrink_iters: usize,
    /// Content of the likelihood trace.
    pub likelihood: LikelihoodConvention,
}

impl<T: Float> SliceConfig<T> {
    pub fn new(width: T, max_expansions: usize) -> Self {
        Self {
            width,
            max_expansions,
            max_shrink_iters: DEFAULT_MAX_SHRINK_ITERS,
            likelihood: LikelihoodConvention::default(),
        }
    }

    pub fn with_max_shrink_iters(mut self, max_shrink_iters: usize) -> Self {
        self.max_shrink_iters = max_shrink_iters;
        self
    }

    pub fn with_likelihood(mut self, likelihood: LikelihoodConvention) -> Self {
        self.likelihood = likelihood;
        self
    }

    /// Checks the parameters without touching any random source.
    pub fn validate(&self) -> Result<(), SliceError> {
        if !(self.width.is_finite() && self.width > T::zero()) {
            return Err(SliceError::invalid(
                "width",
                format!(
                    "must be finite and positive, got {}",
                    self.width.to_f64().unwrap_or(f64::NAN)
                ),
            ));
        }
        if self.max_shrink_iters == 0 {
            return Err(SliceError::invalid(
                "max_shrink_iters",
                "must allow at least one candidate",
            ));
        }
        Ok(())
    }
}

impl<T: Float> Default for SliceConfig<T> {
    fn default() -> Self {
        let half = T::one() / (T::one() + T::one());
        Self::new(half, DEFAULT_MAX_EXPANSIONS)
    }
}
