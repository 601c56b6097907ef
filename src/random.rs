//! The uniform random source consumed by the step-out and shrinkage procedures.
//!
//! Randomness is always passed in explicitly. Any [`rand::Rng`] works out of the box,
//! so a seeded [`rand::rngs::SmallRng`] gives reproducible chains:
//!
//! ```rust
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use slice_mcmc::random::UniformSource;
//!
//! let mut a = SmallRng::seed_from_u64(7);
//! let mut b = SmallRng::seed_from_u64(7);
//! let u: f64 = a.next_uniform();
//! assert!((0.0..1.0).contains(&u));
//! assert_eq!(u, UniformSource::<f64>::next_uniform(&mut b));
//! ```

use rand::Rng;
use rand_distr::{Distribution, Standard};

/// A source of independent draws from Uniform(0, 1).
pub trait UniformSource<T> {
    /// Returns the next draw, in `[0, 1)`.
    fn next_uniform(&mut self) -> T;
}

impl<T, R> UniformSource<T> for R
where
    R: Rng + ?Sized,
    Standard: Distribution<T>,
{
    fn next_uniform(&mut self) -> T {
        self.sample(Standard)
    }
}
