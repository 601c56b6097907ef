//! # Slice MCMC
//!
//! A compact Rust library for **coordinate-wise slice sampling** (Neal, 2003): draw a
//! Markov chain from any unnormalized log-density over `R^dim` without tuning a
//! proposal distribution or an acceptance rate.
//!
//! Each move picks a random height under the density at the current point, steps a
//! bracket out along one coordinate until it covers the slice at that height, and then
//! samples uniformly inside the bracket, shrinking it on every miss. Coordinates are
//! visited in order, one move per chain row.
//!
//! You provide:
//! - A target implementing [`LogDensity`](distributions::LogDensity) (any closure
//!   `Fn(&[T], &X) -> T` does), plus an optional `extra` payload of type `X`.
//! - An initial state.
//! - A [`SliceConfig`](config::SliceConfig): step-out width `w`, expansion budget `m`,
//!   and a cap on shrinkage candidates.
//!
//! ## Getting Started
//!
//! ```rust
//! use slice_mcmc::config::SliceConfig;
//! use slice_mcmc::slice_sampler::SliceSampler;
//!
//! // Unnormalized standard normal.
//! let target = |x: &[f64], _: &()| -0.5 * x[0] * x[0];
//!
//! let mut sampler = SliceSampler::new(target, (), &[0.0], SliceConfig::new(1.0, 10))?
//!     .set_seed(42);
//! let run = sampler.run(5_000)?;
//!
//! let mean = run.chain.column(0).mean().unwrap();
//! assert!(mean.abs() < 0.2);
//! println!("{}", run.stats);
//! # Ok::<(), slice_mcmc::error::SliceError>(())
//! ```
//!
//! ## Passing data through `extra`
//!
//! ```rust
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use slice_mcmc::config::SliceConfig;
//! use slice_mcmc::slice_sampler::slice_sample;
//!
//! let observations = vec![4.8, 5.3, 5.1, 4.9];
//! let log_lik = |mu: &[f64], obs: &Vec<f64>| -> f64 {
//!     -0.5 * obs.iter().map(|y| (y - mu[0]).powi(2)).sum::<f64>()
//! };
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let config = SliceConfig::new(1.0, 10);
//! let run = slice_sample(&log_lik, 1, &[0.0], &observations, 2_000, &config, &mut rng)?;
//! assert_eq!(run.likelihoods.len(), 2_000);
//! # Ok::<(), slice_mcmc::error::SliceError>(())
//! ```
//!
//! ## Errors and logging
//!
//! Every fallible call returns [`SliceError`](error::SliceError). NaN densities, runaway
//! shrinkage and invalid parameters abort the run instead of looping or returning a
//! partial chain. Progress and per-run cost summaries go through the [`log`] facade;
//! install any logger to see them.

pub mod config;
pub mod core;
pub mod distributions;
pub mod error;
pub mod random;
pub mod slice;
pub mod slice_sampler;
pub mod stats;
