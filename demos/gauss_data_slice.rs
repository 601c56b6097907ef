//! Posterior of the mean and log standard deviation of normally distributed data,
//! with the observations passed to the log-density through `extra`.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use slice_mcmc::config::{LikelihoodConvention, SliceConfig, DEFAULT_CHAIN_LENGTH};
use slice_mcmc::slice_sampler::slice_sample;

use ndarray::{s, Axis};
use std::error::Error;

/// Flat prior on `mu` and `log_sigma`.
fn log_posterior(theta: &[f64], data: &[f64]) -> f64 {
    let (mu, log_sigma) = (theta[0], theta[1]);
    let sigma2 = (2.0 * log_sigma).exp();
    let sse: f64 = data.iter().map(|y| (y - mu).powi(2)).sum();
    -(data.len() as f64) * log_sigma - 0.5 * sse / sigma2
}

fn main() -> Result<(), Box<dyn Error>> {
    const N_OBS: usize = 200;
    const BURNIN: usize = 200;
    let n_rows = 20 * DEFAULT_CHAIN_LENGTH;

    let mut rng = SmallRng::seed_from_u64(42);
    let normal = Normal::new(3.0, 1.5)?;
    let data: Vec<f64> = normal.sample_iter(&mut rng).take(N_OBS).collect();

    let config = SliceConfig::new(1.0, 10).with_likelihood(LikelihoodConvention::PostMove);
    let run = slice_sample(
        &log_posterior,
        2,
        &[0.0, 0.0],
        data.as_slice(),
        n_rows,
        &config,
        &mut rng,
    )?;

    let kept = run.chain.slice(s![BURNIN.., ..]);
    let mean = kept.mean_axis(Axis(0)).ok_or("empty chain")?;
    println!("Generated {} rows ({})", run.chain.nrows(), run.stats);
    println!(
        "Posterior mean: mu={:.3}, sigma={:.3} (truth: 3.0, 1.5)",
        mean[0],
        mean[1].exp()
    );

    let best = run
        .likelihoods
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    println!("Highest log-posterior visited: {best:.3}");
    Ok(())
}
