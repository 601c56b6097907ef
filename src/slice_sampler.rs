/*!
# Coordinate-wise slice sampler

[`SliceSampler`] owns the current state of a single chain and moves it one coordinate
at a time: [`step_out`] builds a bracket around the slice along the current axis,
[`shrink`] picks the next state inside it, and the axis advances cyclically through
`0..dim`. One pass over every axis is a *sweep*; a run may stop in the middle of one.

[`slice_sample`] is the one-shot form: it validates the inputs, runs `n` rows with the
uniform source you hand it, and returns the whole [`ChainRun`].

## Likelihood trace

By default ([`LikelihoodConvention::PreMove`]) entry `i` of the likelihood trace holds the
log-density of the state *before* the move that produced row `i`, which is the value
the slice height for that move was drawn under. Set
[`LikelihoodConvention::PostMove`] in the config to record the log-density of row `i`
instead. Entry 0 is always the log-density of the starting state.

## Example

```rust
use slice_mcmc::config::SliceConfig;
use slice_mcmc::distributions::IsotropicGaussian;
use slice_mcmc::slice_sampler::SliceSampler;

let target = IsotropicGaussian::new(1.0);
let config = SliceConfig::new(1.0, 10);
let mut sampler = SliceSampler::new(target, (), &[3.0, -3.0], config)?.set_seed(42);

let run = sampler.run(1_000)?;
assert_eq!(run.chain.shape(), &[1_000, 2]);
assert_eq!(run.chain.row(0).to_vec(), vec![3.0, -3.0]);
assert_eq!(run.likelihoods[0], -9.0);
# Ok::<(), slice_mcmc::error::SliceError>(())
```
*/

use indicatif::ProgressBar;
use num_traits::Float;
use rand::rngs::SmallRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::config::{LikelihoodConvention, SliceConfig};
use crate::core::{
    progress_style, run_chain, run_chain_progress, ChainRun, MarkovChain, Trace, Transition,
};
use crate::distributions::LogDensity;
use crate::error::{Phase, SliceError};
use crate::random::UniformSource;
use crate::slice::{evaluate, shrink, step_out};
use crate::stats::SliceStats;

/**
A single slice-sampling chain.

# Type Parameters
- `T`: the floating-point type of the state (`f32` or `f64`).
- `D`: the target, implementing [`LogDensity<T, X>`].
- `X`: the auxiliary payload passed to every density evaluation.
- `R`: the uniform source; a seeded [`SmallRng`] unless injected with
  [`with_rng`](SliceSampler::with_rng).
*/
#[derive(Debug, Clone)]
pub struct SliceSampler<T, D, X = (), R = SmallRng> {
    /// The target distribution we want to sample from.
    pub target: D,
    /// Passed unchanged to every evaluation of `target`.
    pub extra: X,
    pub config: SliceConfig<T>,
    current_state: Vec<T>,
    current_log_density: T,
    /// The coordinate the next move steps along.
    axis: usize,
    seed: Option<u64>,
    rng: R,
    stats: SliceStats,
}

impl<T, D, X> SliceSampler<T, D, X, SmallRng>
where
    T: Float,
    D: LogDensity<T, X>,
{
    /**
    Creates a chain starting at `initial_state`, with an RNG seeded from entropy.

    # Errors

    Fails before any random draw if the configuration is invalid, the state is empty,
    or the log-density at `initial_state` is NaN or infinite.
    */
    pub fn new(
        target: D,
        extra: X,
        initial_state: &[T],
        config: SliceConfig<T>,
    ) -> Result<Self, SliceError> {
        let seed = thread_rng().gen::<u64>();
        let mut sampler = Self::with_rng(
            target,
            extra,
            initial_state,
            config,
            SmallRng::seed_from_u64(seed),
        )?;
        sampler.seed = Some(seed);
        Ok(sampler)
    }

    /// Reseeds the chain's RNG so that runs are reproducible.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
}

impl<T, D, X, R> SliceSampler<T, D, X, R>
where
    T: Float,
    D: LogDensity<T, X>,
{
    /// Creates a chain that draws its uniforms from `rng`.
    pub fn with_rng(
        target: D,
        extra: X,
        initial_state: &[T],
        config: SliceConfig<T>,
        rng: R,
    ) -> Result<Self, SliceError> {
        config.validate()?;
        if initial_state.is_empty() {
            return Err(SliceError::invalid("dim", "state must have at least one coordinate"));
        }

        let current_log_density = evaluate(&target, &extra, initial_state, Phase::Initial)?;
        if current_log_density == T::neg_infinity() {
            return Err(SliceError::invalid(
                "initial_state",
                "log-density is -inf (zero density) at the initial state",
            ));
        }
        if current_log_density.is_infinite() {
            return Err(SliceError::UndefinedSliceHeight {
                value: f64::INFINITY,
            });
        }

        Ok(Self {
            target,
            extra,
            config,
            current_state: initial_state.to_vec(),
            current_log_density,
            axis: 0,
            seed: None,
            rng,
            stats: SliceStats {
                evaluations: 1,
                ..SliceStats::default()
            },
        })
    }

    /// The seed of the internal RNG, if this chain owns a seeded one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn dim(&self) -> usize {
        self.current_state.len()
    }

    /// The axis the next move will step along.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Work done since the chain was created.
    pub fn stats(&self) -> SliceStats {
        self.stats
    }
}

impl<T, D, X, R> SliceSampler<T, D, X, R>
where
    T: Float,
    D: LogDensity<T, X>,
    R: UniformSource<T>,
{
    /**
    Runs the chain for `n` rows. Row 0 is the current state; every further row is one
    coordinate move. Calling `run` again continues where the previous run stopped,
    including the position within the sweep.

    # Errors

    [`SliceError::InvalidParameter`] for `n == 0` or an invalid [`config`](Self::config),
    checked before any draw. Any error of [`step_out`] or [`shrink`] aborts the run and
    discards its rows; the chain then rewinds to the state, axis and stats it had when
    `run` was called. The RNG is not rewound.
    */
    pub fn run(&mut self, n: usize) -> Result<ChainRun<T>, SliceError> {
        self.config.validate()?;
        let before = self.checkpoint();
        log::debug!(
            "slice sampling {n} rows in {} dimensions from axis {}",
            self.dim(),
            self.axis
        );
        match run_chain(self, n) {
            Ok(trace) => Ok(self.finish(trace, &before.stats)),
            Err(err) => {
                self.restore(before);
                Err(err)
            }
        }
    }

    /// Like [`run`](Self::run), showing an [`indicatif`] progress bar.
    pub fn run_progress(&mut self, n: usize) -> Result<ChainRun<T>, SliceError> {
        self.config.validate()?;
        let before = self.checkpoint();
        let pb = ProgressBar::new(n as u64);
        pb.set_style(progress_style());
        pb.set_prefix("Slice");

        let trace = match run_chain_progress(self, n, &pb) {
            Ok(trace) => trace,
            Err(err) => {
                self.restore(before);
                return Err(err);
            }
        };
        let run = self.finish(trace, &before.stats);
        pb.finish_with_message(format!(
            "evals/move={:.2}",
            run.stats.evaluations_per_move()
        ));
        Ok(run)
    }

    fn finish(&self, trace: Trace<T>, before: &SliceStats) -> ChainRun<T> {
        let stats = self.stats.since(before);
        log::debug!("slice sampling finished: {stats}");
        ChainRun {
            chain: trace.chain,
            likelihoods: trace.likelihoods,
            heights: trace.heights,
            convention: self.config.likelihood,
            stats,
        }
    }

    fn checkpoint(&self) -> Checkpoint<T> {
        Checkpoint {
            state: self.current_state.clone(),
            log_density: self.current_log_density,
            axis: self.axis,
            stats: self.stats,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint<T>) {
        log::debug!(
            "slice sampling aborted, rewinding to axis {}",
            checkpoint.axis
        );
        self.current_state = checkpoint.state;
        self.current_log_density = checkpoint.log_density;
        self.axis = checkpoint.axis;
        self.stats = checkpoint.stats;
    }
}

/// Chain position saved at the start of a run.
struct Checkpoint<T> {
    state: Vec<T>,
    log_density: T,
    axis: usize,
    stats: SliceStats,
}

impl<T, D, X, R> MarkovChain<T> for SliceSampler<T, D, X, R>
where
    T: Float,
    D: LogDensity<T, X>,
    R: UniformSource<T>,
{
    /// Steps out and shrinks along the current axis, then advances the axis.
    fn step(&mut self) -> Result<Transition<T>, SliceError> {
        let axis = self.axis;
        let bracket = step_out(
            &self.target,
            &self.extra,
            &self.current_state,
            axis,
            self.config.width,
            self.config.max_expansions,
            &mut self.rng,
        )?;
        let next = shrink(
            &self.target,
            &self.extra,
            &self.current_state,
            &bracket,
            self.config.max_shrink_iters,
            &mut self.rng,
        )?;

        log::trace!(
            "axis {axis}: {} expansions, {} rejections",
            bracket.left_expansions + bracket.right_expansions,
            next.rejections
        );
        self.stats += SliceStats {
            moves: 1,
            evaluations: (bracket.evaluations + next.evaluations) as u64,
            expansions: (bracket.left_expansions + bracket.right_expansions) as u64,
            rejections: next.rejections as u64,
        };

        let likelihood = match self.config.likelihood {
            LikelihoodConvention::PreMove => next.prior_log_density,
            LikelihoodConvention::PostMove => next.log_density,
        };
        self.current_state = next.point;
        self.current_log_density = next.log_density;
        self.axis = (axis + 1) % self.current_state.len();

        Ok(Transition {
            likelihood,
            height: next.height,
        })
    }

    fn current_state(&self) -> &[T] {
        &self.current_state
    }

    fn current_log_density(&self) -> T {
        self.current_log_density
    }
}

/**
Draws a chain of `n` rows from `target`, starting at `x0`.

`dim` must equal `x0.len()`. Width `w`, expansion budget `m`, the shrinkage cap and the
likelihood convention come from `config`. `rng` supplies every uniform draw; pass
`&mut rng` to keep using a generator afterwards.

```rust
use rand::rngs::SmallRng;
use rand::SeedableRng;
use slice_mcmc::config::SliceConfig;
use slice_mcmc::slice_sampler::slice_sample;

let data = vec![1.9, 2.1, 2.0, 2.2];
let log_lik = |mu: &[f64], data: &Vec<f64>| -> f64 {
    -0.5 * data.iter().map(|d| (d - mu[0]).powi(2)).sum::<f64>()
};
let mut rng = SmallRng::seed_from_u64(0);
let run = slice_sample(&log_lik, 1, &[0.0], &data, 500, &SliceConfig::new(1.0, 10), &mut rng)?;
assert_eq!(run.chain.nrows(), 500);
assert_eq!(run.likelihoods[0], log_lik(&[0.0], &data));
# Ok::<(), slice_mcmc::error::SliceError>(())
```
*/
pub fn slice_sample<T, D, X, R>(
    target: &D,
    dim: usize,
    x0: &[T],
    extra: &X,
    n: usize,
    config: &SliceConfig<T>,
    rng: R,
) -> Result<ChainRun<T>, SliceError>
where
    T: Float,
    D: LogDensity<T, X> + ?Sized,
    X: ?Sized,
    R: UniformSource<T>,
{
    if dim == 0 {
        return Err(SliceError::invalid("dim", "must be at least 1"));
    }
    if x0.len() != dim {
        return Err(SliceError::ShapeMismatch {
            expected: dim,
            found: x0.len(),
        });
    }
    if n == 0 {
        return Err(SliceError::invalid("n", "chain length must be at least 1"));
    }
    let mut sampler = SliceSampler::with_rng(
        Evaluator { target, extra },
        (),
        x0,
        *config,
        rng,
    )?;
    sampler.run(n)
}

/// Binds a borrowed target to a borrowed payload so that the sampler can own both.
struct Evaluator<'a, D: ?Sized, X: ?Sized> {
    target: &'a D,
    extra: &'a X,
}

impl<T, D, X> LogDensity<T> for Evaluator<'_, D, X>
where
    D: LogDensity<T, X> + ?Sized,
    X: ?Sized,
{
    fn unnorm_log_prob(&self, theta: &[T], _extra: &()) -> T {
        self.target.unnorm_log_prob(theta, self.extra)
    }
}
