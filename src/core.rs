//! The chain abstraction and the generic loops that drive a chain into a [`ChainRun`].

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array1, Array2, ArrayView1};
use num_traits::Float;

use crate::config::LikelihoodConvention;
use crate::error::SliceError;
use crate::stats::SliceStats;

const UPDATE_INTERVAL: Duration = Duration::from_millis(500);

/// What a single move records besides the new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    /// The likelihood-trace entry for the new row.
    pub likelihood: T,
    /// The slice height the new state was accepted under.
    pub height: T,
}

pub trait MarkovChain<T> {
    /// Performs one move, leaving the new state in [`current_state`](Self::current_state).
    fn step(&mut self) -> Result<Transition<T>, SliceError>;

    fn current_state(&self) -> &[T];

    /// Log-density of the current state.
    fn current_log_density(&self) -> T;
}

/// The output of a run: `n` rows of the chain and the traces aligned with them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRun<T> {
    /// Shape `(n, dim)`; row 0 is the state the run started from.
    pub chain: Array2<T>,
    /// Entry 0 is the log-density of row 0; later entries follow `convention`.
    pub likelihoods: Array1<T>,
    /// Entry `i > 0` is the slice height row `i` was accepted under; entry 0 is `-inf`.
    pub heights: Array1<T>,
    pub convention: LikelihoodConvention,
    /// Work done during this run.
    pub stats: SliceStats,
}

/// Traces filled by [`run_chain`] before the caller attaches stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<T> {
    pub chain: Array2<T>,
    pub likelihoods: Array1<T>,
    pub heights: Array1<T>,
}

/// Runs `chain` until `n_rows` rows are filled, row 0 being its current state.
pub fn run_chain<T, M>(chain: &mut M, n_rows: usize) -> Result<Trace<T>, SliceError>
where
    T: Float,
    M: MarkovChain<T> + ?Sized,
{
    let mut trace = start_trace(chain, n_rows)?;
    for i in 1..n_rows {
        record(chain, &mut trace, i)?;
    }
    Ok(trace)
}

/// Same as [`run_chain`], reporting progress on `pb`.
pub fn run_chain_progress<T, M>(
    chain: &mut M,
    n_rows: usize,
    pb: &ProgressBar,
) -> Result<Trace<T>, SliceError>
where
    T: Float,
    M: MarkovChain<T> + ?Sized,
{
    let mut trace = start_trace(chain, n_rows)?;
    let mut last_update = Instant::now();
    pb.set_length(n_rows as u64);
    pb.set_position(1);

    for i in 1..n_rows {
        if let Err(err) = record(chain, &mut trace, i) {
            pb.abandon_with_message(format!("failed at row {i}"));
            return Err(err);
        }
        if last_update.elapsed() >= UPDATE_INTERVAL || i + 1 == n_rows {
            pb.set_position(i as u64 + 1);
            last_update = Instant::now();
        }
    }
    Ok(trace)
}

pub(crate) fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

fn start_trace<T, M>(chain: &M, n_rows: usize) -> Result<Trace<T>, SliceError>
where
    T: Float,
    M: MarkovChain<T> + ?Sized,
{
    if n_rows == 0 {
        return Err(SliceError::invalid("n", "chain length must be at least 1"));
    }
    let dim = chain.current_state().len();
    let mut chain_rows = Array2::<T>::zeros((n_rows, dim));
    chain_rows
        .row_mut(0)
        .assign(&ArrayView1::from(chain.current_state()));

    let mut likelihoods = Array1::<T>::zeros(n_rows);
    likelihoods[0] = chain.current_log_density();
    let mut heights = Array1::<T>::zeros(n_rows);
    heights[0] = T::neg_infinity();

    Ok(Trace {
        chain: chain_rows,
        likelihoods,
        heights,
    })
}

fn record<T, M>(chain: &mut M, trace: &mut Trace<T>, i: usize) -> Result<(), SliceError>
where
    T: Float,
    M: MarkovChain<T> + ?Sized,
{
    let transition = chain.step()?;
    trace
        .chain
        .row_mut(i)
        .assign(&ArrayView1::from(chain.current_state()));
    trace.likelihoods[i] = transition.likelihood;
    trace.heights[i] = transition.height;
    Ok(())
}
