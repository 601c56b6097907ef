/*!
Defines the [`LogDensity`] capability consumed by the slice sampler, along with a few
reference targets (Gaussians and the Rosenbrock banana) that implement it.

A target maps a state of length `dim` plus an opaque `extra` payload to an unnormalized
log-density. `extra` lets callers thread auxiliary data (observations, hyperparameters)
into every evaluation without global state. Closures of the form `Fn(&[T], &X) -> T`
implement the trait directly.

The log-density may be `-inf` at infeasible points. It must never be NaN: the sampler
reports NaN as [`SliceError::DensityEvaluation`](crate::error::SliceError).

# Examples

```rust
use slice_mcmc::distributions::{IsotropicGaussian, LogDensity};

let gauss = IsotropicGaussian::new(2.0_f64);
let lp = gauss.unnorm_log_prob(&[1.0, -1.0], &());
assert!((lp + 0.25).abs() < 1e-12);

// Observed data passed through `extra`.
let likelihood = |mu: &[f64], data: &Vec<f64>| -> f64 {
    -0.5 * data.iter().map(|d| (d - mu[0]).powi(2)).sum::<f64>()
};
let data = vec![0.9, 1.1];
assert!(likelihood.unnorm_log_prob(&[1.0], &data) > likelihood.unnorm_log_prob(&[0.0], &data));
```
*/

use ndarray::{Array1, Array2};
use num_traits::Float;

/// A (possibly unnormalized) log target density.
///
/// `X` is the type of the auxiliary payload passed unchanged to every evaluation.
pub trait LogDensity<T, X: ?Sized = ()> {
    /// Returns the unnormalized log-density at `theta`.
    fn unnorm_log_prob(&self, theta: &[T], extra: &X) -> T;
}

impl<T, X, F> LogDensity<T, X> for F
where
    X: ?Sized,
    F: Fn(&[T], &X) -> T,
{
    fn unnorm_log_prob(&self, theta: &[T], extra: &X) -> T {
        self(theta, extra)
    }
}

/// A zero-mean isotropic Gaussian with standard deviation `std` in every coordinate.
/// Works in any dimension; ignores `extra`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotropicGaussian<T: Float> {
    pub std: T,
}

impl<T: Float> IsotropicGaussian<T> {
    pub fn new(std: T) -> Self {
        Self { std }
    }
}

impl<T: Float, X: ?Sized> LogDensity<T, X> for IsotropicGaussian<T> {
    fn unnorm_log_prob(&self, theta: &[T], _extra: &X) -> T {
        let sum = theta.iter().fold(T::zero(), |acc, &x| acc + x * x);
        let half = T::one() / (T::one() + T::one());
        -half * sum / (self.std * self.std)
    }
}

/**
A 2D Gaussian parameterized by a mean vector and a 2×2 covariance matrix.

```rust
use slice_mcmc::distributions::{Gaussian2D, LogDensity};
use ndarray::{arr1, arr2};

let gauss = Gaussian2D {
    mean: arr1(&[0.0, 1.0]),
    cov: arr2(&[[4.0, 2.0], [2.0, 3.0]]),
};
assert_eq!(gauss.unnorm_log_prob(&[0.0, 1.0], &()), 0.0);
```
*/
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian2D<T: Float> {
    pub mean: Array1<T>,
    pub cov: Array2<T>,
}

impl<T: Float, X: ?Sized> LogDensity<T, X> for Gaussian2D<T> {
    fn unnorm_log_prob(&self, theta: &[T], _extra: &X) -> T {
        let (a, b, c, d) = (
            self.cov[[0, 0]],
            self.cov[[0, 1]],
            self.cov[[1, 0]],
            self.cov[[1, 1]],
        );
        let det = a * d - b * c;
        let dx = theta[0] - self.mean[0];
        let dy = theta[1] - self.mean[1];
        // Quadratic form with the closed-form 2×2 inverse.
        let quad = (d * dx * dx - (b + c) * dx * dy + a * dy * dy) / det;
        let half = T::one() / (T::one() + T::one());
        -half * quad
    }
}

/// The 2D Rosenbrock "banana" density, `-( (a - x)² + b (y - x²)² )`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rosenbrock2D<T: Float> {
    pub a: T,
    pub b: T,
}

impl<T: Float, X: ?Sized> LogDensity<T, X> for Rosenbrock2D<T> {
    fn unnorm_log_prob(&self, theta: &[T], _extra: &X) -> T {
        let (x, y) = (theta[0], theta[1]);
        let term_1 = (self.a - x) * (self.a - x);
        let term_2 = self.b * (y - x * x) * (y - x * x);
        -(term_1 + term_2)
    }
}
