/*!
# Stepping out and shrinkage along one coordinate

The two procedures of Neal's univariate slice sampler (Neal, "Slice Sampling",
Annals of Statistics 31, 2003), applied along a single coordinate axis of a
D-dimensional state:

1. [`step_out`] draws a slice height `y = log f(x0) + ln U` and places a bracket of
   width `w` at a random offset around `x0`, then widens it by `w` at a time while the
   endpoints are still inside the slice, spending at most `m - 1` expansions split
   randomly between the two sides.
2. [`shrink`] draws uniformly inside the bracket until it hits a point whose
   log-density exceeds `y`, pulling the rejected side in to each miss.

Every probe is a fresh copy of `x0` with only the stepped coordinate replaced, so the
bracket is stored as two scalars along that axis.

```rust
use rand::rngs::SmallRng;
use rand::SeedableRng;
use slice_mcmc::distributions::IsotropicGaussian;
use slice_mcmc::slice::{shrink, step_out};

let target = IsotropicGaussian::new(1.0);
let mut rng = SmallRng::seed_from_u64(3);
let x0 = [0.2, -0.4];

let bracket = step_out(&target, &(), &x0, 1, 1.0, 10, &mut rng)?;
assert!(bracket.contains(x0[1]));

let next = shrink(&target, &(), &x0, &bracket, 1_000, &mut rng)?;
assert_eq!(next.point[0], x0[0]);
assert!(next.log_density > bracket.height);
# Ok::<(), slice_mcmc::error::SliceError>(())
```
*/

use num_traits::Float;

use crate::distributions::LogDensity;
use crate::error::{Phase, SliceError};
use crate::random::UniformSource;

/// An interval along one axis that brackets the slice around the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<T> {
    /// The coordinate being stepped.
    pub axis: usize,
    /// Lower endpoint along `axis`.
    pub left: T,
    /// Upper endpoint along `axis`.
    pub right: T,
    /// Slice height `y` (log scale).
    pub height: T,
    /// Log-density of the state the bracket was built around.
    pub log_density: T,
    pub left_expansions: usize,
    pub right_expansions: usize,
    /// Log-density evaluations spent building the bracket.
    pub evaluations: usize,
}

impl<T: Float> Bracket<T> {
    pub fn width(&self) -> T {
        self.right - self.left
    }

    pub fn contains(&self, value: T) -> bool {
        self.left <= value && value <= self.right
    }

    /// The full left endpoint vector `L`.
    pub fn left_point(&self, x0: &[T]) -> Vec<T> {
        with_coordinate(x0, self.axis, self.left)
    }

    /// The full right endpoint vector `R`.
    pub fn right_point(&self, x0: &[T]) -> Vec<T> {
        with_coordinate(x0, self.axis, self.right)
    }
}

/// The outcome of a successful shrinkage: the next state of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceMove<T> {
    pub point: Vec<T>,
    /// Log-density at `point`; strictly above `height`.
    pub log_density: T,
    /// The slice height the point was accepted under.
    pub height: T,
    /// Log-density of the state before the move.
    pub prior_log_density: T,
    /// Candidates rejected before `point` was found.
    pub rejections: usize,
    pub evaluations: usize,
}

/**
Draws a slice height under `x0` and builds a bracket around it along `axis`.

Consumes three uniforms in order: the height, the bracket offset, and the split of
the expansion budget. The left side may expand `J = floor(m V)` times and the right
side `K = m - 1 - J` times; `m = 0` leaves the initial bracket of width `width`.

# Errors

- [`SliceError::InvalidParameter`] if `axis` is out of range or `width` is not finite
  and positive.
- [`SliceError::DensityEvaluation`] if any evaluation returns NaN.
- [`SliceError::UndefinedSliceHeight`] if the log-density at `x0` is infinite.
*/
pub fn step_out<T, D, X, R>(
    target: &D,
    extra: &X,
    x0: &[T],
    axis: usize,
    width: T,
    max_expansions: usize,
    rng: &mut R,
) -> Result<Bracket<T>, SliceError>
where
    T: Float,
    D: LogDensity<T, X> + ?Sized,
    X: ?Sized,
    R: UniformSource<T> + ?Sized,
{
    check_axis(x0, axis)?;
    if !(width.is_finite() && width > T::zero()) {
        return Err(SliceError::invalid(
            "width",
            format!(
                "must be finite and positive, got {}",
                width.to_f64().unwrap_or(f64::NAN)
            ),
        ));
    }

    let log_density = evaluate(target, extra, x0, Phase::StepOut)?;
    if !log_density.is_finite() {
        return Err(SliceError::UndefinedSliceHeight {
            value: log_density.to_f64().unwrap_or(f64::NAN),
        });
    }
    let mut evaluations = 1;
    let height = log_density + rng.next_uniform().ln();

    let mut left = x0[axis] - width * rng.next_uniform();
    let mut right = left + width;

    let budget = T::from(max_expansions).unwrap_or_else(T::max_value);
    let last = max_expansions.saturating_sub(1);
    let mut j = (budget * rng.next_uniform())
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(last);
    let mut k = last - j;

    let mut left_expansions = 0;
    while j > 0 {
        evaluations += 1;
        let probe = with_coordinate(x0, axis, left);
        if height >= evaluate(target, extra, &probe, Phase::StepOut)? {
            break;
        }
        left = left - width;
        left_expansions += 1;
        j -= 1;
    }

    let mut right_expansions = 0;
    while k > 0 {
        evaluations += 1;
        let probe = with_coordinate(x0, axis, right);
        if height >= evaluate(target, extra, &probe, Phase::StepOut)? {
            break;
        }
        right = right + width;
        right_expansions += 1;
        k -= 1;
    }

    Ok(Bracket {
        axis,
        left,
        right,
        height,
        log_density,
        left_expansions,
        right_expansions,
        evaluations,
    })
}

/**
Samples the next state uniformly from the part of `bracket` that lies in the slice.

Each candidate below the slice height replaces the bracket endpoint on its side of
`x0`. At most `max_iters` candidates are drawn, one uniform each.

# Errors

- [`SliceError::NonConvergence`] after `max_iters` rejected candidates.
- [`SliceError::DensityEvaluation`] if a candidate evaluates to NaN.
- [`SliceError::InvalidParameter`] if the bracket axis is out of range for `x0`.
*/
pub fn shrink<T, D, X, R>(
    target: &D,
    extra: &X,
    x0: &[T],
    bracket: &Bracket<T>,
    max_iters: usize,
    rng: &mut R,
) -> Result<SliceMove<T>, SliceError>
where
    T: Float,
    D: LogDensity<T, X> + ?Sized,
    X: ?Sized,
    R: UniformSource<T> + ?Sized,
{
    let axis = bracket.axis;
    check_axis(x0, axis)?;

    let origin = x0[axis];
    let (mut left, mut right) = (bracket.left, bracket.right);

    for rejections in 0..max_iters {
        let candidate = left + rng.next_uniform() * (right - left);
        let point = with_coordinate(x0, axis, candidate);
        let log_density = evaluate(target, extra, &point, Phase::Shrinkage)?;
        if bracket.height < log_density {
            return Ok(SliceMove {
                point,
                log_density,
                height: bracket.height,
                prior_log_density: bracket.log_density,
                rejections,
                evaluations: rejections + 1,
            });
        }
        if candidate < origin {
            left = candidate;
        } else {
            right = candidate;
        }
    }

    log::warn!(
        "shrinkage along axis {axis} gave up after {max_iters} candidates; \
         bracket narrowed to [{:?}, {:?}]",
        left.to_f64(),
        right.to_f64()
    );
    Err(SliceError::NonConvergence { axis, max_iters })
}

/// Evaluates the target, turning NaN into an error.
pub(crate) fn evaluate<T, D, X>(
    target: &D,
    extra: &X,
    point: &[T],
    phase: Phase,
) -> Result<T, SliceError>
where
    T: Float,
    D: LogDensity<T, X> + ?Sized,
    X: ?Sized,
{
    let value = target.unnorm_log_prob(point, extra);
    if value.is_nan() {
        log::warn!("log-density returned NaN during {phase}");
        return Err(SliceError::DensityEvaluation { phase });
    }
    Ok(value)
}

fn with_coordinate<T: Copy>(x0: &[T], axis: usize, value: T) -> Vec<T> {
    let mut point = x0.to_vec();
    point[axis] = value;
    point
}

fn check_axis<T>(x0: &[T], axis: usize) -> Result<(), SliceError> {
    if axis >= x0.len() {
        return Err(SliceError::invalid(
            "axis",
            format!("{axis} is out of range for a state of length {}", x0.len()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::IsotropicGaussian;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Replays a fixed list of uniforms.
    struct Scripted {
        draws: Vec<f64>,
        next: usize,
    }

    impl Scripted {
        fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl UniformSource<f64> for Scripted {
        fn next_uniform(&mut self) -> f64 {
            let u = self.draws[self.next];
            self.next += 1;
            u
        }
    }

    fn std_normal(x: &[f64], _: &()) -> f64 {
        -0.5 * x[0] * x[0]
    }

    // With y = -0.5 the slice of the standard normal is (-1, 1). Starting from
    // [-0.125, 0.125] with w = 0.25 and J = 5, K = 4, both sides stop at +-1.125
    // after four expansions each.
    fn scripted_bracket(rng: &mut Scripted) -> Bracket<f64> {
        step_out(&std_normal, &(), &[0.0], 0, 0.25, 10, rng).unwrap()
    }

    #[test]
    fn step_out_matches_hand_derivation() {
        let mut rng = Scripted::new(&[(-0.5f64).exp(), 0.5, 0.5]);
        let bracket = scripted_bracket(&mut rng);

        assert!((bracket.height + 0.5).abs() < 1e-12);
        assert_eq!(bracket.log_density, 0.0);
        assert_eq!(bracket.left, -1.125);
        assert_eq!(bracket.right, 1.125);
        assert_eq!(bracket.left_expansions, 4);
        assert_eq!(bracket.right_expansions, 4);
        // y0, five probes on the left, four on the right
        assert_eq!(bracket.evaluations, 10);
        assert_eq!(rng.next, 3);
        assert_eq!(bracket.left_point(&[0.0]), vec![-1.125]);
        assert_eq!(bracket.right_point(&[0.0]), vec![1.125]);
    }

    #[test]
    fn step_out_without_budget_keeps_initial_width() {
        let mut rng = SmallRng::seed_from_u64(42);
        let x0 = [0.3, -2.0, 1.5];
        for axis in 0..3 {
            let bracket = step_out(
                &IsotropicGaussian::new(1.0),
                &(),
                &x0,
                axis,
                0.7,
                0,
                &mut rng,
            )
            .unwrap();
            assert!((bracket.width() - 0.7).abs() < 1e-12);
            assert_eq!(bracket.left_expansions + bracket.right_expansions, 0);
            assert_eq!(bracket.evaluations, 1);
            assert!(bracket.contains(x0[axis]));
        }
    }

    #[test]
    fn bracket_contains_start_and_respects_budget() {
        let target = IsotropicGaussian::new(2.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let width = 0.3;
        let budget = 6;
        for i in 0..2_000 {
            let x0 = [(i as f64 / 200.0) - 5.0, 0.5];
            let axis = i % 2;
            let bracket = step_out(&target, &(), &x0, axis, width, budget, &mut rng).unwrap();
            let used = bracket.left_expansions + bracket.right_expansions;

            assert!(bracket.contains(x0[axis]), "bracket {bracket:?} misses {x0:?}");
            assert!(used < budget);
            let expected = (used + 1) as f64 * width;
            assert!(
                (bracket.width() - expected).abs() < 1e-9,
                "width {} != {expected}",
                bracket.width()
            );
            assert!(bracket.height < bracket.log_density);
        }
    }

    #[test]
    fn step_out_reports_nan_density() {
        let spiky = |x: &[f64], _: &()| if x[0] == 0.0 { 0.0 } else { f64::NAN };
        let mut rng = Scripted::new(&[0.5, 0.5, 0.5]);
        let err = step_out(&spiky, &(), &[0.0], 0, 1.0, 10, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SliceError::DensityEvaluation {
                phase: Phase::StepOut
            }
        );
    }

    #[test]
    fn step_out_rejects_zero_density_start() {
        let mut rng = SmallRng::seed_from_u64(0);
        let half_line = |x: &[f64], _: &()| if x[0] > 0.0 { 0.0 } else { f64::NEG_INFINITY };
        let err = step_out(&half_line, &(), &[-1.0], 0, 1.0, 10, &mut rng).unwrap_err();
        assert!(matches!(err, SliceError::UndefinedSliceHeight { value } if value == f64::NEG_INFINITY));
    }

    #[test]
    fn step_out_rejects_bad_axis() {
        let mut rng = SmallRng::seed_from_u64(0);
        let err = step_out(&std_normal, &(), &[0.0], 1, 1.0, 10, &mut rng).unwrap_err();
        assert!(matches!(err, SliceError::InvalidParameter { name: "axis", .. }));
    }

    #[test]
    fn step_out_rejects_bad_width_before_drawing() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut rng = Scripted::new(&[]);
            let err = step_out(&std_normal, &(), &[0.0], 0, width, 10, &mut rng).unwrap_err();
            assert!(matches!(err, SliceError::InvalidParameter { name: "width", .. }));
            assert_eq!(rng.next, 0);
        }
    }

    #[test]
    fn shrink_matches_hand_derivation() {
        // Candidate 1: -1.125 + 0.95 * 2.25 = 1.0125, outside the slice, right side
        // pulled in. Candidate 2: -1.125 + 0.1 * 2.1375 = -0.91125, accepted.
        let mut rng = Scripted::new(&[(-0.5f64).exp(), 0.5, 0.5, 0.95, 0.1]);
        let bracket = scripted_bracket(&mut rng);
        let next = shrink(&std_normal, &(), &[0.0], &bracket, 100, &mut rng).unwrap();

        assert!((next.point[0] + 0.91125).abs() < 1e-12, "got {:?}", next.point);
        assert_eq!(next.rejections, 1);
        assert_eq!(next.evaluations, 2);
        assert_eq!(next.prior_log_density, 0.0);
        assert_eq!(next.height, bracket.height);
        assert!(next.log_density > next.height);
    }

    #[test]
    fn shrink_only_moves_the_stepped_axis() {
        let target = IsotropicGaussian::new(1.0);
        let mut rng = SmallRng::seed_from_u64(11);
        let x0 = [1.0, -1.0, 0.25];
        for axis in 0..3 {
            let bracket = step_out(&target, &(), &x0, axis, 1.0, 10, &mut rng).unwrap();
            let next = shrink(&target, &(), &x0, &bracket, 1_000, &mut rng).unwrap();
            for (d, (&new, &old)) in next.point.iter().zip(x0.iter()).enumerate() {
                if d != axis {
                    assert_eq!(new, old);
                }
            }
            assert!(bracket.contains(next.point[axis]));
            assert!(next.log_density > bracket.height);
        }
    }

    #[test]
    fn shrink_gives_up_after_cap() {
        let needle = |x: &[f64], _: &()| if x[0] == 0.0 { 0.0 } else { f64::NEG_INFINITY };
        let mut rng = SmallRng::seed_from_u64(5);
        let bracket = step_out(&needle, &(), &[0.0], 0, 1.0, 10, &mut rng).unwrap();
        assert_eq!(bracket.left_expansions + bracket.right_expansions, 0);

        let err = shrink(&needle, &(), &[0.0], &bracket, 25, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SliceError::NonConvergence {
                axis: 0,
                max_iters: 25
            }
        );
    }

    #[test]
    fn shrink_reports_nan_density() {
        let cliff = |x: &[f64], _: &()| if x[0] > 0.4 { f64::NAN } else { -0.5 * x[0] * x[0] };
        let mut rng = Scripted::new(&[0.5, 0.5, 0.5, 0.95]);
        let bracket = step_out(&cliff, &(), &[0.0], 0, 1.0, 0, &mut rng).unwrap();
        assert_eq!((bracket.left, bracket.right), (-0.5, 0.5));

        let err = shrink(&cliff, &(), &[0.0], &bracket, 10, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SliceError::DensityEvaluation {
                phase: Phase::Shrinkage
            }
        );
    }
}
