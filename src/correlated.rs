//! Pairs of Gaussian values with a target correlation.
//!
//! `x` is standard normal and `y = r·x + √(1−r²)·ε` with independent
//! standard noise `ε`, so corr(x, y) = r in expectation. Both columns are
//! then standardised and mapped onto a score scale with mean 50 and
//! standard deviation 10 (population std, so each column hits exactly 10).

use rand::Rng;
use serde::Serialize;

use crate::distributions::{Normal, Sampler};
use crate::error::{Result, SamplingError};
use crate::stats;

/// Centre of the rescaled columns.
pub const SCALED_MEAN: f64 = 50.0;
/// Spread of the rescaled columns.
pub const SCALED_STD: f64 = 10.0;

/// A generated `(x, y)` pair on the score scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Draws `count` pairs whose correlation is `r` in expectation.
///
/// At `|r| = 1` the noise term vanishes and `y` is exactly `±x` after
/// rescaling. A column with zero spread (only when `count == 1`) is placed
/// at [`SCALED_MEAN`].
///
/// # Errors
/// Returns a validation error if `r` is outside `[-1, 1]` or `count == 0`.
///
/// # Examples
/// ```
/// use u_sampling::correlated::correlated_pairs;
/// use u_sampling::random::create_rng;
/// let pairs = correlated_pairs(0.8, 200, &mut create_rng(1)).unwrap();
/// assert_eq!(pairs.len(), 200);
/// ```
pub fn correlated_pairs<R: Rng>(r: f64, count: usize, rng: &mut R) -> Result<Vec<Point>> {
    if !(-1.0..=1.0).contains(&r) {
        return Err(SamplingError::validation(
            "r",
            format!("must lie in [-1, 1], got {r}"),
        ));
    }
    if count == 0 {
        return Err(SamplingError::validation("size", "must be positive"));
    }

    let x = Normal::standard().sample_n(count, rng);
    // σ = 0 at |r| = 1, which draws exact zeros.
    let noise = Normal::new(0.0, (1.0 - r * r).max(0.0).sqrt())?;
    let y: Vec<f64> = x.iter().map(|&xi| r * xi + noise.sample(rng)).collect();

    let x = rescale(&x);
    let y = rescale(&y);
    Ok(x.into_iter()
        .zip(y)
        .map(|(x, y)| Point { x, y })
        .collect())
}

/// Maps a column onto mean [`SCALED_MEAN`] and std [`SCALED_STD`].
fn rescale(column: &[f64]) -> Vec<f64> {
    let centre = stats::mean(column).unwrap_or(0.0);
    let spread = stats::population_std_dev(column).unwrap_or(0.0);
    if spread == 0.0 {
        return vec![SCALED_MEAN; column.len()];
    }
    column
        .iter()
        .map(|v| (v - centre) / spread * SCALED_STD + SCALED_MEAN)
        .collect()
}

/// Pearson correlation of the generated pairs, `None` for fewer than two.
pub fn sample_correlation(points: &[Point]) -> Option<f64> {
    let (x, y): (Vec<f64>, Vec<f64>) = points.iter().map(|p| (p.x, p.y)).unzip();
    stats::correlation(&x, &y)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn output_length_and_finiteness(
            seed in 0_u64..10000,
            r in -1.0_f64..=1.0,
            count in 1_usize..400,
        ) {
            let pts = correlated_pairs(r, count, &mut create_rng(seed)).unwrap();
            prop_assert_eq!(pts.len(), count);
            prop_assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }
}
