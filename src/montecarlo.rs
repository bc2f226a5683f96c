//! Monte-Carlo estimation of π.
//!
//! Uniform points are thrown into the unit square; the fraction landing
//! inside the quarter disc x² + y² ≤ 1 approximates π/4.

use rand::Rng;
use serde::Serialize;

use crate::error::{Result, SamplingError};

/// Number of generated points echoed back with an estimate.
pub const DEFAULT_POINT_LIMIT: usize = 1000;

/// One generated point and whether it fell inside the quarter disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PiPoint {
    pub x: f64,
    pub y: f64,
    pub inside: bool,
}

/// Outcome of [`estimate_pi`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PiEstimate {
    pub samples: usize,
    #[serde(rename = "inside")]
    pub inside_count: usize,
    #[serde(rename = "pi_estimate")]
    pub estimate: f64,
    #[serde(rename = "pi_exact")]
    pub exact_value: f64,
    /// `|estimate − π| / π`, as a percentage.
    #[serde(rename = "error")]
    pub relative_error_percent: f64,
    /// The first `min(samples, point_limit)` points in generation order.
    pub points: Vec<PiPoint>,
}

/// Estimates π from `samples` uniform points, keeping the first 1000.
///
/// # Errors
/// Returns a validation error if `samples == 0`.
///
/// # Examples
/// ```
/// use u_sampling::montecarlo::estimate_pi;
/// use u_sampling::random::create_rng;
/// let est = estimate_pi(20_000, &mut create_rng(42)).unwrap();
/// assert_eq!(est.points.len(), 1000);
/// assert!((est.estimate - std::f64::consts::PI).abs() < 0.1);
/// ```
pub fn estimate_pi<R: Rng>(samples: usize, rng: &mut R) -> Result<PiEstimate> {
    estimate_pi_with_limit(samples, DEFAULT_POINT_LIMIT, rng)
}

/// Like [`estimate_pi`] with a caller-chosen number of echoed points.
pub fn estimate_pi_with_limit<R: Rng>(
    samples: usize,
    point_limit: usize,
    rng: &mut R,
) -> Result<PiEstimate> {
    if samples == 0 {
        return Err(SamplingError::validation("samples", "must be positive"));
    }

    let mut inside_count = 0_usize;
    let mut points = Vec::with_capacity(samples.min(point_limit));
    for i in 0..samples {
        let x: f64 = rng.random();
        let y: f64 = rng.random();
        let inside = x * x + y * y <= 1.0;
        if inside {
            inside_count += 1;
        }
        if i < point_limit {
            points.push(PiPoint { x, y, inside });
        }
    }

    let estimate = 4.0 * inside_count as f64 / samples as f64;
    let exact_value = std::f64::consts::PI;
    let relative_error_percent = ((estimate - exact_value) / exact_value).abs() * 100.0;

    Ok(PiEstimate {
        samples,
        inside_count,
        estimate,
        exact_value,
        relative_error_percent,
        points,
    })
}
