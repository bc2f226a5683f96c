//! Descriptive statistics over drawn samples.
//!
//! Used to summarise every sequence a request returns and to rescale the
//! correlated pairs. Functions return `None` on empty input or non-finite
//! values instead of producing NaN.
//!
//! # Algorithms
//!
//! - **Sum/Mean**: Neumaier compensated summation.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Correlation**: Pearson's r from two-pass centred cross products.

use serde::Serialize;

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_sampling::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_sampling::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !all_finite(data) {
        return None;
    }
    WelfordAccumulator::from_slice(data).sample_variance()
}

/// Population variance (denominator `n`).
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    WelfordAccumulator::from_slice(data).population_variance()
}

/// Sample standard deviation, `sqrt(variance(data))`.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Population standard deviation, `sqrt(population_variance(data))`.
///
/// This is the normalisation used when rescaling correlated pairs.
///
/// # Examples
/// ```
/// use u_sampling::stats::population_std_dev;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Minimum value, or `None` if empty or any value is NaN.
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    data.iter().copied().reduce(f64::min)
}

/// Maximum value, or `None` if empty or any value is NaN.
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    data.iter().copied().reduce(f64::max)
}

/// Sample covariance of two equally long series.
///
/// # Returns
/// - `None` if lengths differ, `n < 2`, or data contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_sampling::stats::covariance;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((covariance(&x, &y).unwrap() - 5.0).abs() < 1e-14);
/// ```
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 || !all_finite(x) || !all_finite(y) {
        return None;
    }
    Some(centred_cross(x, y) / (n as f64 - 1.0))
}

/// Pearson correlation coefficient of two equally long series.
///
/// The result is clamped to `[-1, 1]` to absorb rounding.
///
/// # Returns
/// - `None` if lengths differ, `n < 2`, data contains NaN/Inf, or either
///   series has zero variance.
///
/// # Examples
/// ```
/// use u_sampling::stats::correlation;
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [8.0, 6.0, 4.0, 2.0];
/// assert!((correlation(&x, &y).unwrap() + 1.0).abs() < 1e-12);
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let sxy = covariance(x, y)?;
    let (sxx, syy) = (covariance(x, x)?, covariance(y, y)?);
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

fn centred_cross(x: &[f64], y: &[f64]) -> f64 {
    let nf = x.len() as f64;
    let mean_x = kahan_sum(x) / nf;
    let mean_y = kahan_sum(y) / nf;
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum()
}

fn all_finite(data: &[f64]) -> bool {
    data.iter().all(|x| x.is_finite())
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// Improved Kahan variant that also handles an addend larger in
/// magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let (sum, compensation) = data.iter().fold((0.0_f64, 0.0_f64), |(sum, c), &x| {
        let t = sum + x;
        let c = if sum.abs() >= x.abs() {
            c + ((sum - t) + x)
        } else {
            c + ((x - t) + sum)
        };
        (t, c)
    });
    sum + compensation
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for count, mean and variance.
///
/// # Examples
/// ```
/// use u_sampling::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.population_variance().unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates every value in `data`.
    pub fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        data.iter().for_each(|&x| acc.update(x));
        acc
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Sample variance (n − 1), `None` below 2 samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population variance (n), `None` when empty.
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    pub fn population_std_dev(&self) -> Option<f64> {
        self.population_variance().map(f64::sqrt)
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Count, mean, population std, min and max of a drawn sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

const RESCALE_ABOVE: f64 = 1e150;

/// Mean and population std.
fn first_two_moments(data: &[f64]) -> Option<(f64, f64)> {
    let std = WelfordAccumulator::from_slice(data).population_std_dev()?;
    Some((mean(data)?, std))
}

impl Summary {
    /// Summarises `data`. `None` if empty or non-finite.
    ///
    /// Data beyond ±1e150 is scaled down by 2⁶⁰⁰ (exactly) before the sums
    /// are taken, so the mean and std stay finite for any finite input.
    pub fn from_slice(data: &[f64]) -> Option<Self> {
        if data.is_empty() || !all_finite(data) {
            return None;
        }
        let (lo, hi) = (min(data)?, max(data)?);
        let (mean, std) = if lo.abs().max(hi.abs()) > RESCALE_ABOVE {
            let scale = 2.0_f64.powi(600);
            let scaled: Vec<f64> = data.iter().map(|x| x / scale).collect();
            let (m, s) = first_two_moments(&scaled)?;
            (m * scale, s * scale)
        } else {
            first_two_moments(data)?
        };
        Some(Self {
            count: data.len(),
            mean,
            std,
            min: lo,
            max: hi,
        })
    }

    /// Summarises integer counts (binomial and Poisson draws).
    pub fn from_counts(data: &[u64]) -> Option<Self> {
        let as_f64: Vec<f64> = data.iter().map(|&k| k as f64).collect();
        Self::from_slice(&as_f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_and_nan() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, f64::NAN]), None);
        assert_eq!(mean(&[4.0]), Some(4.0));
    }

    #[test]
    fn test_kahan_sum_cancellation() {
        // Naive summation loses the 1.0 entirely.
        let data = [1e100, 1.0, -1e100];
        assert_eq!(kahan_sum(&data), 1.0);
    }

    #[test]
    fn test_variance_needs_two() {
        assert_eq!(variance(&[1.0]), None);
        assert_eq!(population_variance(&[1.0]), Some(0.0));
    }

    #[test]
    fn test_std_dev_known() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&v).unwrap() - 2.138089935299395).abs() < 1e-10);
        assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max() {
        let v = [3.0, -1.5, 8.25, 0.0];
        assert_eq!(min(&v), Some(-1.5));
        assert_eq!(max(&v), Some(8.25));
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[f64::NAN]), None);
    }

    #[test]
    fn test_covariance_length_mismatch() {
        assert_eq!(covariance(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_correlation_perfect_and_zero_variance() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();
        assert!((correlation(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(correlation(&x, &[2.0; 5]), None);
    }

    #[test]
    fn test_summary() {
        let s = Summary::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-15);
        assert!((s.std - 2.0).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(Summary::from_slice(&[]), None);
    }

    #[test]
    fn test_summary_near_f64_max() {
        let s = Summary::from_slice(&[1.5e308, 1.7e308, 1.6e308, 1.6e308]).unwrap();
        assert!(s.mean.is_finite() && s.std.is_finite());
        assert!((s.mean / 1.6e308 - 1.0).abs() < 1e-12, "mean {}", s.mean);
        assert!((s.std / (0.5_f64.sqrt() * 1e307) - 1.0).abs() < 1e-9, "std {}", s.std);
        assert_eq!((s.min, s.max), (1.5e308, 1.7e308));
    }

    #[test]
    fn test_summary_from_counts() {
        let s = Summary::from_counts(&[0, 1, 2, 3]).unwrap();
        assert!((s.mean - 1.5).abs() < 1e-15);
        assert_eq!(s.max, 3.0);
    }
}
