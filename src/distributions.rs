//! Probability distributions served by the sampling endpoints.
//!
//! Parameter-validated distribution types with analytical moments,
//! density/mass evaluation and sampling from any [`rand::Rng`].
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Normal`] | μ, σ ≥ 0 | μ | σ² |
//! | [`Binomial`] | n ≥ 0, p ∈ [0, 1] | np | np(1−p) |
//! | [`Poisson`] | λ ≥ 0 | λ | λ |
//!
//! Degenerate parameters (σ = 0, p ∈ {0, 1}, λ = 0) are accepted: the
//! distribution collapses to a point mass and sampling returns a constant
//! without consuming randomness.
//!
//! Each type also tabulates its density or mass function as a
//! [`DensityPoint`] curve for the pages to plot beside the histogram.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::Serialize;

use crate::error::{Result, SamplingError};
use crate::special;

/// Upper bound on |z| for a standard normal draw.
///
/// The Ziggurat tail cannot reach it from a 64-bit uniform, so a
/// distribution with `|μ| + 40σ` finite never draws ±∞.
const MAX_ABS_Z: f64 = 40.0;

/// Number of points in a [`Normal`] density curve.
pub const CURVE_POINTS: usize = 101;

/// A distribution that produces independent draws.
pub trait Sampler {
    type Output;

    /// Draws one value.
    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Output;

    /// Draws `count` independent values.
    fn sample_n<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Self::Output> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

/// One point of a tabulated pdf or pmf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Tabulates `pmf` over `lo..=hi`, thinned to at most `max_points` values.
fn mass_curve(
    lo: u64,
    hi: u64,
    max_points: usize,
    pmf: impl Fn(u64) -> f64,
) -> Vec<DensityPoint> {
    if max_points == 0 || hi < lo {
        return Vec::new();
    }
    let span = hi - lo + 1;
    let stride = span.div_ceil(max_points as u64).max(1);
    let stride = usize::try_from(stride).unwrap_or(usize::MAX);
    (lo..=hi)
        .step_by(stride)
        .map(|k| DensityPoint {
            x: k as f64,
            density: pmf(k),
        })
        .collect()
}

/// `[mean − 6σ − 1, mean + 6σ + 1]` on the integers, floored at 0.
fn discrete_window(mean: f64, std: f64) -> (u64, u64) {
    let lo = (mean - 6.0 * std - 1.0).floor().max(0.0) as u64;
    let hi = (mean + 6.0 * std + 1.0).ceil().max(0.0) as u64;
    (lo, hi)
}

// ============================================================================
// Normal Distribution
// ============================================================================

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Mathematical Definition
/// - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - Mean: μ
/// - Variance: σ²
///
/// Draws are `μ + σ·z` with `z` from the Ziggurat standard normal sampler,
/// so σ = 0 yields exactly μ.
#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ²).
    ///
    /// # Errors
    /// Returns a validation error if `sigma < 0`, either parameter is not
    /// finite, or `|mu| + 40·sigma` overflows (draws could reach ±∞).
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(SamplingError::validation(
                "mean",
                format!("must be finite, got {mu}"),
            ));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(SamplingError::validation(
                "std",
                format!("must be finite and >= 0, got {sigma}"),
            ));
        }
        if !(mu.abs() + MAX_ABS_Z * sigma).is_finite() {
            return Err(SamplingError::validation(
                "std",
                format!("draws from mean {mu} with std {sigma} would overflow"),
            ));
        }
        Ok(Self { mu, sigma })
    }

    /// The standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
        }
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn mean(&self) -> f64 {
        self.mu
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    pub fn std_dev(&self) -> f64 {
        self.sigma
    }

    /// PDF. For σ = 0 this is a point mass: `+∞` at μ, 0 elsewhere.
    pub fn pdf(&self, x: f64) -> f64 {
        if self.sigma == 0.0 {
            return if x == self.mu { f64::INFINITY } else { 0.0 };
        }
        let z = (x - self.mu) / self.sigma;
        special::standard_normal_pdf(z) / self.sigma
    }

    /// The pdf at `points` evenly spaced values across μ ± 4σ.
    ///
    /// Empty for σ = 0, where the density is a point mass.
    pub fn density_curve(&self, points: usize) -> Vec<DensityPoint> {
        if self.sigma == 0.0 || points == 0 {
            return Vec::new();
        }
        if points == 1 {
            return vec![DensityPoint {
                x: self.mu,
                density: self.pdf(self.mu),
            }];
        }
        let lo = self.mu - 4.0 * self.sigma;
        let step = 8.0 * self.sigma / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                DensityPoint {
                    x,
                    density: self.pdf(x),
                }
            })
            .collect()
    }
}

impl Sampler for Normal {
    type Output = f64;

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.sigma == 0.0 {
            return self.mu;
        }
        let z: f64 = StandardNormal.sample(rng);
        self.mu + self.sigma * z
    }
}

// ============================================================================
// Binomial Distribution
// ============================================================================

/// Binomial distribution: number of successes in `n` Bernoulli(p) trials.
///
/// # Mathematical Definition
/// - PMF: C(n, k) pᵏ (1−p)ⁿ⁻ᵏ
/// - Mean: np
/// - Variance: np(1−p)
///
/// Sampling delegates to `rand_distr::Binomial` (BTPE for large `np`,
/// inversion otherwise).
#[derive(Debug, Clone)]
pub struct Binomial {
    n: u64,
    p: f64,
    sampler: rand_distr::Binomial,
}

impl Binomial {
    /// Creates a new binomial distribution.
    ///
    /// # Errors
    /// Returns a validation error if `p` is outside `[0, 1]` or NaN.
    pub fn new(n: u64, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SamplingError::validation(
                "p",
                format!("must lie in [0, 1], got {p}"),
            ));
        }
        let sampler = rand_distr::Binomial::new(n, p)
            .map_err(|e| SamplingError::validation("p", e.to_string()))?;
        Ok(Self { n, p, sampler })
    }

    pub fn trials(&self) -> u64 {
        self.n
    }

    pub fn probability(&self) -> f64 {
        self.p
    }

    pub fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    pub fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// PMF P(X = k), evaluated in log space.
    pub fn pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return 0.0;
        }
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == self.n { 1.0 } else { 0.0 };
        }
        let ln_p = special::ln_choose(self.n, k)
            + k as f64 * self.p.ln()
            + (self.n - k) as f64 * (1.0 - self.p).ln();
        ln_p.exp()
    }

    /// The pmf over `0..=n`, or over mean ± 6σ when that is narrower,
    /// thinned to at most `max_points` values.
    pub fn mass_curve(&self, max_points: usize) -> Vec<DensityPoint> {
        let (lo, hi) = discrete_window(self.mean(), self.std_dev());
        mass_curve(lo.min(self.n), hi.min(self.n), max_points, |k| self.pmf(k))
    }
}

impl Sampler for Binomial {
    type Output = u64;

    /// Draws one value in `[0, n]`.
    fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        Distribution::<u64>::sample(&self.sampler, rng)
    }
}

// ============================================================================
// Poisson Distribution
// ============================================================================

/// Poisson distribution with rate λ.
///
/// # Mathematical Definition
/// - PMF: λᵏ e^(−λ) / k!
/// - Mean: λ
/// - Variance: λ
#[derive(Debug, Clone)]
pub struct Poisson {
    lambda: f64,
    // None for λ = 0, which rand_distr rejects.
    sampler: Option<rand_distr::Poisson<f64>>,
}

impl Poisson {
    /// Creates a new Poisson distribution.
    ///
    /// # Errors
    /// Returns a validation error if `lambda` is negative, not finite, or
    /// too large to sample.
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(SamplingError::validation(
                "lambda",
                format!("must be finite and >= 0, got {lambda}"),
            ));
        }
        let sampler = if lambda == 0.0 {
            None
        } else {
            let inner = rand_distr::Poisson::new(lambda)
                .map_err(|e| SamplingError::validation("lambda", e.to_string()))?;
            Some(inner)
        };
        Ok(Self { lambda, sampler })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn mean(&self) -> f64 {
        self.lambda
    }

    pub fn variance(&self) -> f64 {
        self.lambda
    }

    pub fn std_dev(&self) -> f64 {
        self.lambda.sqrt()
    }

    /// PMF P(X = k), evaluated in log space.
    pub fn pmf(&self, k: u64) -> f64 {
        if self.lambda == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        (k as f64 * self.lambda.ln() - self.lambda - special::ln_factorial(k)).exp()
    }

    /// The pmf over λ ± 6√λ, thinned to at most `max_points` values.
    pub fn mass_curve(&self, max_points: usize) -> Vec<DensityPoint> {
        let (lo, hi) = discrete_window(self.mean(), self.std_dev());
        mass_curve(lo, hi, max_points, |k| self.pmf(k))
    }
}

impl Sampler for Poisson {
    type Output = u64;

    fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        match &self.sampler {
            Some(inner) => {
                let k: f64 = Distribution::<f64>::sample(inner, rng);
                k as u64
            }
            None => 0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    // --- Normal ---

    #[test]
    fn test_normal_moments() {
        let n = Normal::new(3.0, 2.0).unwrap();
        assert_eq!(n.mean(), 3.0);
        assert!((n.variance() - 4.0).abs() < 1e-15);
        assert_eq!(n.std_dev(), 2.0);
    }

    #[test]
    fn test_normal_pdf_peak() {
        let n = Normal::new(0.0, 1.0).unwrap();
        assert!((n.pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
        let wide = Normal::new(0.0, 2.0).unwrap();
        assert!((wide.pdf(0.0) - 0.3989422804014327 / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_normal_invalid() {
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_normal_rejects_overflowing_draws() {
        let err = Normal::new(1e308, 1e308).unwrap_err();
        assert!(matches!(err, SamplingError::Validation { ref parameter, .. } if parameter == "std"));
        assert!(Normal::new(-1.7e308, 1e307).is_err());
        assert!(Normal::new(1.7e308, 0.0).is_ok());

        let wide = Normal::new(1e308, 1e306).unwrap();
        let mut rng = create_rng(1);
        assert!(wide.sample_n(1000, &mut rng).iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_normal_density_curve() {
        let n = Normal::new(2.0, 0.5).unwrap();
        let curve = n.density_curve(CURVE_POINTS);
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve[0].x, 0.0);
        assert!((curve[CURVE_POINTS - 1].x - 4.0).abs() < 1e-12);
        let peak = curve[CURVE_POINTS / 2];
        assert!((peak.x - 2.0).abs() < 1e-12);
        assert!((peak.density - n.pdf(2.0)).abs() < 1e-15);
        assert!(Normal::new(2.0, 0.0).unwrap().density_curve(CURVE_POINTS).is_empty());
    }

    #[test]
    fn test_normal_zero_sigma_is_constant() {
        let n = Normal::new(7.5, 0.0).unwrap();
        let mut rng = create_rng(1);
        assert!(n.sample_n(50, &mut rng).iter().all(|&x| x == 7.5));
        assert_eq!(n.pdf(7.5), f64::INFINITY);
        assert_eq!(n.pdf(7.0), 0.0);
    }

    #[test]
    fn test_normal_sample_moments() {
        let n = Normal::new(10.0, 3.0).unwrap();
        let mut rng = create_rng(42);
        let xs = n.sample_n(100_000, &mut rng);
        let m = xs.iter().sum::<f64>() / xs.len() as f64;
        let v = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
        assert!((m - 10.0).abs() < 0.05, "sample mean {m}");
        assert!((v.sqrt() - 3.0).abs() < 0.05, "sample std {}", v.sqrt());
    }

    // --- Binomial ---

    #[test]
    fn test_binomial_moments() {
        let b = Binomial::new(10, 0.3).unwrap();
        assert!((b.mean() - 3.0).abs() < 1e-12);
        assert!((b.variance() - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_binomial_pmf_known_value() {
        let b = Binomial::new(10, 0.5).unwrap();
        // C(10,5)/1024
        assert!((b.pmf(5) - 252.0 / 1024.0).abs() < 1e-10);
        assert_eq!(b.pmf(11), 0.0);
    }

    #[test]
    fn test_binomial_pmf_sums_to_one() {
        let b = Binomial::new(40, 0.37).unwrap();
        let total: f64 = (0..=40).map(|k| b.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-9, "pmf total {total}");
    }

    #[test]
    fn test_binomial_mass_curve() {
        let b = Binomial::new(10, 0.5).unwrap();
        let curve = b.mass_curve(200);
        assert_eq!(curve.len(), 11);
        assert_eq!(curve[5], DensityPoint { x: 5.0, density: b.pmf(5) });
        let total: f64 = curve.iter().map(|pt| pt.density).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let big = Binomial::new(1_000_000_000, 0.5).unwrap();
        let thinned = big.mass_curve(200);
        assert!(!thinned.is_empty() && thinned.len() <= 200);
        assert!(thinned.iter().all(|pt| pt.x <= 1e9));

        let certain = Binomial::new(8, 1.0).unwrap().mass_curve(200);
        assert_eq!(certain.last(), Some(&DensityPoint { x: 8.0, density: 1.0 }));
    }

    #[test]
    fn test_binomial_invalid() {
        assert!(Binomial::new(10, -0.1).is_err());
        assert!(Binomial::new(10, 1.1).is_err());
        assert!(Binomial::new(10, f64::NAN).is_err());
    }

    #[test]
    fn test_binomial_degenerate() {
        let mut rng = create_rng(3);
        let certain = Binomial::new(8, 1.0).unwrap();
        assert!(certain.sample_n(20, &mut rng).iter().all(|&k| k == 8));
        let never = Binomial::new(8, 0.0).unwrap();
        assert!(never.sample_n(20, &mut rng).iter().all(|&k| k == 0));
        let empty = Binomial::new(0, 0.4).unwrap();
        assert!(empty.sample_n(20, &mut rng).iter().all(|&k| k == 0));
        assert_eq!(certain.pmf(8), 1.0);
        assert_eq!(never.pmf(0), 1.0);
    }

    // --- Poisson ---

    #[test]
    fn test_poisson_moments() {
        let p = Poisson::new(4.0).unwrap();
        assert_eq!(p.mean(), 4.0);
        assert_eq!(p.variance(), 4.0);
        assert_eq!(p.std_dev(), 2.0);
    }

    #[test]
    fn test_poisson_pmf_known_value() {
        let p = Poisson::new(3.0).unwrap();
        // P(X=2) = 9/2 e^-3
        let expected = 4.5 * (-3.0_f64).exp();
        assert!((p.pmf(2) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_poisson_pmf_sums_to_one() {
        let p = Poisson::new(6.5).unwrap();
        let total: f64 = (0..100).map(|k| p.pmf(k)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_poisson_zero_rate() {
        let p = Poisson::new(0.0).unwrap();
        let mut rng = create_rng(5);
        assert!(p.sample_n(30, &mut rng).iter().all(|&k| k == 0));
        assert_eq!(p.pmf(0), 1.0);
        assert_eq!(p.pmf(1), 0.0);
    }

    #[test]
    fn test_poisson_mass_curve() {
        let p = Poisson::new(4.0).unwrap();
        let curve = p.mass_curve(200);
        // 4 ± 6·2 ± 1 on the non-negative integers
        assert_eq!(curve.first().map(|pt| pt.x), Some(0.0));
        assert_eq!(curve.last().map(|pt| pt.x), Some(17.0));
        let total: f64 = curve.iter().map(|pt| pt.density).sum();
        assert!(total > 0.999 && total <= 1.0 + 1e-12, "mass {total}");

        let zero = Poisson::new(0.0).unwrap().mass_curve(200);
        assert_eq!(
            zero,
            vec![
                DensityPoint { x: 0.0, density: 1.0 },
                DensityPoint { x: 1.0, density: 0.0 },
            ]
        );
    }

    #[test]
    fn test_poisson_invalid() {
        assert!(Poisson::new(-0.5).is_err());
        assert!(Poisson::new(f64::NAN).is_err());
        assert!(Poisson::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_poisson_sample_mean() {
        let p = Poisson::new(3.0).unwrap();
        let mut rng = create_rng(9);
        let ks = p.sample_n(50_000, &mut rng);
        let m = ks.iter().sum::<u64>() as f64 / ks.len() as f64;
        assert!((m - 3.0).abs() < 0.05, "sample mean {m}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn binomial_samples_within_trials(
            seed in 0_u64..10000,
            n in 0_u64..500,
            p in 0.0_f64..=1.0,
        ) {
            let b = Binomial::new(n, p).unwrap();
            let mut rng = create_rng(seed);
            for k in b.sample_n(50, &mut rng) {
                prop_assert!(k <= n, "sample {k} exceeds trials {n}");
            }
        }

        #[test]
        fn normal_pdf_non_negative(
            mu in -100.0_f64..100.0,
            sigma in 0.01_f64..50.0,
            x in -500.0_f64..500.0,
        ) {
            let n = Normal::new(mu, sigma).unwrap();
            prop_assert!(n.pdf(x) >= 0.0);
        }

        #[test]
        fn poisson_pmf_in_unit_interval(lambda in 0.0_f64..200.0, k in 0_u64..400) {
            let p = Poisson::new(lambda).unwrap();
            let v = p.pmf(k);
            prop_assert!((0.0..=1.0 + 1e-12).contains(&v), "pmf({k}) = {v}");
        }
    }
}
