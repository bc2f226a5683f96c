//! Bulk draws from the served distribution families.
//!
//! Each function validates every parameter before consuming any
//! randomness, so a rejected call leaves the generator untouched.

use rand::Rng;

use crate::distributions::{Binomial, Normal, Poisson, Sampler};
use crate::error::{Result, SamplingError};

/// Draws `count` values from an already validated distribution.
///
/// # Errors
/// Validation error if `count == 0`.
pub fn sample_from<D: Sampler, R: Rng>(
    dist: &D,
    count: usize,
    rng: &mut R,
) -> Result<Vec<D::Output>> {
    if count == 0 {
        return Err(SamplingError::validation("size", "must be positive"));
    }
    Ok(dist.sample_n(count, rng))
}

/// Draws `count` values from N(mean, std²).
///
/// # Errors
/// Validation error if `count == 0`, `std < 0`, either float is not
/// finite, or draws could overflow to ±∞.
///
/// # Examples
/// ```
/// use u_sampling::sampling::sample_normal;
/// use u_sampling::random::create_rng;
/// let xs = sample_normal(5.0, 0.0, 3, &mut create_rng(1)).unwrap();
/// assert_eq!(xs, vec![5.0, 5.0, 5.0]);
/// ```
pub fn sample_normal<R: Rng>(mean: f64, std: f64, count: usize, rng: &mut R) -> Result<Vec<f64>> {
    sample_from(&Normal::new(mean, std)?, count, rng)
}

/// Draws `count` values from Binomial(trials, probability).
///
/// # Errors
/// Validation error if `count == 0` or `probability ∉ [0, 1]`.
pub fn sample_binomial<R: Rng>(
    trials: u64,
    probability: f64,
    count: usize,
    rng: &mut R,
) -> Result<Vec<u64>> {
    sample_from(&Binomial::new(trials, probability)?, count, rng)
}

/// Draws `count` values from Poisson(rate).
///
/// # Errors
/// Validation error if `count == 0` or `rate` is negative or not finite.
pub fn sample_poisson<R: Rng>(rate: f64, count: usize, rng: &mut R) -> Result<Vec<u64>> {
    sample_from(&Poisson::new(rate)?, count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats;

    #[test]
    fn test_normal_count_and_moments() {
        let xs = sample_normal(-2.0, 4.0, 200_000, &mut create_rng(42)).unwrap();
        assert_eq!(xs.len(), 200_000);
        let m = stats::mean(&xs).unwrap();
        let s = stats::std_dev(&xs).unwrap();
        assert!((m + 2.0).abs() < 0.05, "mean {m}");
        assert!((s - 4.0).abs() < 0.05, "std {s}");
    }

    #[test]
    fn test_normal_rejections() {
        let mut rng = create_rng(1);
        assert!(sample_normal(0.0, 1.0, 0, &mut rng).is_err());
        assert!(sample_normal(0.0, -0.1, 10, &mut rng).is_err());
        assert!(sample_normal(f64::INFINITY, 1.0, 10, &mut rng).is_err());
    }

    #[test]
    fn test_binomial_concrete_scenario() {
        let ks = sample_binomial(10, 0.5, 5, &mut create_rng(3)).unwrap();
        assert_eq!(ks.len(), 5);
        assert!(ks.iter().all(|&k| k <= 10));
    }

    #[test]
    fn test_binomial_rejections() {
        let mut rng = create_rng(1);
        assert!(sample_binomial(10, 1.5, 5, &mut rng).is_err());
        assert!(sample_binomial(10, -0.5, 5, &mut rng).is_err());
        assert!(sample_binomial(10, 0.5, 0, &mut rng).is_err());
    }

    #[test]
    fn test_poisson_zero_rate_and_rejections() {
        let mut rng = create_rng(1);
        assert_eq!(sample_poisson(0.0, 4, &mut rng).unwrap(), vec![0; 4]);
        assert!(sample_poisson(-1.0, 4, &mut rng).is_err());
        assert!(sample_poisson(3.0, 0, &mut rng).is_err());
    }

    #[test]
    fn test_rejection_consumes_no_randomness() {
        let mut used = create_rng(77);
        let _ = sample_poisson(-1.0, 10, &mut used);
        let _ = sample_normal(0.0, 1.0, 0, &mut used);
        let after = sample_normal(0.0, 1.0, 3, &mut used).unwrap();
        let fresh = sample_normal(0.0, 1.0, 3, &mut create_rng(77)).unwrap();
        assert_eq!(after, fresh);
    }

    #[test]
    fn test_sample_from_shares_one_distribution() {
        let dist = Binomial::new(20, 0.3).unwrap();
        let via_dist = sample_from(&dist, 50, &mut create_rng(8)).unwrap();
        let via_params = sample_binomial(20, 0.3, 50, &mut create_rng(8)).unwrap();
        assert_eq!(via_dist, via_params);
        assert!(sample_from(&dist, 0, &mut create_rng(8)).is_err());
    }

    #[test]
    fn test_overflowing_normal_rejected() {
        let err = sample_normal(1e308, 1e308, 50, &mut create_rng(1)).unwrap_err();
        assert!(err.is_rejection());
    }

    #[test]
    fn test_seeded_draws_reproducible() {
        let a = sample_binomial(20, 0.3, 100, &mut create_rng(5)).unwrap();
        let b = sample_binomial(20, 0.3, 100, &mut create_rng(5)).unwrap();
        assert_eq!(a, b);
    }
}
