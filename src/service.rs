//! The sampling service: request in, serializable result out.
//!
//! [`SamplingService`] is constructed explicitly from a
//! [`SamplingConfig`] and shared by reference. It holds no mutable state;
//! each call builds its own generator, so concurrent calls neither block
//! nor correlate.

use serde::Serialize;

use crate::config::SamplingConfig;
use crate::correlated::{self, Point};
use crate::distributions::{Binomial, DensityPoint, Normal, Poisson, CURVE_POINTS};
use crate::error::{Result, SamplingError};
use crate::montecarlo::{self, PiEstimate};
use crate::random;
use crate::request::{SampleKind, SampleRequest};
use crate::sampling;
use crate::stats::Summary;

/// Population moments of the requested distribution and its pdf/pmf
/// tabulated for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theoretical {
    pub mean: f64,
    pub std: f64,
    /// Empty for a point mass (σ = 0).
    pub curve: Vec<DensityPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalResult {
    pub mean: f64,
    pub std: f64,
    pub data: Vec<f64>,
    pub summary: Option<Summary>,
    pub theoretical: Theoretical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinomialResult {
    pub n: u64,
    pub p: f64,
    pub data: Vec<u64>,
    pub summary: Option<Summary>,
    pub theoretical: Theoretical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoissonResult {
    pub lambda: f64,
    pub data: Vec<u64>,
    pub summary: Option<Summary>,
    pub theoretical: Theoretical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedResult {
    pub correlation: f64,
    pub data: Vec<Point>,
    /// Pearson r of the returned pairs; `None` for a single pair.
    pub sample_correlation: Option<f64>,
}

/// A flat, JSON-ready record answering one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleResult {
    Normal(NormalResult),
    Binomial(BinomialResult),
    Poisson(PoissonResult),
    MonteCarloPi(PiEstimate),
    Correlated(CorrelatedResult),
}

impl SampleResult {
    /// Serializes the record as the website expects it.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Answers sampling requests under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct SamplingService {
    config: SamplingConfig,
}

impl SamplingService {
    pub fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Parses an endpoint and query string, then handles the request.
    pub fn handle_query(&self, endpoint: &str, query: &str) -> Result<SampleResult> {
        let request = SampleRequest::from_query(endpoint, query)
            .inspect_err(|e| log_failure(&format!("query {endpoint}?{query}"), e))?;
        self.handle(&request)
    }

    /// Validates `request`, draws, and builds the result record.
    ///
    /// The generator is seeded from the request's seed, else the
    /// configured seed, else OS entropy.
    ///
    /// # Errors
    /// Validation errors only; nothing is drawn for a rejected request.
    pub fn handle(&self, request: &SampleRequest) -> Result<SampleResult> {
        log::debug!("handling {request:?}");
        self.execute(request)
            .inspect_err(|e| log_failure(&format!("{} request", request.kind.endpoint()), e))
    }

    fn execute(&self, request: &SampleRequest) -> Result<SampleResult> {
        request.validate(self.config.max_count)?;
        let mut rng = random::rng_for(request.seed.or(self.config.seed));

        let result = match request.kind {
            SampleKind::Normal { mean, std, size } => {
                let dist = Normal::new(mean, std)?;
                let data = sampling::sample_from(&dist, size, &mut rng)?;
                SampleResult::Normal(NormalResult {
                    mean,
                    std,
                    summary: Summary::from_slice(&data),
                    data,
                    theoretical: Theoretical {
                        mean: dist.mean(),
                        std: dist.std_dev(),
                        curve: dist.density_curve(CURVE_POINTS),
                    },
                })
            }
            SampleKind::Binomial { n, p, size } => {
                let dist = Binomial::new(n, p)?;
                let data = sampling::sample_from(&dist, size, &mut rng)?;
                SampleResult::Binomial(BinomialResult {
                    n,
                    p,
                    summary: Summary::from_counts(&data),
                    data,
                    theoretical: Theoretical {
                        mean: dist.mean(),
                        std: dist.std_dev(),
                        curve: dist.mass_curve(self.config.curve_point_limit),
                    },
                })
            }
            SampleKind::Poisson { lambda, size } => {
                let dist = Poisson::new(lambda)?;
                let data = sampling::sample_from(&dist, size, &mut rng)?;
                SampleResult::Poisson(PoissonResult {
                    lambda,
                    summary: Summary::from_counts(&data),
                    data,
                    theoretical: Theoretical {
                        mean: dist.mean(),
                        std: dist.std_dev(),
                        curve: dist.mass_curve(self.config.curve_point_limit),
                    },
                })
            }
            SampleKind::MonteCarloPi { samples } => {
                let estimate = montecarlo::estimate_pi_with_limit(
                    samples,
                    self.config.pi_point_limit,
                    &mut rng,
                )?;
                log::debug!(
                    "π ≈ {} from {} samples ({:.3}% off)",
                    estimate.estimate,
                    samples,
                    estimate.relative_error_percent
                );
                SampleResult::MonteCarloPi(estimate)
            }
            SampleKind::Correlated { r, size } => {
                let data = correlated::correlated_pairs(r, size, &mut rng)?;
                SampleResult::Correlated(CorrelatedResult {
                    correlation: r,
                    sample_correlation: correlated::sample_correlation(&data),
                    data,
                })
            }
        };
        Ok(result)
    }
}

fn log_failure(what: &str, err: &SamplingError) {
    if err.is_rejection() {
        log::warn!("rejected {what}: {err}");
    } else {
        log::error!("{what} failed: {err}");
    }
}
