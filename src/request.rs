//! Typed sampling requests and the website's query-string boundary.
//!
//! The teaching pages call endpoints such as
//! `/api/binomial-distribution?n=20&p=0.3&size=500`. Every parameter is
//! optional and falls back to an endpoint-specific default.
//!
//! | Endpoint | Keys (default) |
//! |---|---|
//! | `normal-distribution` | `mean` (0), `std` (1), `size` (1000) |
//! | `binomial-distribution` | `n` (10), `p` (0.5), `size` (1000) |
//! | `poisson-distribution` | `lambda` (3), `size` (1000) |
//! | `monte-carlo-pi` | `samples` (10000) |
//! | `correlated-data` | `r` (0.8), `size` (200) |
//!
//! Any endpoint also accepts `seed`. Unrecognised keys are ignored.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{Result, SamplingError};

/// The served endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    Normal,
    Binomial,
    Poisson,
    MonteCarloPi,
    Correlated,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Normal,
        Endpoint::Binomial,
        Endpoint::Poisson,
        Endpoint::MonteCarloPi,
        Endpoint::Correlated,
    ];

    /// Path segment used by the website, without the `/api/` prefix.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Normal => "normal-distribution",
            Endpoint::Binomial => "binomial-distribution",
            Endpoint::Poisson => "poisson-distribution",
            Endpoint::MonteCarloPi => "monte-carlo-pi",
            Endpoint::Correlated => "correlated-data",
        }
    }

    /// Short alias accepted on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Endpoint::Normal => "normal",
            Endpoint::Binomial => "binomial",
            Endpoint::Poisson => "poisson",
            Endpoint::MonteCarloPi => "pi",
            Endpoint::Correlated => "correlated",
        }
    }

    /// Request populated with this endpoint's defaults.
    pub fn default_request(self) -> SampleRequest {
        let kind = match self {
            Endpoint::Normal => SampleKind::Normal {
                mean: 0.0,
                std: 1.0,
                size: 1000,
            },
            Endpoint::Binomial => SampleKind::Binomial {
                n: 10,
                p: 0.5,
                size: 1000,
            },
            Endpoint::Poisson => SampleKind::Poisson {
                lambda: 3.0,
                size: 1000,
            },
            Endpoint::MonteCarloPi => SampleKind::MonteCarloPi { samples: 10_000 },
            Endpoint::Correlated => SampleKind::Correlated { r: 0.8, size: 200 },
        };
        SampleRequest { kind, seed: None }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = SamplingError;

    /// Accepts `/api/normal-distribution`, `normal-distribution` or the
    /// short kind name (`normal`, `binomial`, `poisson`, `pi`,
    /// `correlated`).
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let trimmed = lowered.trim_end_matches('/');
        let name = trimmed
            .strip_prefix("/api/")
            .or_else(|| trimmed.strip_prefix("api/"))
            .or_else(|| trimmed.strip_prefix('/'))
            .unwrap_or(trimmed);
        Endpoint::ALL
            .into_iter()
            .find(|ep| ep.path() == name || ep.short_name() == name)
            .ok_or_else(|| SamplingError::UnknownEndpoint(s.to_string()))
    }
}

/// Distribution family and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SampleKind {
    Normal { mean: f64, std: f64, size: usize },
    Binomial { n: u64, p: f64, size: usize },
    Poisson { lambda: f64, size: usize },
    MonteCarloPi { samples: usize },
    Correlated { r: f64, size: usize },
}

impl SampleKind {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SampleKind::Normal { .. } => Endpoint::Normal,
            SampleKind::Binomial { .. } => Endpoint::Binomial,
            SampleKind::Poisson { .. } => Endpoint::Poisson,
            SampleKind::MonteCarloPi { .. } => Endpoint::MonteCarloPi,
            SampleKind::Correlated { .. } => Endpoint::Correlated,
        }
    }

    /// Number of draws requested (`size`, or `samples` for π).
    pub fn count(&self) -> usize {
        match *self {
            SampleKind::Normal { size, .. }
            | SampleKind::Binomial { size, .. }
            | SampleKind::Poisson { size, .. }
            | SampleKind::Correlated { size, .. } => size,
            SampleKind::MonteCarloPi { samples } => samples,
        }
    }

    fn count_key(&self) -> &'static str {
        match self {
            SampleKind::MonteCarloPi { .. } => "samples",
            _ => "size",
        }
    }
}

/// One sampling request: a family with parameters and an optional seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRequest {
    #[serde(flatten)]
    pub kind: SampleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SampleRequest {
    pub fn new(kind: SampleKind) -> Self {
        Self { kind, seed: None }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds a request from an endpoint name and a `k=v&k=v` query string.
    ///
    /// A leading `?` on the query is tolerated, as is a query appended to
    /// the endpoint itself (`/api/monte-carlo-pi?samples=10`). Keys and
    /// values are form-decoded (`%2D` and `+` included). When a key repeats,
    /// the first occurrence wins and the inline query comes first.
    ///
    /// # Errors
    /// [`SamplingError::UnknownEndpoint`] for an unknown endpoint,
    /// [`SamplingError::Validation`] for a value that does not parse.
    ///
    /// # Examples
    /// ```
    /// use u_sampling::request::{SampleKind, SampleRequest};
    /// let req = SampleRequest::from_query("/api/binomial-distribution", "p=0.3&size=5").unwrap();
    /// assert_eq!(req.kind, SampleKind::Binomial { n: 10, p: 0.3, size: 5 });
    /// ```
    pub fn from_query(endpoint: &str, query: &str) -> Result<Self> {
        let (path, inline_query) = match endpoint.split_once('?') {
            Some((path, q)) => (path, q),
            None => (endpoint, ""),
        };
        let endpoint: Endpoint = path.parse()?;
        let mut request = endpoint.default_request();

        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(inline_query.as_bytes())
            .chain(form_urlencoded::parse(query.as_bytes()));
        let mut seen = HashSet::new();
        for (key, value) in pairs {
            let key = key.trim();
            if key.is_empty() || !seen.insert(key.to_string()) {
                continue;
            }
            request.apply(key, value.trim())?;
        }
        Ok(request)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        if key == "seed" {
            self.seed = Some(parse_unsigned(key, value)?);
            return Ok(());
        }
        let endpoint = self.kind.endpoint();
        match (&mut self.kind, key) {
            (SampleKind::Normal { mean, .. }, "mean") => *mean = parse_float(key, value)?,
            (SampleKind::Normal { std, .. }, "std") => *std = parse_float(key, value)?,
            (SampleKind::Binomial { n, .. }, "n") => *n = parse_unsigned(key, value)?,
            (SampleKind::Binomial { p, .. }, "p") => *p = parse_float(key, value)?,
            (SampleKind::Poisson { lambda, .. }, "lambda") => *lambda = parse_float(key, value)?,
            (SampleKind::Correlated { r, .. }, "r") => *r = parse_float(key, value)?,
            (SampleKind::MonteCarloPi { samples }, "samples") => {
                *samples = parse_count(key, value)?
            }
            (
                SampleKind::Normal { size, .. }
                | SampleKind::Binomial { size, .. }
                | SampleKind::Poisson { size, .. }
                | SampleKind::Correlated { size, .. },
                "size",
            ) => *size = parse_count(key, value)?,
            _ => log::trace!("ignoring query key `{key}` for {endpoint}"),
        }
        Ok(())
    }

    /// Checks the requested count against `(0, max_count]`.
    ///
    /// Distribution parameters are checked by the sampling functions
    /// themselves before any draw.
    pub fn validate(&self, max_count: usize) -> Result<()> {
        let count = self.kind.count();
        let key = self.kind.count_key();
        if count == 0 {
            return Err(SamplingError::validation(key, "must be positive"));
        }
        if count > max_count {
            return Err(SamplingError::validation(
                key,
                format!("{count} exceeds the limit of {max_count}"),
            ));
        }
        Ok(())
    }
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| SamplingError::validation(key, format!("expected a number, got `{value}`")))
}

fn parse_unsigned(key: &str, value: &str) -> Result<u64> {
    let parsed = value.parse::<i128>().map_err(|_| {
        SamplingError::validation(key, format!("expected an integer, got `{value}`"))
    })?;
    u64::try_from(parsed).map_err(|_| {
        SamplingError::validation(key, format!("must be a non-negative integer, got {parsed}"))
    })
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    let parsed = parse_unsigned(key, value)?;
    usize::try_from(parsed)
        .map_err(|_| SamplingError::validation(key, format!("{parsed} is too large")))
}
