//! # u-sampling
//!
//! Random sampling for statistics teaching pages.
//!
//! Draws from textbook distributions, estimates π by Monte-Carlo, and
//! generates correlated Gaussian pairs, returning flat records ready to
//! serialize as JSON.
//!
//! ## Modules
//!
//! - [`sampling`]: normal, binomial and Poisson draws
//! - [`montecarlo`]: π estimation from uniform points
//! - [`correlated`]: pairs with a target correlation on a 50 ± 10 scale
//! - [`distributions`]: validated distribution types with moments and densities
//! - [`stats`]: numerically stable descriptive statistics
//! - [`special`]: log-gamma and friends
//! - [`random`]: per-call generator construction
//! - [`request`] / [`service`]: the query-string boundary and request handling
//! - [`config`] / [`error`]: configuration and error taxonomy
//!
//! ## Example
//!
//! ```
//! use u_sampling::config::SamplingConfig;
//! use u_sampling::service::{SampleResult, SamplingService};
//!
//! let service = SamplingService::new(SamplingConfig::default());
//! let result = service
//!     .handle_query("/api/binomial-distribution", "n=10&p=0.5&size=5")
//!     .unwrap();
//! if let SampleResult::Binomial(r) = result {
//!     assert_eq!(r.data.len(), 5);
//!     assert!(r.data.iter().all(|&k| k <= 10));
//! }
//! ```

pub mod config;
pub mod correlated;
pub mod distributions;
pub mod error;
pub mod montecarlo;
pub mod random;
pub mod request;
pub mod sampling;
pub mod service;
pub mod special;
pub mod stats;

pub use error::{Result, SamplingError};
