//! u-sampling CLI
//!
//! Command-line front end for the sampling service. Each subcommand draws
//! one result and prints it as the JSON record the teaching pages consume.
//!
//! ```text
//! u-sampling binomial --n 10 --p 0.5 --size 5
//! u-sampling query /api/monte-carlo-pi "samples=2000"
//! RUST_LOG=debug u-sampling --seed 7 correlated --r -0.4
//! ```
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use u_sampling::config::SamplingConfig;
use u_sampling::request::{SampleKind, SampleRequest};
use u_sampling::service::SamplingService;

#[derive(Parser)]
#[command(name = "u-sampling")]
#[command(about = "Draw random samples for statistics teaching pages")]
struct Cli {
    /// TOML configuration file (max_count, pi_point_limit, seed)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible output; overrides the configured seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pretty-print the JSON record
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw from a normal distribution
    Normal {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        mean: f64,
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        std: f64,
        #[arg(long, default_value_t = 1000)]
        size: usize,
    },

    /// Draw from a binomial distribution
    Binomial {
        /// Number of trials
        #[arg(long, default_value_t = 10)]
        n: u64,
        /// Success probability
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        p: f64,
        #[arg(long, default_value_t = 1000)]
        size: usize,
    },

    /// Draw from a Poisson distribution
    Poisson {
        #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
        lambda: f64,
        #[arg(long, default_value_t = 1000)]
        size: usize,
    },

    /// Estimate π from uniform points in the unit square
    Pi {
        #[arg(long, default_value_t = 10_000)]
        samples: usize,
    },

    /// Generate pairs with a target correlation
    Correlated {
        /// Target correlation in [-1, 1]
        #[arg(long, default_value_t = 0.8, allow_negative_numbers = true)]
        r: f64,
        #[arg(long, default_value_t = 200)]
        size: usize,
    },

    /// Answer a website endpoint with its query string
    ///
    /// Example: `query /api/normal-distribution "mean=2&std=0.5&size=100"`
    Query {
        /// Endpoint path, e.g. /api/poisson-distribution
        endpoint: String,
        /// Query string without the leading `?`
        #[arg(default_value = "")]
        query: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<SamplingConfig> {
    let config = match &cli.config {
        Some(path) => SamplingConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SamplingConfig::default(),
    };
    Ok(config.with_seed(cli.seed))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let service = SamplingService::new(load_config(&cli)?);
    log::debug!("configuration: {:?}", service.config());

    let draw = |kind| service.handle(&SampleRequest::new(kind));
    let result = match cli.command {
        Commands::Normal { mean, std, size } => draw(SampleKind::Normal { mean, std, size })?,
        Commands::Binomial { n, p, size } => draw(SampleKind::Binomial { n, p, size })?,
        Commands::Poisson { lambda, size } => draw(SampleKind::Poisson { lambda, size })?,
        Commands::Pi { samples } => draw(SampleKind::MonteCarloPi { samples })?,
        Commands::Correlated { r, size } => draw(SampleKind::Correlated { r, size })?,
        Commands::Query { endpoint, query } => service.handle_query(&endpoint, &query)?,
    };

    println!("{}", result.to_json(cli.pretty)?);
    Ok(())
}
