//! mcgbm - Command Line Front End for Sharded Monte Carlo Pricing
//!
//! Prices a European option under geometric Brownian motion by Monte Carlo,
//! serially or across a local worker group, and checks the estimate against
//! the Black-Scholes closed form.
//!
//! # Commands
//!
//! - `mcgbm price` - Serial estimate with validation
//! - `mcgbm parallel --workers <p>` - Sharded estimate reduced at a root worker
//! - `mcgbm scaling --mode strong|weak` - Timing study over worker counts
//! - `mcgbm convergence` - Standard error against sample count
//!
//! # Configuration
//!
//! Values come from, in increasing priority: defaults, a TOML file given by
//! `--config`, `MCGBM_*` environment variables and command-line flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricer_core::types::OptionType;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod analysis;
mod commands;
mod config;
mod error;
mod output;
mod report;

pub use error::{CliError, Result};

use commands::scaling::ScalingMode;
use commands::CsvTarget;
use config::{LogLevel, Overrides};

/// Monte Carlo GBM option pricer
#[derive(Parser)]
#[command(name = "mcgbm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    option: OptionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Option and sampling overrides shared by every command
#[derive(Args)]
struct OptionArgs {
    /// Initial spot price S0
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Strike price K
    #[arg(long, global = true)]
    strike: Option<f64>,

    /// Time to maturity T in years
    #[arg(long, global = true)]
    maturity: Option<f64>,

    /// Continuously compounded risk-free rate r
    #[arg(long, global = true)]
    rate: Option<f64>,

    /// Volatility sigma
    #[arg(long, global = true)]
    volatility: Option<f64>,

    /// Option type (call, put)
    #[arg(short = 't', long, global = true, value_parser = parse_option_type)]
    option_type: Option<OptionType>,

    /// Total number of Monte Carlo samples
    #[arg(short = 'n', long, global = true)]
    samples: Option<usize>,

    /// Base random seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Use antithetic variates
    #[arg(short, long, global = true, conflicts_with = "no_antithetic")]
    antithetic: bool,

    /// Use plain sampling even if the config or environment enables antithetic variates
    #[arg(long, global = true)]
    no_antithetic: bool,
}

impl OptionArgs {
    fn antithetic_override(&self) -> Option<bool> {
        match (self.antithetic, self.no_antithetic) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// CSV output flags
#[derive(Args)]
struct CsvArgs {
    /// Append results to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the CSV file instead of appending
    #[arg(long, requires = "output")]
    overwrite: bool,
}

impl CsvArgs {
    fn target(&self) -> Option<CsvTarget<'_>> {
        self.output.as_deref().map(|path| CsvTarget {
            path,
            overwrite: self.overwrite,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price on a single worker and compare with Black-Scholes
    Price {
        /// Fail when the relative error exceeds the threshold
        #[arg(long)]
        validate: bool,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Price across a local worker group
    Parallel {
        /// Number of workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Rank that aggregates the result
        #[arg(short, long)]
        root: Option<usize>,

        /// Fail when the relative error exceeds the threshold
        #[arg(long)]
        validate: bool,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Measure strong or weak scaling over worker counts
    Scaling {
        /// Scaling study type
        #[arg(short, long, value_enum, default_value = "strong")]
        mode: ScalingMode,

        /// Comma-separated worker counts
        #[arg(short, long, default_value = "1,2,4,8")]
        workers: String,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Measure standard error against sample count
    Convergence {
        /// Comma-separated sample sizes
        #[arg(long, default_value = "1000,10000,100000,1000000")]
        sizes: String,

        #[command(flatten)]
        csv: CsvArgs,
    },
}

fn parse_option_type(s: &str) -> std::result::Result<OptionType, String> {
    config::parse_option_type(s).map_err(|e| e.to_string())
}

fn parse_list(name: &str, list: &str) -> Result<Vec<usize>> {
    analysis::parse_worker_list(list).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "{} must be a comma-separated list of positive integers, got '{}'",
            name, list
        ))
    })
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str())),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (workers, root) = match &cli.command {
        Commands::Parallel { workers, root, .. } => (*workers, *root),
        _ => (None, None),
    };
    let overrides = Overrides {
        spot: cli.option.spot,
        strike: cli.option.strike,
        maturity: cli.option.maturity,
        rate: cli.option.rate,
        volatility: cli.option.volatility,
        option_type: cli.option.option_type,
        samples: cli.option.samples,
        seed: cli.option.seed,
        antithetic: cli.option.antithetic_override(),
        workers,
        root,
        log_level: cli
            .log_level
            .clone()
            .or_else(|| cli.verbose.then(|| "debug".to_string())),
    };
    let config = config::build_config(cli.config.as_deref(), &overrides)?;

    init_tracing(config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match &cli.command {
        Commands::Price { validate, csv } => commands::price::run(&config, *validate, csv.target()),
        Commands::Parallel { validate, csv, .. } => {
            commands::parallel::run(&config, *validate, csv.target())
        }
        Commands::Scaling { mode, workers, csv } => {
            let counts = parse_list("--workers", workers)?;
            commands::scaling::run(&config, *mode, &counts, csv.target())
        }
        Commands::Convergence { sizes, csv } => {
            let sizes = parse_list("--sizes", sizes)?;
            commands::convergence::run(&config, &sizes, csv.target())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_antithetic_flags() {
        assert_eq!(parse(&["mcgbm", "price"]).option.antithetic_override(), None);
        assert_eq!(
            parse(&["mcgbm", "price", "--antithetic"]).option.antithetic_override(),
            Some(true)
        );
        assert_eq!(
            parse(&["mcgbm", "price", "--no-antithetic"]).option.antithetic_override(),
            Some(false)
        );
        assert!(Cli::try_parse_from(["mcgbm", "price", "--antithetic", "--no-antithetic"]).is_err());
    }
}
