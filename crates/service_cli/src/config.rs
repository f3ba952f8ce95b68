//! Run configuration management
//!
//! Handles loading configuration from a TOML file, `MCGBM_*` environment
//! variables and command-line arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values

use std::path::Path;
use std::str::FromStr;

use pricer_core::types::{OptionType, ParameterDomainError, PricingParameters};
use pricer_pricing::mc::{
    OddSamplePolicy, SampleCountError, SampleRequest, VarianceReduction, DEFAULT_SEED,
};
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid option type: {0}. Must be one of: call, put")]
    InvalidOptionType(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Root rank {root} outside a group of {workers} workers")]
    RootOutOfRange { root: usize, workers: usize },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Parses `call` or `put`, case-insensitively.
pub fn parse_option_type(s: &str) -> Result<OptionType, ConfigError> {
    match s.to_lowercase().as_str() {
        "call" | "c" => Ok(OptionType::Call),
        "put" | "p" => Ok(OptionType::Put),
        _ => Err(ConfigError::InvalidOptionType(s.to_string())),
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[option]` section: the contract and its market
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionConfig {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub volatility: f64,
    pub option_type: OptionType,
}

impl Default for OptionConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            volatility: 0.2,
            option_type: OptionType::Call,
        }
    }
}

/// `[simulation]` section: sampling and worker group
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub samples: usize,
    pub seed: u64,
    pub antithetic: bool,
    /// Reject odd antithetic counts instead of rounding up
    pub reject_odd: bool,
    pub workers: usize,
    pub root: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            samples: 1_000_000,
            seed: DEFAULT_SEED,
            antithetic: false,
            reject_odd: false,
            workers: 4,
            root: 0,
        }
    }
}

/// Full `mcgbm` configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricerConfig {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    pub option: OptionConfig,
    pub simulation: SimulationConfig,
}

/// Command-line overrides; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub maturity: Option<f64>,
    pub rate: Option<f64>,
    pub volatility: Option<f64>,
    pub option_type: Option<OptionType>,
    pub samples: Option<usize>,
    pub seed: Option<u64>,
    pub antithetic: Option<bool>,
    pub workers: Option<usize>,
    pub root: Option<usize>,
    pub log_level: Option<String>,
}

fn parse_env<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}

impl PricerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override with `MCGBM_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MCGBM_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&v)?;
        }
        if let Some(v) = lookup("MCGBM_SPOT") {
            self.option.spot = parse_env("MCGBM_SPOT", v)?;
        }
        if let Some(v) = lookup("MCGBM_STRIKE") {
            self.option.strike = parse_env("MCGBM_STRIKE", v)?;
        }
        if let Some(v) = lookup("MCGBM_MATURITY") {
            self.option.maturity = parse_env("MCGBM_MATURITY", v)?;
        }
        if let Some(v) = lookup("MCGBM_RATE") {
            self.option.rate = parse_env("MCGBM_RATE", v)?;
        }
        if let Some(v) = lookup("MCGBM_VOLATILITY") {
            self.option.volatility = parse_env("MCGBM_VOLATILITY", v)?;
        }
        if let Some(v) = lookup("MCGBM_OPTION_TYPE") {
            self.option.option_type = parse_option_type(&v)?;
        }
        if let Some(v) = lookup("MCGBM_SAMPLES") {
            self.simulation.samples = parse_env("MCGBM_SAMPLES", v)?;
        }
        if let Some(v) = lookup("MCGBM_SEED") {
            self.simulation.seed = parse_env("MCGBM_SEED", v)?;
        }
        if let Some(v) = lookup("MCGBM_ANTITHETIC") {
            self.simulation.antithetic = parse_flag("MCGBM_ANTITHETIC", v)?;
        }
        if let Some(v) = lookup("MCGBM_WORKERS") {
            self.simulation.workers = parse_env("MCGBM_WORKERS", v)?;
        }
        if let Some(v) = lookup("MCGBM_ROOT") {
            self.simulation.root = parse_env("MCGBM_ROOT", v)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &Overrides) -> Result<(), ConfigError> {
        let option = &mut self.option;
        option.spot = cli.spot.unwrap_or(option.spot);
        option.strike = cli.strike.unwrap_or(option.strike);
        option.maturity = cli.maturity.unwrap_or(option.maturity);
        option.rate = cli.rate.unwrap_or(option.rate);
        option.volatility = cli.volatility.unwrap_or(option.volatility);
        option.option_type = cli.option_type.unwrap_or(option.option_type);

        let simulation = &mut self.simulation;
        simulation.samples = cli.samples.unwrap_or(simulation.samples);
        simulation.seed = cli.seed.unwrap_or(simulation.seed);
        simulation.antithetic = cli.antithetic.unwrap_or(simulation.antithetic);
        simulation.workers = cli.workers.unwrap_or(simulation.workers);
        simulation.root = cli.root.unwrap_or(simulation.root);

        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let simulation = &self.simulation;
        if simulation.samples == 0 {
            return Err(ConfigError::InvalidValue {
                name: "samples",
                value: "0".to_string(),
            });
        }
        if simulation.workers == 0 {
            return Err(ConfigError::InvalidValue {
                name: "workers",
                value: "0".to_string(),
            });
        }
        if simulation.root >= simulation.workers {
            return Err(ConfigError::RootOutOfRange {
                root: simulation.root,
                workers: simulation.workers,
            });
        }
        Ok(())
    }

    /// Variance-reduction strategy selected by the configuration
    pub fn strategy(&self) -> VarianceReduction {
        if self.simulation.antithetic {
            VarianceReduction::Antithetic
        } else {
            VarianceReduction::Plain
        }
    }

    /// Validated option parameters
    pub fn pricing_parameters(&self) -> Result<PricingParameters, ParameterDomainError> {
        let o = &self.option;
        PricingParameters::with_option_type(
            o.spot,
            o.strike,
            o.maturity,
            o.rate,
            o.volatility,
            o.option_type,
        )
    }

    /// Validated request for `samples` total samples
    pub fn sample_request(&self, samples: usize) -> Result<SampleRequest, SampleCountError> {
        let odd_policy = if self.simulation.reject_odd {
            OddSamplePolicy::Reject
        } else {
            OddSamplePolicy::RoundUp
        };
        SampleRequest::builder()
            .total_samples(samples)
            .seed(self.simulation.seed)
            .strategy(self.strategy())
            .odd_policy(odd_policy)
            .build()
    }
}

/// Build configuration from all sources
pub fn build_config(
    config_file: Option<&Path>,
    cli: &Overrides,
) -> Result<PricerConfig, ConfigError> {
    let mut config = match config_file {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::default(),
    };
    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
