//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use std::path::Path;

use pricer_core::analytical::{black_scholes_price, RELATIVE_ERROR_THRESHOLD_PCT};
use pricer_core::types::PricingParameters;
use pricer_pricing::mc::EstimationResult;
use tracing::info;

use crate::output;
use crate::report::{self, EstimateRecord, RunInfo};
use crate::{CliError, Result};

pub mod convergence;
pub mod parallel;
pub mod price;
pub mod scaling;

/// Where and how to write CSV results.
#[derive(Debug, Clone, Copy)]
pub struct CsvTarget<'a> {
    pub path: &'a Path,
    pub overwrite: bool,
}

/// Shared tail of `price` and `parallel`: compare with the closed form,
/// print, record and optionally enforce the accuracy threshold.
fn report_estimate(
    method: &str,
    workers: usize,
    params: &PricingParameters,
    result: &EstimationResult,
    info: &RunInfo,
    csv: Option<CsvTarget<'_>>,
    enforce: bool,
) -> Result<()> {
    let validation = result.validate_against(black_scholes_price(params));

    output::print_estimate(result);
    output::print_validation(&validation);
    output::print_separator();

    if let Some(target) = csv {
        let record = EstimateRecord::new(method, workers, params, result, &validation, info);
        report::write_records(target.path, &[record], target.overwrite)?;
        info!("Results written to {}", target.path.display());
    }

    if enforce && !validation.passed() {
        return Err(CliError::ValidationFailed {
            rel_error_pct: validation.rel_error_pct,
            threshold_pct: RELATIVE_ERROR_THRESHOLD_PCT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_pricing::mc::VarianceReduction;
    use std::time::Duration;

    fn params() -> PricingParameters {
        PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    fn info() -> RunInfo {
        RunInfo {
            seed: 42,
            strategy: VarianceReduction::Plain,
            git_commit: "unknown".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_inaccurate_estimate() {
        // Black-Scholes is ~10.4506, so 11.0 is ~5% off
        let result = EstimationResult::new(11.0, 0.01, Duration::from_secs(1), 1000);
        let err = report_estimate("serial", 1, &params(), &result, &info(), None, true).unwrap_err();
        match err {
            CliError::ValidationFailed {
                rel_error_pct,
                threshold_pct,
            } => {
                assert!(rel_error_pct > 5.0 && rel_error_pct < 5.5);
                assert_eq!(threshold_pct, RELATIVE_ERROR_THRESHOLD_PCT);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inaccurate_estimate_passes_without_validate() {
        let result = EstimationResult::new(11.0, 0.01, Duration::from_secs(1), 1000);
        assert!(report_estimate("serial", 1, &params(), &result, &info(), None, false).is_ok());
    }

    #[test]
    fn test_accurate_estimate_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price.csv");
        let target = CsvTarget {
            path: &path,
            overwrite: false,
        };

        let result = EstimationResult::new(10.46, 0.0147, Duration::from_millis(200), 1_000_000);
        report_estimate("parallel", 4, &params(), &result, &info(), Some(target), true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains(",parallel,call,1000000,4,250000,"));
    }

    #[test]
    fn test_price_command_runs_end_to_end() {
        let mut config = crate::config::PricerConfig::default();
        config.simulation.samples = 20_000;
        assert!(price::run(&config, false, None).is_ok());
        assert!(parallel::run(&config, false, None).is_ok());
    }
}
