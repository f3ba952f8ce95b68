//! Convergence command implementation
//!
//! Prices the option at increasing sample sizes and fits the log-log slope
//! of the standard error, which should be close to -0.5.

use pricer_core::analytical::black_scholes_price;
use pricer_core::math::log_log_slope;
use pricer_pricing::mc::estimate_serial;
use tracing::{info, warn};

use super::CsvTarget;
use crate::config::PricerConfig;
use crate::output;
use crate::report::{self, ConvergenceRecord, RunInfo};
use crate::Result;

/// Accepted distance of the fitted slope from -0.5.
const SLOPE_TOLERANCE: f64 = 0.1;

/// Run the convergence command
pub fn run(config: &PricerConfig, sizes: &[usize], csv: Option<CsvTarget<'_>>) -> Result<()> {
    let params = config.pricing_parameters()?;
    let reference = black_scholes_price(&params);

    info!("Starting convergence study...");
    info!("  Sample sizes: {:?}", sizes);

    output::print_banner("Monte Carlo convergence");
    output::print_parameters(&params);
    println!("BS price:   {:.6}", reference);
    println!(
        "{:>14} {:>12} {:>12} {:>12} {:>12}",
        "samples", "price", "std error", "abs error", "time"
    );

    let info = RunInfo {
        seed: config.simulation.seed,
        strategy: config.strategy(),
        git_commit: report::git_commit(),
    };
    let mut records = Vec::with_capacity(sizes.len());
    let mut counts = Vec::with_capacity(sizes.len());
    let mut errors = Vec::with_capacity(sizes.len());
    for &samples in sizes {
        let request = config.sample_request(samples)?;
        let result = estimate_serial(&params, &request)?;
        let validation = result.validate_against(reference);

        println!(
            "{:>14} {:>12.6} {:>12.6} {:>12.6} {:>12}",
            output::format_count(result.sample_count),
            result.price,
            result.std_error,
            validation.abs_error,
            output::format_duration(result.elapsed_secs())
        );

        counts.push(result.sample_count as f64);
        errors.push(result.std_error);
        records.push(ConvergenceRecord::new(&result, &validation, &info));
    }
    output::print_separator();

    match log_log_slope(&counts, &errors) {
        Some(slope) => {
            println!("Std error slope: {:.4} (expected -0.5)", slope);
            if (slope + 0.5).abs() > SLOPE_TOLERANCE {
                warn!(slope, "standard error does not scale as 1/sqrt(N)");
            }
        }
        None => println!("Std error slope: n/a (need at least two sizes)"),
    }

    if let Some(target) = csv {
        report::write_records(target.path, &records, target.overwrite)?;
        info!("Results written to {}", target.path.display());
    }

    info!("Convergence study complete");
    Ok(())
}
