//! Parallel command implementation
//!
//! Shards the sample budget over a local worker group, reduces the partial
//! statistics at the root and compares the estimate with Black-Scholes.

use pricer_pricing::mc::estimate_parallel;
use tracing::info;

use super::{report_estimate, CsvTarget};
use crate::config::PricerConfig;
use crate::output;
use crate::report::RunInfo;
use crate::Result;

/// Run the parallel command
pub fn run(config: &PricerConfig, validate: bool, csv: Option<CsvTarget<'_>>) -> Result<()> {
    let params = config.pricing_parameters()?;
    let request = config.sample_request(config.simulation.samples)?;
    let workers = config.simulation.workers;
    let root = config.simulation.root;

    info!("Starting parallel pricing...");
    info!("  Samples: {}", request.total_samples());
    info!("  Workers: {} (root {})", workers, root);
    info!("  Seed: {}", request.seed());
    info!("  Strategy: {}", request.strategy());

    output::print_banner("Monte Carlo European option pricing (parallel)");
    output::print_parameters(&params);
    println!(
        "Workers:    {} (~{} samples each)",
        workers,
        output::format_count((request.total_samples() / workers) as u64)
    );

    let result = estimate_parallel(&params, &request, workers, root)?;
    report_estimate(
        "parallel",
        workers,
        &params,
        &result,
        &RunInfo::new(&request),
        csv,
        validate,
    )?;

    info!("Pricing complete");
    Ok(())
}
