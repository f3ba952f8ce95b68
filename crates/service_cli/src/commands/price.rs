//! Price command implementation
//!
//! Prices the configured option on a single worker and compares the
//! estimate with the Black-Scholes price.

use pricer_pricing::mc::estimate_serial;
use tracing::info;

use super::{report_estimate, CsvTarget};
use crate::config::PricerConfig;
use crate::output;
use crate::report::RunInfo;
use crate::Result;

/// Run the price command
pub fn run(config: &PricerConfig, validate: bool, csv: Option<CsvTarget<'_>>) -> Result<()> {
    let params = config.pricing_parameters()?;
    let request = config.sample_request(config.simulation.samples)?;

    info!("Starting serial pricing...");
    info!("  Samples: {}", request.total_samples());
    info!("  Seed: {}", request.seed());
    info!("  Strategy: {}", request.strategy());

    output::print_banner("Monte Carlo European option pricing (serial)");
    output::print_parameters(&params);

    let result = estimate_serial(&params, &request)?;
    report_estimate("serial", 1, &params, &result, &RunInfo::new(&request), csv, validate)?;

    info!("Pricing complete");
    Ok(())
}
