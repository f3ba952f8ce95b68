//! Scaling command implementation
//!
//! Times the parallel estimator over a list of worker counts.
//!
//! - Strong scaling keeps the total sample count fixed.
//! - Weak scaling keeps the samples per worker fixed, so the total grows
//!   with the group.
//!
//! Both are measured against a single-worker baseline of the same
//! per-run workload definition.

use clap::ValueEnum;
use pricer_pricing::mc::estimate_parallel;
use tracing::info;

use super::CsvTarget;
use crate::analysis::ScalingPoint;
use crate::config::PricerConfig;
use crate::output;
use crate::report::{self, RunInfo, ScalingRecord};
use crate::{CliError, Result};

/// Scaling study type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScalingMode {
    /// Fixed total samples
    Strong,
    /// Fixed samples per worker
    Weak,
}

impl ScalingMode {
    fn as_str(self) -> &'static str {
        match self {
            ScalingMode::Strong => "strong",
            ScalingMode::Weak => "weak",
        }
    }

    fn total_samples(self, samples: usize, workers: usize) -> Option<usize> {
        match self {
            ScalingMode::Strong => Some(samples),
            ScalingMode::Weak => samples.checked_mul(workers),
        }
    }
}

/// Run the scaling command
pub fn run(
    config: &PricerConfig,
    mode: ScalingMode,
    worker_counts: &[usize],
    csv: Option<CsvTarget<'_>>,
) -> Result<()> {
    let params = config.pricing_parameters()?;
    let samples = config.simulation.samples;

    info!("Starting {} scaling study...", mode.as_str());
    info!("  Samples: {}", samples);
    info!("  Worker counts: {:?}", worker_counts);

    output::print_banner(&format!("{} scaling", mode.as_str()));
    output::print_parameters(&params);

    let baseline_request = config.sample_request(samples)?;
    let baseline = estimate_parallel(&params, &baseline_request, 1, 0)?;
    let baseline_secs = baseline.elapsed_secs();
    info!("  Baseline (1 worker): {}", output::format_duration(baseline_secs));

    println!(
        "{:>8} {:>14} {:>12} {:>9} {:>10} {:>12}",
        "workers", "samples", "time", "speedup", "efficiency", "price"
    );

    let info = RunInfo::new(&baseline_request);
    let mut records = Vec::with_capacity(worker_counts.len());
    for &workers in worker_counts {
        let total = mode.total_samples(samples, workers).ok_or_else(|| {
            CliError::InvalidArgument(format!("{} samples x {} workers overflows", samples, workers))
        })?;
        let request = config.sample_request(total)?;
        let result = estimate_parallel(&params, &request, workers, 0)?;

        // Weak scaling: p workers doing p times the baseline work
        let reference_secs = match mode {
            ScalingMode::Strong => baseline_secs,
            ScalingMode::Weak => baseline_secs * workers as f64,
        };
        let point = ScalingPoint::new(workers, result.elapsed_secs(), reference_secs);

        println!(
            "{:>8} {:>14} {:>12} {:>9.2} {:>9.1}% {:>12.6}",
            workers,
            output::format_count(result.sample_count),
            output::format_duration(point.elapsed_secs),
            point.speedup,
            point.efficiency * 100.0,
            result.price
        );
        records.push(ScalingRecord::new(mode.as_str(), &point, &result, &info));
    }
    output::print_separator();

    if let Some(target) = csv {
        report::write_records(target.path, &records, target.overwrite)?;
        info!("Results written to {}", target.path.display());
    }

    info!("Scaling study complete");
    Ok(())
}
