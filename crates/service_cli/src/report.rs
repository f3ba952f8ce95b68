//! CSV result records.
//!
//! Every command can append its results to a CSV file. The header is written
//! when the file is new, empty or being overwritten, so repeated runs build
//! up a single table.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::Command;

use pricer_core::analytical::ValidationReport;
use pricer_core::types::PricingParameters;
use pricer_pricing::mc::{EstimationResult, SampleRequest, VarianceReduction};
use serde::Serialize;

use crate::analysis::ScalingPoint;
use crate::Result;

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Short hash of the checked-out commit, `unknown` outside a git tree.
pub fn git_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().chars().take(8).collect::<String>())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Run provenance shared by every record of one invocation.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub seed: u64,
    pub strategy: VarianceReduction,
    pub git_commit: String,
}

impl RunInfo {
    pub fn new(request: &SampleRequest) -> Self {
        Self {
            seed: request.seed(),
            strategy: request.strategy(),
            git_commit: git_commit(),
        }
    }
}

/// One priced run compared against the analytical price.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateRecord {
    pub timestamp: String,
    pub method: String,
    pub option_type: String,
    pub n_samples: u64,
    pub n_ranks: usize,
    pub samples_per_rank: u64,
    #[serde(rename = "S0")]
    pub spot: f64,
    #[serde(rename = "K")]
    pub strike: f64,
    #[serde(rename = "T")]
    pub maturity: f64,
    pub r: f64,
    pub sigma: f64,
    pub mc_price: f64,
    pub mc_stderr: f64,
    pub bs_price: f64,
    pub abs_error: f64,
    pub rel_error_pct: f64,
    pub elapsed_sec: f64,
    pub throughput_samples_per_sec: f64,
    pub throughput_per_rank: f64,
    pub antithetic: bool,
    pub seed: u64,
    pub git_commit: String,
}

impl EstimateRecord {
    pub fn new(
        method: &str,
        workers: usize,
        params: &PricingParameters,
        result: &EstimationResult,
        report: &ValidationReport,
        info: &RunInfo,
    ) -> Self {
        let ranks = workers.max(1);
        let throughput = result.throughput();
        Self {
            timestamp: timestamp(),
            method: method.to_string(),
            option_type: params.option_type().to_string(),
            n_samples: result.sample_count,
            n_ranks: workers,
            samples_per_rank: result.sample_count / ranks as u64,
            spot: params.spot(),
            strike: params.strike(),
            maturity: params.maturity(),
            r: params.rate(),
            sigma: params.volatility(),
            mc_price: result.price,
            mc_stderr: result.std_error,
            bs_price: report.reference,
            abs_error: report.abs_error,
            rel_error_pct: report.rel_error_pct,
            elapsed_sec: result.elapsed_secs(),
            throughput_samples_per_sec: throughput,
            throughput_per_rank: throughput / ranks as f64,
            antithetic: info.strategy == VarianceReduction::Antithetic,
            seed: info.seed,
            git_commit: info.git_commit.clone(),
        }
    }
}

/// One worker count of a strong or weak scaling study.
#[derive(Debug, Clone, Serialize)]
pub struct ScalingRecord {
    pub timestamp: String,
    pub mode: String,
    pub n_ranks: usize,
    pub n_samples: u64,
    pub samples_per_rank: u64,
    pub elapsed_sec: f64,
    pub speedup: f64,
    pub efficiency: f64,
    pub mc_price: f64,
    pub mc_stderr: f64,
    pub antithetic: bool,
    pub seed: u64,
    pub git_commit: String,
}

impl ScalingRecord {
    pub fn new(mode: &str, point: &ScalingPoint, result: &EstimationResult, info: &RunInfo) -> Self {
        Self {
            timestamp: timestamp(),
            mode: mode.to_string(),
            n_ranks: point.workers,
            n_samples: result.sample_count,
            samples_per_rank: result.sample_count / point.workers.max(1) as u64,
            elapsed_sec: point.elapsed_secs,
            speedup: point.speedup,
            efficiency: point.efficiency,
            mc_price: result.price,
            mc_stderr: result.std_error,
            antithetic: info.strategy == VarianceReduction::Antithetic,
            seed: info.seed,
            git_commit: info.git_commit.clone(),
        }
    }
}

/// One sample size of a convergence sweep.
#[derive(Debug, Clone, Serialize)]
pub struct ConvergenceRecord {
    pub timestamp: String,
    pub n_samples: u64,
    pub mc_price: f64,
    pub mc_stderr: f64,
    pub bs_price: f64,
    pub abs_error: f64,
    pub rel_error_pct: f64,
    pub elapsed_sec: f64,
    pub antithetic: bool,
    pub seed: u64,
    pub git_commit: String,
}

impl ConvergenceRecord {
    pub fn new(result: &EstimationResult, report: &ValidationReport, info: &RunInfo) -> Self {
        Self {
            timestamp: timestamp(),
            n_samples: result.sample_count,
            mc_price: result.price,
            mc_stderr: result.std_error,
            bs_price: report.reference,
            abs_error: report.abs_error,
            rel_error_pct: report.rel_error_pct,
            elapsed_sec: result.elapsed_secs(),
            antithetic: info.strategy == VarianceReduction::Antithetic,
            seed: info.seed,
            git_commit: info.git_commit.clone(),
        }
    }
}

/// Writes `records` to `path`, appending unless `overwrite` is set.
///
/// Parent directories are created as needed.
pub fn write_records<R: Serialize>(path: &Path, records: &[R], overwrite: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let has_rows = !overwrite && fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(!overwrite)
        .truncate(overwrite)
        .open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!has_rows)
        .from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = records.len(), "wrote CSV records");
    Ok(())
}
