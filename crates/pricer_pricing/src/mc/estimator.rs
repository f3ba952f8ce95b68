//! Finalisation of aggregated statistics into a price estimate.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pricer_core::analytical::{ValidationReport, Z_95};
use pricer_core::types::PricingParameters;

use super::config::VarianceReduction;
use super::error::EstimationError;
use super::stats::GlobalStatistics;

/// Discounted Monte Carlo estimate.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use pricer_pricing::mc::EstimationResult;
///
/// let result = EstimationResult::new(10.45, 0.01, Duration::from_millis(250), 1_000_000);
/// let (lo, hi) = result.confidence_95();
/// assert!(lo < 10.45 && 10.45 < hi);
/// assert_eq!(result.throughput(), 4_000_000.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EstimationResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the price.
    pub std_error: f64,
    /// Wall-clock time of the simulation phase.
    pub elapsed: Duration,
    /// Number of payoff samples behind the estimate.
    pub sample_count: u64,
}

impl EstimationResult {
    /// Creates a result from its components.
    pub fn new(price: f64, std_error: f64, elapsed: Duration, sample_count: u64) -> Self {
        Self {
            price,
            std_error,
            elapsed,
            sample_count,
        }
    }

    /// Symmetric confidence interval `price ± z·std_error`.
    #[inline]
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half_width = z * self.std_error;
        (self.price - half_width, self.price + half_width)
    }

    /// 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> (f64, f64) {
        self.confidence_interval(Z_95)
    }

    /// Elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Samples per second; infinite when no time was measured.
    pub fn throughput(&self) -> f64 {
        self.sample_count as f64 / self.elapsed_secs()
    }

    /// Compares the estimate against a reference price.
    pub fn validate_against(&self, reference: f64) -> ValidationReport {
        ValidationReport::new(self.price, self.std_error, reference)
    }
}

/// Turns global statistics into a discounted price and standard error.
///
/// Over the `m` observations aggregated under `strategy`:
///
/// ```text
/// mean      = Σx / m
/// variance  = max(Σx²/m − mean², 0)
/// price     = e^(−rT) · mean
/// std_error = e^(−rT) · √variance / √m
/// ```
///
/// The variance is the population variance (denominator `m`). The reported
/// sample count is `m` times the samples per observation of the strategy.
///
/// # Errors
///
/// Returns [`EstimationError::AggregationDomain`] if the count is zero.
pub fn finalise(
    stats: &GlobalStatistics,
    params: &PricingParameters,
    strategy: VarianceReduction,
    elapsed: Duration,
) -> Result<EstimationResult, EstimationError> {
    let mean = stats.mean().ok_or(EstimationError::AggregationDomain)?;
    let variance = stats
        .population_variance()
        .ok_or(EstimationError::AggregationDomain)?;
    let discount = params.discount_factor();
    let n = stats.count() as f64;

    Ok(EstimationResult {
        price: discount * mean,
        std_error: discount * variance.sqrt() / n.sqrt(),
        elapsed,
        sample_count: stats
            .count()
            .saturating_mul(strategy.samples_per_draw() as u64),
    })
}
