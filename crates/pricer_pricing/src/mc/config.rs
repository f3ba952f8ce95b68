//! Sample request configuration.
//!
//! A [`SampleRequest`] fixes everything about a run except the option being
//! priced and the shape of the worker group: total sample count, base seed
//! and variance-reduction strategy. Use [`SampleRequest::builder`] to
//! construct one; validation happens at build time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::SampleCountError;

/// Default base seed.
pub const DEFAULT_SEED: u64 = 42;

/// Variance-reduction strategy.
///
/// - `Plain`: one payoff per standard normal draw
/// - `Antithetic`: two payoffs per draw, from `Z` and `-Z`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VarianceReduction {
    /// Independent draws.
    #[default]
    Plain,
    /// Antithetic pairs `(Z, -Z)`.
    Antithetic,
}

impl VarianceReduction {
    /// Number of samples produced by one normal draw.
    ///
    /// This is also the indivisible unit in which samples are shared out
    /// between workers.
    #[inline]
    pub fn samples_per_draw(self) -> usize {
        match self {
            VarianceReduction::Plain => 1,
            VarianceReduction::Antithetic => 2,
        }
    }

    /// Lowercase name as used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            VarianceReduction::Plain => "plain",
            VarianceReduction::Antithetic => "antithetic",
        }
    }
}

impl std::fmt::Display for VarianceReduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with an odd sample count under antithetic sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OddSamplePolicy {
    /// Round up to the next even count and log a warning.
    #[default]
    RoundUp,
    /// Fail with [`SampleCountError::OddAntithetic`].
    Reject,
}

/// Validated request for a Monte Carlo estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SampleRequest, VarianceReduction};
///
/// let request = SampleRequest::builder()
///     .total_samples(1_000_001)
///     .seed(7)
///     .strategy(VarianceReduction::Antithetic)
///     .build()
///     .expect("valid request");
///
/// // Odd antithetic counts are rounded up by default
/// assert_eq!(request.total_samples(), 1_000_002);
/// assert_eq!(request.adjusted_from(), Some(1_000_001));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleRequest {
    total_samples: usize,
    seed: u64,
    strategy: VarianceReduction,
    adjusted_from: Option<usize>,
}

impl SampleRequest {
    /// Creates a new request builder.
    #[inline]
    pub fn builder() -> SampleRequestBuilder {
        SampleRequestBuilder::default()
    }

    /// Total number of payoff samples across all workers.
    #[inline]
    pub fn total_samples(&self) -> usize {
        self.total_samples
    }

    /// Base seed. Worker `r` draws from `seed + r`.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Variance-reduction strategy.
    #[inline]
    pub fn strategy(&self) -> VarianceReduction {
        self.strategy
    }

    /// Count originally asked for, if it was rounded up.
    #[inline]
    pub fn adjusted_from(&self) -> Option<usize> {
        self.adjusted_from
    }

    /// Number of sampling units (draws) in the whole request.
    #[inline]
    pub fn total_draws(&self) -> usize {
        self.total_samples / self.strategy.samples_per_draw()
    }
}

/// Builder for [`SampleRequest`].
#[derive(Clone, Debug)]
pub struct SampleRequestBuilder {
    total_samples: Option<usize>,
    seed: u64,
    strategy: VarianceReduction,
    odd_policy: OddSamplePolicy,
}

impl Default for SampleRequestBuilder {
    fn default() -> Self {
        Self {
            total_samples: None,
            seed: DEFAULT_SEED,
            strategy: VarianceReduction::default(),
            odd_policy: OddSamplePolicy::default(),
        }
    }
}

impl SampleRequestBuilder {
    /// Sets the total number of samples.
    #[inline]
    pub fn total_samples(mut self, total_samples: usize) -> Self {
        self.total_samples = Some(total_samples);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the variance-reduction strategy.
    #[inline]
    pub fn strategy(mut self, strategy: VarianceReduction) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the policy for odd counts under antithetic sampling.
    #[inline]
    pub fn odd_policy(mut self, odd_policy: OddSamplePolicy) -> Self {
        self.odd_policy = odd_policy;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns `SampleCountError` if:
    /// - the sample count is unset or zero
    /// - the strategy is antithetic, the count is odd and the policy is
    ///   [`OddSamplePolicy::Reject`] (or the count cannot be rounded up)
    pub fn build(self) -> Result<SampleRequest, SampleCountError> {
        let requested = match self.total_samples {
            None | Some(0) => return Err(SampleCountError::Zero),
            Some(n) => n,
        };

        let mut total_samples = requested;
        let mut adjusted_from = None;
        if self.strategy == VarianceReduction::Antithetic && requested % 2 == 1 {
            match self.odd_policy {
                OddSamplePolicy::Reject => {
                    return Err(SampleCountError::OddAntithetic { samples: requested })
                }
                OddSamplePolicy::RoundUp => {
                    total_samples = requested
                        .checked_add(1)
                        .ok_or(SampleCountError::OddAntithetic { samples: requested })?;
                    adjusted_from = Some(requested);
                    tracing::warn!(
                        requested,
                        adjusted = total_samples,
                        "Antithetic sampling requires an even sample count; rounding up"
                    );
                }
            }
        }

        Ok(SampleRequest {
            total_samples,
            seed: self.seed,
            strategy: self.strategy,
            adjusted_from,
        })
    }
}
