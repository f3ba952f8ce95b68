//! Error types for the Monte Carlo estimation engine.
//!
//! This module defines structured error types for request validation,
//! collective communication and finalisation. All of them abort the run;
//! none is retried.

use pricer_core::types::ParameterDomainError;
use thiserror::Error;

/// Invalid sample count for the requested run.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SampleCountError {
    /// No samples requested.
    #[error("Invalid sample count 0: must be positive")]
    Zero,

    /// Odd sample count under antithetic sampling with round-up disallowed.
    #[error("Invalid sample count {samples}: antithetic sampling requires an even count")]
    OddAntithetic {
        /// The rejected sample count
        samples: usize,
    },

    /// Not enough sampling units to give every worker a non-empty shard.
    #[error(
        "Invalid sample count {samples}: {workers} workers need at least {workers} units of {unit} sample(s)"
    )]
    FewerSamplesThanWorkers {
        /// Total samples requested
        samples: usize,
        /// Number of workers in the group
        workers: usize,
        /// Samples per sampling unit (1 plain, 2 antithetic)
        unit: usize,
    },

    /// Worker group of size zero.
    #[error("Invalid worker count 0: must be at least 1")]
    NoWorkers,
}

/// Failure of a collective operation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CollectiveError {
    /// Another worker failed; the group can no longer synchronise.
    #[error("Collective aborted: a peer worker failed")]
    Aborted,

    /// Root rank outside the group.
    #[error("Root rank {root} outside group of size {size}")]
    RootOutOfRange {
        /// Requested root rank
        root: usize,
        /// Group size
        size: usize,
    },

    /// Worker runtime could not be started.
    #[error("Worker runtime error: {0}")]
    Runtime(String),
}

/// Top-level estimation error.
///
/// # Examples
/// ```
/// use pricer_pricing::mc::{EstimationError, SampleCountError};
///
/// let err: EstimationError = SampleCountError::Zero.into();
/// assert!(err.to_string().contains("must be positive"));
/// ```
#[derive(Error, Clone, Debug, PartialEq)]
pub enum EstimationError {
    /// Pricing parameters outside their domain.
    #[error(transparent)]
    ParameterDomain(#[from] ParameterDomainError),

    /// Invalid sample count.
    #[error(transparent)]
    SampleCount(#[from] SampleCountError),

    /// Finalisation over an empty aggregate; signals a defect upstream.
    #[error("Aggregation domain error: cannot finalise statistics with count 0")]
    AggregationDomain,

    /// Shard does not match the request or the collective group.
    #[error("Shard mismatch on rank {rank}: {reason}")]
    ShardMismatch {
        /// Rank reporting the mismatch
        rank: usize,
        /// Description of the mismatch
        reason: String,
    },

    /// The root failed to produce a result to fan out.
    #[error("Root rank {root} failed to produce a result")]
    RootFailed {
        /// The root rank
        root: usize,
    },

    /// Collective communication failure.
    #[error(transparent)]
    Collective(#[from] CollectiveError),
}

impl EstimationError {
    /// True for errors that are a consequence of another worker's failure.
    ///
    /// When collecting outcomes of a group run, the primary cause is the
    /// first error for which this returns `false`.
    pub fn is_secondary(&self) -> bool {
        matches!(
            self,
            EstimationError::Collective(CollectiveError::Aborted)
                | EstimationError::RootFailed { .. }
        )
    }
}
