//! Sharded Monte Carlo estimation of European option prices under GBM.
//!
//! # Architecture
//!
//! ```text
//! SampleRequest ──► WorkShard (per rank: samples, seed = base + rank)
//!                     │
//!                     ▼
//!   NormalDraws ─► GbmTerminal ─► Payoff ─► PartialStatistics   (per worker)
//!                                               │
//!                                   CollectiveReducer::reduce_sum
//!                                               ▼
//!                                 GlobalStatistics ─► finalise ─► EstimationResult
//! ```
//!
//! Each worker streams its observations (payoffs, or antithetic pair
//! averages) into `(count, Σx, Σx²)`; only those three numbers cross worker
//! boundaries. The standard error uses the population variance of the
//! observations in every entry point.
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::PricingParameters;
//! use pricer_pricing::mc::{estimate_parallel, SampleRequest, VarianceReduction};
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let request = SampleRequest::builder()
//!     .total_samples(200_000)
//!     .seed(42)
//!     .strategy(VarianceReduction::Antithetic)
//!     .build()
//!     .unwrap();
//!
//! let result = estimate_parallel(&params, &request, 4, 0).unwrap();
//! assert_eq!(result.sample_count, 200_000);
//! ```

mod config;
mod engine;
mod error;
mod estimator;
mod local_group;
mod paths;
mod payoff;
mod reducer;
mod shard;
mod stats;
mod variance;

pub use config::{
    OddSamplePolicy, SampleRequest, SampleRequestBuilder, VarianceReduction, DEFAULT_SEED,
};
pub use engine::{estimate_distributed, estimate_distributed_all, estimate_parallel, estimate_serial};
pub use error::{CollectiveError, EstimationError, SampleCountError};
pub use estimator::{finalise, EstimationResult};
pub use local_group::{run_local_group, LocalCommunicator, LocalGroup};
pub use paths::{terminal_price, GbmTerminal};
pub use payoff::{call_payoff, put_payoff, Payoff};
pub use reducer::{CollectiveReducer, SingleWorker};
pub use shard::WorkShard;
pub use stats::{GlobalStatistics, PartialStatistics};
pub use variance::simulate_payoffs;
