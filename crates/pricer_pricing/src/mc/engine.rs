//! Estimation entry points.
//!
//! - [`estimate_serial`]: one worker, no collectives
//! - [`estimate_distributed`]: one member of a worker group; the result
//!   appears on the root only
//! - [`estimate_distributed_all`]: as above, with the root's result fanned
//!   out to every member
//! - [`estimate_parallel`]: runs a whole in-process group and returns the
//!   root's result
//!
//! All four share the same shard simulation and finalisation, so a group
//! of one reproduces the serial estimate exactly.

use std::time::{Duration, Instant};

use pricer_core::types::PricingParameters;
use tracing::{debug, info};

use super::config::SampleRequest;
use super::error::EstimationError;
use super::estimator::{finalise, EstimationResult};
use super::local_group::run_local_group;
use super::reducer::{check_root, CollectiveReducer};
use super::shard::WorkShard;
use super::stats::GlobalStatistics;
use super::variance::simulate_payoffs;

/// Prices the option on the calling thread.
///
/// Draws the whole request from the stream seeded with the request's base
/// seed. Timing covers simulation only.
///
/// # Errors
///
/// Only [`EstimationError::AggregationDomain`], which a validated request
/// cannot trigger.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingParameters;
/// use pricer_pricing::mc::{estimate_serial, SampleRequest};
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let request = SampleRequest::builder().total_samples(100_000).seed(42).build().unwrap();
///
/// let result = estimate_serial(&params, &request).unwrap();
/// assert!((result.price - 10.45).abs() < 5.0 * result.std_error);
/// ```
pub fn estimate_serial(
    params: &PricingParameters,
    request: &SampleRequest,
) -> Result<EstimationResult, EstimationError> {
    let shard = WorkShard::serial(request);
    let start = Instant::now();
    let partial = simulate_payoffs(
        params,
        request.strategy(),
        shard.seed(),
        shard.local_samples(),
    );
    let elapsed = start.elapsed();

    let result = finalise(&partial.into(), params, request.strategy(), elapsed)?;
    info!(
        samples = result.sample_count,
        strategy = %request.strategy(),
        price = result.price,
        std_error = result.std_error,
        elapsed_secs = result.elapsed_secs(),
        "Serial estimate complete"
    );
    Ok(result)
}

/// Prices the option as one member of a worker group.
///
/// Every member calls this with its own shard. The sequence is: barrier,
/// simulate the shard, sum-reduce count, sum and sum of squares to `root`,
/// barrier. Elapsed time runs from the first barrier to the second.
///
/// Returns `Some(result)` on `root` and `None` elsewhere.
///
/// # Errors
///
/// - [`EstimationError::ShardMismatch`] if `shard` is not this member's
///   share of `request` for the reducer's group
/// - [`EstimationError::Collective`] if `root` is outside the group or a
///   collective fails
/// - [`EstimationError::AggregationDomain`] on the root if nothing was
///   sampled
pub fn estimate_distributed<R>(
    params: &PricingParameters,
    request: &SampleRequest,
    shard: &WorkShard,
    reducer: &R,
    root: usize,
) -> Result<Option<EstimationResult>, EstimationError>
where
    R: CollectiveReducer + ?Sized,
{
    let (stats, elapsed) = reduce_shard(params, request, shard, reducer, root)?;
    match stats {
        Some(stats) => {
            let result = finalise(&stats, params, request.strategy(), elapsed)?;
            info!(
                workers = reducer.size(),
                samples = result.sample_count,
                strategy = %request.strategy(),
                price = result.price,
                std_error = result.std_error,
                elapsed_secs = result.elapsed_secs(),
                "Distributed estimate complete"
            );
            Ok(Some(result))
        }
        None => Ok(None),
    }
}

/// Like [`estimate_distributed`], but every member receives the result.
///
/// After finalising, the root broadcasts a status flag followed by the
/// result fields. A root that fails to finalise sends a failure flag, and
/// the other members return [`EstimationError::RootFailed`].
///
/// # Errors
///
/// As [`estimate_distributed`], plus `RootFailed` on non-root members.
pub fn estimate_distributed_all<R>(
    params: &PricingParameters,
    request: &SampleRequest,
    shard: &WorkShard,
    reducer: &R,
    root: usize,
) -> Result<EstimationResult, EstimationError>
where
    R: CollectiveReducer + ?Sized,
{
    let (stats, elapsed) = reduce_shard(params, request, shard, reducer, root)?;

    let at_root = stats
        .map(|stats| finalise(&stats, params, request.strategy(), elapsed))
        .transpose();
    let flag = reducer.broadcast(if at_root.is_ok() { 1.0 } else { 0.0 }, root)?;

    let own = at_root?;
    if flag == 0.0 {
        return Err(EstimationError::RootFailed { root });
    }

    let field = |select: fn(&EstimationResult) -> f64| -> Result<f64, EstimationError> {
        let value = own.as_ref().map(select).unwrap_or(0.0);
        Ok(reducer.broadcast(value, root)?)
    };
    let price = field(|r| r.price)?;
    let std_error = field(|r| r.std_error)?;
    let elapsed_secs = field(|r| r.elapsed_secs())?;
    let sample_count = field(|r| r.sample_count as f64)?;

    // The root keeps its own exact values
    Ok(own.unwrap_or_else(|| {
        EstimationResult::new(
            price,
            std_error,
            Duration::from_secs_f64(elapsed_secs.max(0.0)),
            sample_count as u64,
        )
    }))
}

/// Prices the option on an in-process group of `worker_count` threads.
///
/// Validates the partition up front, runs [`estimate_distributed`] on
/// every rank and returns the root's result. If any worker fails, the
/// whole run fails with the first error that is not merely a consequence
/// of that failure.
///
/// # Errors
///
/// - [`EstimationError::SampleCount`] if the request cannot be split over
///   `worker_count` workers
/// - [`EstimationError::Collective`] if `root` is outside the group or the
///   worker threads cannot be started
/// - Any error raised by a worker
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingParameters;
/// use pricer_pricing::mc::{estimate_parallel, estimate_serial, SampleRequest};
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let request = SampleRequest::builder().total_samples(10_000).build().unwrap();
///
/// // A group of one reproduces the serial estimate
/// let parallel = estimate_parallel(&params, &request, 1, 0).unwrap();
/// let serial = estimate_serial(&params, &request).unwrap();
/// assert_eq!(parallel.price, serial.price);
/// ```
pub fn estimate_parallel(
    params: &PricingParameters,
    request: &SampleRequest,
    worker_count: usize,
    root: usize,
) -> Result<EstimationResult, EstimationError> {
    let shards = WorkShard::partition(request, worker_count)?;
    check_root(root, worker_count)?;

    let outcomes = run_local_group(worker_count, |comm| {
        estimate_distributed(params, request, &shards[comm.rank()], comm, root)
    })?;

    root_result(outcomes, root)
}

/// Picks the root's result out of a group run.
fn root_result(
    outcomes: Vec<Result<Option<EstimationResult>, EstimationError>>,
    root: usize,
) -> Result<EstimationResult, EstimationError> {
    let mut first_error: Option<EstimationError> = None;
    let mut result = None;
    for (rank, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(Some(r)) if rank == root => result = Some(r),
            Ok(_) => {}
            Err(err) => {
                let replace = match &first_error {
                    None => true,
                    Some(current) => current.is_secondary() && !err.is_secondary(),
                };
                if replace {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => result.ok_or(EstimationError::RootFailed { root }),
    }
}

/// Simulates this member's shard and reduces the statistics to `root`.
///
/// Returns the global statistics on the root, `None` elsewhere, together
/// with the time between the opening and closing barriers.
fn reduce_shard<R>(
    params: &PricingParameters,
    request: &SampleRequest,
    shard: &WorkShard,
    reducer: &R,
    root: usize,
) -> Result<(Option<GlobalStatistics>, Duration), EstimationError>
where
    R: CollectiveReducer + ?Sized,
{
    check_shard(request, shard, reducer)?;
    check_root(root, reducer.size())?;

    reducer.barrier()?;
    let start = Instant::now();

    let partial = simulate_payoffs(
        params,
        request.strategy(),
        shard.seed(),
        shard.local_samples(),
    );
    debug!(
        rank = shard.rank(),
        seed = shard.seed(),
        observations = partial.count(),
        "Shard simulated"
    );

    let count = reducer.reduce_sum(partial.count() as f64, root)?;
    let sum = reducer.reduce_sum(partial.sum(), root)?;
    let sum_of_squares = reducer.reduce_sum(partial.sum_of_squares(), root)?;

    reducer.barrier()?;
    let elapsed = start.elapsed();

    let stats = match (count, sum, sum_of_squares) {
        (Some(count), Some(sum), Some(sum_of_squares)) => {
            Some(GlobalStatistics::new(count as u64, sum, sum_of_squares))
        }
        _ => None,
    };
    Ok((stats, elapsed))
}

fn check_shard<R>(
    request: &SampleRequest,
    shard: &WorkShard,
    reducer: &R,
) -> Result<(), EstimationError>
where
    R: CollectiveReducer + ?Sized,
{
    let rank = reducer.rank();
    let mismatch = |reason: String| EstimationError::ShardMismatch { rank, reason };

    if shard.rank() != rank || shard.worker_count() != reducer.size() {
        return Err(mismatch(format!(
            "shard is rank {} of {}, reducer is rank {} of {}",
            shard.rank(),
            shard.worker_count(),
            rank,
            reducer.size()
        )));
    }
    let expected = WorkShard::for_rank(request, rank, reducer.size())?;
    if expected != *shard {
        return Err(mismatch(format!(
            "expected {} samples from seed {}, got {} samples from seed {}",
            expected.local_samples(),
            expected.seed(),
            shard.local_samples(),
            shard.seed()
        )));
    }
    Ok(())
}
