//! Work partitioning across a worker group.
//!
//! Samples are shared out in whole sampling units (one draw under plain
//! sampling, one antithetic pair under antithetic sampling). With `U` units
//! and `W` workers, every worker receives `U / W` units and the lowest
//! `U % W` ranks receive one extra, so shard sizes differ by at most one unit
//! and always sum to the request total.

use super::config::SampleRequest;
use super::error::SampleCountError;

/// One worker's share of a request.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SampleRequest, WorkShard};
///
/// let request = SampleRequest::builder().total_samples(10).seed(100).build().unwrap();
/// let shards = WorkShard::partition(&request, 4).unwrap();
///
/// let sizes: Vec<usize> = shards.iter().map(|s| s.local_samples()).collect();
/// assert_eq!(sizes, vec![3, 3, 2, 2]);
/// assert_eq!(shards[3].seed(), 103);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkShard {
    rank: usize,
    worker_count: usize,
    local_samples: usize,
    seed: u64,
}

impl WorkShard {
    /// The single shard of a serial run: rank 0 of a group of one.
    pub fn serial(request: &SampleRequest) -> Self {
        Self {
            rank: 0,
            worker_count: 1,
            local_samples: request.total_samples(),
            seed: request.seed(),
        }
    }

    /// Shard for `rank` in a group of `worker_count`.
    ///
    /// # Errors
    ///
    /// - [`SampleCountError::NoWorkers`] if `worker_count` is zero
    /// - [`SampleCountError::FewerSamplesThanWorkers`] if some worker would
    ///   receive no samples
    ///
    /// `rank` is expected to lie in `0..worker_count`; the engine checks it
    /// against the collective group before simulating.
    pub fn for_rank(
        request: &SampleRequest,
        rank: usize,
        worker_count: usize,
    ) -> Result<Self, SampleCountError> {
        let unit = request.strategy().samples_per_draw();
        let units = request.total_draws();
        if worker_count == 0 {
            return Err(SampleCountError::NoWorkers);
        }
        if units < worker_count {
            return Err(SampleCountError::FewerSamplesThanWorkers {
                samples: request.total_samples(),
                workers: worker_count,
                unit,
            });
        }

        let base = units / worker_count;
        let extra = usize::from(rank < units % worker_count);
        Ok(Self {
            rank,
            worker_count,
            local_samples: (base + extra) * unit,
            seed: request.seed().wrapping_add(rank as u64),
        })
    }

    /// Shards for every rank of a group of `worker_count`, in rank order.
    ///
    /// # Errors
    ///
    /// Same as [`for_rank`](Self::for_rank).
    pub fn partition(
        request: &SampleRequest,
        worker_count: usize,
    ) -> Result<Vec<Self>, SampleCountError> {
        (0..worker_count.max(1))
            .map(|rank| Self::for_rank(request, rank, worker_count))
            .collect()
    }

    /// Rank of the worker owning this shard.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Size of the worker group.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Number of payoff samples this worker produces.
    #[inline]
    pub fn local_samples(&self) -> usize {
        self.local_samples
    }

    /// Seed of this worker's normal stream (base seed plus rank).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::VarianceReduction;

    fn request(total: usize, strategy: VarianceReduction) -> SampleRequest {
        SampleRequest::builder()
            .total_samples(total)
            .seed(42)
            .strategy(strategy)
            .build()
            .unwrap()
    }

    #[test]
    fn test_serial_shard_covers_request() {
        let shard = WorkShard::serial(&request(1000, VarianceReduction::Plain));
        assert_eq!(shard.rank(), 0);
        assert_eq!(shard.worker_count(), 1);
        assert_eq!(shard.local_samples(), 1000);
        assert_eq!(shard.seed(), 42);
    }

    #[test]
    fn test_single_rank_partition_matches_serial() {
        let req = request(1001, VarianceReduction::Plain);
        assert_eq!(WorkShard::for_rank(&req, 0, 1).unwrap(), WorkShard::serial(&req));
    }

    #[test]
    fn test_remainder_goes_to_lowest_ranks() {
        let shards = WorkShard::partition(&request(10, VarianceReduction::Plain), 4).unwrap();
        let sizes: Vec<usize> = shards.iter().map(WorkShard::local_samples).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
        let seeds: Vec<u64> = shards.iter().map(WorkShard::seed).collect();
        assert_eq!(seeds, vec![42, 43, 44, 45]);
    }

    #[test]
    fn test_antithetic_shards_are_even() {
        // 14 samples = 7 pairs over 3 workers: 3, 2, 2 pairs
        let shards =
            WorkShard::partition(&request(14, VarianceReduction::Antithetic), 3).unwrap();
        let sizes: Vec<usize> = shards.iter().map(WorkShard::local_samples).collect();
        assert_eq!(sizes, vec![6, 4, 4]);
    }

    #[test]
    fn test_too_few_samples_rejected() {
        assert_eq!(
            WorkShard::partition(&request(3, VarianceReduction::Plain), 4),
            Err(SampleCountError::FewerSamplesThanWorkers {
                samples: 3,
                workers: 4,
                unit: 1
            })
        );
        // 6 samples are only 3 antithetic pairs
        assert!(WorkShard::partition(&request(6, VarianceReduction::Antithetic), 4).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert_eq!(
            WorkShard::for_rank(&request(10, VarianceReduction::Plain), 0, 0),
            Err(SampleCountError::NoWorkers)
        );
        assert_eq!(
            WorkShard::partition(&request(10, VarianceReduction::Plain), 0),
            Err(SampleCountError::NoWorkers)
        );
    }

    #[test]
    fn test_seed_wraps() {
        let req = SampleRequest::builder()
            .total_samples(4)
            .seed(u64::MAX)
            .build()
            .unwrap();
        assert_eq!(WorkShard::for_rank(&req, 1, 2).unwrap().seed(), 0);
    }
}
