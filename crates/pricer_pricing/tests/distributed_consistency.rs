//! Consistency of distributed estimates with the serial path.
//!
//! Covers the group-of-one equivalence, determinism for a fixed worker
//! count, agreement across worker counts, root placement, result fan-out and
//! failure propagation through the in-process group.

use pricer_core::types::PricingParameters;
use pricer_pricing::mc::{
    estimate_distributed, estimate_distributed_all, estimate_parallel, estimate_serial,
    run_local_group, CollectiveError, CollectiveReducer, EstimationError, SampleCountError,
    SampleRequest, SingleWorker, VarianceReduction, WorkShard,
};

fn params() -> PricingParameters {
    PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

fn request(total: usize, strategy: VarianceReduction) -> SampleRequest {
    SampleRequest::builder()
        .total_samples(total)
        .seed(42)
        .strategy(strategy)
        .build()
        .unwrap()
}

#[test]
fn test_group_of_one_is_bit_identical_to_serial() {
    for strategy in [VarianceReduction::Plain, VarianceReduction::Antithetic] {
        let req = request(100_001, strategy);
        let serial = estimate_serial(&params(), &req).unwrap();

        let local = estimate_parallel(&params(), &req, 1, 0).unwrap();
        assert_eq!(local.price, serial.price);
        assert_eq!(local.std_error, serial.std_error);
        assert_eq!(local.sample_count, serial.sample_count);

        let shard = WorkShard::for_rank(&req, 0, 1).unwrap();
        let single = estimate_distributed(&params(), &req, &shard, &SingleWorker, 0)
            .unwrap()
            .unwrap();
        assert_eq!(single.price, serial.price);
        assert_eq!(single.std_error, serial.std_error);
    }
}

#[test]
fn test_fixed_worker_count_is_deterministic() {
    let req = request(120_000, VarianceReduction::Plain);
    let a = estimate_parallel(&params(), &req, 4, 0).unwrap();
    let b = estimate_parallel(&params(), &req, 4, 0).unwrap();
    assert_eq!(a.price, b.price);
    assert_eq!(a.std_error, b.std_error);
}

#[test]
fn test_four_workers_agree_with_serial() {
    let serial = estimate_serial(&params(), &request(100_000, VarianceReduction::Plain)).unwrap();
    let parallel =
        estimate_parallel(&params(), &request(100_000, VarianceReduction::Plain), 4, 0).unwrap();

    assert_eq!(parallel.sample_count, 100_000);
    assert_ne!(parallel.price, serial.price);
    let combined = (serial.std_error.powi(2) + parallel.std_error.powi(2)).sqrt();
    assert!((parallel.price - serial.price).abs() < 4.0 * combined);
}

#[test]
fn test_uneven_split_keeps_total() {
    let result = estimate_parallel(&params(), &request(10_007, VarianceReduction::Plain), 3, 0)
        .unwrap();
    assert_eq!(result.sample_count, 10_007);

    let result =
        estimate_parallel(&params(), &request(10_006, VarianceReduction::Antithetic), 4, 0)
            .unwrap();
    assert_eq!(result.sample_count, 10_006);
}

#[test]
fn test_non_zero_root() {
    let req = request(40_000, VarianceReduction::Plain);
    let at_zero = estimate_parallel(&params(), &req, 3, 0).unwrap();
    let at_two = estimate_parallel(&params(), &req, 3, 2).unwrap();
    assert_eq!(at_zero.price, at_two.price);
}

#[test]
fn test_result_only_on_root() {
    let req = request(30_000, VarianceReduction::Plain);
    let shards = WorkShard::partition(&req, 3).unwrap();
    let outcomes = run_local_group(3, |comm| {
        estimate_distributed(&params(), &req, &shards[comm.rank()], comm, 1)
    })
    .unwrap();

    assert!(matches!(outcomes[0], Ok(None)));
    assert!(matches!(outcomes[1], Ok(Some(_))));
    assert!(matches!(outcomes[2], Ok(None)));
}

#[test]
fn test_fan_out_delivers_root_result_everywhere() {
    let req = request(30_000, VarianceReduction::Antithetic);
    let shards = WorkShard::partition(&req, 4).unwrap();
    let outcomes = run_local_group(4, |comm| {
        estimate_distributed_all(&params(), &req, &shards[comm.rank()], comm, 0)
    })
    .unwrap();

    let root = outcomes[0].as_ref().unwrap();
    for outcome in &outcomes {
        let result = outcome.as_ref().unwrap();
        assert_eq!(result.price, root.price);
        assert_eq!(result.std_error, root.std_error);
        assert_eq!(result.sample_count, 30_000);
    }
}

#[test]
fn test_failed_worker_fails_the_run() {
    let req = request(30_000, VarianceReduction::Plain);
    let other = request(60_000, VarianceReduction::Plain);
    let outcomes = run_local_group(3, |comm| {
        // Rank 2 is handed a shard of a different request
        let source = if comm.rank() == 2 { &other } else { &req };
        let shard = WorkShard::for_rank(source, comm.rank(), comm.size())?;
        estimate_distributed(&params(), &req, &shard, comm, 0)
    })
    .unwrap();

    assert!(matches!(
        outcomes[2],
        Err(EstimationError::ShardMismatch { rank: 2, .. })
    ));
    for outcome in &outcomes[..2] {
        assert_eq!(
            *outcome,
            Err(EstimationError::Collective(CollectiveError::Aborted))
        );
    }
}

#[test]
fn test_too_few_samples_for_group() {
    assert_eq!(
        estimate_parallel(&params(), &request(3, VarianceReduction::Plain), 4, 0),
        Err(EstimationError::SampleCount(
            SampleCountError::FewerSamplesThanWorkers {
                samples: 3,
                workers: 4,
                unit: 1
            }
        ))
    );
    assert_eq!(
        estimate_parallel(&params(), &request(10, VarianceReduction::Plain), 0, 0),
        Err(EstimationError::SampleCount(SampleCountError::NoWorkers))
    );
}
