//! Sampling strategies.
//!
//! Turns one worker's shard into streamed statistics over observations.
//! Observations are folded into the aggregate as they are produced; nothing
//! proportional to the shard size is allocated.
//!
//! An observation is a single payoff under plain sampling and the average
//! of an antithetic pair under antithetic sampling. Pair averages are
//! independent of each other, so their spread measures the error of the
//! estimate, which for monotone payoffs such as the call is smaller than
//! that of the same number of independent draws. The mean over pair
//! averages equals the mean over both legs pooled together.

use pricer_core::types::PricingParameters;

use super::config::VarianceReduction;
use super::paths::GbmTerminal;
use super::payoff::Payoff;
use super::stats::PartialStatistics;
use crate::rng::NormalDraws;

/// Simulates `local_samples` payoffs from the stream seeded with `seed`.
///
/// - `Plain` draws `local_samples` variates and records one payoff each.
/// - `Antithetic` draws `local_samples / 2` variates, evaluates the payoff
///   at both `Z` and `-Z` and records the pair average.
///
/// Under antithetic sampling `local_samples` is even; shards built by
/// [`WorkShard`](super::WorkShard) always are.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingParameters;
/// use pricer_pricing::mc::{simulate_payoffs, VarianceReduction};
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let stats = simulate_payoffs(&params, VarianceReduction::Antithetic, 42, 1_000);
/// // 500 pair averages
/// assert_eq!(stats.count(), 500);
/// ```
pub fn simulate_payoffs(
    params: &PricingParameters,
    strategy: VarianceReduction,
    seed: u64,
    local_samples: usize,
) -> PartialStatistics {
    debug_assert!(local_samples % strategy.samples_per_draw() == 0);

    let gbm = GbmTerminal::new(params);
    let payoff = Payoff::new(params);
    let mut stats = PartialStatistics::EMPTY;

    match strategy {
        VarianceReduction::Plain => {
            for z in NormalDraws::new(seed, local_samples) {
                stats.push(payoff.evaluate(gbm.terminal(z)));
            }
        }
        VarianceReduction::Antithetic => {
            for z in NormalDraws::new(seed, local_samples / 2) {
                let up = payoff.evaluate(gbm.terminal(z));
                let down = payoff.evaluate(gbm.terminal(-z));
                stats.push(0.5 * (up + down));
            }
        }
    }

    stats
}
