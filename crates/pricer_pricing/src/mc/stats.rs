//! Streaming observation statistics.
//!
//! Each worker folds its observations into a [`PartialStatistics`] of
//! `(count, sum, sum of squares)`. Partials combine by component-wise
//! addition, which is what the collective reduction computes, and the
//! combined [`GlobalStatistics`] carries everything finalisation needs.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Running `(count, Σx, Σx²)` over one worker's observations.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PartialStatistics;
///
/// let stats: PartialStatistics = [1.0, 2.0, 3.0].into_iter().collect();
/// assert_eq!(stats.count(), 3);
/// assert_eq!(stats.sum(), 6.0);
/// assert_eq!(stats.sum_of_squares(), 14.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartialStatistics {
    count: u64,
    sum: f64,
    sum_of_squares: f64,
}

impl PartialStatistics {
    /// Empty statistics.
    pub const EMPTY: Self = Self {
        count: 0,
        sum: 0.0,
        sum_of_squares: 0.0,
    };

    /// Builds statistics from already accumulated components.
    pub fn from_parts(count: u64, sum: f64, sum_of_squares: f64) -> Self {
        Self {
            count,
            sum,
            sum_of_squares,
        }
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += value * value;
    }

    /// Number of observations seen.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of observations.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sum of squared observations.
    #[inline]
    pub fn sum_of_squares(&self) -> f64 {
        self.sum_of_squares
    }
}

impl Add for PartialStatistics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            count: self.count + rhs.count,
            sum: self.sum + rhs.sum,
            sum_of_squares: self.sum_of_squares + rhs.sum_of_squares,
        }
    }
}

impl AddAssign for PartialStatistics {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for PartialStatistics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::EMPTY, Add::add)
    }
}

impl FromIterator<f64> for PartialStatistics {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::EMPTY;
        iter.into_iter().for_each(|value| stats.push(value));
        stats
    }
}

impl Extend<f64> for PartialStatistics {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push(value));
    }
}

/// Statistics over the whole run, as seen by the root.
///
/// Same components as [`PartialStatistics`]; a separate type so that only
/// combined statistics reach finalisation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalStatistics {
    count: u64,
    sum: f64,
    sum_of_squares: f64,
}

impl GlobalStatistics {
    /// Builds global statistics from reduced components.
    pub fn new(count: u64, sum: f64, sum_of_squares: f64) -> Self {
        Self {
            count,
            sum,
            sum_of_squares,
        }
    }

    /// Combines partials in iteration order.
    pub fn from_partials<I: IntoIterator<Item = PartialStatistics>>(partials: I) -> Self {
        partials.into_iter().sum::<PartialStatistics>().into()
    }

    /// Total number of observations.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Total sum of observations.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Total sum of squared observations.
    #[inline]
    pub fn sum_of_squares(&self) -> f64 {
        self.sum_of_squares
    }

    /// Sample mean, `None` for an empty aggregate.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Population variance `Σx²/n − mean²`, clamped at zero.
    ///
    /// The one-pass formula can come out slightly negative through
    /// cancellation when all observations are (nearly) equal; only that
    /// case is clamped. Non-finite sums give a non-finite variance.
    /// `None` for an empty aggregate.
    pub fn population_variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self.sum_of_squares / self.count as f64 - mean * mean;
        Some(if variance < 0.0 { 0.0 } else { variance })
    }
}

impl From<PartialStatistics> for GlobalStatistics {
    fn from(partial: PartialStatistics) -> Self {
        Self::new(partial.count, partial.sum, partial.sum_of_squares)
    }
}
