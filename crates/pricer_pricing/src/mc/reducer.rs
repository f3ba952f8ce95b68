//! Collective communication between workers.
//!
//! [`CollectiveReducer`] is the seam between the estimator and whatever
//! runs the workers. It follows the MPI model: every worker of a group of
//! `size` calls the same collective operations in the same order, and a
//! sum reduction delivers its result to a single root rank.
//!
//! Two implementations ship with the crate:
//! - [`SingleWorker`]: the trivial group of one
//! - [`LocalCommunicator`](super::LocalCommunicator): threads of one process

use super::error::CollectiveError;

/// Collective operations of a worker group.
///
/// Every member must call each operation, in the same order, for the
/// group to make progress. Implementations report a group that can no
/// longer synchronise with [`CollectiveError::Aborted`].
pub trait CollectiveReducer {
    /// This worker's rank in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    /// Blocks until every member has entered the barrier.
    fn barrier(&self) -> Result<(), CollectiveError>;

    /// Sums `value` over all members.
    ///
    /// Returns `Some(total)` on `root` and `None` on every other rank.
    fn reduce_sum(&self, value: f64, root: usize) -> Result<Option<f64>, CollectiveError>;

    /// Sends `value` from `root` to every member.
    ///
    /// The provided implementation performs one reduction per rank, with
    /// only `root` contributing a non-zero value, so every rank receives
    /// the root's value exactly. Implementations with a native broadcast
    /// should override it.
    fn broadcast(&self, value: f64, root: usize) -> Result<f64, CollectiveError> {
        check_root(root, self.size())?;
        let contribution = if self.rank() == root { value } else { 0.0 };
        let mut received = None;
        for target in 0..self.size() {
            if let Some(total) = self.reduce_sum(contribution, target)? {
                received = Some(total);
            }
        }
        received.ok_or(CollectiveError::Aborted)
    }
}

/// Validates a root rank against a group size.
pub(crate) fn check_root(root: usize, size: usize) -> Result<(), CollectiveError> {
    if root < size {
        Ok(())
    } else {
        Err(CollectiveError::RootOutOfRange { root, size })
    }
}

/// Group consisting of a single worker.
///
/// Barriers return immediately and reductions return the worker's own
/// value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleWorker;

impl CollectiveReducer for SingleWorker {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) -> Result<(), CollectiveError> {
        Ok(())
    }

    fn reduce_sum(&self, value: f64, root: usize) -> Result<Option<f64>, CollectiveError> {
        check_root(root, 1)?;
        Ok(Some(value))
    }

    fn broadcast(&self, value: f64, root: usize) -> Result<f64, CollectiveError> {
        check_root(root, 1)?;
        Ok(value)
    }
}
