//! In-process worker group.
//!
//! Runs one worker per thread on a dedicated rayon pool and connects them
//! through shared slots guarded by a generation-counted barrier. A worker
//! that fails (or panics) aborts the group, which wakes every peer blocked
//! in a collective with [`CollectiveError::Aborted`] instead of leaving it
//! waiting forever.
//!
//! Reductions sum the slots in rank order on the root, so a group of a
//! given size always produces bit-identical totals for the same inputs.

use std::sync::{Condvar, Mutex, MutexGuard};

use rayon::ThreadPoolBuilder;

use super::error::CollectiveError;
use super::reducer::{check_root, CollectiveReducer};

#[derive(Debug)]
struct GroupState {
    generation: u64,
    arrived: usize,
    aborted: bool,
    slots: Vec<f64>,
}

/// Shared state of an in-process worker group.
///
/// Obtain per-rank handles with [`communicator`](Self::communicator), or
/// let [`run_local_group`] manage the whole lifecycle.
#[derive(Debug)]
pub struct LocalGroup {
    size: usize,
    state: Mutex<GroupState>,
    turnstile: Condvar,
}

impl LocalGroup {
    /// Creates a group of `size` workers.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            state: Mutex::new(GroupState {
                generation: 0,
                arrived: 0,
                aborted: false,
                slots: vec![0.0; size],
            }),
            turnstile: Condvar::new(),
        }
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Handle for `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not below the group size.
    pub fn communicator(&self, rank: usize) -> LocalCommunicator<'_> {
        assert!(rank < self.size, "rank {rank} outside group of size {}", self.size);
        LocalCommunicator { group: self, rank }
    }

    /// Marks the group as failed and wakes every waiting worker.
    pub fn abort(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.aborted = true;
        }
        self.turnstile.notify_all();
    }

    /// Whether the group has been aborted.
    pub fn is_aborted(&self) -> bool {
        self.state.lock().map(|state| state.aborted).unwrap_or(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, GroupState>, CollectiveError> {
        let state = self.state.lock().map_err(|_| CollectiveError::Aborted)?;
        if state.aborted {
            return Err(CollectiveError::Aborted);
        }
        Ok(state)
    }

    fn wait(&self) -> Result<(), CollectiveError> {
        let mut state = self.lock()?;
        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.size {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.turnstile.notify_all();
            return Ok(());
        }
        while state.generation == generation && !state.aborted {
            state = self
                .turnstile
                .wait(state)
                .map_err(|_| CollectiveError::Aborted)?;
        }
        if state.generation == generation {
            Err(CollectiveError::Aborted)
        } else {
            Ok(())
        }
    }
}

/// One worker's view of a [`LocalGroup`].
#[derive(Clone, Copy, Debug)]
pub struct LocalCommunicator<'a> {
    group: &'a LocalGroup,
    rank: usize,
}

impl LocalCommunicator<'_> {
    /// Aborts the whole group.
    pub fn abort(&self) {
        self.group.abort();
    }
}

impl CollectiveReducer for LocalCommunicator<'_> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.group.size
    }

    fn barrier(&self) -> Result<(), CollectiveError> {
        self.group.wait()
    }

    fn reduce_sum(&self, value: f64, root: usize) -> Result<Option<f64>, CollectiveError> {
        check_root(root, self.group.size)?;
        self.group.lock()?.slots[self.rank] = value;
        // All contributions written
        self.group.wait()?;
        let total = if self.rank == root {
            Some(self.group.lock()?.slots.iter().sum())
        } else {
            None
        };
        // Root has read before anyone writes the next collective
        self.group.wait()?;
        Ok(total)
    }

    fn broadcast(&self, value: f64, root: usize) -> Result<f64, CollectiveError> {
        check_root(root, self.group.size)?;
        if self.rank == root {
            self.group.lock()?.slots[root] = value;
        }
        self.group.wait()?;
        let received = self.group.lock()?.slots[root];
        self.group.wait()?;
        Ok(received)
    }
}

/// Aborts the group if the worker unwinds.
struct AbortOnPanic<'a>(&'a LocalGroup);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abort();
        }
    }
}

/// Runs `worker` once per rank of a fresh group of `worker_count` threads.
///
/// Returns every worker's outcome in rank order. A worker returning `Err`
/// aborts the group, so its peers fail their next collective instead of
/// blocking. A panicking worker aborts the group and the panic is resumed
/// on the caller once all workers have returned.
///
/// # Errors
///
/// Returns [`CollectiveError::Runtime`] if the worker threads cannot be
/// started.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{run_local_group, CollectiveReducer};
///
/// let outcomes = run_local_group(4, |comm| {
///     comm.reduce_sum(comm.rank() as f64, 0)
/// })
/// .unwrap();
///
/// assert_eq!(outcomes[0], Ok(Some(6.0)));
/// assert_eq!(outcomes[1], Ok(None));
/// ```
pub fn run_local_group<T, E, F>(
    worker_count: usize,
    worker: F,
) -> Result<Vec<Result<T, E>>, CollectiveError>
where
    F: Fn(&LocalCommunicator<'_>) -> Result<T, E> + Sync,
    T: Send,
    E: Send,
{
    if worker_count == 0 {
        return Ok(Vec::new());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .thread_name(|index| format!("mc-worker-{index}"))
        .build()
        .map_err(|e| CollectiveError::Runtime(e.to_string()))?;

    let group = LocalGroup::new(worker_count);
    let outcomes = pool.broadcast(|ctx| {
        let comm = group.communicator(ctx.index());
        let _guard = AbortOnPanic(&group);
        let outcome = worker(&comm);
        if outcome.is_err() {
            group.abort();
        }
        outcome
    });

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_sum_reaches_root_only() {
        let outcomes = run_local_group(5, |comm| comm.reduce_sum(1.5, 2)).unwrap();
        for (rank, outcome) in outcomes.into_iter().enumerate() {
            let expected = if rank == 2 { Some(7.5) } else { None };
            assert_eq!(outcome, Ok(expected));
        }
    }

    #[test]
    fn test_repeated_collectives() {
        let outcomes = run_local_group(3, |comm| {
            let mut totals = Vec::new();
            for round in 0..50 {
                comm.barrier()?;
                let value = (comm.rank() * round) as f64;
                if let Some(total) = comm.reduce_sum(value, 0)? {
                    totals.push(total);
                }
            }
            Ok::<_, CollectiveError>(totals)
        })
        .unwrap();

        let root_totals = outcomes[0].as_ref().unwrap();
        assert_eq!(root_totals.len(), 50);
        for (round, total) in root_totals.iter().enumerate() {
            assert_eq!(*total, (3 * round) as f64);
        }
        assert!(outcomes[1].as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_broadcast_reaches_everyone() {
        let outcomes = run_local_group(4, |comm| {
            let value = if comm.rank() == 1 { 3.25 } else { -1.0 };
            comm.broadcast(value, 1)
        })
        .unwrap();
        assert!(outcomes.iter().all(|outcome| *outcome == Ok(3.25)));
    }

    #[test]
    fn test_failed_worker_aborts_peers() {
        let outcomes = run_local_group(4, |comm| {
            if comm.rank() == 3 {
                return Err(CollectiveError::Runtime("boom".into()));
            }
            comm.barrier()?;
            comm.reduce_sum(1.0, 0)
        })
        .unwrap();

        assert_eq!(outcomes[3], Err(CollectiveError::Runtime("boom".into())));
        for outcome in &outcomes[..3] {
            assert_eq!(*outcome, Err(CollectiveError::Aborted));
        }
    }

    #[test]
    fn test_root_out_of_range() {
        let outcomes = run_local_group(2, |comm| comm.reduce_sum(1.0, 2)).unwrap();
        assert!(outcomes
            .iter()
            .all(|o| *o == Err(CollectiveError::RootOutOfRange { root: 2, size: 2 })));
    }

    #[test]
    fn test_abort_flag() {
        let group = LocalGroup::new(2);
        assert!(!group.is_aborted());
        group.communicator(0).abort();
        assert!(group.is_aborted());
        assert_eq!(group.communicator(1).barrier(), Err(CollectiveError::Aborted));
    }

    #[test]
    fn test_empty_group() {
        let outcomes = run_local_group(0, |_| Ok::<_, CollectiveError>(())).unwrap();
        assert!(outcomes.is_empty());
    }
}
