use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use log::{debug, error};

use crate::queue::JobQueue;
use crate::worker;
use crate::{PoolError, Result};

/// Upper bound on the number of worker threads in one pool.
pub const MAX_POOL_SIZE: u32 = 200;

/// Queue and flags guarded by the pool lock.
///
/// All mutations of the queue and all reads of the flags happen under this
/// one lock, which totally orders them across workers and callers.
pub(crate) struct PoolState {
    pub(crate) queue: JobQueue,
    /// Set when teardown begins; no further jobs are accepted.
    pub(crate) dont_accept: bool,
    /// Set once the queue has drained; workers stop dequeuing and exit.
    pub(crate) shutdown: bool,
}

/// Synchronization core shared between the pool handle and its workers.
pub(crate) struct Shared {
    pub(crate) state: Mutex<PoolState>,
    /// Signaled when a job is appended. Workers wait here.
    pub(crate) work_available: Condvar,
    /// Signaled when a pop empties the queue. The shutdown path waits here.
    pub(crate) queue_drained: Condvar,
}

/// A fixed-size pool of worker threads consuming jobs from a shared FIFO
/// queue.
///
/// Jobs are dequeued in strict dispatch order, but with more than one worker
/// their completion order is unconstrained. Dropping the pool (or calling
/// [`join`](ThreadPool::join)) drains the queue, stops the workers, and
/// joins them.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a pool with the given number of worker threads, all spawned
    /// immediately and blocked waiting for work.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidThreadCount`] unless
    /// `1 <= threads <= MAX_POOL_SIZE`. Returns [`PoolError::ThreadSpawn`]
    /// if a worker thread fails to start; workers spawned before the failure
    /// are shut down and joined first.
    pub fn new(threads: u32) -> Result<ThreadPool> {
        if threads == 0 || threads > MAX_POOL_SIZE {
            return Err(PoolError::InvalidThreadCount(threads));
        }

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue: JobQueue::new(),
                dont_accept: false,
                shutdown: false,
            }),
            work_available: Condvar::new(),
            queue_drained: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(threads as usize);
        for id in 0..threads {
            match worker::spawn(id, Arc::clone(&shared)) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    error!("spawning worker {id} failed, tearing down partial pool");
                    let mut partial = ThreadPool { shared, workers };
                    partial.shutdown();
                    partial.join_workers();
                    return Err(PoolError::ThreadSpawn(e));
                }
            }
        }

        Ok(ThreadPool { shared, workers })
    }

    /// Creates a pool with one worker per logical CPU.
    pub fn with_default_size() -> Result<ThreadPool> {
        let threads = (num_cpus::get() as u32).clamp(1, MAX_POOL_SIZE);
        ThreadPool::new(threads)
    }

    /// The number of worker threads in this pool.
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Submits a job to the pool's queue.
    ///
    /// Never blocks: the queue is unbounded. At most one idle worker is
    /// woken per submission. If shutdown has already begun the job is
    /// silently discarded; submission after teardown is a contract no-op,
    /// not an error.
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(mut state) = self.shared.state.lock() else {
            error!("pool lock poisoned, dropping job");
            return;
        };
        if state.dont_accept {
            debug!("pool is shutting down, dropping job");
            return;
        }
        state.queue.push(Box::new(job));
        debug!("job queued, depth {}", state.queue.len());
        self.shared.work_available.notify_one();
    }

    /// Submits a callback with an explicit argument.
    ///
    /// Equivalent to [`spawn`](ThreadPool::spawn) with a closure capturing
    /// `arg`; the argument is moved into the job and handed to `routine` on
    /// whichever worker runs it.
    pub fn dispatch<A, F>(&self, routine: F, arg: A)
    where
        F: FnOnce(A) + Send + 'static,
        A: Send + 'static,
    {
        self.spawn(move || routine(arg));
    }

    /// Stops accepting new jobs, waits for the queue to drain, then signals
    /// every worker to exit.
    ///
    /// Already-accepted jobs run to completion; jobs submitted after this
    /// call begins are discarded. Does not join the workers — use
    /// [`join`](ThreadPool::join) (or drop the pool) for that. Safe to call
    /// more than once.
    pub fn shutdown(&self) {
        let Ok(mut state) = self.shared.state.lock() else {
            error!("pool lock poisoned during shutdown");
            return;
        };
        state.dont_accept = true;
        // A drain signal is no guarantee by itself; re-check until actually
        // empty.
        while !state.queue.is_empty() {
            state = match self.shared.queue_drained.wait(state) {
                Ok(state) => state,
                Err(_) => {
                    error!("pool lock poisoned while waiting for drain");
                    return;
                }
            };
        }
        state.shutdown = true;
        self.shared.work_available.notify_all();
        debug!("shutdown signaled to all workers");
    }

    /// Runs the shutdown protocol and blocks until every worker has exited.
    pub fn join(mut self) {
        self.shutdown();
        self.join_workers();
    }

    fn join_workers(&mut self) {
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("worker thread exited by panic");
            }
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Already torn down by join() or the partial-spawn path.
        if self.workers.is_empty() {
            return;
        }
        self.shutdown();
        self.join_workers();
    }
}
