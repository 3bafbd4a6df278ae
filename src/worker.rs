use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::pool::Shared;
use crate::queue::Job;

/// Spawns one named worker thread running the consumption loop.
pub(crate) fn spawn(id: u32, shared: Arc<Shared>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("pool-worker-{id}"))
        .spawn(move || worker_loop(id, &shared))
}

fn worker_loop(id: u32, shared: &Shared) {
    while let Some(job) = next_job(id, shared) {
        debug!("worker {id} executing job");
        // Catch panics so a misbehaving job cannot shrink the pool
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("worker {id} job panicked, continuing");
        }
    }
    debug!("worker {id} exiting");
}

/// Blocks until a job can be dequeued, returning `None` on shutdown.
///
/// A wake on `work_available` can be a shutdown broadcast with an empty
/// queue, so the flag is re-tested after every wait. The job is returned
/// with the lock released; callbacks run concurrently across workers.
fn next_job(id: u32, shared: &Shared) -> Option<Job> {
    let mut state = match shared.state.lock() {
        Ok(state) => state,
        Err(_) => {
            error!("worker {id} found pool lock poisoned, exiting");
            return None;
        }
    };

    loop {
        if state.shutdown {
            return None;
        }
        if let Some(job) = state.queue.pop() {
            if state.queue.is_empty() {
                // That was the last accepted job; wake a drain-waiting
                // shutdown.
                shared.queue_drained.notify_one();
            }
            return Some(job);
        }
        state = match shared.work_available.wait(state) {
            Ok(state) => state,
            Err(_) => {
                error!("worker {id} found pool lock poisoned, exiting");
                return None;
            }
        };
    }
}
