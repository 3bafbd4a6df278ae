#![deny(missing_docs)]

//! A fixed-size worker thread pool with a shared FIFO job queue.
//!
//! A [`ThreadPool`] owns a fixed set of long-lived worker threads that pull
//! jobs off one unbounded queue and run them to completion. Shutdown is
//! drain-then-stop: new submissions are refused, already-accepted jobs are
//! allowed to finish, and only then do the workers exit.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use workpool::ThreadPool;
//!
//! let pool = ThreadPool::new(4).unwrap();
//! let counter = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..100 {
//!     let counter = Arc::clone(&counter);
//!     pool.spawn(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//! }
//!
//! pool.join();
//! assert_eq!(counter.load(Ordering::SeqCst), 100);
//! ```

mod error;
mod pool;
mod queue;
mod worker;

pub use error::{PoolError, Result};
pub use pool::{ThreadPool, MAX_POOL_SIZE};
