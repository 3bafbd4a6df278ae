use std::collections::VecDeque;

/// A unit of work: the callback together with its captured argument.
///
/// Ownership moves into the queue on dispatch and out to exactly one worker.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Unbounded FIFO of pending jobs.
///
/// Never shared directly; the pool always accesses it under its lock, so no
/// synchronization lives here.
pub(crate) struct JobQueue {
    items: VecDeque<Job>,
}

impl JobQueue {
    pub(crate) fn new() -> Self {
        JobQueue {
            items: VecDeque::new(),
        }
    }

    /// Appends a job at the tail. O(1).
    pub(crate) fn push(&mut self, job: Job) {
        self.items.push_back(job);
    }

    /// Removes and returns the head job, or `None` if empty. O(1).
    pub(crate) fn pop(&mut self) -> Option<Job> {
        self.items.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::JobQueue;

    #[test]
    fn pops_in_dispatch_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut queue = JobQueue::new();

        for i in 0..5 {
            let order = Arc::clone(&order);
            queue.push(Box::new(move || order.lock().unwrap().push(i)));
        }
        assert_eq!(queue.len(), 5);

        while let Some(job) = queue.pop() {
            job();
        }

        assert!(queue.is_empty());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut queue = JobQueue::new();
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn length_tracks_push_and_pop() {
        let ran = Arc::new(AtomicUsize::new(0));
        let mut queue = JobQueue::new();

        for _ in 0..3 {
            let ran = Arc::clone(&ran);
            queue.push(Box::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(queue.len(), 3);

        queue.pop().unwrap()();
        assert_eq!(queue.len(), 2);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}
