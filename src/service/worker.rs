//! Generic worker pool
//!
//! One fixed-size set of worker threads drains one [`ServiceQueue`] for the
//! duration of one lifecycle phase. The per-role behavior lives in a handler
//! closure, so the entrance gate, bars, food trucks, restroom stalls and the
//! first-aid unit all share this single execution shape.
//!
//! A handler error is a worker fault: it is logged and counted, the item is
//! considered failed rather than silently lost, and the worker keeps
//! serving. One bad item must never stall a pool.

use crate::service::ServiceQueue;
use crate::simulation::{ShutdownToken, SimulationError, SimulationResult};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Counters a pool reports once joined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolOutcome {
    /// Items handled successfully
    pub processed: u64,
    /// Items whose handler returned an error
    pub failed: u64,
}

impl PoolOutcome {
    fn merge(&mut self, other: PoolOutcome) {
        self.processed += other.processed;
        self.failed += other.failed;
    }
}

/// A fixed-size pool of worker threads attached to one queue
#[derive(Debug)]
pub struct WorkerPool {
    name: String,
    handles: Vec<JoinHandle<PoolOutcome>>,
}

impl WorkerPool {
    /// Spawn `workers` threads that drain the queue until it is empty, then
    /// exit.
    ///
    /// Used by the entrance gate, where every item is enqueued before the
    /// pool starts and joining the pool is the admission phase barrier.
    pub fn spawn_until_empty<T, F>(
        name: impl Into<String>,
        workers: usize,
        queue: ServiceQueue<T>,
        handler: F,
    ) -> Self
    where
        T: Send + 'static,
        F: Fn(&str, T) -> SimulationResult<()> + Send + Sync + Clone + 'static,
    {
        let name = name.into();
        let handles = (0..workers)
            .map(|i| {
                let worker_name = format!("{} worker {}", name, i + 1);
                let queue = queue.clone();
                let handler = handler.clone();
                thread::spawn(move || {
                    let mut outcome = PoolOutcome::default();
                    while let Some(item) = queue.try_dequeue() {
                        handle_item(&worker_name, item, &handler, &mut outcome);
                    }
                    debug!(worker = %worker_name, processed = outcome.processed, "queue drained");
                    outcome
                })
            })
            .collect();
        Self { name, handles }
    }

    /// Spawn `workers` threads that serve the queue until the shutdown token
    /// flips, then drain whatever is still pending and exit.
    ///
    /// The drain step is the shutdown contract: a request enqueued before
    /// the token flipped is completed, never abandoned.
    pub fn spawn_until_shutdown<T, F>(
        name: impl Into<String>,
        workers: usize,
        queue: ServiceQueue<T>,
        shutdown: ShutdownToken,
        poll: Duration,
        handler: F,
    ) -> Self
    where
        T: Send + 'static,
        F: Fn(&str, T) -> SimulationResult<()> + Send + Sync + Clone + 'static,
    {
        let name = name.into();
        let handles = (0..workers)
            .map(|i| {
                let worker_name = format!("{} worker {}", name, i + 1);
                let queue = queue.clone();
                let handler = handler.clone();
                let shutdown = shutdown.clone();
                thread::spawn(move || {
                    let mut outcome = PoolOutcome::default();
                    while !shutdown.is_shutdown() {
                        if let Some(item) = queue.dequeue_timeout(poll) {
                            handle_item(&worker_name, item, &handler, &mut outcome);
                        }
                    }
                    // Drain-before-exit: nothing already enqueued is lost
                    while let Some(item) = queue.try_dequeue() {
                        handle_item(&worker_name, item, &handler, &mut outcome);
                    }
                    debug!(
                        worker = %worker_name,
                        processed = outcome.processed,
                        failed = outcome.failed,
                        "worker stopped"
                    );
                    outcome
                })
            })
            .collect();
        Self { name, handles }
    }

    /// Pool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of workers in the pool
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Join every worker and aggregate their outcomes
    ///
    /// A panicked worker is a phase fault: the pool owner must know a member
    /// died rather than discover a silently shorter pool.
    pub fn join(self) -> SimulationResult<PoolOutcome> {
        let mut outcome = PoolOutcome::default();
        for handle in self.handles {
            let worker_outcome = handle
                .join()
                .map_err(|_| SimulationError::phase_fault(&self.name, "worker thread panicked"))?;
            outcome.merge(worker_outcome);
        }
        Ok(outcome)
    }
}

fn handle_item<T, F>(worker_name: &str, item: T, handler: &F, outcome: &mut PoolOutcome)
where
    F: Fn(&str, T) -> SimulationResult<()>,
{
    match handler(worker_name, item) {
        Ok(()) => outcome.processed += 1,
        Err(error) => {
            outcome.failed += 1;
            warn!(worker = %worker_name, %error, "worker fault, item marked failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_spawn_until_empty_processes_everything() {
        let queue = ServiceQueue::new();
        for i in 0..200_u64 {
            queue.enqueue(i).unwrap();
        }

        let sum = Arc::new(AtomicU64::new(0));
        let sum_ref = Arc::clone(&sum);
        let pool = WorkerPool::spawn_until_empty("Gate", 4, queue.clone(), move |_, item| {
            sum_ref.fetch_add(item, Ordering::SeqCst);
            Ok(())
        });

        let outcome = pool.join().unwrap();
        assert_eq!(outcome.processed, 200);
        assert_eq!(outcome.failed, 0);
        assert!(queue.is_empty());
        assert_eq!(sum.load(Ordering::SeqCst), (0..200).sum::<u64>());
    }

    #[test]
    fn test_handler_error_does_not_kill_worker() {
        let queue = ServiceQueue::new();
        for i in 0..10_u64 {
            queue.enqueue(i).unwrap();
        }

        let pool = WorkerPool::spawn_until_empty("Gate", 1, queue, |_, item| {
            if item % 2 == 0 {
                Err(SimulationError::worker_fault("Gate", "even item"))
            } else {
                Ok(())
            }
        });

        let outcome = pool.join().unwrap();
        assert_eq!(outcome.processed, 5);
        assert_eq!(outcome.failed, 5);
    }

    #[test]
    fn test_shutdown_drains_pending_items() {
        let queue = ServiceQueue::new();
        let shutdown = ShutdownToken::new();
        let seen = Arc::new(AtomicU64::new(0));

        let seen_ref = Arc::clone(&seen);
        let pool = WorkerPool::spawn_until_shutdown(
            "Bar",
            2,
            queue.clone(),
            shutdown.clone(),
            Duration::from_millis(5),
            move |_, _item: u64| {
                seen_ref.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        );

        for i in 0..50 {
            queue.enqueue(i).unwrap();
        }
        // Flip immediately: items still pending must be drained, not dropped
        shutdown.shutdown();

        let outcome = pool.join().unwrap();
        assert_eq!(outcome.processed + outcome.failed, 50);
        assert_eq!(seen.load(Ordering::SeqCst), 50);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pool_metadata() {
        let queue: ServiceQueue<u32> = ServiceQueue::new();
        let pool = WorkerPool::spawn_until_empty("Entrance", 3, queue, |_, _| Ok(()));
        assert_eq!(pool.name(), "Entrance");
        assert_eq!(pool.worker_count(), 3);
        pool.join().unwrap();
    }
}
