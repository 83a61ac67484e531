//! Generic service queue
//!
//! Every staffed service is backed by one [`ServiceQueue`]: a strict-FIFO,
//! thread-safe channel of pending requests. Producers append at the tail,
//! workers remove from the head. Within one queue delivery order is exact;
//! across queues no ordering is guaranteed. No item is ever dropped and no
//! item is delivered twice.
//!
//! Idle consumers use [`ServiceQueue::dequeue_timeout`] rather than spinning
//! on an empty queue, so a worker sleeps between shutdown checks instead of
//! burning a core.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// A thread-safe FIFO request queue shared between producers and a worker pool
#[derive(Debug)]
pub struct ServiceQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Clone for ServiceQueue<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

impl<T> ServiceQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Append an item at the tail
    ///
    /// Returns the item back if the queue has been disconnected, which only
    /// happens once every handle is dropped.
    pub fn enqueue(&self, item: T) -> Result<(), T> {
        self.tx.send(item).map_err(|e| e.0)
    }

    /// Remove and return the head item if one is pending
    ///
    /// Non-blocking; an empty queue is a normal result, not an error.
    pub fn try_dequeue(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(item) => Some(item),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Remove the head item, waiting up to `timeout` for one to arrive
    pub fn dequeue_timeout(&self, timeout: Duration) -> Option<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(item) => Some(item),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Number of items currently pending
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether the queue has no pending items
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<T> Default for ServiceQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fifo_order_single_producer() {
        let queue = ServiceQueue::new();
        for i in 0..100 {
            queue.enqueue(i).unwrap();
        }
        for i in 0..100 {
            assert_eq!(queue.try_dequeue(), Some(i));
        }
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_empty_queue_is_not_an_error() {
        let queue: ServiceQueue<u32> = ServiceQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.try_dequeue(), None);
        assert_eq!(queue.dequeue_timeout(Duration::from_millis(5)), None);
    }

    #[test]
    fn test_len_tracks_pending_items() {
        let queue = ServiceQueue::new();
        queue.enqueue("a").unwrap();
        queue.enqueue("b").unwrap();
        assert_eq!(queue.len(), 2);

        queue.try_dequeue();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_dequeue_timeout_receives_late_item() {
        let queue = ServiceQueue::new();
        let producer = queue.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.enqueue(7_u32).unwrap();
        });

        let item = queue.dequeue_timeout(Duration::from_secs(2));
        assert_eq!(item, Some(7));
        handle.join().unwrap();
    }

    #[test]
    fn test_no_loss_no_duplication_under_concurrent_producers() {
        let queue = ServiceQueue::new();
        let producers: Vec<_> = (0..4_u32)
            .map(|p| {
                let q = queue.clone();
                thread::spawn(move || {
                    for i in 0..50_u32 {
                        q.enqueue((p, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in producers {
            handle.join().unwrap();
        }

        let mut last_seen = [None::<u32>; 4];
        let mut total = 0;
        while let Some((producer, i)) = queue.try_dequeue() {
            // Per-producer FIFO must survive interleaving
            if let Some(prev) = last_seen[producer as usize] {
                assert!(i > prev, "producer {} delivered {} after {}", producer, i, prev);
            }
            last_seen[producer as usize] = Some(i);
            total += 1;
        }
        assert_eq!(total, 200);
    }
}
