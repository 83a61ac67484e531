//! Cooperative shutdown signalling
//!
//! A [`ShutdownToken`] is handed to every worker pool and agent loop at
//! construction. It is written at most once, by the orchestrator, and read
//! between iterations without any lock; a unit may process at most one more
//! item after the flip, which the shutdown contract accepts because
//! already-dequeued work completes rather than being aborted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply cloneable, one-shot cancellation token
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl ShutdownToken {
    /// Create a token in the running state
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal shutdown. Idempotent.
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown has been signalled
    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
