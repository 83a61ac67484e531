//! First-aid unit
//!
//! One FIFO queue of emergency cases served by a fixed pool of doctors. A
//! treatment takes a bounded random duration, after which the patient is
//! notified so their activity loop can resume with the treatment reflected
//! in its counters.

use crate::attendee::Notification;
use crate::service::{ServiceQueue, WorkerPool};
use crate::simulation::{ShutdownToken, SimulationError, SimulationResult};
use crate::types::{AttendeeId, MsRange};
use crossbeam_channel::Sender;
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// One pending first-aid case
#[derive(Debug)]
pub struct EmergencyCase {
    /// Patient
    pub attendee: AttendeeId,
    notify: Sender<Notification>,
}

/// The first-aid unit
#[derive(Debug)]
pub struct EmergencyUnit {
    queue: ServiceQueue<EmergencyCase>,
    treatment_ms: MsRange,
}

impl EmergencyUnit {
    /// Create the unit with the given per-treatment duration range
    pub fn new(treatment_ms: MsRange) -> Self {
        Self { queue: ServiceQueue::new(), treatment_ms }
    }

    /// Report a case at the tail of the queue
    pub fn report_case(
        &self,
        attendee: AttendeeId,
        notify: Sender<Notification>,
    ) -> SimulationResult<()> {
        self.queue
            .enqueue(EmergencyCase { attendee, notify })
            .map_err(|_| SimulationError::queue_error("emergency queue disconnected"))
    }

    /// Pending cases, for observation only
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Spawn the doctor pool
    pub fn spawn_pool(
        &self,
        doctors: usize,
        shutdown: ShutdownToken,
        poll: Duration,
    ) -> WorkerPool {
        let treatment_ms = self.treatment_ms;
        WorkerPool::spawn_until_shutdown(
            "First aid",
            doctors,
            self.queue.clone(),
            shutdown,
            poll,
            move |worker, case: EmergencyCase| {
                let millis = rand::thread_rng().gen_range(treatment_ms.0..=treatment_ms.1);
                thread::sleep(Duration::from_millis(millis));
                debug!(worker, attendee = %case.attendee, millis, "treatment finished");
                // The patient may already have left; a dead receiver is fine
                let _ = case.notify.send(Notification::Treated);
                Ok(())
            },
        )
    }
}
