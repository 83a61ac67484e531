//! Restroom facility
//!
//! Stalls are partitioned by zone attribute: each [`RestroomZone`] has its
//! own FIFO queue and its own fixed pool of stalls, and an attendee only
//! ever joins the queue matching their zone. A visit occupies a stall for a
//! bounded random duration; no notification is sent back, the visit is
//! fire-and-forget from the attendee's side.

use crate::service::{ServiceQueue, WorkerPool};
use crate::simulation::{ShutdownToken, SimulationError, SimulationResult};
use crate::types::{AttendeeId, MsRange, RestroomZone};
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// One pending restroom visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BathroomRequest {
    /// Visiting attendee
    pub attendee: AttendeeId,
}

/// The restroom facility, one queue and stall pool per zone
#[derive(Debug)]
pub struct Bathroom {
    east: ServiceQueue<BathroomRequest>,
    west: ServiceQueue<BathroomRequest>,
    occupancy_ms: MsRange,
}

impl Bathroom {
    /// Create the facility with the given per-visit occupancy range
    pub fn new(occupancy_ms: MsRange) -> Self {
        Self { east: ServiceQueue::new(), west: ServiceQueue::new(), occupancy_ms }
    }

    fn queue(&self, zone: RestroomZone) -> &ServiceQueue<BathroomRequest> {
        match zone {
            RestroomZone::East => &self.east,
            RestroomZone::West => &self.west,
        }
    }

    /// Join the queue for the given zone
    pub fn request_use(&self, zone: RestroomZone, attendee: AttendeeId) -> SimulationResult<()> {
        self.queue(zone)
            .enqueue(BathroomRequest { attendee })
            .map_err(|_| SimulationError::queue_error(format!("{} restroom queue disconnected", zone)))
    }

    /// Pending visits in one zone, for observation only
    pub fn queue_len(&self, zone: RestroomZone) -> usize {
        self.queue(zone).len()
    }

    /// Spawn one stall pool per zone
    pub fn spawn_pools(
        &self,
        stalls_per_zone: usize,
        shutdown: ShutdownToken,
        poll: Duration,
    ) -> Vec<WorkerPool> {
        RestroomZone::all()
            .into_iter()
            .map(|zone| {
                let occupancy_ms = self.occupancy_ms;
                WorkerPool::spawn_until_shutdown(
                    format!("{} restroom", zone),
                    stalls_per_zone,
                    self.queue(zone).clone(),
                    shutdown.clone(),
                    poll,
                    move |worker, request: BathroomRequest| {
                        let millis = rand::thread_rng().gen_range(occupancy_ms.0..=occupancy_ms.1);
                        thread::sleep(Duration::from_millis(millis));
                        debug!(worker, attendee = %request.attendee, millis, "stall freed");
                        Ok(())
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_land_in_their_zone_queue_only() {
        let bathroom = Bathroom::new((1, 2));
        let zone = RestroomZone::East;
        bathroom.request_use(zone, AttendeeId::new()).unwrap();
        bathroom.request_use(zone, AttendeeId::new()).unwrap();

        assert_eq!(bathroom.queue_len(zone), 2);
        assert_eq!(bathroom.queue_len(zone.other()), 0);
    }

    #[test]
    fn test_zone_pools_drain_their_own_queues() {
        let bathroom = Bathroom::new((1, 2));
        let shutdown = ShutdownToken::new();

        for _ in 0..4 {
            bathroom.request_use(RestroomZone::East, AttendeeId::new()).unwrap();
        }
        bathroom.request_use(RestroomZone::West, AttendeeId::new()).unwrap();

        let pools = bathroom.spawn_pools(2, shutdown.clone(), Duration::from_millis(5));
        assert_eq!(pools.len(), 2);
        shutdown.shutdown();

        let mut total = 0;
        for pool in pools {
            total += pool.join().unwrap().processed;
        }
        assert_eq!(total, 5);
        assert_eq!(bathroom.queue_len(RestroomZone::East), 0);
        assert_eq!(bathroom.queue_len(RestroomZone::West), 0);
    }
}
