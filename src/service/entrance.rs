//! Entrance gate
//!
//! Admission is a dedicated lifecycle phase: every attendee is enqueued at
//! the gate before the security pool starts, each check takes a bounded
//! random time, and joining the pool is the phase barrier. No activity
//! thread exists until the whole population has been decided.
//!
//! The decision itself is pure credential inspection: any ticket admits,
//! no ticket rejects. A rejected attendee is never admitted later in the
//! same run.

use crate::attendee::Attendee;
use crate::service::{PoolOutcome, ServiceQueue, WorkerPool};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::MsRange;
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// The festival entrance gate
#[derive(Debug)]
pub struct Entrance {
    check_ms: MsRange,
}

impl Entrance {
    /// Create a gate with the given per-check duration range
    pub fn new(check_ms: MsRange) -> Self {
        Self { check_ms }
    }

    /// Run the admission phase to completion
    ///
    /// Every attendee passes through exactly one security check. Returns the
    /// full population, each attendee now carrying its admission outcome,
    /// once the last check has finished.
    pub fn admit_all(
        &self,
        attendees: Vec<Attendee>,
        security_count: usize,
    ) -> SimulationResult<(Vec<Attendee>, PoolOutcome)> {
        let expected = attendees.len();
        let queue = ServiceQueue::new();
        for attendee in attendees {
            queue
                .enqueue(attendee)
                .map_err(|_| SimulationError::queue_error("entrance queue disconnected"))?;
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        let check_ms = self.check_ms;
        let pool =
            WorkerPool::spawn_until_empty("Entrance", security_count, queue, move |worker, attendee| {
                let decided = check_credentials(worker, attendee, check_ms);
                tx.send(decided)
                    .map_err(|_| SimulationError::queue_error("entrance result channel closed"))
            });

        // Joining the pool is the phase barrier
        let outcome = pool.join()?;
        let decided: Vec<Attendee> = rx.try_iter().collect();
        if decided.len() != expected {
            return Err(SimulationError::phase_fault(
                "Entrance",
                format!("{} attendees entered the gate, {} came out", expected, decided.len()),
            ));
        }

        let admitted = decided.iter().filter(|a| a.is_inside).count();
        info!(admitted, rejected = expected - admitted, "admission phase complete");
        Ok((decided, outcome))
    }
}

fn check_credentials(worker: &str, mut attendee: Attendee, check_ms: MsRange) -> Attendee {
    let millis = rand::thread_rng().gen_range(check_ms.0..=check_ms.1);
    thread::sleep(Duration::from_millis(millis));

    if attendee.ticket.grants_entry() {
        attendee.admit();
        debug!(worker, attendee = %attendee.id, ticket = %attendee.ticket, "admitted");
    } else {
        debug!(worker, attendee = %attendee.id, ticket = %attendee.ticket, "rejected at gate");
    }
    attendee
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Activity, RestroomZone, TicketType};

    fn population(tickets: &[TicketType]) -> Vec<Attendee> {
        tickets
            .iter()
            .map(|&t| Attendee::new(25, t, RestroomZone::East, Activity::all()))
            .collect()
    }

    #[test]
    fn test_every_attendee_is_checked_exactly_once() {
        let entrance = Entrance::new((1, 3));
        let attendees = population(&[TicketType::FullAccess; 20]);
        let ids: Vec<_> = attendees.iter().map(|a| a.id).collect();

        let (decided, outcome) = entrance.admit_all(attendees, 4).unwrap();

        assert_eq!(decided.len(), 20);
        assert_eq!(outcome.processed, 20);
        let mut seen: Vec<_> = decided.iter().map(|a| a.id).collect();
        seen.sort();
        let mut expected = ids;
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_any_ticket_admits_no_ticket_rejects() {
        let entrance = Entrance::new((1, 2));
        let attendees = population(&[
            TicketType::FullAccess,
            TicketType::ThreeDayPass,
            TicketType::OneDayPass,
            TicketType::NoTicket,
        ]);

        let (decided, _) = entrance.admit_all(attendees, 2).unwrap();

        for attendee in &decided {
            assert_eq!(attendee.is_inside, attendee.ticket.grants_entry());
            assert_eq!(attendee.was_admitted(), attendee.ticket.grants_entry());
        }
    }

    #[test]
    fn test_rejected_attendee_has_no_entry_time() {
        let entrance = Entrance::new((1, 2));
        let (decided, _) = entrance.admit_all(population(&[TicketType::NoTicket]), 1).unwrap();
        assert!(decided[0].entered_at.is_none());
        assert!(!decided[0].is_inside);
    }

    #[test]
    fn test_empty_population_is_a_trivial_phase() {
        let entrance = Entrance::new((1, 2));
        let (decided, outcome) = entrance.admit_all(Vec::new(), 3).unwrap();
        assert!(decided.is_empty());
        assert_eq!(outcome.processed, 0);
    }
}
