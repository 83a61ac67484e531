//! Core attendee struct
//!
//! An attendee is a plain data aggregate owned by exactly one thread at a
//! time: the orchestrator during generation, an entrance worker during the
//! admission decision, and the agent's own activity loop afterwards. No two
//! threads ever share mutable attendee state; workers report results back
//! through notifications and the owning loop applies its own counter
//! increments.

use crate::types::{Activity, AttendeeId, RestroomZone, TicketType};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// A festival attendee
#[derive(Debug, Clone)]
pub struct Attendee {
    /// Unique identifier
    pub id: AttendeeId,
    /// Age in years
    pub age: u8,
    /// Admission credential, immutable once assigned
    pub ticket: TicketType,
    /// Restroom partition attribute
    pub restroom_zone: RestroomZone,
    /// Whether the attendee is currently inside the festival grounds
    pub is_inside: bool,
    /// Guards against one attendee overlapping its own activity dispatches
    pub mid_activity: bool,
    /// Drinks ordered (incremented at order time)
    pub total_drinks: u32,
    /// Food items ordered (incremented at order time)
    pub total_foods: u32,
    /// First-aid treatments requested (incremented at request time)
    pub total_treatments: u32,
    /// Restroom visits requested (incremented at request time)
    pub total_bathroom_visits: u32,
    /// Stage performances watched
    pub total_stage_visits: u32,
    /// Whether orders are free of charge for this attendee
    pub has_free_pass: bool,
    /// Wall-clock admission time; `None` if never admitted
    pub entered_at: Option<DateTime<Utc>>,
    /// Wall-clock departure time; `None` while inside or if never admitted
    pub exited_at: Option<DateTime<Utc>>,
    /// Activities this attendee is willing to attempt
    pub allowed_activities: Vec<Activity>,
    /// Monotonic admission instant, used by the leave policy
    entered_instant: Option<Instant>,
}

impl Attendee {
    /// Create an attendee awaiting admission, with all counters at zero
    pub fn new(
        age: u8,
        ticket: TicketType,
        restroom_zone: RestroomZone,
        allowed_activities: Vec<Activity>,
    ) -> Self {
        Self {
            id: AttendeeId::new(),
            age,
            ticket,
            restroom_zone,
            is_inside: false,
            mid_activity: false,
            total_drinks: 0,
            total_foods: 0,
            total_treatments: 0,
            total_bathroom_visits: 0,
            total_stage_visits: 0,
            has_free_pass: false,
            entered_at: None,
            exited_at: None,
            allowed_activities,
            entered_instant: None,
        }
    }

    /// Admit the attendee through the entrance gate
    ///
    /// Presence becomes true exactly once per run; a second admission
    /// attempt is ignored.
    pub fn admit(&mut self) {
        if self.entered_at.is_none() && !self.is_inside {
            self.is_inside = true;
            self.entered_at = Some(Utc::now());
            self.entered_instant = Some(Instant::now());
        }
    }

    /// Whether the entrance decision ever admitted this attendee
    pub fn was_admitted(&self) -> bool {
        self.entered_at.is_some()
    }

    /// Leave the festival; presence transitions true -> false at most once
    pub fn mark_departed(&mut self) {
        if self.is_inside {
            self.is_inside = false;
            self.exited_at = Some(Utc::now());
        }
    }

    /// Time spent inside so far; zero before admission
    pub fn time_inside(&self) -> Duration {
        self.entered_instant.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Sum of all activity counters
    pub fn total_activities(&self) -> u32 {
        self.total_drinks
            + self.total_foods
            + self.total_treatments
            + self.total_bathroom_visits
            + self.total_stage_visits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(ticket: TicketType) -> Attendee {
        Attendee::new(25, ticket, RestroomZone::East, Activity::all())
    }

    #[test]
    fn test_new_attendee_starts_outside_with_zero_counters() {
        let a = attendee(TicketType::FullAccess);
        assert!(!a.is_inside);
        assert!(!a.mid_activity);
        assert!(a.entered_at.is_none());
        assert!(a.exited_at.is_none());
        assert_eq!(a.total_activities(), 0);
        assert_eq!(a.time_inside(), Duration::ZERO);
    }

    #[test]
    fn test_admit_sets_presence_once() {
        let mut a = attendee(TicketType::OneDayPass);
        a.admit();
        assert!(a.is_inside);
        assert!(a.was_admitted());
        let first_entry = a.entered_at;

        // A second admission must not reset the entry time
        a.admit();
        assert_eq!(a.entered_at, first_entry);
    }

    #[test]
    fn test_presence_transitions_true_to_false_at_most_once() {
        let mut a = attendee(TicketType::FullAccess);
        a.admit();
        a.mark_departed();
        assert!(!a.is_inside);
        let first_exit = a.exited_at;

        // Departing again changes nothing
        a.mark_departed();
        assert_eq!(a.exited_at, first_exit);

        // Presence never flips back to true after departure
        a.admit();
        assert!(!a.is_inside);
    }

    #[test]
    fn test_departure_without_admission_is_a_noop() {
        let mut a = attendee(TicketType::NoTicket);
        a.mark_departed();
        assert!(a.exited_at.is_none());
        assert!(!a.was_admitted());
    }

    #[test]
    fn test_counters_accumulate() {
        let mut a = attendee(TicketType::FullAccess);
        a.admit();
        a.total_drinks += 2;
        a.total_bathroom_visits += 1;
        assert_eq!(a.total_activities(), 3);
    }

    #[test]
    fn test_time_inside_grows_after_admission() {
        let mut a = attendee(TicketType::FullAccess);
        a.admit();
        std::thread::sleep(Duration::from_millis(5));
        assert!(a.time_inside() >= Duration::from_millis(5));
    }
}
