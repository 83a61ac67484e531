//! Run statistics and the final report
//!
//! A [`SimulationReport`] is the complete in-memory result of one run: the
//! aggregate statistics plus every finalized attendee and order record. The
//! orchestrator returns it; the caller decides what to persist.

use crate::attendee::Attendee;
use crate::persistence::{AttendeeRecord, FestivalStore, OrderRecord};
use crate::simulation::SimulationResult;
use crate::types::OrderStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aggregate counters for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Population size
    pub attendees_total: usize,
    /// Attendees admitted at the gate
    pub admitted: usize,
    /// Attendees rejected at the gate
    pub rejected: usize,
    /// Orders that completed preparation
    pub orders_completed: usize,
    /// Orders that failed preparation
    pub orders_failed: usize,
    /// Total revenue actually charged
    pub revenue: f64,
    /// Drinks ordered across the population
    pub total_drinks: u32,
    /// Food items ordered across the population
    pub total_foods: u32,
    /// First-aid treatments requested
    pub total_treatments: u32,
    /// Restroom visits requested
    pub total_bathroom_visits: u32,
    /// Stage performances watched
    pub total_stage_visits: u32,
    /// Stage sets played to completion
    pub sets_performed: u64,
    /// Wall-clock run duration in milliseconds
    pub duration_ms: u64,
}

impl SimulationStatistics {
    /// Aggregate statistics from the finalized run state
    pub fn compute(
        attendees: &[Attendee],
        orders: &[OrderRecord],
        sets_performed: u64,
        duration: Duration,
    ) -> Self {
        let admitted = attendees.iter().filter(|a| a.was_admitted()).count();
        Self {
            attendees_total: attendees.len(),
            admitted,
            rejected: attendees.len() - admitted,
            orders_completed: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .count(),
            orders_failed: orders.iter().filter(|o| o.status == OrderStatus::Failed).count(),
            revenue: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .map(|o| o.charged)
                .sum(),
            total_drinks: attendees.iter().map(|a| a.total_drinks).sum(),
            total_foods: attendees.iter().map(|a| a.total_foods).sum(),
            total_treatments: attendees.iter().map(|a| a.total_treatments).sum(),
            total_bathroom_visits: attendees.iter().map(|a| a.total_bathroom_visits).sum(),
            total_stage_visits: attendees.iter().map(|a| a.total_stage_visits).sum(),
            sets_performed,
            duration_ms: duration.as_millis() as u64,
        }
    }

    /// Human-readable summary block
    pub fn summary(&self) -> String {
        format!(
            "Festival run finished in {} ms\n\
             Attendees: {} total, {} admitted, {} rejected\n\
             Orders: {} completed, {} failed, {:.2} revenue\n\
             Activity: {} drinks, {} foods, {} treatments, {} restroom visits, {} stage visits\n\
             Stage: {} sets performed",
            self.duration_ms,
            self.attendees_total,
            self.admitted,
            self.rejected,
            self.orders_completed,
            self.orders_failed,
            self.revenue,
            self.total_drinks,
            self.total_foods,
            self.total_treatments,
            self.total_bathroom_visits,
            self.total_stage_visits,
            self.sets_performed,
        )
    }
}

/// Complete in-memory result of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Aggregate counters
    pub statistics: SimulationStatistics,
    /// One record per population member
    pub attendees: Vec<AttendeeRecord>,
    /// One record per processed order
    pub orders: Vec<OrderRecord>,
}

impl SimulationReport {
    /// Hand the report's records to a store
    pub fn persist(&self, store: &mut dyn FestivalStore) -> SimulationResult<()> {
        for record in &self.attendees {
            store.upsert_attendee_record(record)?;
        }
        store.replace_order_records(&self.orders)?;
        Ok(())
    }
}
