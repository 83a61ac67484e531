//! Persistence boundary
//!
//! The simulation core hands finalized snapshots to a [`FestivalStore`] and
//! knows nothing about how they are kept. [`JsonlStore`] writes JSONL files;
//! [`MemoryStore`] backs tests. Both uphold the boundary contract: attendee
//! upserts are idempotent per id, and order records are replaced wholesale
//! per run.

use crate::attendee::Attendee;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{AttendeeId, OrderStatus, RestroomZone, TicketType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Finalized attendee snapshot, one per population member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    /// Attendee identity (upsert key)
    pub id: AttendeeId,
    /// Age in years
    pub age: u8,
    /// Admission credential
    pub ticket_type: TicketType,
    /// Drinks ordered
    pub total_drinks: u32,
    /// Food items ordered
    pub total_foods: u32,
    /// First-aid treatments requested
    pub total_treatments: u32,
    /// Restroom visits requested
    pub total_bathroom_visits: u32,
    /// Stage performances watched
    pub total_stage_visits: u32,
    /// Restroom partition attribute
    pub restroom_zone: RestroomZone,
    /// Admission time; `None` if the gate rejected the attendee
    pub entered_at: Option<DateTime<Utc>>,
    /// Departure time; `None` if never admitted
    pub exited_at: Option<DateTime<Utc>>,
}

impl AttendeeRecord {
    /// Snapshot an attendee at finalize time
    pub fn from_attendee(attendee: &Attendee) -> Self {
        Self {
            id: attendee.id,
            age: attendee.age,
            ticket_type: attendee.ticket,
            total_drinks: attendee.total_drinks,
            total_foods: attendee.total_foods,
            total_treatments: attendee.total_treatments,
            total_bathroom_visits: attendee.total_bathroom_visits,
            total_stage_visits: attendee.total_stage_visits,
            restroom_zone: attendee.restroom_zone,
            entered_at: attendee.entered_at,
            exited_at: attendee.exited_at,
        }
    }
}

/// Finalized order snapshot, one per processed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Ordering attendee
    pub attendee_id: AttendeeId,
    /// Catalog item name
    pub item_name: String,
    /// Catalog list price
    pub price: f64,
    /// Whether the item contains alcohol
    pub contains_alcohol: bool,
    /// Amount actually charged (zero for free-pass holders)
    pub charged: f64,
    /// Final order status
    pub status: OrderStatus,
}

/// The external persistence collaborator contract
pub trait FestivalStore {
    /// Idempotently upsert one attendee record, keyed by attendee identity
    fn upsert_attendee_record(&mut self, record: &AttendeeRecord) -> SimulationResult<()>;

    /// Replace the previous run's order records with this run's
    fn replace_order_records(&mut self, records: &[OrderRecord]) -> SimulationResult<()>;
}

/// In-memory store, used in tests and as a staging buffer
#[derive(Debug, Default)]
pub struct MemoryStore {
    attendees: BTreeMap<AttendeeId, AttendeeRecord>,
    orders: Vec<OrderRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored attendee records
    pub fn attendees(&self) -> Vec<&AttendeeRecord> {
        self.attendees.values().collect()
    }

    /// All stored order records
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }
}

impl FestivalStore for MemoryStore {
    fn upsert_attendee_record(&mut self, record: &AttendeeRecord) -> SimulationResult<()> {
        self.attendees.insert(record.id, record.clone());
        Ok(())
    }

    fn replace_order_records(&mut self, records: &[OrderRecord]) -> SimulationResult<()> {
        self.orders = records.to_vec();
        Ok(())
    }
}

/// JSONL-file store
///
/// Records are staged in memory and written by [`JsonlStore::flush`]; each
/// flush rewrites the files from scratch, which makes both operations
/// trivially idempotent.
#[derive(Debug)]
pub struct JsonlStore {
    attendees_path: Option<PathBuf>,
    orders_path: Option<PathBuf>,
    staged: MemoryStore,
}

impl JsonlStore {
    /// Create a store writing to the given paths; a `None` path disables
    /// that file
    pub fn new(attendees_path: Option<PathBuf>, orders_path: Option<PathBuf>) -> Self {
        Self { attendees_path, orders_path, staged: MemoryStore::new() }
    }

    /// Write all staged records to disk
    pub fn flush(&self) -> SimulationResult<()> {
        if let Some(path) = &self.attendees_path {
            let file = File::create(path).map_err(|e| {
                SimulationError::persistence_error(format!(
                    "failed to create '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            for record in self.staged.attendees() {
                let line = serde_json::to_string(record)?;
                writeln!(writer, "{}", line)?;
            }
            writer.flush()?;
        }

        if let Some(path) = &self.orders_path {
            let file = File::create(path).map_err(|e| {
                SimulationError::persistence_error(format!(
                    "failed to create '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            for record in self.staged.orders() {
                let line = serde_json::to_string(record)?;
                writeln!(writer, "{}", line)?;
            }
            writer.flush()?;
        }

        Ok(())
    }
}

impl FestivalStore for JsonlStore {
    fn upsert_attendee_record(&mut self, record: &AttendeeRecord) -> SimulationResult<()> {
        self.staged.upsert_attendee_record(record)
    }

    fn replace_order_records(&mut self, records: &[OrderRecord]) -> SimulationResult<()> {
        self.staged.replace_order_records(records)
    }
}
