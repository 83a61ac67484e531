//! Catalog-backed vendors
//!
//! A vendor is a named service point selling from a fixed catalog: bars sell
//! drinks, food trucks sell food, and both run the same way. Attendees place
//! orders on the vendor's queue; the vendor's worker pool prepares each order
//! for its catalog prep time, records the outcome in the shared ledger and
//! notifies the ordering attendee.

use crate::attendee::Notification;
use crate::catalog::{Catalog, CatalogItem};
use crate::persistence::OrderRecord;
use crate::service::{ServiceQueue, WorkerPool};
use crate::simulation::{ShutdownToken, SimulationError, SimulationResult};
use crate::types::{AttendeeId, OrderStatus};
use crossbeam_channel::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// One pending order on a vendor queue
#[derive(Debug)]
pub struct Order {
    /// Ordering attendee
    pub attendee: AttendeeId,
    /// Catalog item being prepared
    pub item: CatalogItem,
    /// Whether the attendee's free pass waives the charge
    pub free_of_charge: bool,
    status: OrderStatus,
    notify: Sender<Notification>,
}

impl Order {
    /// Create an order in the `Waiting` state
    pub fn new(
        attendee: AttendeeId,
        item: CatalogItem,
        free_of_charge: bool,
        notify: Sender<Notification>,
    ) -> Self {
        Self { attendee, item, free_of_charge, status: OrderStatus::Waiting, notify }
    }

    /// Current lifecycle status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Amount the attendee is charged once the order completes
    pub fn charge(&self) -> f64 {
        if self.free_of_charge {
            0.0
        } else {
            self.item.price
        }
    }

    fn transition(&mut self, next: OrderStatus) -> SimulationResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(SimulationError::queue_error(format!(
                "invalid order transition {} -> {}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// A faulted order lands in the terminal `Failed` state whatever point
    /// its preparation reached
    fn mark_failed(&mut self) {
        self.status = OrderStatus::Failed;
    }

    fn to_record(&self, charged: f64) -> OrderRecord {
        OrderRecord {
            attendee_id: self.attendee,
            item_name: self.item.name.clone(),
            price: self.item.price,
            contains_alcohol: self.item.contains_alcohol,
            charged,
            status: self.status,
        }
    }
}

/// Shared, append-only record of every order a run processed
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    records: Arc<Mutex<Vec<OrderRecord>>>,
}

impl OrderLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finalized order record
    pub fn record(&self, record: OrderRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// Copy out everything recorded so far
    pub fn snapshot(&self) -> Vec<OrderRecord> {
        self.records.lock().map(|records| records.clone()).unwrap_or_default()
    }
}

/// A staffed service point selling from a fixed catalog
#[derive(Debug)]
pub struct Vendor {
    name: String,
    catalog: Catalog,
    queue: ServiceQueue<Order>,
    ledger: OrderLedger,
}

impl Vendor {
    /// Create a vendor selling the given catalog
    pub fn new(name: impl Into<String>, catalog: Catalog, ledger: OrderLedger) -> Self {
        Self { name: name.into(), catalog, queue: ServiceQueue::new(), ledger }
    }

    /// Vendor name, e.g. `"Bar 1"`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The catalog this vendor sells from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Pending orders, for observation only
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Place an order at the tail of this vendor's queue
    pub fn place_order(
        &self,
        attendee: AttendeeId,
        item: CatalogItem,
        free_of_charge: bool,
        notify: Sender<Notification>,
    ) -> SimulationResult<()> {
        let order = Order::new(attendee, item, free_of_charge, notify);
        self.queue
            .enqueue(order)
            .map_err(|_| SimulationError::queue_error(format!("{} queue disconnected", self.name)))
    }

    /// Spawn this vendor's worker pool
    ///
    /// Workers serve until the shutdown token flips, then drain pending
    /// orders so nothing already placed is abandoned.
    pub fn spawn_pool(
        &self,
        workers: usize,
        shutdown: ShutdownToken,
        poll: Duration,
    ) -> WorkerPool {
        let ledger = self.ledger.clone();
        WorkerPool::spawn_until_shutdown(
            self.name.clone(),
            workers,
            self.queue.clone(),
            shutdown,
            poll,
            move |worker, order| prepare_order(worker, order, &ledger),
        )
    }
}

/// Prepare one order: mark in progress, take the prep time, complete,
/// record, notify.
///
/// A fault mid-preparation still leaves a ledger entry: the order is marked
/// `Failed` and recorded with a zero charge before the error is handed back
/// to the pool.
fn prepare_order(worker: &str, mut order: Order, ledger: &OrderLedger) -> SimulationResult<()> {
    if let Err(error) = fulfill_order(&mut order) {
        order.mark_failed();
        ledger.record(order.to_record(0.0));
        debug!(worker, attendee = %order.attendee, item = %order.item.name, "order failed");
        return Err(error);
    }

    let charge = order.charge();
    ledger.record(order.to_record(charge));
    debug!(worker, attendee = %order.attendee, item = %order.item.name, charge, "order served");

    // The attendee may already have left; a dead receiver is not a fault
    let _ = order.notify.send(Notification::OrderReady { item: order.item.name, charge });
    Ok(())
}

fn fulfill_order(order: &mut Order) -> SimulationResult<()> {
    order.transition(OrderStatus::InProgress)?;
    thread::sleep(order.item.prep_time);
    order.transition(OrderStatus::Completed)
}
