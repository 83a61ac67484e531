//! Staffed festival services
//!
//! Every service follows the same shape: a FIFO [`ServiceQueue`] of pending
//! requests drained by a fixed-size [`WorkerPool`]. The modules here are the
//! concrete service points: the entrance gate, catalog vendors (bars and
//! food trucks), the zone-partitioned restroom and the first-aid unit.

mod bathroom;
mod emergency;
mod entrance;
mod queue;
mod vendor;
mod worker;

pub use bathroom::{Bathroom, BathroomRequest};
pub use emergency::{EmergencyCase, EmergencyUnit};
pub use entrance::Entrance;
pub use queue::ServiceQueue;
pub use vendor::{Order, OrderLedger, Vendor};
pub use worker::{PoolOutcome, WorkerPool};
