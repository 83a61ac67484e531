//! Festival Crowd Simulator
//!
//! A concurrent crowd simulation of a music festival: attendees arrive at a
//! security-staffed entrance, and once inside roam between bars, food
//! trucks, restrooms, the first-aid unit and the genre stages until they
//! decide to leave or the show ends.
//!
//! # Overview
//!
//! Every admitted attendee runs on its own thread, driving a probabilistic
//! activity loop. Every staffed service is a FIFO queue drained by a fixed
//! pool of worker threads. The stage show runs one slot per genre, each
//! slot playing its lineup strictly in order, and the end of the last set
//! is what winds the whole run down.
//!
//! ## Quick Start
//!
//! ```rust
//! use festival_crowd_simulator::simulation::FestivalSimulation;
//! use festival_crowd_simulator::types::{Genre, PerformerSpec, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     attendee_count: 10,
//!     seed: Some(42),
//!     entry_check_ms: (1, 2),
//!     think_time_ms: (1, 2),
//!     activity_cooldown_ms: (1, 2),
//!     bathroom_ms: (1, 2),
//!     treatment_ms: (1, 2),
//!     stage_watch_ms: (1, 2),
//!     roster: vec![PerformerSpec::new("Headliner", Genre::Pop, 50)],
//!     ..Default::default()
//! };
//!
//! let report = FestivalSimulation::new(config)?.run()?;
//! println!("{}", report.statistics.summary());
//! # Ok::<(), festival_crowd_simulator::simulation::SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`catalog`]: Vendor menus and items
//! - [`attendee`]: The attendee aggregate, generator, policies and agent loop
//! - [`service`]: Queues, worker pools and the staffed service points
//! - [`stage`]: Genre slots and the show scheduler
//! - [`simulation`]: Errors, logging, shutdown and the run orchestrator
//! - [`persistence`]: Record types and the store boundary

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]

pub mod attendee;
pub mod catalog;
pub mod persistence;
pub mod service;
pub mod simulation;
pub mod stage;
pub mod types;

pub use attendee::{Attendee, AttendeeGenerator};
pub use catalog::{Catalog, CatalogItem};
pub use persistence::{AttendeeRecord, FestivalStore, JsonlStore, MemoryStore, OrderRecord};
pub use simulation::{
    FestivalSimulation, LoggingConfig, SimulationError, SimulationReport, SimulationResult,
    SimulationStatistics,
};
pub use types::SimulationConfig;
