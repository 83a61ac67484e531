//! Core types for the festival simulator
//!
//! Identifiers, enumerations and configuration shared by every other module.

pub mod config;
pub mod enums;
pub mod identifiers;

pub use config::{
    default_roster, CliArgs, ConfigValidationError, MsRange, PerformerSpec, SimulationConfig,
};
pub use enums::{Activity, Genre, OrderStatus, RestroomZone, TicketType};
pub use identifiers::AttendeeId;
