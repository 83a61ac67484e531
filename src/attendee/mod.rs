//! Attendee model
//!
//! The attendee aggregate, the population generator, the probabilistic
//! decision policies and the per-agent activity loop.

mod attendee;
mod generator;
mod policy;
mod runner;

pub use attendee::Attendee;
pub use generator::AttendeeGenerator;
pub use policy::{LeavePolicy, NeedPolicy};
pub use runner::{run_agent, AgentContext, Notification};
