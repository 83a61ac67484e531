//! Simulation lifecycle
//!
//! Errors, logging, the cooperative shutdown token, run statistics and the
//! orchestrator that ties one festival run together.

mod error;
mod logging;
mod orchestrator;
mod shutdown;
mod statistics;

pub use error::{SimulationError, SimulationResult};
pub use logging::LoggingConfig;
pub use orchestrator::FestivalSimulation;
pub use shutdown::ShutdownToken;
pub use statistics::{SimulationReport, SimulationStatistics};
