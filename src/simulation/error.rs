//! Error types and handling
//!
//! This module contains the error taxonomy for the simulation. Per-activity
//! faults are logged and skipped by the agent loop, worker faults are logged
//! and counted without killing the pool member, and only phase faults abort
//! a run.

use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Population generation failed
    #[error("Population generation failed: {0}")]
    PopulationError(String),

    /// A service queue was closed while still in use
    #[error("Service queue error: {0}")]
    QueueError(String),

    /// A single unit of work failed inside a worker pool
    #[error("Worker fault in {pool}: {message}")]
    WorkerFault {
        /// Pool the worker belongs to
        pool: String,
        /// What went wrong with the item
        message: String,
    },

    /// A phase barrier could not be crossed (pool or agent thread panicked)
    #[error("Phase fault during {phase}: {message}")]
    PhaseFault {
        /// Lifecycle phase that failed
        phase: String,
        /// Failure description
        message: String,
    },

    /// Persisting finalized snapshots failed
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a population generation error
    pub fn population_error(msg: impl Into<String>) -> Self {
        Self::PopulationError(msg.into())
    }

    /// Create a queue error
    pub fn queue_error(msg: impl Into<String>) -> Self {
        Self::QueueError(msg.into())
    }

    /// Create a worker fault
    pub fn worker_fault(pool: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::WorkerFault { pool: pool.into(), message: msg.into() }
    }

    /// Create a phase fault
    pub fn phase_fault(phase: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::PhaseFault { phase: phase.into(), message: msg.into() }
    }

    /// Create a persistence error
    pub fn persistence_error(msg: impl Into<String>) -> Self {
        Self::PersistenceError(msg.into())
    }

    /// Whether the run may continue after this error
    ///
    /// Worker faults never abort a run; phase and configuration faults do.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::PopulationError(_) => false,
            SimulationError::QueueError(_) => true,
            SimulationError::WorkerFault { .. } => true,
            SimulationError::PhaseFault { .. } => false,
            SimulationError::PersistenceError(_) => true,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category for log routing
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::PopulationError(_) => "Population",
            SimulationError::QueueError(_) => "Queue",
            SimulationError::WorkerFault { .. } => "Worker",
            SimulationError::PhaseFault { .. } => "Phase",
            SimulationError::PersistenceError(_) => "Persistence",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

impl From<String> for SimulationError {
    fn from(s: String) -> Self {
        SimulationError::QueueError(s)
    }
}

impl From<anyhow::Error> for SimulationError {
    fn from(error: anyhow::Error) -> Self {
        SimulationError::PhaseFault { phase: "unknown".to_string(), message: error.to_string() }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
