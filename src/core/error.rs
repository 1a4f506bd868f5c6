//! Error types for simulation setup and worker management.

use thiserror::Error;

/// Errors produced while building or running a simulation.
///
/// A vehicle turned away at a full waiting area is not an error; it is
/// reported through the event sink as a dropped arrival.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration was rejected during validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A station referenced a fuel name absent from the catalog.
    #[error("unknown fuel type: {0}")]
    UnknownFuel(String),
    /// An OS thread could not be started.
    #[error("failed to spawn {role} thread")]
    Spawn {
        /// Role of the thread that failed to start.
        role: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// A worker thread panicked before finishing its loop.
    #[error("{0} thread panicked")]
    Panicked(String),
    /// Event log could not be written.
    #[error("event log error: {0}")]
    EventLog(#[from] std::io::Error),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
