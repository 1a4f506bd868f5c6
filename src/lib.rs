//! # Gas Station
//!
//! A multi-threaded gas station simulation built around one shared, bounded,
//! fuel-class-aware waiting area.
//!
//! One arrival source produces vehicles at random intervals. Each vehicle
//! needs one fuel class and is either admitted into the waiting area or
//! dropped when the area is full. Service stations, one OS thread per pump and
//! each dedicated to a fuel class, sleep on a per-class counting signal until
//! matching work exists, claim the earliest matching vehicle and serve it.
//!
//! ## Coordination
//!
//! - **Admission**: insert-or-drop under one lock; the class signal is posted
//!   inside the same critical section.
//! - **Claiming**: stations wait on their class signal outside the lock, then
//!   re-validate under the lock. Claims within one class follow arrival order.
//! - **Termination**: after its last arrival the source finishes the waiting
//!   area. New inserts are rejected, parked stations wake up, and each station
//!   drains the remaining vehicles of its class before its thread exits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gas_station::builders::build_simulation;
//! use gas_station::config::SimulationConfig;
//! use gas_station::core::InMemoryEventSink;
//!
//! let mut config = SimulationConfig::default();
//! config.time_scale = 0.001;
//!
//! let sink = Arc::new(InMemoryEventSink::new(10_000));
//! let report = build_simulation(&config, sink.clone())?.run()?;
//! assert_eq!(report.arrivals.admitted, report.stats.served_vehicles);
//! # Ok::<(), gas_station::core::SimulationError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core simulation: waiting area, stations, arrivals.
pub mod core;
/// Configuration models for the simulation and event log.
pub mod config;
/// Builders to construct a simulation from configuration.
pub mod builders;
/// Infrastructure adapters for event logging.
pub mod infra;
/// Shared utilities.
pub mod util;
