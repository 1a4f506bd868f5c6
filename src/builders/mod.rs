//! Builders to construct simulation components from configuration.

pub mod simulation_builder;

pub use simulation_builder::{build_arrivals, build_simulation, build_stations};
