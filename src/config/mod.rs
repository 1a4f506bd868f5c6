//! Configuration models for the waiting area, arrivals, stations and event log.

pub mod simulation;

pub use simulation::{
    ArrivalConfig, FuelConfig, LogConfig, LogFormat, SimulationConfig, StationConfig,
};
