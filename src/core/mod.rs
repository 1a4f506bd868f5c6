//! Core simulation: waiting area, stations, arrivals and their coordination.

pub mod arrival;
pub mod error;
pub mod events;
pub mod fuel;
pub mod signal;
pub mod simulation;
pub mod station;
pub mod station_pool;
pub mod waiting_area;

pub use arrival::{ArrivalReport, ArrivalSource};
pub use error::{AppResult, SimulationError};
pub use events::{
    Admission, ArrivalRecord, EventSink, InMemoryEventSink, NoopEventSink, ServiceRecord,
    StationEvent,
};
pub use fuel::{FuelCatalog, FuelClass, Vehicle};
pub use signal::{ClassSignal, Wake};
pub use simulation::{Simulation, SimulationReport};
pub use station::{ServiceStation, StationMode, StationReport, DEFAULT_DRAIN_BACKOFF};
pub use station_pool::{PoolCounters, PoolReport, PoolStats, StationPool};
pub use waiting_area::WaitingArea;
