//! Composition root: waiting area, stations and arrival source run together.

use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::arrival::{ArrivalReport, ArrivalSource};
use super::error::SimulationError;
use super::events::EventSink;
use super::station::{ServiceStation, StationReport};
use super::station_pool::{PoolStats, StationPool};
use super::waiting_area::WaitingArea;

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Producer totals.
    pub arrivals: ArrivalReport,
    /// Per-station totals in station order.
    pub stations: Vec<StationReport>,
    /// Aggregate station counters.
    pub stats: PoolStats,
}

/// A ready-to-run simulation.
pub struct Simulation {
    area: Arc<WaitingArea>,
    arrivals: ArrivalSource,
    stations: Vec<ServiceStation>,
    sink: Arc<dyn EventSink>,
}

impl Simulation {
    /// Assemble a simulation from already-built parts.
    #[must_use]
    pub fn new(
        area: Arc<WaitingArea>,
        arrivals: ArrivalSource,
        stations: Vec<ServiceStation>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            area,
            arrivals,
            stations,
            sink,
        }
    }

    /// Shared waiting area.
    #[must_use]
    pub fn area(&self) -> &Arc<WaitingArea> {
        &self.area
    }

    /// Start the stations, run the arrival source on its own thread and wait
    /// for everything to finish.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Spawn` or `SimulationError::Panicked` when a
    /// thread cannot be started or dies. The waiting area is always finished
    /// before joining, so stations never stay parked.
    pub fn run(self) -> Result<SimulationReport, SimulationError> {
        let Self {
            area,
            arrivals,
            stations,
            sink,
        } = self;

        info!(
            capacity = area.capacity(),
            fuel_classes = area.fuel_classes(),
            stations = stations.len(),
            arrivals = arrivals.count(),
            "simulation starting"
        );

        let pool = StationPool::start(Arc::clone(&area), stations, sink)?;

        let producer = {
            let area = Arc::clone(&area);
            thread::Builder::new()
                .name("arrivals".into())
                .spawn(move || arrivals.run(&area))
        };
        let producer = match producer {
            Ok(handle) => handle,
            Err(source) => {
                warn!(error = %source, "failed to spawn arrival thread");
                area.finish();
                let _ = pool.join();
                return Err(SimulationError::Spawn {
                    role: "arrivals".into(),
                    source,
                });
            }
        };

        let arrivals = match producer.join() {
            Ok(report) => report,
            Err(_) => {
                warn!("arrival thread panicked");
                area.finish();
                let _ = pool.join();
                return Err(SimulationError::Panicked("arrivals".into()));
            }
        };

        let pool_report = pool.join()?;
        info!(
            admitted = arrivals.admitted,
            dropped = arrivals.dropped,
            served = pool_report.stats.served_vehicles,
            "simulation complete"
        );

        Ok(SimulationReport {
            arrivals,
            stations: pool_report.stations,
            stats: pool_report.stats,
        })
    }
}
