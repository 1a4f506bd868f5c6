//! Station pool: one dedicated OS thread per service station.
//!
//! The pool only starts and joins stations. Stations stop on their own once
//! the waiting area is finished and their class has been drained, so joining
//! is all the shutdown there is.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::SimulationError;
use super::events::EventSink;
use super::station::{ServiceStation, StationReport};
use super::waiting_area::WaitingArea;

/// Statistics about station activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of station threads.
    pub station_count: usize,
    /// Vehicles served so far.
    pub served_vehicles: u64,
    /// Of those, vehicles claimed in drain mode.
    pub drained_vehicles: u64,
    /// Claims that found no matching vehicle.
    pub empty_claims: u64,
}

/// Shared counters updated by every station (thread-safe).
#[derive(Debug, Default)]
pub struct PoolCounters {
    served_vehicles: AtomicU64,
    drained_vehicles: AtomicU64,
    empty_claims: AtomicU64,
}

impl PoolCounters {
    pub(crate) fn record_served(&self) {
        self.served_vehicles.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_drained(&self) {
        self.drained_vehicles.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_empty_claim(&self) {
        self.empty_claims.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    #[must_use]
    pub fn snapshot(&self, station_count: usize) -> PoolStats {
        PoolStats {
            station_count,
            served_vehicles: self.served_vehicles.load(Ordering::Relaxed),
            drained_vehicles: self.drained_vehicles.load(Ordering::Relaxed),
            empty_claims: self.empty_claims.load(Ordering::Relaxed),
        }
    }
}

/// Result of joining every station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    /// Per-station totals in station order.
    pub stations: Vec<StationReport>,
    /// Aggregate counters.
    pub stats: PoolStats,
}

/// Running set of stations sharing one waiting area.
pub struct StationPool {
    area: Arc<WaitingArea>,
    workers: Vec<(usize, JoinHandle<StationReport>)>,
    counters: Arc<PoolCounters>,
}

impl StationPool {
    /// Start every station on its own named thread.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Spawn` if a thread cannot be created. In that
    /// case the waiting area is finished and the stations already started are
    /// joined before returning, so no thread is left parked.
    pub fn start(
        area: Arc<WaitingArea>,
        stations: Vec<ServiceStation>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, SimulationError> {
        let counters = Arc::new(PoolCounters::default());
        let mut workers = Vec::with_capacity(stations.len());

        for station in stations {
            let index = station.index();
            match spawn_station(
                station,
                Arc::clone(&area),
                Arc::clone(&sink),
                Arc::clone(&counters),
            ) {
                Ok(handle) => workers.push((index, handle)),
                Err(source) => {
                    warn!(station = index, error = %source, "failed to spawn station thread");
                    area.finish();
                    let started = Self {
                        area,
                        workers,
                        counters,
                    };
                    let _ = started.join();
                    return Err(SimulationError::Spawn {
                        role: format!("station-{index}"),
                        source,
                    });
                }
            }
        }

        info!(station_count = workers.len(), "station pool started");
        Ok(Self {
            area,
            workers,
            counters,
        })
    }

    /// Number of station threads.
    #[must_use]
    pub fn station_count(&self) -> usize {
        self.workers.len()
    }

    /// Get current pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.workers.len())
    }

    /// Wait for every station to stop.
    ///
    /// Stations only stop after the waiting area is finished, so callers must
    /// make sure [`WaitingArea::finish`] is eventually called.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Panicked` naming the first station whose
    /// thread panicked; the remaining stations are still joined.
    pub fn join(self) -> Result<PoolReport, SimulationError> {
        let station_count = self.workers.len();
        let mut stations = Vec::with_capacity(station_count);
        let mut panicked = None;

        for (index, worker) in self.workers {
            match worker.join() {
                Ok(report) => {
                    debug!(station = index, "station joined");
                    stations.push(report);
                }
                Err(_) => {
                    warn!(station = index, "station panicked");
                    panicked.get_or_insert(index);
                }
            }
        }

        if let Some(index) = panicked {
            return Err(SimulationError::Panicked(format!("station-{index}")));
        }

        info!(
            station_count,
            remaining = self.area.len(),
            "station pool shut down complete"
        );
        Ok(PoolReport {
            stations,
            stats: self.counters.snapshot(station_count),
        })
    }
}

/// Spawn a station thread.
fn spawn_station(
    station: ServiceStation,
    area: Arc<WaitingArea>,
    sink: Arc<dyn EventSink>,
    counters: Arc<PoolCounters>,
) -> std::io::Result<JoinHandle<StationReport>> {
    thread::Builder::new()
        .name(format!("station-{}", station.index()))
        .spawn(move || station.run(&area, sink.as_ref(), &counters))
}
