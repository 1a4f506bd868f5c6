//! Service station: one pump dedicated to one fuel class.
//!
//! A station starts in [`StationMode::Serving`], parking on its class signal
//! until a matching vehicle is admitted. Once the waiting area is finished it
//! switches to [`StationMode::Draining`] and polls for leftover vehicles of
//! its class, backing off briefly when a peer wins the race, until none remain.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::events::{EventSink, ServiceRecord, StationEvent};
use super::fuel::{FuelClass, Vehicle};
use super::signal::Wake;
use super::station_pool::PoolCounters;
use super::waiting_area::WaitingArea;
use crate::util::sampling::DurationSampler;

/// Default sleep between drain-mode claim attempts that lost a race.
pub const DEFAULT_DRAIN_BACKOFF: Duration = Duration::from_millis(10);

/// Station loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationMode {
    /// Blocking on the class signal while arrivals continue.
    Serving,
    /// Polling for leftover vehicles after arrivals ended.
    Draining,
}

/// Per-station totals returned when the station stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationReport {
    /// One-based station index.
    pub index: usize,
    /// Fuel class served.
    pub fuel: FuelClass,
    /// Vehicles served in total.
    pub served: u64,
    /// Of `served`, how many were claimed in drain mode.
    pub drained: u64,
    /// Wakes or polls that found no matching vehicle.
    pub empty_claims: u64,
}

/// One pump with its own service-time distribution and RNG.
#[derive(Debug)]
pub struct ServiceStation {
    index: usize,
    fuel: FuelClass,
    service_time: DurationSampler,
    rng: StdRng,
    drain_backoff: Duration,
}

impl ServiceStation {
    /// New station. `index` is one-based and used in event records.
    #[must_use]
    pub fn new(index: usize, fuel: FuelClass, service_time: DurationSampler, rng: StdRng) -> Self {
        Self {
            index,
            fuel,
            service_time,
            rng,
            drain_backoff: DEFAULT_DRAIN_BACKOFF,
        }
    }

    /// Override the drain-mode backoff.
    #[must_use]
    pub fn with_drain_backoff(mut self, backoff: Duration) -> Self {
        self.drain_backoff = backoff;
        self
    }

    /// One-based index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Fuel class served.
    #[must_use]
    pub const fn fuel(&self) -> FuelClass {
        self.fuel
    }

    /// Run until arrivals have finished and no vehicle of this class is left.
    pub fn run(
        mut self,
        area: &WaitingArea,
        sink: &dyn EventSink,
        counters: &PoolCounters,
    ) -> StationReport {
        let mut report = StationReport {
            index: self.index,
            fuel: self.fuel,
            served: 0,
            drained: 0,
            empty_claims: 0,
        };
        let mut mode = StationMode::Serving;
        debug!(station = self.index, fuel = self.fuel.index(), "station started");

        loop {
            match mode {
                StationMode::Serving => {
                    if area.is_finished() {
                        mode = StationMode::Draining;
                        continue;
                    }
                    match area.await_signal(self.fuel) {
                        Wake::Closed => mode = StationMode::Draining,
                        Wake::Signalled => match area.try_claim(self.fuel) {
                            Some(vehicle) => self.serve(vehicle, sink, counters, &mut report),
                            None => {
                                trace!(station = self.index, "woken without a matching vehicle");
                                report.empty_claims += 1;
                                counters.record_empty_claim();
                            }
                        },
                    }
                }
                StationMode::Draining => {
                    if !area.has_class(self.fuel) {
                        break;
                    }
                    if let Some(vehicle) = area.try_claim(self.fuel) {
                        area.forfeit_signal(self.fuel);
                        report.drained += 1;
                        counters.record_drained();
                        self.serve(vehicle, sink, counters, &mut report);
                    } else {
                        report.empty_claims += 1;
                        counters.record_empty_claim();
                        thread::sleep(self.drain_backoff);
                    }
                }
            }
        }

        info!(
            station = self.index,
            served = report.served,
            drained = report.drained,
            "station finished"
        );
        report
    }

    fn serve(
        &mut self,
        vehicle: Vehicle,
        sink: &dyn EventSink,
        counters: &PoolCounters,
        report: &mut StationReport,
    ) {
        debug!(station = self.index, vehicle_id = vehicle.id, "service started");
        sink.record(StationEvent::Service(ServiceRecord::starting_now(self.index, &vehicle)));
        report.served += 1;
        counters.record_served();

        let duration = self.service_time.sample(&mut self.rng);
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}
