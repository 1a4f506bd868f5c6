//! Arrival source: the single producer of vehicles.

use std::thread;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fuel::Vehicle;
use super::waiting_area::WaitingArea;
use crate::util::sampling::{DurationSampler, FuelMix};

/// Totals returned when the arrival source stops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalReport {
    /// Vehicles generated.
    pub generated: u64,
    /// Vehicles admitted into the waiting area.
    pub admitted: u64,
    /// Vehicles turned away.
    pub dropped: u64,
}

/// Generates a fixed number of vehicles at random intervals.
#[derive(Debug)]
pub struct ArrivalSource {
    count: u64,
    interval: DurationSampler,
    mix: FuelMix,
    rng: StdRng,
}

impl ArrivalSource {
    /// Source producing `count` vehicles.
    #[must_use]
    pub fn new(count: u64, interval: DurationSampler, mix: FuelMix, rng: StdRng) -> Self {
        Self {
            count,
            interval,
            mix,
            rng,
        }
    }

    /// Number of vehicles this source will generate.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Produce every vehicle, then finish the waiting area.
    ///
    /// Vehicle ids run from 0 to `count - 1` in arrival order. `finish` is
    /// called only after the last admission attempt has returned.
    pub fn run(mut self, area: &WaitingArea) -> ArrivalReport {
        let mut report = ArrivalReport::default();

        for id in 0..self.count {
            let pause = self.interval.sample(&mut self.rng);
            if !pause.is_zero() {
                thread::sleep(pause);
            }

            let fuel = self.mix.sample(&mut self.rng);
            report.generated += 1;
            if area.try_insert(Vehicle::arriving(id, fuel)) {
                report.admitted += 1;
            } else {
                report.dropped += 1;
            }
        }

        debug!(generated = report.generated, "last arrival attempted");
        area.finish();
        info!(
            generated = report.generated,
            admitted = report.admitted,
            dropped = report.dropped,
            "arrival source finished"
        );
        report
    }
}
