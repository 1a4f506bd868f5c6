//! Bounded, fuel-class-aware waiting area shared by the arrival source and
//! every service station.
//!
//! # Synchronization
//!
//! - One `parking_lot::Mutex` guards the ordered vehicle list. Inserts, claims
//!   and probes are short O(capacity) critical sections; nothing sleeps,
//!   waits or logs while holding it.
//! - One [`ClassSignal`] per fuel class counts admitted, not yet signalled
//!   vehicles. The producer posts it inside the admission critical section;
//!   stations wait on it outside the lock and then re-validate with
//!   [`try_claim`](WaitingArea::try_claim).
//! - The terminal flag is set under the lock, so no insert can be admitted
//!   after it, and then every signal is closed so parked stations wake up.
//!
//! Lock order is always list lock, then signal lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::error::SimulationError;
use super::events::{Admission, ArrivalRecord, EventSink, StationEvent};
use super::fuel::{FuelClass, Vehicle};
use super::signal::{ClassSignal, Wake};

/// Shared waiting area with embedded lock and per-class signals.
pub struct WaitingArea {
    capacity: usize,
    /// Vehicles in arrival order; `len()` is the held count.
    vehicles: Mutex<Vec<Vehicle>>,
    /// One signal per fuel class, indexed by `FuelClass::index`.
    signals: Box<[ClassSignal]>,
    /// Set once production has ended.
    finished: AtomicBool,
    sink: Arc<dyn EventSink>,
}

impl WaitingArea {
    /// Create an empty waiting area.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if `capacity` or
    /// `fuel_classes` is zero.
    pub fn new(
        capacity: usize,
        fuel_classes: usize,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, SimulationError> {
        if capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "capacity must be greater than 0".into(),
            ));
        }
        if fuel_classes == 0 {
            return Err(SimulationError::InvalidConfig(
                "at least one fuel class is required".into(),
            ));
        }

        Ok(Self {
            capacity,
            vehicles: Mutex::new(Vec::with_capacity(capacity)),
            signals: (0..fuel_classes).map(|_| ClassSignal::new()).collect(),
            finished: AtomicBool::new(false),
            sink,
        })
    }

    /// Attempt to admit a vehicle.
    ///
    /// Returns `false` (a normal outcome) when the area is full or production
    /// has already finished. Exactly one arrival record is emitted, after the
    /// lock is released.
    ///
    /// # Panics
    ///
    /// Panics if the vehicle's fuel class is outside this area's classes.
    pub fn try_insert(&self, vehicle: Vehicle) -> bool {
        let signal = self.signal(vehicle.fuel);

        let mut vehicles = self.vehicles.lock();
        let outcome = if vehicles.len() >= self.capacity || self.is_finished() {
            Admission::Dropped
        } else {
            vehicles.push(vehicle);
            signal.post();
            Admission::Admitted
        };
        let held = vehicles.len();
        drop(vehicles);

        debug!(
            vehicle_id = vehicle.id,
            fuel = vehicle.fuel.index(),
            held,
            ?outcome,
            "admission decided"
        );
        self.sink
            .record(StationEvent::Arrival(ArrivalRecord::new(&vehicle, outcome)));

        outcome == Admission::Admitted
    }

    /// Remove and return the earliest waiting vehicle of `class`.
    ///
    /// Removal keeps the relative order of the remaining vehicles, so claims
    /// within one class follow arrival order. The class signal is not touched.
    pub fn try_claim(&self, class: FuelClass) -> Option<Vehicle> {
        let mut vehicles = self.vehicles.lock();
        let position = vehicles.iter().position(|v| v.fuel == class)?;
        Some(vehicles.remove(position))
    }

    /// True when at least one vehicle of `class` is waiting.
    pub fn has_class(&self, class: FuelClass) -> bool {
        self.vehicles.lock().iter().any(|v| v.fuel == class)
    }

    /// Block until the class signal yields a permit or is closed.
    ///
    /// # Panics
    ///
    /// Panics if `class` is outside this area's classes.
    pub fn await_signal(&self, class: FuelClass) -> Wake {
        self.signal(class).wait()
    }

    /// Consume one permit of `class` without blocking, if any remain.
    ///
    /// Drain-mode claims bypass [`await_signal`](Self::await_signal); they
    /// call this afterwards so every admitted vehicle uses up one permit.
    ///
    /// # Panics
    ///
    /// Panics if `class` is outside this area's classes.
    pub fn forfeit_signal(&self, class: FuelClass) -> bool {
        self.signal(class).try_take()
    }

    /// Mark production as finished and wake every parked station.
    ///
    /// Later inserts are dropped. Calling this more than once is harmless.
    pub fn finish(&self) {
        let vehicles = self.vehicles.lock();
        let first = !self.finished.swap(true, Ordering::AcqRel);
        let remaining = vehicles.len();
        drop(vehicles);

        for signal in &*self.signals {
            signal.close();
        }
        if first {
            info!(remaining, "arrivals finished, stations switching to drain mode");
        }
    }

    /// True once [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Number of vehicles currently waiting.
    pub fn len(&self) -> usize {
        self.vehicles.lock().len()
    }

    /// True when no vehicle is waiting.
    pub fn is_empty(&self) -> bool {
        self.vehicles.lock().is_empty()
    }

    /// Maximum number of waiting vehicles.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of fuel classes this area serves.
    pub fn fuel_classes(&self) -> usize {
        self.signals.len()
    }

    /// Current permit count of a class signal.
    ///
    /// # Panics
    ///
    /// Panics if `class` is outside this area's classes.
    pub fn signal_count(&self, class: FuelClass) -> usize {
        self.signal(class).permits()
    }

    /// Copy of the waiting vehicles in arrival order.
    pub fn snapshot(&self) -> Vec<Vehicle> {
        self.vehicles.lock().clone()
    }

    fn signal(&self, class: FuelClass) -> &ClassSignal {
        &self.signals[class.index()]
    }
}

impl std::fmt::Debug for WaitingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitingArea")
            .field("capacity", &self.capacity)
            .field("held", &self.len())
            .field("fuel_classes", &self.signals.len())
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
