//! Event records and the sinks that receive them.
//!
//! Every admission attempt produces one [`ArrivalRecord`] and every service
//! start one [`ServiceRecord`]. Sinks are called outside the waiting-area lock.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::fuel::{FuelClass, Vehicle};
use crate::util::clock::now_ms;

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// The vehicle entered the waiting area.
    Admitted,
    /// The waiting area was full (or closed) and the vehicle left.
    Dropped,
}

/// One admission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    /// Vehicle identifier.
    pub vehicle_id: u64,
    /// Fuel the vehicle needs.
    pub fuel: FuelClass,
    /// Arrival time in milliseconds since epoch.
    pub timestamp_ms: u64,
    /// Whether the vehicle was admitted.
    pub outcome: Admission,
}

impl ArrivalRecord {
    /// Record for `vehicle` with the given outcome.
    #[must_use]
    pub const fn new(vehicle: &Vehicle, outcome: Admission) -> Self {
        Self {
            vehicle_id: vehicle.id,
            fuel: vehicle.fuel,
            timestamp_ms: vehicle.arrived_at_ms,
            outcome,
        }
    }
}

/// A station starting to serve a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// One-based station index.
    pub station_index: usize,
    /// Vehicle identifier.
    pub vehicle_id: u64,
    /// Fuel dispensed.
    pub fuel: FuelClass,
    /// When the vehicle arrived.
    pub arrived_at_ms: u64,
    /// When service began.
    pub started_at_ms: u64,
}

impl ServiceRecord {
    /// Record for `vehicle` starting service at `station_index` now.
    #[must_use]
    pub fn starting_now(station_index: usize, vehicle: &Vehicle) -> Self {
        Self {
            station_index,
            vehicle_id: vehicle.id,
            fuel: vehicle.fuel,
            arrived_at_ms: vehicle.arrived_at_ms,
            started_at_ms: now_ms(),
        }
    }
}

/// Anything worth writing to the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StationEvent {
    /// Admission attempt.
    Arrival(ArrivalRecord),
    /// Service start.
    Service(ServiceRecord),
}

/// Event sink abstraction.
pub trait EventSink: Send + Sync {
    /// Record an event. Must not call back into the waiting area.
    fn record(&self, event: StationEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: StationEvent) {}
}

/// In-memory event sink for testing and dev.
///
/// Keeps at most `max_events`; the oldest are evicted first.
#[derive(Debug)]
pub struct InMemoryEventSink {
    events: Mutex<VecDeque<StationEvent>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events.min(4096))),
            max_events,
        }
    }

    /// Snapshot of every stored event in recording order.
    #[must_use]
    pub fn events(&self) -> Vec<StationEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Stored arrival records in recording order.
    #[must_use]
    pub fn arrivals(&self) -> Vec<ArrivalRecord> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                StationEvent::Arrival(r) => Some(r.clone()),
                StationEvent::Service(_) => None,
            })
            .collect()
    }

    /// Stored service records in recording order.
    #[must_use]
    pub fn services(&self) -> Vec<ServiceRecord> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                StationEvent::Service(r) => Some(r.clone()),
                StationEvent::Arrival(_) => None,
            })
            .collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&self, event: StationEvent) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: u64) -> Vehicle {
        Vehicle {
            id,
            fuel: FuelClass::new(0),
            arrived_at_ms: 1_000 + id,
        }
    }

    #[test]
    fn test_in_memory_sink_evicts_oldest() {
        let sink = InMemoryEventSink::new(2);
        for id in 0..3 {
            sink.record(StationEvent::Arrival(ArrivalRecord::new(
                &vehicle(id),
                Admission::Admitted,
            )));
        }
        let ids: Vec<_> = sink.arrivals().iter().map(|r| r.vehicle_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_in_memory_sink_splits_records() {
        let sink = InMemoryEventSink::new(10);
        sink.record(StationEvent::Arrival(ArrivalRecord::new(
            &vehicle(1),
            Admission::Dropped,
        )));
        sink.record(StationEvent::Service(ServiceRecord::starting_now(3, &vehicle(2))));

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.arrivals()[0].outcome, Admission::Dropped);
        assert_eq!(sink.services()[0].station_index, 3);
        assert_eq!(sink.services()[0].arrived_at_ms, 1_002);
    }

    #[test]
    fn test_event_json_shape() {
        let event = StationEvent::Arrival(ArrivalRecord::new(&vehicle(4), Admission::Admitted));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "arrival");
        assert_eq!(json["vehicle_id"], 4);
        assert_eq!(json["outcome"], "admitted");
    }
}
