//! Tests for event records and sinks

use gas_station::core::{
    Admission, ArrivalRecord, EventSink, FuelClass, InMemoryEventSink, NoopEventSink,
    ServiceRecord, StationEvent, Vehicle,
};

fn vehicle(id: u64) -> Vehicle {
    Vehicle {
        id,
        fuel: FuelClass::new(2),
        arrived_at_ms: 1_700_000_000_000,
    }
}

#[test]
fn test_arrival_record_copies_vehicle() {
    let record = ArrivalRecord::new(&vehicle(4), Admission::Dropped);
    assert_eq!(record.vehicle_id, 4);
    assert_eq!(record.fuel, FuelClass::new(2));
    assert_eq!(record.timestamp_ms, 1_700_000_000_000);
    assert_eq!(record.outcome, Admission::Dropped);
}

#[test]
fn test_service_record_starts_after_arrival() {
    let v = Vehicle::arriving(8, FuelClass::new(0));
    let record = ServiceRecord::starting_now(2, &v);
    assert_eq!(record.station_index, 2);
    assert_eq!(record.vehicle_id, 8);
    assert!(record.started_at_ms >= record.arrived_at_ms);
}

#[test]
fn test_event_json_shape() {
    let event = StationEvent::Service(ServiceRecord {
        station_index: 5,
        vehicle_id: 11,
        fuel: FuelClass::new(1),
        arrived_at_ms: 10,
        started_at_ms: 20,
    });
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["event"], "service");
    assert_eq!(value["station_index"], 5);
    assert_eq!(value["fuel"], 1);

    let back: StationEvent = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_arrival_event_reads_back_from_json_line() {
    let event = StationEvent::Arrival(ArrivalRecord::new(&vehicle(6), Admission::Dropped));
    let line = serde_json::to_string(&event).unwrap();

    let back: StationEvent = serde_json::from_str(&line).unwrap();
    assert_eq!(back, event);
    match back {
        StationEvent::Arrival(record) => assert_eq!(record.timestamp_ms, 1_700_000_000_000),
        StationEvent::Service(_) => panic!("expected an arrival event"),
    }
}

#[test]
fn test_admission_serializes_snake_case() {
    let record = ArrivalRecord::new(&vehicle(1), Admission::Admitted);
    let json = serde_json::to_string(&StationEvent::Arrival(record)).unwrap();
    assert!(json.contains(r#""event":"arrival""#));
    assert!(json.contains(r#""outcome":"admitted""#));
}

#[test]
fn test_in_memory_sink_keeps_order() {
    let sink = InMemoryEventSink::new(10);
    sink.record(StationEvent::Arrival(ArrivalRecord::new(
        &vehicle(1),
        Admission::Admitted,
    )));
    sink.record(StationEvent::Service(ServiceRecord::starting_now(1, &vehicle(1))));
    sink.record(StationEvent::Arrival(ArrivalRecord::new(
        &vehicle(2),
        Admission::Dropped,
    )));

    assert_eq!(sink.events().len(), 3);
    assert_eq!(sink.arrivals().len(), 2);
    assert_eq!(sink.services().len(), 1);
    assert!(matches!(sink.events()[1], StationEvent::Service(_)));
}

#[test]
fn test_noop_sink_accepts_events() {
    let sink: &dyn EventSink = &NoopEventSink;
    sink.record(StationEvent::Arrival(ArrivalRecord::new(
        &vehicle(1),
        Admission::Admitted,
    )));
}
