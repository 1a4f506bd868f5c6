//! Tests for error types

use gas_station::core::SimulationError;
use std::error::Error;
use std::io;

#[test]
fn test_invalid_config_error() {
    let err = SimulationError::InvalidConfig("capacity must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: capacity must be greater than 0"
    );
}

#[test]
fn test_unknown_fuel_error() {
    let err = SimulationError::UnknownFuel("diesel".to_string());
    assert_eq!(format!("{}", err), "unknown fuel type: diesel");
}

#[test]
fn test_spawn_error_keeps_source() {
    let err = SimulationError::Spawn {
        role: "station-3".to_string(),
        source: io::Error::other("out of threads"),
    };
    assert_eq!(format!("{}", err), "failed to spawn station-3 thread");
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("out of threads"));
}

#[test]
fn test_panicked_error() {
    let err = SimulationError::Panicked("arrivals".to_string());
    assert_eq!(format!("{}", err), "arrivals thread panicked");
}

#[test]
fn test_io_error_converts_to_event_log() {
    let err: SimulationError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(err, SimulationError::EventLog(_)));
    assert_eq!(format!("{}", err), "event log error: denied");
}

#[test]
fn test_converts_into_anyhow() {
    let result: gas_station::core::AppResult<()> =
        Err(SimulationError::UnknownFuel("AI100".into()).into());
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<SimulationError>().is_some());
}
