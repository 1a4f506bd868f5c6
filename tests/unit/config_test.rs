//! Tests for configuration validation

use gas_station::config::{LogFormat, SimulationConfig, StationConfig};
use gas_station::core::FuelClass;

#[test]
fn test_default_layout() {
    let cfg = SimulationConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.capacity, 15);
    assert_eq!(cfg.arrivals.count, 150);
    assert_eq!(cfg.stations.len(), 5);
    assert_eq!(cfg.drain_backoff_ms, 10);
    assert_eq!(cfg.log.format, LogFormat::Text);
}

#[test]
fn test_zero_capacity_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.capacity = 0;
    assert!(cfg.validate().unwrap_err().contains("capacity"));
}

#[test]
fn test_empty_fuel_list_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.fuels.clear();
    cfg.stations.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_all_zero_weights_rejected() {
    let mut cfg = SimulationConfig::default();
    for fuel in &mut cfg.fuels {
        fuel.weight = 0;
    }
    assert!(cfg.validate().unwrap_err().contains("weight"));
}

#[test]
fn test_unknown_station_fuel_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.stations.push(StationConfig {
        fuel: "diesel".into(),
        mean_service_time: 3.0,
        standard_deviation: 0.1,
    });
    let err = cfg.validate().unwrap_err();
    assert!(err.contains("station 6"));
    assert!(err.contains("diesel"));
}

#[test]
fn test_negative_durations_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.arrivals.mean_interval = -1.0;
    assert!(cfg.validate().unwrap_err().contains("arrivals"));

    let mut cfg = SimulationConfig::default();
    cfg.stations[2].standard_deviation = f64::NAN;
    assert!(cfg.validate().unwrap_err().contains("station 3"));
}

#[test]
fn test_time_scale_must_be_positive() {
    let mut cfg = SimulationConfig::default();
    cfg.time_scale = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_no_stations_is_valid() {
    let mut cfg = SimulationConfig::default();
    cfg.stations.clear();
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_full_json_document() {
    let cfg = SimulationConfig::from_json_str(
        r#"{
            "capacity": 4,
            "fuels": [{ "name": "diesel" }, { "name": "AI98", "weight": 3 }],
            "arrivals": { "count": 20, "mean_interval": 0.2 },
            "stations": [
                { "fuel": "AI98", "mean_service_time": 1.5, "standard_deviation": 0.1 },
                { "fuel": "diesel", "mean_service_time": 2.0 }
            ],
            "seed": 7,
            "log": { "directory": "out", "format": "json" }
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.fuels[0].weight, 1);
    assert_eq!(cfg.fuels[1].weight, 3);
    assert_eq!(cfg.arrivals.count, 20);
    assert!((cfg.arrivals.standard_deviation - 0.5).abs() < f64::EPSILON);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.log.format, LogFormat::Json);
    assert_eq!(
        cfg.station_classes().unwrap(),
        vec![FuelClass::new(1), FuelClass::new(0)]
    );
}

#[test]
fn test_malformed_json_reports_parse_error() {
    let err = SimulationConfig::from_json_str("{ capacity: }").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_missing_file_reported() {
    let err = SimulationConfig::from_path("/nonexistent/gas-station.json").unwrap_err();
    assert!(err.contains("cannot read"));
}

#[test]
fn test_zero_drain_backoff_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.drain_backoff_ms = 0;
    assert!(cfg.validate().unwrap_err().contains("drain_backoff_ms"));
}

#[test]
fn test_unbounded_durations_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.stations[0].mean_service_time = 1e300;
    assert!(cfg.validate().unwrap_err().contains("station 1"));

    let mut cfg = SimulationConfig::default();
    cfg.arrivals.standard_deviation = f64::MAX;
    assert!(cfg.validate().unwrap_err().contains("arrivals"));

    let mut cfg = SimulationConfig::default();
    cfg.time_scale = 1e300;
    assert!(cfg.validate().unwrap_err().contains("time_scale"));
}
