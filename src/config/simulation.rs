//! Simulation configuration structures.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{FuelCatalog, FuelClass};
use crate::util::sampling::{MAX_DURATION_SECS, MAX_TIME_SCALE};

/// A fuel grade and how often arriving vehicles need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelConfig {
    /// Display name, referenced by stations.
    pub name: String,
    /// Relative arrival weight.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

/// Arrival process configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    /// Total number of vehicles to generate.
    pub count: u64,
    /// Mean gap between arrivals, in seconds.
    pub mean_interval: f64,
    /// Standard deviation of the gap, in seconds.
    pub standard_deviation: f64,
}

/// One pump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Fuel name served; must appear in `fuels`.
    pub fuel: String,
    /// Mean service time, in seconds.
    #[serde(default)]
    pub mean_service_time: f64,
    /// Standard deviation of the service time, in seconds.
    #[serde(default)]
    pub standard_deviation: f64,
}

/// Event log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Event log location and format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory receiving `inserted.log`, `dropped.log` and `station_N.log`.
    pub directory: PathBuf,
    /// Line format.
    pub format: LogFormat,
}

/// Root simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Waiting-area capacity.
    pub capacity: usize,
    /// Fuel catalog in class order.
    pub fuels: Vec<FuelConfig>,
    /// Arrival process.
    pub arrivals: ArrivalConfig,
    /// Pumps, numbered from 1 in this order.
    pub stations: Vec<StationConfig>,
    /// Drain-mode retry sleep, in milliseconds.
    pub drain_backoff_ms: u64,
    /// Multiplier applied to every sampled duration.
    pub time_scale: f64,
    /// Seed for reproducible runs; OS entropy when absent.
    pub seed: Option<u64>,
    /// Event log output.
    pub log: LogConfig,
}

const fn default_weight() -> u32 {
    1
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            count: 150,
            mean_interval: 1.0,
            standard_deviation: 0.5,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: LogFormat::Text,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let fuel = |name: &str, weight| FuelConfig {
            name: name.into(),
            weight,
        };
        let station = |fuel: &str, mean_service_time, standard_deviation| StationConfig {
            fuel: fuel.into(),
            mean_service_time,
            standard_deviation,
        };
        Self {
            capacity: 15,
            fuels: vec![fuel("AI76", 2), fuel("AI92", 2), fuel("AI95", 1)],
            arrivals: ArrivalConfig::default(),
            stations: vec![
                station("AI76", 10.0, 0.5),
                station("AI76", 10.0, 0.5),
                station("AI92", 12.5, 0.6),
                station("AI92", 12.5, 0.6),
                station("AI95", 15.0, 0.7),
            ],
            drain_backoff_ms: 10,
            time_scale: 1.0,
            seed: None,
            log: LogConfig::default(),
        }
    }
}

fn check_distribution(what: &str, mean: f64, standard_deviation: f64) -> Result<(), String> {
    if !(0.0..=MAX_DURATION_SECS).contains(&mean) {
        return Err(format!(
            "{what} mean must be between 0 and {MAX_DURATION_SECS} seconds"
        ));
    }
    if !(0.0..=MAX_DURATION_SECS).contains(&standard_deviation) {
        return Err(format!(
            "{what} standard deviation must be between 0 and {MAX_DURATION_SECS} seconds"
        ));
    }
    Ok(())
}

impl StationConfig {
    /// Validate station values.
    pub fn validate(&self) -> Result<(), String> {
        check_distribution("service time", self.mean_service_time, self.standard_deviation)
    }
}

impl ArrivalConfig {
    /// Validate arrival values.
    pub fn validate(&self) -> Result<(), String> {
        check_distribution("arrival interval", self.mean_interval, self.standard_deviation)
    }
}

impl SimulationConfig {
    /// Validate every section and cross-check station fuels.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("capacity must be greater than 0".into());
        }
        if self.fuels.is_empty() {
            return Err("at least one fuel must be defined".into());
        }
        let mut names = HashSet::new();
        for fuel in &self.fuels {
            if fuel.name.trim().is_empty() {
                return Err("fuel names must not be empty".into());
            }
            if !names.insert(fuel.name.as_str()) {
                return Err(format!("duplicate fuel `{}`", fuel.name));
            }
        }
        if self.fuels.iter().all(|f| f.weight == 0) {
            return Err("at least one fuel must have a positive weight".into());
        }
        if !(f64::MIN_POSITIVE..=MAX_TIME_SCALE).contains(&self.time_scale) {
            return Err(format!(
                "time_scale must be greater than 0 and at most {MAX_TIME_SCALE}"
            ));
        }
        if self.drain_backoff_ms == 0 {
            return Err("drain_backoff_ms must be greater than 0".into());
        }
        self.arrivals
            .validate()
            .map_err(|e| format!("arrivals invalid: {e}"))?;
        for (position, station) in self.stations.iter().enumerate() {
            let index = position + 1;
            if !names.contains(station.fuel.as_str()) {
                return Err(format!(
                    "station {index} invalid: unknown fuel type: {}",
                    station.fuel
                ));
            }
            station
                .validate()
                .map_err(|e| format!("station {index} invalid: {e}"))?;
        }
        Ok(())
    }

    /// Fuel catalog in configuration order.
    #[must_use]
    pub fn catalog(&self) -> FuelCatalog {
        FuelCatalog::new(self.fuels.iter().map(|f| f.name.clone()))
    }

    /// Fuel class of every station, in station order.
    pub fn station_classes(&self) -> Result<Vec<FuelClass>, String> {
        let catalog = self.catalog();
        self.stations
            .iter()
            .map(|s| {
                catalog
                    .class_of(&s.fuel)
                    .ok_or_else(|| format!("unknown fuel type: {}", s.fuel))
            })
            .collect()
    }

    /// Parse simulation configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Self::from_json_str(&input)
    }
}
