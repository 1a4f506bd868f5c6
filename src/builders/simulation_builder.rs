//! Builders to construct a simulation from configuration.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimulationConfig;
use crate::core::{
    ArrivalSource, EventSink, ServiceStation, Simulation, SimulationError, WaitingArea,
};
use crate::util::sampling::{DurationSampler, FuelMix};

/// RNG for the arrival source (`stream` 0) or station `stream`.
///
/// Seeded runs derive one independent stream per thread from the base seed.
fn rng_for(seed: Option<u64>, stream: u64) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, |base| {
        StdRng::seed_from_u64(base.wrapping_add(stream))
    })
}

/// Build the service stations described by the configuration.
pub fn build_stations(cfg: &SimulationConfig) -> Result<Vec<ServiceStation>, SimulationError> {
    let catalog = cfg.catalog();
    let backoff = Duration::from_millis(cfg.drain_backoff_ms);

    cfg.stations
        .iter()
        .enumerate()
        .map(|(position, station_cfg)| {
            let index = position + 1;
            let fuel = catalog
                .class_of(&station_cfg.fuel)
                .ok_or_else(|| SimulationError::UnknownFuel(station_cfg.fuel.clone()))?;
            let service_time = DurationSampler::new(
                station_cfg.mean_service_time,
                station_cfg.standard_deviation,
                cfg.time_scale,
            )?;
            Ok(
                ServiceStation::new(index, fuel, service_time, rng_for(cfg.seed, index as u64))
                    .with_drain_backoff(backoff),
            )
        })
        .collect()
}

/// Build the arrival source described by the configuration.
pub fn build_arrivals(cfg: &SimulationConfig) -> Result<ArrivalSource, SimulationError> {
    let interval = DurationSampler::new(
        cfg.arrivals.mean_interval,
        cfg.arrivals.standard_deviation,
        cfg.time_scale,
    )?;
    let weights: Vec<u32> = cfg.fuels.iter().map(|f| f.weight).collect();
    let mix = FuelMix::new(&weights)?;
    Ok(ArrivalSource::new(
        cfg.arrivals.count,
        interval,
        mix,
        rng_for(cfg.seed, 0),
    ))
}

/// Validate the configuration and assemble a ready-to-run simulation whose
/// events go to `sink`.
pub fn build_simulation(
    cfg: &SimulationConfig,
    sink: Arc<dyn EventSink>,
) -> Result<Simulation, SimulationError> {
    cfg.validate().map_err(SimulationError::InvalidConfig)?;

    let area = Arc::new(WaitingArea::new(
        cfg.capacity,
        cfg.fuels.len(),
        Arc::clone(&sink),
    )?);
    let stations = build_stations(cfg)?;
    let arrivals = build_arrivals(cfg)?;

    Ok(Simulation::new(area, arrivals, stations, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StationConfig;
    use crate::core::{FuelClass, NoopEventSink};

    #[test]
    fn test_stations_are_numbered_from_one() {
        let stations = build_stations(&SimulationConfig::default()).unwrap();
        let layout: Vec<_> = stations.iter().map(|s| (s.index(), s.fuel())).collect();
        assert_eq!(
            layout,
            vec![
                (1, FuelClass::new(0)),
                (2, FuelClass::new(0)),
                (3, FuelClass::new(1)),
                (4, FuelClass::new(1)),
                (5, FuelClass::new(2)),
            ]
        );
    }

    #[test]
    fn test_unknown_station_fuel() {
        let mut cfg = SimulationConfig::default();
        cfg.stations.push(StationConfig {
            fuel: "diesel".into(),
            mean_service_time: 1.0,
            standard_deviation: 0.1,
        });
        assert!(matches!(
            build_stations(&cfg),
            Err(SimulationError::UnknownFuel(name)) if name == "diesel"
        ));
        assert!(matches!(
            build_simulation(&cfg, Arc::new(NoopEventSink)),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_build_simulation_sizes_area() {
        let mut cfg = SimulationConfig::default();
        cfg.capacity = 4;
        let simulation = build_simulation(&cfg, Arc::new(NoopEventSink)).unwrap();
        assert_eq!(simulation.area().capacity(), 4);
        assert_eq!(simulation.area().fuel_classes(), 3);
    }
}
