//! Random duration and fuel sampling.

use std::time::Duration;

use rand::distr::weighted::WeightedIndex;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::core::{FuelClass, SimulationError};

/// Largest mean or standard deviation accepted for a sampled duration, in
/// seconds (one day).
pub const MAX_DURATION_SECS: f64 = 86_400.0;

/// Largest accepted time scale.
pub const MAX_TIME_SCALE: f64 = 1_000.0;

/// Normally distributed duration, measured in seconds and scaled by a
/// simulation-wide time factor. Negative samples become zero.
#[derive(Debug, Clone)]
pub struct DurationSampler {
    normal: Normal<f64>,
    time_scale: f64,
}

impl DurationSampler {
    /// Sampler with the given mean and standard deviation (seconds).
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if the parameters are not
    /// finite, the deviation is negative, either exceeds
    /// [`MAX_DURATION_SECS`] in magnitude, or `time_scale` is not in
    /// `(0, MAX_TIME_SCALE]`.
    pub fn new(mean: f64, std_dev: f64, time_scale: f64) -> Result<Self, SimulationError> {
        if !mean.is_finite() || mean.abs() > MAX_DURATION_SECS {
            return Err(SimulationError::InvalidConfig(format!(
                "mean duration must be finite and at most {MAX_DURATION_SECS} s, got {mean}"
            )));
        }
        if !(0.0..=MAX_DURATION_SECS).contains(&std_dev) {
            return Err(SimulationError::InvalidConfig(format!(
                "standard deviation must be between 0 and {MAX_DURATION_SECS} s, got {std_dev}"
            )));
        }
        if !time_scale.is_finite() || time_scale <= 0.0 || time_scale > MAX_TIME_SCALE {
            return Err(SimulationError::InvalidConfig(format!(
                "time scale must be positive and at most {MAX_TIME_SCALE}, got {time_scale}"
            )));
        }
        let normal = Normal::new(mean, std_dev).map_err(|e| {
            SimulationError::InvalidConfig(format!(
                "invalid distribution (mean {mean}, standard deviation {std_dev}): {e}"
            ))
        })?;
        Ok(Self { normal, time_scale })
    }

    /// Draw one duration.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = self.normal.sample(rng) * self.time_scale;
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Mean of the underlying distribution, before scaling.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.normal.mean()
    }
}

/// Weighted choice of fuel class for arriving vehicles.
#[derive(Debug, Clone)]
pub struct FuelMix {
    index: WeightedIndex<u32>,
}

impl FuelMix {
    /// Mix where class `i` is drawn with probability `weights[i] / sum`.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if `weights` is empty or sums
    /// to zero.
    pub fn new(weights: &[u32]) -> Result<Self, SimulationError> {
        let index = WeightedIndex::new(weights)
            .map_err(|e| SimulationError::InvalidConfig(format!("invalid fuel weights: {e}")))?;
        Ok(Self { index })
    }

    /// Draw one fuel class.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FuelClass {
        FuelClass::new(self.index.sample(rng))
    }
}
