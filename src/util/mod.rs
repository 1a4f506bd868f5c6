//! Shared utilities: wall clock, random sampling and tracing setup.

pub mod clock;
pub mod sampling;
pub mod telemetry;

pub use clock::{format_timestamp, now_ms};
pub use sampling::{DurationSampler, FuelMix, MAX_DURATION_SECS, MAX_TIME_SCALE};
pub use telemetry::init_tracing;
