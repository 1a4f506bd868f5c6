//! Tests for duration and fuel sampling

use gas_station::core::FuelClass;
use gas_station::util::{DurationSampler, FuelMix};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[test]
fn test_same_seed_same_samples() {
    let sampler = DurationSampler::new(1.0, 0.5, 0.01).unwrap();
    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    let first: Vec<_> = (0..20).map(|_| sampler.sample(&mut a)).collect();
    let second: Vec<_> = (0..20).map(|_| sampler.sample(&mut b)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_samples_are_never_negative_and_bounded() {
    let sampler = DurationSampler::new(0.1, 1.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..1_000 {
        assert!(sampler.sample(&mut rng) < Duration::from_secs(60));
    }
}

#[test]
fn test_fuel_mix_respects_zero_weight() {
    let mix = FuelMix::new(&[0, 1, 0]).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        assert_eq!(mix.sample(&mut rng), FuelClass::new(1));
    }
}

#[test]
fn test_fuel_mix_follows_weights() {
    let mix = FuelMix::new(&[2, 2, 1]).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let mut counts = [0_u32; 3];
    for _ in 0..10_000 {
        counts[mix.sample(&mut rng).index()] += 1;
    }
    assert!(counts.iter().all(|c| *c > 0));
    assert!(counts[0] > counts[2]);
    assert!(counts[1] > counts[2]);
}

#[test]
fn test_fuel_mix_rejects_empty_and_zero() {
    assert!(FuelMix::new(&[]).is_err());
    assert!(FuelMix::new(&[0, 0]).is_err());
}
