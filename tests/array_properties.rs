use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pv_sizing::sizing::array::total_power;

fn power(p: f64, c: u32) -> f64 {
    total_power(p, c).unwrap_or(f64::NAN)
}

#[test]
fn total_power_is_product() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let p = rng.random_range(0.0..1000.0);
        let c = rng.random_range(0_u32..=5000);
        assert_eq!(power(p, c), p * f64::from(c), "p={p} c={c}");
    }
}

#[test]
fn total_power_monotonic_in_panel_power() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let a = rng.random_range(0.0..1000.0);
        let b = rng.random_range(0.0..1000.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c = rng.random_range(0_u32..=5000);
        assert!(power(lo, c) <= power(hi, c), "p={lo}..{hi} c={c}");
    }
}

#[test]
fn total_power_monotonic_in_panel_count() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let p = rng.random_range(0.0..1000.0);
        let a = rng.random_range(0_u32..=5000);
        let b = rng.random_range(0_u32..=5000);
        let (lo, hi) = (a.min(b), a.max(b));
        assert!(power(p, lo) <= power(p, hi), "p={p} c={lo}..{hi}");
    }
}
