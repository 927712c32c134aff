//! Seeded randomness.

use delve_foundation::{roll_percent, seeded};
use rand::Rng;

#[test]
fn seeds_replay() {
    let mut a = seeded(42);
    let mut b = seeded(42);
    for _ in 0..64 {
        assert_eq!(a.gen_range(0..1_000_000u32), b.gen_range(0..1_000_000u32));
    }
}

#[test]
fn percent_edges() {
    let mut rng = seeded(1);
    for _ in 0..100 {
        assert!(!roll_percent(&mut rng, 0));
        assert!(roll_percent(&mut rng, 100));
    }
}

#[test]
fn rolls_draw_one_number_regardless_of_chance() {
    let mut a = seeded(8);
    let mut b = seeded(8);
    roll_percent(&mut a, 0);
    roll_percent(&mut b, 100);
    assert_eq!(a.gen_range(0..u32::MAX), b.gen_range(0..u32::MAX));
}
