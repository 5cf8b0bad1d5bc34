//! Random draws consumed by shot resolution.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait Dice {
    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `[min, max]`.
    fn roll_inclusive(&mut self, min: i32, max: i32) -> i32;
}

#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Dice for SeededDice {
    fn unit(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    fn roll_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        min + (self.rng.next_u64() % span) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_rolls_the_same_sequence() {
        let mut left = SeededDice::new(99);
        let mut right = SeededDice::new(99);
        for _ in 0..64 {
            assert_eq!(left.roll_inclusive(20, 35), right.roll_inclusive(20, 35));
            assert_eq!(left.unit().to_bits(), right.unit().to_bits());
        }
    }

    #[test]
    fn rolls_stay_inside_bounds() {
        let mut dice = SeededDice::new(3);
        for _ in 0..1_000 {
            assert!((40..=60).contains(&dice.roll_inclusive(40, 60)));
            assert!((0.0..1.0).contains(&dice.unit()));
        }
        assert_eq!(dice.roll_inclusive(7, 7), 7);
    }
}
