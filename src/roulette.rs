use crate::config::{MAX_NUMBER, RED_NUMBERS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour of a pocket. Anything that is neither zero nor red is black.
pub fn color_of(number: u8) -> Color {
    if number == 0 {
        Color::Green
    } else if RED_NUMBERS.contains(&number) {
        Color::Red
    } else {
        Color::Black
    }
}

/// Single-zero wheel. Owns its generator so seeded wheels never share state.
pub struct Wheel {
    rng: ChaCha8Rng,
}

impl Wheel {
    pub fn from_entropy() -> Self {
        Wheel {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Wheel {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn spin(&mut self) -> u8 {
        self.rng.gen_range(0..=MAX_NUMBER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_partition_the_wheel() {
        let count = |c: Color| (0..=MAX_NUMBER).filter(|n| color_of(*n) == c).count();
        assert_eq!(count(Color::Green), 1);
        assert_eq!(count(Color::Red), 18);
        assert_eq!(count(Color::Black), 18);
        assert_eq!(color_of(0), Color::Green);
        assert_eq!(color_of(7), Color::Red);
        assert_eq!(color_of(10), Color::Black);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Wheel::seeded(42);
        let mut b = Wheel::seeded(42);
        let xs: Vec<u8> = (0..50).map(|_| a.spin()).collect();
        let ys: Vec<u8> = (0..50).map(|_| b.spin()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|n| *n <= MAX_NUMBER));
    }

    #[test]
    fn spins_cover_the_range() {
        let mut wheel = Wheel::seeded(7);
        let mut seen = [false; 37];
        for _ in 0..5000 {
            seen[wheel.spin() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
