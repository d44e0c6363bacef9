//! Stake progressions. A strategy only proposes the next amount; the caller
//! still validates it against the balance and the table limits.

use crate::config::{FIBONACCI, MAXIMUM_BET, MINIMUM_BET};
use crate::error::ValidationError;

pub trait Strategy {
    fn name(&self) -> &'static str;
    fn bet_amount(&self) -> u64;
    fn on_win(&mut self);
    fn on_loss(&mut self);
}

/// Same stake every time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flat {
    base: u64,
    current: u64,
}

impl Flat {
    pub fn new(base: u64) -> Self {
        Flat { base, current: base }
    }
}

impl Strategy for Flat {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn bet_amount(&self) -> u64 {
        self.current
    }

    fn on_win(&mut self) {
        self.current = self.base;
    }

    fn on_loss(&mut self) {}
}

/// Doubles after every loss, back to base on a win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Martingale {
    base: u64,
    current: u64,
    consecutive_losses: u32,
}

impl Martingale {
    pub fn new(base: u64) -> Self {
        Martingale {
            base,
            current: base,
            consecutive_losses: 0,
        }
    }
}

impl Strategy for Martingale {
    fn name(&self) -> &'static str {
        "martingale"
    }

    fn bet_amount(&self) -> u64 {
        self.current
    }

    fn on_win(&mut self) {
        self.current = self.base;
        self.consecutive_losses = 0;
    }

    fn on_loss(&mut self) {
        self.consecutive_losses += 1;
        // saturate rather than overflow on absurd losing runs
        self.current = 2u64
            .checked_pow(self.consecutive_losses)
            .and_then(|factor| self.base.checked_mul(factor))
            .unwrap_or(u64::MAX);
    }
}

/// Walks the Fibonacci sequence: one step up on a loss, two back on a win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fibonacci {
    base: u64,
    index: usize,
}

impl Fibonacci {
    pub fn new(base: u64) -> Self {
        Fibonacci { base, index: 0 }
    }
}

impl Strategy for Fibonacci {
    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn bet_amount(&self) -> u64 {
        let step = FIBONACCI.get(self.index).or(FIBONACCI.last()).copied().unwrap_or(1);
        step.saturating_mul(self.base)
    }

    fn on_win(&mut self) {
        self.index = self.index.saturating_sub(2);
    }

    fn on_loss(&mut self) {
        self.index = (self.index + 1).min(FIBONACCI.len() - 1);
    }
}

/// Holds at base, and halves the stake once three losses have piled up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conservative {
    base: u64,
    current: u64,
    consecutive_losses: u32,
}

impl Conservative {
    pub fn new(base: u64) -> Self {
        Conservative {
            base,
            current: base,
            consecutive_losses: 0,
        }
    }
}

impl Strategy for Conservative {
    fn name(&self) -> &'static str {
        "conservative"
    }

    fn bet_amount(&self) -> u64 {
        self.current
    }

    fn on_win(&mut self) {
        self.current = self.base;
        self.consecutive_losses = 0;
    }

    fn on_loss(&mut self) {
        self.consecutive_losses += 1;
        if self.consecutive_losses >= 3 {
            self.current = (self.current / 2).max(MINIMUM_BET);
        } else {
            self.current = self.base;
        }
    }
}

pub const STRATEGY_NAMES: [&str; 4] = ["flat", "martingale", "fibonacci", "conservative"];

/// Build a strategy by name. The base amount is raised to the minimum bet
/// and may not exceed the maximum bet.
pub fn from_name(name: &str, base: Option<u64>) -> Result<Box<dyn Strategy>, ValidationError> {
    let base = base.unwrap_or(MINIMUM_BET).max(MINIMUM_BET);
    if base > MAXIMUM_BET {
        return Err(ValidationError::AboveMaximum {
            stake: base,
            max: MAXIMUM_BET,
        });
    }
    let strategy: Box<dyn Strategy> = match name.trim().to_ascii_lowercase().as_str() {
        "flat" => Box::new(Flat::new(base)),
        "martingale" => Box::new(Martingale::new(base)),
        "fibonacci" => Box::new(Fibonacci::new(base)),
        "conservative" => Box::new(Conservative::new(base)),
        other => return Err(ValidationError::UnknownStrategy(other.to_string())),
    };
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_never_moves() {
        let mut s = Flat::new(25);
        s.on_loss();
        s.on_loss();
        assert_eq!(s.bet_amount(), 25);
        s.on_win();
        assert_eq!(s.bet_amount(), 25);
    }

    #[test]
    fn martingale_doubles_then_resets() {
        let mut s = Martingale::new(10);
        for _ in 0..3 {
            s.on_loss();
        }
        assert_eq!(s.bet_amount(), 80);
        s.on_win();
        assert_eq!(s.bet_amount(), 10);
    }

    #[test]
    fn martingale_saturates() {
        let mut s = Martingale::new(10);
        for _ in 0..80 {
            s.on_loss();
        }
        assert_eq!(s.bet_amount(), u64::MAX);
    }

    #[test]
    fn fibonacci_walks_the_sequence() {
        let mut s = Fibonacci::new(10);
        assert_eq!(s.bet_amount(), 10);
        s.on_loss();
        s.on_loss();
        s.on_loss();
        assert_eq!(s.bet_amount(), 30);
        s.on_win();
        assert_eq!(s.bet_amount(), 10);
        s.on_win();
        assert_eq!(s.bet_amount(), 10);
    }

    #[test]
    fn fibonacci_caps_at_the_end() {
        let mut s = Fibonacci::new(10);
        for _ in 0..40 {
            s.on_loss();
        }
        assert_eq!(s.bet_amount(), 1440);
    }

    #[test]
    fn conservative_halves_after_three_losses() {
        let mut s = Conservative::new(80);
        s.on_loss();
        s.on_loss();
        assert_eq!(s.bet_amount(), 80);
        s.on_loss();
        assert_eq!(s.bet_amount(), 40);
        s.on_loss();
        assert_eq!(s.bet_amount(), 20);
        s.on_loss();
        s.on_loss();
        assert_eq!(s.bet_amount(), MINIMUM_BET);
        s.on_win();
        assert_eq!(s.bet_amount(), 80);
        s.on_loss();
        assert_eq!(s.bet_amount(), 80);
    }

    #[test]
    fn fibonacci_saturates_on_a_huge_base() {
        let mut s = Fibonacci::new(9_223_372_036_854_775_858);
        s.on_loss();
        s.on_loss();
        assert_eq!(s.bet_amount(), u64::MAX);
    }

    #[test]
    fn base_above_the_table_limit_is_rejected() {
        for name in STRATEGY_NAMES {
            assert_eq!(from_name(name, Some(MAXIMUM_BET)).unwrap().bet_amount(), MAXIMUM_BET);
            assert!(matches!(
                from_name(name, Some(MAXIMUM_BET + 1)),
                Err(ValidationError::AboveMaximum { .. })
            ));
        }
        assert!(from_name("fibonacci", Some(9_223_372_036_854_775_858)).is_err());
    }

    #[test]
    fn from_name_clamps_base() {
        let s = from_name("Martingale", Some(1)).unwrap();
        assert_eq!(s.name(), "martingale");
        assert_eq!(s.bet_amount(), MINIMUM_BET);
        assert!(from_name("dalembert", None).is_err());
    }
}
