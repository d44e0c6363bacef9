//! Bet resolution.
//!
//! Everything here is pure: a bet and a winning number go in, an [`Outcome`]
//! comes out. Nothing in the session or the wheel is touched, so the same
//! functions back the payout calculator.

use crate::bet::{Bet, BetKind};
use crate::config::payout_multiplier;
use crate::roulette::color_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub won: bool,
    /// Total returned to the player, stake included. Zero on a loss.
    pub payout: u64,
}

/// Whether `kind` wins when `winning_number` comes up.
///
/// Zero loses every bet except a straight bet on zero.
pub fn wins(kind: BetKind, winning_number: u8) -> bool {
    if winning_number == 0 {
        return kind == BetKind::Number(0);
    }
    match kind {
        BetKind::Number(n) => n == winning_number,
        BetKind::Color(color) => color_of(winning_number) == color,
        BetKind::Odd => winning_number % 2 == 1,
        BetKind::Even => winning_number % 2 == 0,
        BetKind::Low => (1..=18).contains(&winning_number),
        BetKind::High => (19..=36).contains(&winning_number),
        BetKind::Dozen(dozen) => dozen.contains(winning_number),
    }
}

pub fn multiplier(kind: BetKind) -> u64 {
    payout_multiplier(kind.name())
}

pub fn settle(bet: &Bet, winning_number: u8) -> Outcome {
    let won = wins(bet.kind(), winning_number);
    let payout = if won {
        bet.stake() * multiplier(bet.kind())
    } else {
        0
    };
    Outcome { won, payout }
}

/// What a winning bet would return, without spinning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutPreview {
    pub stake: u64,
    pub multiplier: u64,
    pub payout: u64,
    pub profit: i64,
    /// Return on the stake, in percent.
    pub roi: f64,
}

pub fn preview(kind_name: &str, stake: u64) -> PayoutPreview {
    let multiplier = payout_multiplier(kind_name);
    let payout = stake.saturating_mul(multiplier);
    let profit = i64::try_from(payout.saturating_sub(stake)).unwrap_or(i64::MAX);
    let roi = if stake > 0 {
        profit as f64 / stake as f64 * 100.0
    } else {
        0.0
    };
    PayoutPreview {
        stake,
        multiplier,
        payout,
        profit,
        roi,
    }
}

pub fn potential_payout(bet: &Bet) -> u64 {
    bet.stake() * multiplier(bet.kind())
}

/// Rows for the side-by-side comparison table.
pub fn compare_bet_types(stake: u64) -> Vec<(&'static str, PayoutPreview)> {
    [
        ("number", "number"),
        ("color", "color"),
        ("odd/even", "odd"),
        ("high/low", "high"),
        ("dozen", "dozen"),
    ]
    .into_iter()
    .map(|(label, kind)| (label, preview(kind, stake)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::Dozen;
    use crate::roulette::Color;

    fn bet(kind: BetKind, stake: u64) -> Bet {
        Bet::new(kind, stake).unwrap()
    }

    #[test]
    fn straight_up_on_seven() {
        let outcome = settle(&bet(BetKind::Number(7), 100), 7);
        assert_eq!(outcome, Outcome { won: true, payout: 3600 });
        assert_eq!(settle(&bet(BetKind::Number(7), 100), 8), Outcome { won: false, payout: 0 });
    }

    #[test]
    fn zero_only_pays_a_straight_bet_on_zero() {
        assert!(wins(BetKind::Number(0), 0));
        for kind in [
            BetKind::Color(Color::Red),
            BetKind::Color(Color::Black),
            BetKind::Odd,
            BetKind::Even,
            BetKind::Low,
            BetKind::High,
            BetKind::Dozen(Dozen::First),
            BetKind::Number(1),
        ] {
            assert!(!wins(kind, 0), "{kind} should lose on zero");
        }
        assert_eq!(settle(&bet(BetKind::Color(Color::Red), 50), 0).payout, 0);
    }

    #[test]
    fn even_money_bets() {
        assert!(wins(BetKind::Color(Color::Red), 1));
        assert!(wins(BetKind::Color(Color::Black), 2));
        assert!(wins(BetKind::Odd, 35));
        assert!(wins(BetKind::Even, 36));
        assert!(wins(BetKind::Low, 18));
        assert!(!wins(BetKind::Low, 19));
        assert!(wins(BetKind::High, 19));
        assert_eq!(settle(&bet(BetKind::Odd, 10), 3).payout, 20);
    }

    #[test]
    fn dozen_edges() {
        let b = bet(BetKind::Dozen(Dozen::First), 20);
        assert_eq!(settle(&b, 12), Outcome { won: true, payout: 60 });
        assert_eq!(settle(&b, 1), Outcome { won: true, payout: 60 });
        assert!(!settle(&b, 13).won);
        assert!(wins(BetKind::Dozen(Dozen::Third), 36));
    }

    #[test]
    fn settle_is_repeatable() {
        let b = bet(BetKind::Color(Color::Black), 40);
        for n in 0..=36 {
            assert_eq!(settle(&b, n), settle(&b, n));
        }
    }

    #[test]
    fn calculator_previews() {
        let p = preview("number", 10);
        assert_eq!(p.payout, 360);
        assert_eq!(p.profit, 350);
        assert!((p.roi - 3500.0).abs() < f64::EPSILON);
        assert_eq!(preview("column", 10).payout, 20);
        let rows = compare_bet_types(100);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].1.payout, 300);
        assert_eq!(potential_payout(&bet(BetKind::Low, 50)), 100);
    }

    #[test]
    fn preview_saturates_instead_of_wrapping() {
        let p = preview("number", u64::MAX / 2);
        assert_eq!(p.payout, u64::MAX);
        assert_eq!(p.profit, i64::MAX);
        assert!(p.roi > 0.0);
    }
}
