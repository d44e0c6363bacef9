use crate::session::{BetRecord, Statistics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstWin,
    TenWins,
    FiftyBets,
    BigWinner,
    LuckyStreak,
    HighRoller,
    PerfectGame,
    Comeback,
}

impl Achievement {
    pub const ALL: [Achievement; 8] = [
        Achievement::FirstWin,
        Achievement::TenWins,
        Achievement::FiftyBets,
        Achievement::BigWinner,
        Achievement::LuckyStreak,
        Achievement::HighRoller,
        Achievement::PerfectGame,
        Achievement::Comeback,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstWin => "first win",
            Achievement::TenWins => "ten wins",
            Achievement::FiftyBets => "fifty bets",
            Achievement::BigWinner => "big winner",
            Achievement::LuckyStreak => "lucky streak",
            Achievement::HighRoller => "high roller",
            Achievement::PerfectGame => "perfect game",
            Achievement::Comeback => "comeback",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstWin => "win your first bet",
            Achievement::TenWins => "win 10 bets",
            Achievement::FiftyBets => "place 50 bets",
            Achievement::BigWinner => "win $5000 in a single session",
            Achievement::LuckyStreak => "win 5 bets in a row",
            Achievement::HighRoller => "place a bet of $500 or more",
            Achievement::PerfectGame => "win rate above 60% with 20+ bets",
            Achievement::Comeback => "recover from balance below $100",
        }
    }
}

const LUCKY_STREAK: u64 = 5;
const HIGH_ROLLER_STAKE: u64 = 500;
const BIG_WIN_PROFIT: i64 = 5000;

/// Every achievement the given state qualifies for.
pub fn evaluate_achievements(stats: &Statistics, history: &[BetRecord]) -> BTreeSet<Achievement> {
    let longest_run = history
        .iter()
        .fold((0u64, 0u64), |(run, best), record| {
            let run = if record.won { run + 1 } else { 0 };
            (run, best.max(run))
        })
        .1;

    let rules = [
        (Achievement::FirstWin, stats.wins >= 1),
        (Achievement::TenWins, stats.wins >= 10),
        (Achievement::FiftyBets, stats.total_bets >= 50),
        (Achievement::BigWinner, stats.profit >= BIG_WIN_PROFIT),
        (
            Achievement::LuckyStreak,
            stats.max_win_streak.max(longest_run) >= LUCKY_STREAK,
        ),
        (
            Achievement::HighRoller,
            history.iter().any(|r| r.bet.stake() >= HIGH_ROLLER_STAKE),
        ),
        (
            Achievement::PerfectGame,
            stats.total_bets >= 20 && stats.win_rate >= 60.0,
        ),
        (
            Achievement::Comeback,
            stats.low_balance_reached && stats.profit > 0,
        ),
    ];

    rules
        .into_iter()
        .filter(|(_, met)| *met)
        .map(|(achievement, _)| achievement)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::{Bet, BetKind};

    fn record(stake: u64, won: bool) -> BetRecord {
        BetRecord {
            bet: Bet::new(BetKind::Odd, stake).unwrap(),
            winning_number: if won { 1 } else { 2 },
            won,
            payout: if won { stake * 2 } else { 0 },
        }
    }

    #[test]
    fn fresh_state_unlocks_nothing() {
        assert!(evaluate_achievements(&Statistics::default(), &[]).is_empty());
    }

    #[test]
    fn history_driven_rules() {
        let history: Vec<_> = (0..5).map(|_| record(500, true)).collect();
        let stats = Statistics {
            wins: 5,
            total_bets: 5,
            win_rate: 100.0,
            ..Statistics::default()
        };
        let unlocked = evaluate_achievements(&stats, &history);
        assert!(unlocked.contains(&Achievement::FirstWin));
        assert!(unlocked.contains(&Achievement::LuckyStreak));
        assert!(unlocked.contains(&Achievement::HighRoller));
        assert!(!unlocked.contains(&Achievement::PerfectGame));
    }

    #[test]
    fn comeback_needs_a_dip_and_a_profit() {
        let mut stats = Statistics {
            profit: 10,
            ..Statistics::default()
        };
        assert!(!evaluate_achievements(&stats, &[]).contains(&Achievement::Comeback));
        stats.low_balance_reached = true;
        assert!(evaluate_achievements(&stats, &[]).contains(&Achievement::Comeback));
    }

    #[test]
    fn perfect_game_threshold() {
        let stats = Statistics {
            wins: 12,
            losses: 8,
            total_bets: 20,
            win_rate: 60.0,
            ..Statistics::default()
        };
        let unlocked = evaluate_achievements(&stats, &[]);
        assert!(unlocked.contains(&Achievement::PerfectGame));
        assert!(unlocked.contains(&Achievement::TenWins));
    }
}
