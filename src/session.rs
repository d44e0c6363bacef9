//! Player session: balance, bet history and the statistics derived from it.
//!
//! The session serializes as-is to the save file. Fields missing from an
//! older save fall back to their defaults.

use crate::achievements::{evaluate_achievements, Achievement};
use crate::bet::Bet;
use crate::config::{CRITICAL_BALANCE_WARNING, INITIAL_BALANCE, LOW_BALANCE_WARNING, MINIMUM_BET};
use crate::error::ValidationError;
use crate::roulette::{color_of, Color, Wheel};
use crate::settlement::{settle, Outcome};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One settled wager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    #[serde(flatten)]
    pub bet: Bet,
    pub winning_number: u8,
    pub won: bool,
    pub payout: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub balance: u64,
    pub initial_balance: u64,
    pub wins: u64,
    pub losses: u64,
    pub total_bets: u64,
    /// Percentage, 0 when nothing has been played.
    pub win_rate: f64,
    pub profit: i64,
    pub current_win_streak: u64,
    pub current_loss_streak: u64,
    pub max_win_streak: u64,
    pub max_loss_streak: u64,
    pub low_balance_reached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceWarning {
    Low,
    Critical,
}

/// Everything the shell needs to report after a spin.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub bet: Bet,
    pub winning_number: u8,
    pub color: Color,
    pub outcome: Outcome,
    pub balance: u64,
    pub unlocked: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    balance: u64,
    initial_balance: u64,
    wins: u64,
    losses: u64,
    current_win_streak: u64,
    current_loss_streak: u64,
    max_win_streak: u64,
    max_loss_streak: u64,
    number_frequency: BTreeMap<u8, u64>,
    #[serde(rename = "bet_history")]
    history: Vec<BetRecord>,
    low_balance_reached: bool,
    achievements: BTreeSet<Achievement>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(INITIAL_BALANCE)
    }
}

impl Session {
    pub fn new(initial_balance: u64) -> Self {
        Session {
            balance: initial_balance,
            initial_balance,
            wins: 0,
            losses: 0,
            current_win_streak: 0,
            current_loss_streak: 0,
            max_win_streak: 0,
            max_loss_streak: 0,
            number_frequency: BTreeMap::new(),
            history: Vec::new(),
            low_balance_reached: false,
            achievements: BTreeSet::new(),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn initial_balance(&self) -> u64 {
        self.initial_balance
    }

    pub fn history(&self) -> &[BetRecord] {
        &self.history
    }

    pub fn number_frequency(&self) -> &BTreeMap<u8, u64> {
        &self.number_frequency
    }

    pub fn achievements(&self) -> &BTreeSet<Achievement> {
        &self.achievements
    }

    /// Last `count` records, oldest first.
    pub fn recent(&self, count: usize) -> &[BetRecord] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }

    /// Whether the balance still covers the table minimum.
    pub fn can_play(&self) -> bool {
        self.balance >= MINIMUM_BET
    }

    pub fn balance_warning(&self) -> Option<BalanceWarning> {
        if self.balance < CRITICAL_BALANCE_WARNING {
            Some(BalanceWarning::Critical)
        } else if self.balance < LOW_BALANCE_WARNING {
            Some(BalanceWarning::Low)
        } else {
            None
        }
    }

    /// Stake check against the current balance, before anything is debited.
    pub fn check_affordable(&self, stake: u64) -> Result<(), ValidationError> {
        if stake > self.balance {
            return Err(ValidationError::InsufficientBalance {
                stake,
                balance: self.balance,
            });
        }
        Ok(())
    }

    /// Play one wager: debit, spin, settle, credit, record.
    ///
    /// A rejected bet leaves the session untouched.
    pub fn play_round(&mut self, bet: Bet, wheel: &mut Wheel) -> Result<RoundResult, ValidationError> {
        self.check_affordable(bet.stake())?;

        self.balance -= bet.stake();
        if self.balance < LOW_BALANCE_WARNING {
            self.low_balance_reached = true;
        }

        let winning_number = wheel.spin();
        let outcome = settle(&bet, winning_number);
        self.balance += outcome.payout;
        self.record(bet, winning_number, outcome);

        let unlocked = self.refresh_achievements();
        debug!(
            "settled {} on {}: won={} payout={} balance={}",
            bet, winning_number, outcome.won, outcome.payout, self.balance
        );

        Ok(RoundResult {
            bet,
            winning_number,
            color: color_of(winning_number),
            outcome,
            balance: self.balance,
            unlocked,
        })
    }

    /// Append a settled wager and update counters, streaks and frequencies.
    /// Balance is not touched here.
    pub fn record(&mut self, bet: Bet, winning_number: u8, outcome: Outcome) {
        self.history.push(BetRecord {
            bet,
            winning_number,
            won: outcome.won,
            payout: outcome.payout,
        });
        *self.number_frequency.entry(winning_number).or_insert(0) += 1;

        if outcome.won {
            self.wins += 1;
            self.current_win_streak += 1;
            self.current_loss_streak = 0;
            self.max_win_streak = self.max_win_streak.max(self.current_win_streak);
        } else {
            self.losses += 1;
            self.current_loss_streak += 1;
            self.current_win_streak = 0;
            self.max_loss_streak = self.max_loss_streak.max(self.current_loss_streak);
        }
    }

    /// Unlock whatever the current state qualifies for; returns the new ones.
    pub fn refresh_achievements(&mut self) -> Vec<Achievement> {
        let earned = evaluate_achievements(&self.statistics(), &self.history);
        let fresh: Vec<Achievement> = earned.difference(&self.achievements).copied().collect();
        self.achievements.extend(fresh.iter().copied());
        fresh
    }

    pub fn statistics(&self) -> Statistics {
        let total_bets = self.wins + self.losses;
        let win_rate = if total_bets > 0 {
            self.wins as f64 / total_bets as f64 * 100.0
        } else {
            0.0
        };
        Statistics {
            balance: self.balance,
            initial_balance: self.initial_balance,
            wins: self.wins,
            losses: self.losses,
            total_bets,
            win_rate,
            profit: self.balance as i64 - self.initial_balance as i64,
            current_win_streak: self.current_win_streak,
            current_loss_streak: self.current_loss_streak,
            max_win_streak: self.max_win_streak,
            max_loss_streak: self.max_loss_streak,
            low_balance_reached: self.low_balance_reached,
        }
    }

    /// The `count` most frequent winning numbers, most frequent first.
    /// Equal counts are ordered by ascending number.
    pub fn hot_numbers(&self, count: usize) -> Vec<(u8, u64)> {
        let mut entries: Vec<(u8, u64)> = self
            .number_frequency
            .iter()
            .map(|(number, hits)| (*number, *hits))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(count);
        entries
    }
}
