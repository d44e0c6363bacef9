use clap::Parser;
use std::path::PathBuf;

/// Smallest stake a bet may carry.
pub const MINIMUM_BET: u64 = 10;
/// Largest stake a bet may carry.
pub const MAXIMUM_BET: u64 = 10_000;
/// Starting balance for a fresh session.
pub const INITIAL_BALANCE: u64 = 1000;
pub const LOW_BALANCE_WARNING: u64 = 100;
pub const CRITICAL_BALANCE_WARNING: u64 = 50;

/// Highest number on a single-zero wheel.
pub const MAX_NUMBER: u8 = 36;

pub const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Quick-bet shortcuts accepted wherever a stake is typed.
pub const QUICK_BETS: [(&str, u64); 4] = [("a", 10), ("b", 50), ("c", 100), ("d", 500)];

/// Payout multiplier per bet kind, stake included.
pub const PAYOUT_MULTIPLIERS: [(&str, u64); 7] = [
    ("number", 36),
    ("color", 2),
    ("odd", 2),
    ("even", 2),
    ("high", 2),
    ("low", 2),
    ("dozen", 3),
];
/// Multiplier applied to a kind missing from the table.
pub const DEFAULT_MULTIPLIER: u64 = 2;

pub const LEADERBOARD_SIZE: usize = 10;

pub const FIBONACCI: [u64; 12] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

pub fn quick_bet(key: &str) -> Option<u64> {
    QUICK_BETS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, amount)| *amount)
}

pub fn payout_multiplier(kind: &str) -> u64 {
    PAYOUT_MULTIPLIERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, m)| *m)
        .unwrap_or(DEFAULT_MULTIPLIER)
}

/// Runtime settings (flags override the environment, which may come from `.env`)
#[derive(Parser, Debug, Clone)]
#[command(name = "roulette-sim", about = "Single-player terminal roulette simulator")]
pub struct Settings {
    /// Session save file
    #[arg(long, env = "ROULETTE_SAVE_FILE", default_value = "game_save.json")]
    pub save_file: PathBuf,

    /// Leaderboard file
    #[arg(long, env = "ROULETTE_LEADERBOARD_FILE", default_value = "leaderboard.json")]
    pub leaderboard_file: PathBuf,

    /// Seed the wheel for a reproducible run
    #[arg(long, env = "ROULETTE_SEED")]
    pub seed: Option<u64>,

    /// Name recorded on the leaderboard
    #[arg(long, env = "ROULETTE_PLAYER", default_value = "player")]
    pub name: String,

    /// Load the saved session at start-up
    #[arg(long)]
    pub resume: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_bets_resolve_case_insensitively() {
        assert_eq!(quick_bet("a"), Some(10));
        assert_eq!(quick_bet("D"), Some(500));
        assert_eq!(quick_bet("e"), None);
    }

    #[test]
    fn unknown_kind_falls_back_to_default_multiplier() {
        assert_eq!(payout_multiplier("number"), 36);
        assert_eq!(payout_multiplier("dozen"), 3);
        assert_eq!(payout_multiplier("column"), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn settings_defaults() {
        let settings = Settings::parse_from(["roulette-sim"]);
        assert_eq!(settings.name, "player");
        assert!(!settings.resume);
        assert_eq!(settings.save_file, PathBuf::from("game_save.json"));
    }
}
