//! Single-player roulette simulator.
//!
//! The wheel, bet validation, settlement and session statistics live here;
//! `commands` wraps them in an interactive terminal shell.

pub mod achievements;
pub mod bet;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod roulette;
pub mod session;
pub mod settlement;
pub mod storage;
pub mod strategy;

pub use bet::{Bet, BetKind, Dozen};
pub use error::{PersistenceError, ValidationError};
pub use roulette::{color_of, Color, Wheel};
pub use session::{BetRecord, RoundResult, Session, Statistics};
pub use settlement::{settle, Outcome};
