//! Core hold 'em engine: entities, hand evaluation, pots, betting
//! streets, and the round orchestrator.

use thiserror::Error;

pub mod betting;
pub mod constants;
pub mod entities;
pub mod eval;
pub mod pot;
pub mod round;
pub mod showdown;

pub use betting::{Decision, DecisionProvider, Rejection, Street, TableDecider, TurnContext};
pub use eval::Evaluator;
pub use pot::{Payout, Pot, PotManager};
pub use round::{GameSettings, HoldemGame};
pub use showdown::resolve_tie;

/// Fatal engine errors.
///
/// Invalid player decisions are deliberately not represented here; they
/// are [`Rejection`] values that drive a re-prompt of the same seat.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum GameError {
    #[error("a game needs at least {min} players, got {got}")]
    NotEnoughPlayers { min: usize, got: usize },
    #[error("a table seats at most {max} players, got {got}")]
    TooManyPlayers { max: usize, got: usize },
    #[error("the big blind must be at least 2 chips, got {0}")]
    InvalidBigBlind(entities::Chips),
    #[error("starting stack must cover the big blind twice, got {0}")]
    InvalidStartingStack(entities::Chips),
    #[error("unknown hand category id {0}")]
    InvalidCategory(u8),
    #[error("showdown reached with no winning hand")]
    NoShowdownWinner,
}
