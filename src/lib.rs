//! A single-table Texas hold 'em round engine.
//!
//! The crate models one table of no-limit hold 'em: a card and deck
//! layer, a histogram-based hand evaluator, a tie resolver, a pot
//! manager with side-pot support, a betting street state machine, an
//! equity estimator, and a round orchestrator that drives rounds until
//! one player holds all the chips.
//!
//! Presentation is out of scope. The engine reports everything that
//! happens through the [`events::EventSink`] trait and asks for player
//! decisions through the [`game::DecisionProvider`] trait, so any
//! frontend (console, TUI, network) can be layered on without touching
//! the engine itself.

pub mod bot;
pub mod events;
pub mod game;

pub use bot::{AutoPolicy, EquityEstimator};
pub use events::{EventSink, NullSink, PokerEvent, RecordingSink};
pub use game::{
    Decision, DecisionProvider, GameError, GameSettings, HoldemGame, Rejection, Street,
    TurnContext,
    entities::{Card, Chips, Equity, HandCategory, Rank, SeatIndex, Suit},
};
