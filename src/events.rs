//! Engine-to-frontend notifications.
//!
//! The engine never renders anything; it reports state changes through
//! [`EventSink::notify`] and a frontend decides what to do with them.
//! Every variant carries owned data so sinks can buffer events without
//! borrowing from the engine.

use serde::{Deserialize, Serialize};

use crate::game::entities::{Card, Chips};
use crate::game::pot::Pot;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum PokerEvent {
    /// Names the seat driven by the injected decision provider.
    IdentifyHuman { name: String },
    /// Blinds were posted at the start of a round.
    BlindsPosted { big: Chips, small: Chips },
    /// A player moved chips toward the pot.
    ChipsAdded { name: String, amount: Chips },
    /// A hole card went to a player.
    CardDealt { name: String, card: Card },
    /// A community card was revealed.
    CommunityCard { card: Card },
    /// The turn moved; `None` clears the marker at showdown.
    ActivePlayer { name: Option<String> },
    /// The street's bet level changed.
    BetAmountChanged { amount: Chips },
    /// The human's current best hand category, as display text.
    HandCategoryUpdated { category: String },
    /// A player folded, revealing their hand.
    Fold { hand: Vec<Card>, was_human: bool },
    /// Players revealing their hole cards at showdown.
    ShowHands { names: Vec<String> },
    /// Pot structure changed after a collection or fold resolution.
    PotsUpdated { pots: Vec<Pot> },
    /// A pot was paid out. The category name is empty when the pot
    /// was won without a showdown.
    PotAwarded {
        pot: Pot,
        winners: Vec<String>,
        category: String,
    },
    /// Table state cleared for the next round.
    RoundReset,
}

/// Receiver for engine notifications. The default implementation
/// drops everything, so a sink only overrides what it cares about.
pub trait EventSink {
    fn notify(&mut self, event: PokerEvent) {
        let _ = event;
    }
}

/// Sink for running the engine with no frontend attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {}

/// Buffers every event; handy for tests and replay tooling.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<PokerEvent>,
}

impl EventSink for RecordingSink {
    fn notify(&mut self, event: PokerEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        sink.notify(PokerEvent::RoundReset);
        sink.notify(PokerEvent::BetAmountChanged { amount: 10 });
        assert_eq!(sink.events.len(), 2);
        assert_eq!(sink.events[0], PokerEvent::RoundReset);
    }

    #[test]
    fn null_sink_ignores_events() {
        let mut sink = NullSink;
        sink.notify(PokerEvent::RoundReset);
    }
}
