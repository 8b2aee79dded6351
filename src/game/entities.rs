use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::GameError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Diamond, Self::Heart, Self::Spade];

    /// Histogram index, 0..=3.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Ace-high numeric value, 2..=14.
    pub fn value(self) -> u8 {
        self as u8 + 2
    }

    /// Histogram index with the ace low: ace=0, two=1, ..., king=12.
    /// Straight scans use this so the wheel shows up as a window
    /// starting at the ace.
    pub fn low_index(self) -> usize {
        (self as usize + 1) % 13
    }

    /// Histogram index with the ace high: two=0, ..., ace=12.
    pub fn high_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ten => write!(f, "T"),
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
            v => write!(f, "{}", v.value()),
        }
    }
}

/// A playing card. Ordered rank-first so sorting a hand by `Ord` sorts
/// it by ace-high rank; all tie-break comparisons only ever look at the
/// rank.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = format!("{}{}", self.rank, self.suit);
        write!(f, "{repr:>3}")
    }
}

/// Type alias for whole chips. All bets and player stacks are whole
/// chips (there's no point arguing over pennies).
pub type Chips = u32;

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

/// A fresh 52-card deck. Recreated and shuffled at the start of every
/// round; cards are dealt sequentially from the front.
#[derive(Debug)]
pub struct Deck {
    cards: [Card; 52],
    next: usize,
}

impl Deck {
    pub fn deal(&mut self) -> Card {
        let card = self.cards[self.next];
        self.next += 1;
        card
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    pub fn remaining(&self) -> usize {
        52 - self.next
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card::new(Rank::Two, Suit::Club); 52];
        for (i, rank) in Rank::ALL.into_iter().enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card::new(rank, suit);
            }
        }
        Self { cards, next: 0 }
    }
}

/// Hand categories from weakest to strongest. The `u8` id is the wire
/// and comparison form; the enum order matches the ids so `Ord` agrees
/// with category strength.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Result<Self, GameError> {
        let category = match id {
            0 => Self::HighCard,
            1 => Self::Pair,
            2 => Self::TwoPair,
            3 => Self::ThreeOfAKind,
            4 => Self::Straight,
            5 => Self::Flush,
            6 => Self::FullHouse,
            7 => Self::FourOfAKind,
            8 => Self::StraightFlush,
            9 => Self::RoyalFlush,
            _ => return Err(GameError::InvalidCategory(id)),
        };
        Ok(category)
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::Pair => "pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
            Self::RoyalFlush => "royal flush",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = format!("${}/{}", self.small, self.big);
        write!(f, "{repr}")
    }
}

/// Equity numbers for one player on one street.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Equity {
    /// Raw hand strength vs all opponent holdings.
    pub strength: f64,
    /// Positive potential: chance of pulling ahead by the river.
    pub ppot: f64,
    /// Negative potential: chance of falling behind by the river.
    pub npot: f64,
    /// `strength + (1 - strength) * ppot`.
    pub effective: f64,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub chips: Chips,
    /// Chips posted toward the current street's bet, not yet
    /// collected into a pot.
    pub posted: Chips,
    pub folded: bool,
    pub checked: bool,
    pub raised: bool,
    pub human: bool,
    pub hole: Vec<Card>,
    /// Cached equity for the current street. `None` until computed;
    /// only `reset_for_street` clears it.
    pub equity: Option<Equity>,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
            posted: 0,
            folded: false,
            checked: false,
            raised: false,
            human: false,
            hole: Vec::with_capacity(2),
            equity: None,
        }
    }

    /// Full reset at the top of a round. The stack carries over;
    /// everything else starts fresh.
    pub fn reset_for_round(&mut self) {
        self.posted = 0;
        self.folded = false;
        self.checked = false;
        self.raised = false;
        self.hole.clear();
        self.equity = None;
    }

    /// Street-boundary reset. Posted chips are already collected into
    /// pots by this point; folds persist for the rest of the round.
    pub fn reset_for_street(&mut self) {
        self.posted = 0;
        self.checked = false;
        self.raised = false;
        self.equity = None;
    }
}
