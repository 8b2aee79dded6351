//! Histogram-based hand evaluation.
//!
//! Categories are tested in strictly descending priority: royal flush,
//! straight flush, flush, straight, four of a kind, full house, three
//! of a kind, two pair, pair, high card. The first test that passes
//! wins. Note that a flush outranks a straight at dispatch time, and
//! the full house predicate also matches four of a kind; both orderings
//! are load-bearing and pinned by tests.

use super::entities::{Card, HandCategory, Suit};

type RankHisto = [u8; 13];
type SuitHisto = [u8; 4];

/// Reusable evaluator. Owns its histogram buffers so evaluating many
/// hands in a loop (equity enumeration in particular) allocates
/// nothing.
#[derive(Debug, Default)]
pub struct Evaluator {
    ranks: RankHisto,
    suits: SuitHisto,
    suited: RankHisto,
    sorted: RankHisto,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best category achievable with the given cards. Works for any
    /// number of cards; in practice it sees 2 (hole only) through 7
    /// (hole plus full board).
    pub fn category(&mut self, cards: &[Card]) -> HandCategory {
        self.ranks = [0; 13];
        self.suits = [0; 4];
        for card in cards {
            self.ranks[card.rank.low_index()] += 1;
            self.suits[card.suit.index()] += 1;
        }

        if let Some(suit) = flush_suit(&self.suits) {
            self.suited = [0; 13];
            for card in cards.iter().filter(|card| card.suit == suit) {
                self.suited[card.rank.low_index()] += 1;
            }
            if is_royal(&self.suited) {
                return HandCategory::RoyalFlush;
            }
            if has_suited_straight(&self.suited) {
                return HandCategory::StraightFlush;
            }
            return HandCategory::Flush;
        }

        if has_straight(&self.ranks) {
            return HandCategory::Straight;
        }

        self.sorted = self.ranks;
        self.sorted.sort_unstable();
        let (top, second) = (self.sorted[12], self.sorted[11]);
        if top == 4 {
            HandCategory::FourOfAKind
        } else if top >= 3 && second >= 2 {
            HandCategory::FullHouse
        } else if top >= 3 {
            HandCategory::ThreeOfAKind
        } else if top == 2 && second == 2 {
            HandCategory::TwoPair
        } else if top == 2 {
            HandCategory::Pair
        } else {
            HandCategory::HighCard
        }
    }
}

/// Convenience one-shot evaluation.
pub fn category(cards: &[Card]) -> HandCategory {
    Evaluator::new().category(cards)
}

/// Suit holding five or more cards, if any.
pub(crate) fn flush_suit(suits: &SuitHisto) -> Option<Suit> {
    suits
        .iter()
        .position(|&count| count >= 5)
        .map(|i| Suit::ALL[i])
}

/// Five consecutive ranks in an ace-low histogram. Windows start at
/// every index 0..=9 and the last slot wraps, so both the wheel
/// (window at the ace) and broadway (window at the ten, wrapping back
/// to the ace) are found.
pub(crate) fn has_straight(ranks: &RankHisto) -> bool {
    (0..10).any(|k| {
        ranks[k] > 0
            && ranks[k + 1] > 0
            && ranks[k + 2] > 0
            && ranks[k + 3] > 0
            && ranks[(k + 4) % 13] > 0
    })
}

/// Straight within a single-suit histogram. No wraparound: the
/// ace-high case is the royal flush, tested separately.
fn has_suited_straight(suited: &RankHisto) -> bool {
    (0..9).any(|k| (k..=k + 4).all(|i| suited[i] > 0))
}

/// Ten through ace in a single-suit histogram (ace sits at index 0).
fn is_royal(suited: &RankHisto) -> bool {
    suited[0] > 0 && suited[9] > 0 && suited[10] > 0 && suited[11] > 0 && suited[12] > 0
}

#[cfg(test)]
mod tests {
    use super::super::entities::{Rank, Suit};
    use super::*;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn high_card() {
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Five, Suit::Heart),
            card(Rank::Nine, Suit::Diamond),
            card(Rank::Jack, Suit::Spade),
            card(Rank::King, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::HighCard);
    }

    #[test]
    fn pair() {
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Nine, Suit::Diamond),
            card(Rank::Jack, Suit::Spade),
            card(Rank::King, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::Pair);
    }

    #[test]
    fn two_pair() {
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Nine, Suit::Diamond),
            card(Rank::Nine, Suit::Spade),
            card(Rank::King, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::TwoPair);
    }

    #[test]
    fn three_of_a_kind() {
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Nine, Suit::Spade),
            card(Rank::King, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::ThreeOfAKind);
    }

    #[test]
    fn wheel_straight() {
        let cards = [
            card(Rank::Ace, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Three, Suit::Diamond),
            card(Rank::Four, Suit::Spade),
            card(Rank::Five, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::Straight);
    }

    #[test]
    fn broadway_straight() {
        let cards = [
            card(Rank::Ten, Suit::Club),
            card(Rank::Jack, Suit::Heart),
            card(Rank::Queen, Suit::Diamond),
            card(Rank::King, Suit::Spade),
            card(Rank::Ace, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::Straight);
    }

    #[test]
    fn no_wraparound_straight_through_king() {
        // Q K A 2 3 is not a straight.
        let cards = [
            card(Rank::Queen, Suit::Club),
            card(Rank::King, Suit::Heart),
            card(Rank::Ace, Suit::Diamond),
            card(Rank::Two, Suit::Spade),
            card(Rank::Three, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::HighCard);
    }

    #[test]
    fn flush() {
        let cards = [
            card(Rank::Two, Suit::Spade),
            card(Rank::Five, Suit::Spade),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
            card(Rank::King, Suit::Spade),
        ];
        assert_eq!(category(&cards), HandCategory::Flush);
    }

    #[test]
    fn full_house() {
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Nine, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::FullHouse);
    }

    #[test]
    fn four_of_a_kind() {
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Two, Suit::Spade),
            card(Rank::Nine, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::FourOfAKind);
    }

    #[test]
    fn quads_beat_the_full_house_predicate() {
        // Four deuces plus a pair would also satisfy the full house
        // test; the four of a kind check runs first and must win.
        let cards = [
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Two, Suit::Spade),
            card(Rank::Nine, Suit::Club),
            card(Rank::Nine, Suit::Heart),
        ];
        assert_eq!(category(&cards), HandCategory::FourOfAKind);
    }

    #[test]
    fn steel_wheel_is_a_straight_flush() {
        let cards = [
            card(Rank::Ace, Suit::Heart),
            card(Rank::Two, Suit::Heart),
            card(Rank::Three, Suit::Heart),
            card(Rank::Four, Suit::Heart),
            card(Rank::Five, Suit::Heart),
        ];
        assert_eq!(category(&cards), HandCategory::StraightFlush);
    }

    #[test]
    fn king_high_straight_flush() {
        let cards = [
            card(Rank::Nine, Suit::Diamond),
            card(Rank::Ten, Suit::Diamond),
            card(Rank::Jack, Suit::Diamond),
            card(Rank::Queen, Suit::Diamond),
            card(Rank::King, Suit::Diamond),
        ];
        assert_eq!(category(&cards), HandCategory::StraightFlush);
    }

    #[test]
    fn royal_flush() {
        let cards = [
            card(Rank::Ten, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
            card(Rank::Queen, Suit::Spade),
            card(Rank::King, Suit::Spade),
            card(Rank::Ace, Suit::Spade),
            card(Rank::Two, Suit::Heart),
            card(Rank::Three, Suit::Diamond),
        ];
        assert_eq!(category(&cards), HandCategory::RoyalFlush);
    }

    #[test]
    fn flush_dispatches_before_straight() {
        // Both a spade flush and a 2-6 straight are present; dispatch
        // order reports the flush.
        let cards = [
            card(Rank::Two, Suit::Spade),
            card(Rank::Three, Suit::Spade),
            card(Rank::Four, Suit::Spade),
            card(Rank::Five, Suit::Spade),
            card(Rank::King, Suit::Spade),
            card(Rank::Six, Suit::Heart),
            card(Rank::Nine, Suit::Diamond),
        ];
        assert_eq!(category(&cards), HandCategory::Flush);
    }

    #[test]
    fn flush_with_offsuit_straight_cards_is_not_a_straight_flush() {
        // The straight needs the offsuit six, so the suited windows
        // must not find it.
        let cards = [
            card(Rank::Two, Suit::Spade),
            card(Rank::Three, Suit::Spade),
            card(Rank::Four, Suit::Spade),
            card(Rank::Five, Suit::Spade),
            card(Rank::Six, Suit::Heart),
            card(Rank::Nine, Suit::Spade),
        ];
        assert_eq!(category(&cards), HandCategory::Flush);
    }

    #[test]
    fn seven_card_board_plus_hole() {
        let cards = [
            card(Rank::Ace, Suit::Spade),
            card(Rank::Ace, Suit::Heart),
            card(Rank::Seven, Suit::Diamond),
            card(Rank::Ace, Suit::Club),
            card(Rank::Two, Suit::Spade),
            card(Rank::Nine, Suit::Heart),
            card(Rank::Nine, Suit::Club),
        ];
        assert_eq!(category(&cards), HandCategory::FullHouse);
    }

    #[test]
    fn two_hole_cards_alone() {
        let cards = [card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        assert_eq!(category(&cards), HandCategory::Pair);
    }

    #[test]
    fn reused_evaluator_matches_one_shot() {
        let mut evaluator = Evaluator::new();
        let flush = [
            card(Rank::Two, Suit::Spade),
            card(Rank::Five, Suit::Spade),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
            card(Rank::King, Suit::Spade),
        ];
        let pair = [card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        assert_eq!(evaluator.category(&flush), HandCategory::Flush);
        assert_eq!(evaluator.category(&pair), HandCategory::Pair);
        assert_eq!(evaluator.category(&flush), HandCategory::Flush);
    }
}
