//! Kicker discrimination between players holding the same hand
//! category.

use super::entities::{Card, HandCategory, Player, SeatIndex, Suit};

/// Narrows `contenders` (all holding `category`) down to the seats
/// that actually win. Every contender's discriminator key is computed
/// from their hole cards plus the board, and everyone achieving the
/// maximum key stays in; more than one survivor means a split pot.
pub fn resolve_tie(
    players: &[Player],
    contenders: &[SeatIndex],
    board: &[Card],
    category: HandCategory,
) -> Vec<SeatIndex> {
    let mut keys: Vec<(SeatIndex, Vec<u8>)> = Vec::with_capacity(contenders.len());
    let mut cards = Vec::with_capacity(7);
    for &seat in contenders {
        cards.clear();
        cards.extend_from_slice(&players[seat].hole);
        cards.extend_from_slice(board);
        keys.push((seat, discriminator(&cards, category)));
    }
    let best = keys.iter().map(|(_, key)| key).max().cloned().unwrap_or_default();
    keys.into_iter()
        .filter(|(_, key)| *key == best)
        .map(|(seat, _)| seat)
        .collect()
}

/// Category-specific tiebreak key. Keys for the same category have the
/// same length, so lexicographic `Vec<u8>` comparison ranks hands the
/// usual way: primary rank first, then kickers in descending order.
fn discriminator(cards: &[Card], category: HandCategory) -> Vec<u8> {
    let mut counts = [0u8; 13];
    for card in cards {
        counts[card.rank.high_index()] += 1;
    }
    match category {
        HandCategory::RoyalFlush => Vec::new(),
        HandCategory::StraightFlush => {
            let mut key = Vec::new();
            if let Some(suit) = flush_suit(cards) {
                let mut suited = [0u8; 13];
                for card in cards.iter().filter(|card| card.suit == suit) {
                    suited[card.rank.low_index()] += 1;
                }
                // Highest no-wrap window; the ace-high case was already
                // classified as a royal flush.
                for k in (0..9).rev() {
                    if (k..=k + 4).all(|i| suited[i] > 0) {
                        key.push(k as u8 + 5);
                        break;
                    }
                }
            }
            key
        }
        HandCategory::FourOfAKind => {
            let quad = best_with_count(&counts, 4, &[]);
            let kicker = best_with_count(&counts, 1, &[quad]);
            vec![quad, kicker]
        }
        HandCategory::FullHouse => {
            let trip = best_with_count(&counts, 3, &[]);
            let pair = best_with_count(&counts, 2, &[trip]);
            vec![trip, pair]
        }
        HandCategory::Flush => {
            let mut key = Vec::new();
            if let Some(suit) = flush_suit(cards) {
                let mut values: Vec<u8> = cards
                    .iter()
                    .filter(|card| card.suit == suit)
                    .map(|card| card.rank.value())
                    .collect();
                values.sort_unstable_by(|a, b| b.cmp(a));
                values.truncate(5);
                key = values;
            }
            key
        }
        HandCategory::Straight => {
            let mut low = [0u8; 13];
            for card in cards {
                low[card.rank.low_index()] += 1;
            }
            let mut key = Vec::new();
            // Wrapping windows so the broadway straight (window at the
            // ten, ace in the wrap slot) ranks above the king-high one.
            for k in (0..10).rev() {
                let window = low[k] > 0
                    && low[k + 1] > 0
                    && low[k + 2] > 0
                    && low[k + 3] > 0
                    && low[(k + 4) % 13] > 0;
                if window {
                    key.push(k as u8 + 5);
                    break;
                }
            }
            key
        }
        HandCategory::ThreeOfAKind => {
            let trip = best_with_count(&counts, 3, &[]);
            let mut key = vec![trip];
            key.extend(kickers(&counts, &[trip], 2));
            key
        }
        HandCategory::TwoPair => {
            let high = best_with_count(&counts, 2, &[]);
            let low = best_with_count(&counts, 2, &[high]);
            let kicker = best_with_count(&counts, 1, &[high, low]);
            vec![high, low, kicker]
        }
        HandCategory::Pair => {
            let pair = best_with_count(&counts, 2, &[]);
            let mut key = vec![pair];
            key.extend(kickers(&counts, &[pair], 3));
            key
        }
        HandCategory::HighCard => kickers(&counts, &[], 5),
    }
}

/// Highest rank value with at least `count` copies, skipping `exclude`.
/// Returns 0 when nothing qualifies, which sorts below every real rank.
fn best_with_count(counts: &[u8; 13], count: u8, exclude: &[u8]) -> u8 {
    for i in (0..13).rev() {
        let value = i as u8 + 2;
        if counts[i] >= count && !exclude.contains(&value) {
            return value;
        }
    }
    0
}

/// Up to `take` highest distinct rank values not in `exclude`.
fn kickers(counts: &[u8; 13], exclude: &[u8], take: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(take);
    for i in (0..13).rev() {
        let value = i as u8 + 2;
        if counts[i] > 0 && !exclude.contains(&value) {
            out.push(value);
            if out.len() == take {
                break;
            }
        }
    }
    out
}

fn flush_suit(cards: &[Card]) -> Option<Suit> {
    let mut suits = [0u8; 4];
    for card in cards {
        suits[card.suit.index()] += 1;
    }
    suits
        .iter()
        .position(|&count| count >= 5)
        .map(|i| Suit::ALL[i])
}
