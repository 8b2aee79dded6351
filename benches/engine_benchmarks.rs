use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use holdem_engine::bot::EquityEstimator;
use holdem_engine::game::entities::Player;
use holdem_engine::game::{Evaluator, PotManager, eval};
use holdem_engine::{
    Card, Chips, Decision, DecisionProvider, GameSettings, HoldemGame, NullSink, Rank, Suit,
    TurnContext,
};

struct AlwaysCall;

impl DecisionProvider for AlwaysCall {
    fn decide(&mut self, _ctx: &TurnContext, _rng: &mut StdRng) -> Decision {
        Decision::Call
    }
}

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn seven_card_royal() -> Vec<Card> {
    vec![
        card(Rank::Ace, Suit::Spade),
        card(Rank::King, Suit::Spade),
        card(Rank::Queen, Suit::Spade),
        card(Rank::Jack, Suit::Spade),
        card(Rank::Ten, Suit::Spade),
        card(Rank::Two, Suit::Heart),
        card(Rank::Three, Suit::Diamond),
    ]
}

/// 100 distinct 7-card hands walking through the deck.
fn hand_batch() -> Vec<Vec<Card>> {
    let mut deck = Vec::new();
    for rank in Rank::ALL {
        for suit in Suit::ALL {
            deck.push(card(rank, suit));
        }
    }
    (0..100)
        .map(|i| (0..7).map(|j| deck[(i * 7 + j * 3) % 52]).collect())
        .collect()
}

fn bench_hand_eval_7_cards(c: &mut Criterion) {
    let cards = seven_card_royal();
    c.bench_function("hand_eval_7_cards", |b| {
        b.iter(|| eval::category(black_box(&cards)));
    });
}

fn bench_hand_eval_100_hands_reused(c: &mut Criterion) {
    let hands = hand_batch();
    let mut evaluator = Evaluator::new();
    c.bench_function("hand_eval_100_hands_reused", |b| {
        b.iter(|| {
            hands
                .iter()
                .map(|hand| evaluator.category(black_box(hand)))
                .max()
        });
    });
}

fn bench_hand_strength_river(c: &mut Criterion) {
    let hole = [card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
    let board = [
        card(Rank::King, Suit::Club),
        card(Rank::Eight, Suit::Diamond),
        card(Rank::Four, Suit::Spade),
        card(Rank::Jack, Suit::Heart),
        card(Rank::Six, Suit::Club),
    ];
    let mut estimator = EquityEstimator::new();
    c.bench_function("hand_strength_river", |b| {
        b.iter(|| estimator.hand_strength(black_box(&hole), black_box(&board)));
    });
}

fn bench_equity_turn(c: &mut Criterion) {
    let hole = [card(Rank::Ace, Suit::Spade), card(Rank::Two, Suit::Spade)];
    let board = [
        card(Rank::King, Suit::Spade),
        card(Rank::Nine, Suit::Spade),
        card(Rank::Five, Suit::Heart),
        card(Rank::Seven, Suit::Diamond),
    ];
    let mut estimator = EquityEstimator::new();
    c.bench_function("equity_turn", |b| {
        b.iter(|| estimator.equity(black_box(&hole), black_box(&board)));
    });
}

fn bench_pot_collection_all_in_ladder(c: &mut Criterion) {
    let stacks: [Chips; 4] = [25, 75, 150, 300];
    let posts: [Chips; 4] = [25, 75, 150, 150];
    c.bench_function("pot_collection_all_in_ladder", |b| {
        b.iter_batched(
            || {
                let players: Vec<Player> = stacks
                    .iter()
                    .zip(posts)
                    .enumerate()
                    .map(|(i, (&chips, posted))| {
                        let mut player = Player::new(format!("p{i}"), chips - posted);
                        player.posted = posted;
                        player
                    })
                    .collect();
                (players, PotManager::new())
            },
            |(mut players, mut pots)| {
                pots.collect(&mut players);
                (players, pots)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_full_round_of_calls(c: &mut Criterion) {
    let settings = GameSettings {
        num_players: 4,
        ..GameSettings::default()
    };
    c.bench_function("full_round_of_calls", |b| {
        b.iter_batched(
            || HoldemGame::with_seed(settings.clone(), AlwaysCall, NullSink, 7).unwrap(),
            |mut game| {
                game.setup_round();
                game.play_round().unwrap();
                game
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    hand_evaluation,
    bench_hand_eval_7_cards,
    bench_hand_eval_100_hands_reused,
    bench_hand_strength_river,
    bench_equity_turn,
);

criterion_group!(
    game_operations,
    bench_pot_collection_all_in_ladder,
    bench_full_round_of_calls,
);

criterion_main!(hand_evaluation, game_operations);
