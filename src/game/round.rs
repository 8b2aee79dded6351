//! Round orchestration: seating, blinds, dealing, the four betting
//! streets, and the showdown, looped until one player holds all the
//! chips.

use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bot::EquityEstimator;
use crate::events::{EventSink, PokerEvent};

use super::betting::{DecisionProvider, Street};
use super::constants;
use super::entities::{Blinds, Card, Chips, Deck, HandCategory, Player, SeatIndex};
use super::eval::Evaluator;
use super::pot::PotManager;
use super::showdown::resolve_tie;
use super::GameError;

/// Table configuration, validated before a game is built.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameSettings {
    pub num_players: usize,
    pub starting_stack: Chips,
    pub big_blind: Chips,
    /// Seat driven by the injected decision provider instead of the
    /// built-in policy. `None` runs an all-bot table.
    pub human_name: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            num_players: 4,
            starting_stack: constants::DEFAULT_STARTING_STACK,
            big_blind: constants::DEFAULT_BIG_BLIND,
            human_name: None,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_players < constants::MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                min: constants::MIN_PLAYERS,
                got: self.num_players,
            });
        }
        if self.num_players > constants::MAX_PLAYERS {
            return Err(GameError::TooManyPlayers {
                max: constants::MAX_PLAYERS,
                got: self.num_players,
            });
        }
        if self.big_blind < 2 {
            return Err(GameError::InvalidBigBlind(self.big_blind));
        }
        if self.starting_stack < self.big_blind * 2 {
            return Err(GameError::InvalidStartingStack(self.starting_stack));
        }
        Ok(())
    }
}

/// One table of no-limit hold 'em. Owns every piece of round state
/// and drives it through [`HoldemGame::play`].
#[derive(Debug)]
pub struct HoldemGame<D, S> {
    pub(crate) players: Vec<Player>,
    pub(crate) pots: PotManager,
    pub(crate) board: Vec<Card>,
    pub(crate) deck: Deck,
    pub(crate) blinds: Blinds,
    pub(crate) rng: StdRng,
    pub(crate) decider: D,
    pub(crate) events: S,
    pub(crate) estimator: EquityEstimator,
    pub(crate) evaluator: Evaluator,
    pub(crate) active_players: usize,
}

impl<D: DecisionProvider, S: EventSink> HoldemGame<D, S> {
    pub fn new(settings: GameSettings, decider: D, events: S) -> Result<Self, GameError> {
        Self::build(settings, decider, events, StdRng::from_os_rng)
    }

    /// Deterministic construction for replays and tests.
    pub fn with_seed(
        settings: GameSettings,
        decider: D,
        events: S,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::build(settings, decider, events, move || StdRng::seed_from_u64(seed))
    }

    fn build(
        settings: GameSettings,
        decider: D,
        events: S,
        rng: impl FnOnce() -> StdRng,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let mut players = Vec::with_capacity(settings.num_players);
        match &settings.human_name {
            Some(name) => {
                let mut human = Player::new(name.clone(), settings.starting_stack);
                human.human = true;
                players.push(human);
                for i in 1..settings.num_players {
                    players.push(Player::new(format!("Bot {i}"), settings.starting_stack));
                }
            }
            None => {
                for i in 1..=settings.num_players {
                    players.push(Player::new(format!("Bot {i}"), settings.starting_stack));
                }
            }
        }
        let blinds = Blinds {
            small: settings.big_blind / 2,
            big: settings.big_blind,
        };
        Ok(Self::from_parts_rng(players, blinds, decider, events, rng()))
    }

    pub(crate) fn from_parts(
        players: Vec<Player>,
        blinds: Blinds,
        decider: D,
        events: S,
        seed: u64,
    ) -> Self {
        Self::from_parts_rng(players, blinds, decider, events, StdRng::seed_from_u64(seed))
    }

    fn from_parts_rng(
        players: Vec<Player>,
        blinds: Blinds,
        decider: D,
        events: S,
        rng: StdRng,
    ) -> Self {
        let active_players = players.len();
        Self {
            players,
            pots: PotManager::new(),
            board: Vec::with_capacity(constants::BOARD_SIZE),
            deck: Deck::default(),
            blinds,
            rng,
            decider,
            events,
            estimator: EquityEstimator::new(),
            evaluator: Evaluator::new(),
            active_players,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn sink(&self) -> &S {
        &self.events
    }

    /// Plays rounds until a single player holds every chip. Returns
    /// the winner's name.
    pub fn play(&mut self) -> Result<String, GameError> {
        if let Some(human) = self.players.iter().find(|p| p.human) {
            self.events.notify(PokerEvent::IdentifyHuman {
                name: human.name.clone(),
            });
        }
        let mut round = 0u32;
        loop {
            round += 1;
            self.events.notify(PokerEvent::ActivePlayer { name: None });
            self.setup_round();
            if self.players.len() <= 1 {
                break;
            }
            info!("round {round}: {} players seated", self.players.len());
            self.play_round()?;
            self.events.notify(PokerEvent::RoundReset);
        }
        match self.players.first() {
            Some(winner) => {
                info!("{} wins the game with ${}", winner.name, winner.chips);
                Ok(winner.name.clone())
            }
            None => {
                error!("game ended with no players holding chips");
                Err(GameError::NoShowdownWinner)
            }
        }
    }

    /// Rotates the button, drops broke players, posts blinds, deals
    /// hole cards, and resets the pots. Public so frontends can drive
    /// one round at a time instead of using [`HoldemGame::play`].
    pub fn setup_round(&mut self) {
        self.board.clear();
        self.players.rotate_right(1);
        for player in &mut self.players {
            player.reset_for_round();
        }
        self.players.retain(|player| player.chips > 0);
        if self.players.len() <= 1 {
            return;
        }
        self.active_players = self.players.len();

        // Big blind sits at the end of the seating order, small blind
        // at the front; short stacks post what they can.
        let last = self.players.len() - 1;
        let big = self.players[last].chips.min(self.blinds.big);
        self.players[last].chips -= big;
        self.players[last].posted += big;
        let small = self.players[0].chips.min(self.blinds.small);
        self.players[0].chips -= small;
        self.players[0].posted += small;
        self.events.notify(PokerEvent::BlindsPosted { big, small });
        self.events.notify(PokerEvent::ChipsAdded {
            name: self.players[last].name.clone(),
            amount: big,
        });
        self.events.notify(PokerEvent::ChipsAdded {
            name: self.players[0].name.clone(),
            amount: small,
        });

        self.deck = Deck::default();
        self.deck.shuffle(&mut self.rng);
        let seats = self.players.len();
        for k in 0..seats * constants::HOLE_CARDS {
            let seat = (k + 2) % seats;
            let card = self.deck.deal();
            self.players[seat].hole.push(card);
            self.events.notify(PokerEvent::CardDealt {
                name: self.players[seat].name.clone(),
                card,
            });
        }

        self.pots.reset();
    }

    /// One full round: four streets and the showdown. Call after
    /// [`HoldemGame::setup_round`] has seated at least two players.
    pub fn play_round(&mut self) -> Result<(), GameError> {
        for street in Street::ALL {
            if self.active_players <= 1 {
                continue;
            }
            let reveal = match street {
                Street::PreFlop => 0,
                Street::Flop => 3,
                Street::Turn | Street::River => 1,
            };
            for _ in 0..reveal {
                let card = self.deck.deal();
                self.board.push(card);
                self.events.notify(PokerEvent::CommunityCard { card });
            }
            self.notify_human_category();
            self.run_street(street);
        }
        self.find_winner()
    }

    fn notify_human_category(&mut self) {
        if let Some(seat) = self.players.iter().position(|p| p.human && !p.folded) {
            let mut cards = self.players[seat].hole.clone();
            cards.extend_from_slice(&self.board);
            let category = self.evaluator.category(&cards);
            self.events.notify(PokerEvent::HandCategoryUpdated {
                category: category.to_string(),
            });
        }
    }

    /// Awards every pot, last to first. Pots with one unfolded
    /// claimant pay out directly; the rest go to a showdown with tie
    /// resolution and randomized odd-chip splitting.
    fn find_winner(&mut self) -> Result<(), GameError> {
        self.events.notify(PokerEvent::ActivePlayer { name: None });
        let pots = self.pots.pots().to_vec();
        for pot in pots.into_iter().rev() {
            let remaining: Vec<SeatIndex> = pot
                .eligible
                .iter()
                .copied()
                .filter(|&seat| !self.players[seat].folded)
                .collect();
            if remaining.len() == 1 {
                let seat = remaining[0];
                self.players[seat].chips += pot.value;
                info!("{} wins ${}", self.players[seat].name, pot.value);
                let winners = vec![self.players[seat].name.clone()];
                self.events.notify(PokerEvent::PotAwarded {
                    pot,
                    winners,
                    category: String::new(),
                });
                continue;
            }

            self.events.notify(PokerEvent::ShowHands {
                names: remaining
                    .iter()
                    .map(|&seat| self.players[seat].name.clone())
                    .collect(),
            });
            let mut cards = Vec::with_capacity(7);
            let mut categories: Vec<(SeatIndex, HandCategory)> =
                Vec::with_capacity(remaining.len());
            for &seat in &remaining {
                cards.clear();
                cards.extend_from_slice(&self.players[seat].hole);
                cards.extend_from_slice(&self.board);
                categories.push((seat, self.evaluator.category(&cards)));
            }
            let Some(best) = categories.iter().map(|&(_, cat)| cat).max() else {
                error!("pot of ${} reached showdown with no claimants", pot.value);
                return Err(GameError::NoShowdownWinner);
            };
            let contenders: Vec<SeatIndex> = categories
                .iter()
                .filter(|&&(_, cat)| cat == best)
                .map(|&(seat, _)| seat)
                .collect();
            let winners = if contenders.len() == 1 {
                contenders
            } else {
                resolve_tie(&self.players, &contenders, &self.board, best)
            };

            if let [seat] = winners[..] {
                self.players[seat].chips += pot.value;
                info!(
                    "{} wins ${} with a {best}",
                    self.players[seat].name, pot.value
                );
            } else {
                let shares = split_pot(&mut self.rng, pot.value, winners.len());
                for (&seat, share) in winners.iter().zip(shares) {
                    self.players[seat].chips += share;
                }
                info!("${} split {} ways on a {best}", pot.value, winners.len());
            }
            self.events.notify(PokerEvent::PotAwarded {
                pot,
                winners: winners
                    .iter()
                    .map(|&seat| self.players[seat].name.clone())
                    .collect(),
                category: best.to_string(),
            });
        }
        // Every pot has been paid out; the manager starts the next
        // round empty.
        self.pots.reset();
        Ok(())
    }
}

/// Splits `value` into `winners` shares: equal integer parts, with
/// any remainder handed out one chip at a time to random winners.
/// The shares always sum back to `value`.
pub(crate) fn split_pot(rng: &mut impl Rng, value: Chips, winners: usize) -> Vec<Chips> {
    let share = value / winners as Chips;
    let mut shares = vec![share; winners];
    let mut remainder = value - share * winners as Chips;
    while remainder > 0 {
        shares[rng.random_range(0..winners)] += 1;
        remainder -= 1;
    }
    shares
}

#[cfg(test)]
mod tests {
    use crate::events::RecordingSink;
    use crate::game::betting::{Decision, TurnContext};

    use super::*;

    struct AlwaysCall;

    impl DecisionProvider for AlwaysCall {
        fn decide(&mut self, _ctx: &TurnContext, _rng: &mut StdRng) -> Decision {
            Decision::Call
        }
    }

    fn settings(num_players: usize) -> GameSettings {
        GameSettings {
            num_players,
            ..GameSettings::default()
        }
    }

    #[test]
    fn settings_reject_a_lone_player() {
        let err = settings(1).validate().unwrap_err();
        assert_eq!(err, GameError::NotEnoughPlayers { min: 2, got: 1 });
    }

    #[test]
    fn settings_reject_an_overfull_table() {
        let err = settings(10).validate().unwrap_err();
        assert_eq!(err, GameError::TooManyPlayers { max: 9, got: 10 });
    }

    #[test]
    fn settings_reject_a_stack_below_two_blinds() {
        let bad = GameSettings {
            starting_stack: 15,
            ..GameSettings::default()
        };
        assert_eq!(bad.validate().unwrap_err(), GameError::InvalidStartingStack(15));
    }

    #[test]
    fn settings_reject_a_one_chip_blind() {
        let bad = GameSettings {
            big_blind: 1,
            ..GameSettings::default()
        };
        assert_eq!(bad.validate().unwrap_err(), GameError::InvalidBigBlind(1));
    }

    #[test]
    fn setup_posts_blinds_and_deals_two_cards_each() {
        let mut game =
            HoldemGame::with_seed(settings(3), AlwaysCall, RecordingSink::default(), 7).unwrap();
        game.setup_round();
        assert_eq!(game.players.len(), 3);
        let last = game.players.len() - 1;
        assert_eq!(game.players[last].posted, 10);
        assert_eq!(game.players[0].posted, 5);
        assert!(game.players.iter().all(|p| p.hole.len() == 2));
        assert_eq!(game.pots.pots().len(), 1);
        assert_eq!(game.active_players, 3);
    }

    #[test]
    fn setup_drops_broke_players() {
        let mut game =
            HoldemGame::with_seed(settings(3), AlwaysCall, RecordingSink::default(), 7).unwrap();
        game.players[1].chips = 0;
        game.setup_round();
        assert_eq!(game.players.len(), 2);
    }

    #[test]
    fn short_stack_posts_what_it_can() {
        let mut game =
            HoldemGame::with_seed(settings(3), AlwaysCall, RecordingSink::default(), 7).unwrap();
        // The player rotating into the big blind has 4 chips.
        game.players[1].chips = 4;
        game.setup_round();
        let last = game.players.len() - 1;
        assert_eq!(game.players[last].posted, 4);
        assert_eq!(game.players[last].chips, 0);
    }

    #[test]
    fn split_pot_conserves_chips() {
        let mut rng = StdRng::seed_from_u64(11);
        let shares = split_pot(&mut rng, 101, 2);
        assert_eq!(shares.iter().sum::<Chips>(), 101);
        assert!(shares.iter().all(|&s| s == 50 || s == 51));
    }

    #[test]
    fn split_pot_without_remainder_is_even() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(split_pot(&mut rng, 90, 3), vec![30, 30, 30]);
    }

    #[test]
    fn full_round_of_calls_conserves_chips() {
        let mut game =
            HoldemGame::with_seed(settings(4), AlwaysCall, RecordingSink::default(), 99).unwrap();
        let total: Chips = game.players.iter().map(|p| p.chips).sum();
        game.setup_round();
        game.play_round().unwrap();
        let after: Chips = game.players.iter().map(|p| p.chips + p.posted).sum();
        // Every pot was awarded, so nothing is left in the middle.
        assert_eq!(game.pots.total(), 0);
        assert_eq!(after, total);
    }
}
