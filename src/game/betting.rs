//! One betting street: turn order, decision intake, validation, and
//! the raise/fold bookkeeping that keeps the street alive until every
//! active player has checked.

use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::events::{EventSink, PokerEvent};

use super::entities::{Card, Chips, Equity, SeatIndex};
use super::round::HoldemGame;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Self; 4] = [Self::PreFlop, Self::Flop, Self::Turn, Self::River];
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

/// What a player can do on their turn. `Raise` carries the increment
/// over the current bet level. `Info` is a request to look at the
/// table state again; it never consumes the turn.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Decision {
    Call,
    Raise(Chips),
    Fold,
    Info,
}

/// Why a raise was turned down. A rejection is not an error: the same
/// seat is prompted again with the rejection attached to the context.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("a raise must add at least one chip")]
    NonPositiveRaise,
    #[error("raise exceeds stack, at most {available} available")]
    RaiseExceedsStack { available: Chips },
    #[error("not enough chips behind to raise")]
    NothingBehind,
}

/// Everything a decision provider gets to see on one turn.
#[derive(Debug)]
pub struct TurnContext<'a> {
    pub seat: SeatIndex,
    pub name: &'a str,
    pub hole: &'a [Card],
    pub board: &'a [Card],
    pub street: Street,
    /// Highest total posted by anyone this street.
    pub bet_level: Chips,
    /// What this player has posted so far this street.
    pub posted: Chips,
    pub chips: Chips,
    /// Whether this player already raised this street.
    pub has_raised: bool,
    pub is_human: bool,
    /// Chips across all pots plus everything posted this street.
    pub pot_total: Chips,
    /// Cached equity for this street, if it has been computed.
    pub equity: Option<Equity>,
    /// Set when the previous decision this turn was rejected.
    pub rejection: Option<Rejection>,
}

impl TurnContext<'_> {
    pub fn to_call(&self) -> Chips {
        self.bet_level.saturating_sub(self.posted)
    }
}

/// Source of player decisions. One provider serves the whole table;
/// `TurnContext::is_human` tells it which kind of seat is asking. The
/// round's generator is passed in, so a provider that wants jitter
/// draws from it and a seeded game replays exactly.
pub trait DecisionProvider {
    fn decide(&mut self, ctx: &TurnContext, rng: &mut StdRng) -> Decision;

    /// Whether the engine should compute (and cache) equity before
    /// prompting. Equity enumeration is expensive, so providers that
    /// never look at it leave this alone.
    fn needs_equity(&self, ctx: &TurnContext) -> bool {
        let _ = ctx;
        false
    }
}

/// Routes the designated human seat to the injected provider and every
/// other seat to the built-in policy.
#[derive(Debug)]
pub struct TableDecider<H> {
    pub human: H,
    pub auto: crate::bot::AutoPolicy,
}

impl<H: DecisionProvider> DecisionProvider for TableDecider<H> {
    fn decide(&mut self, ctx: &TurnContext, rng: &mut StdRng) -> Decision {
        if ctx.is_human {
            self.human.decide(ctx, rng)
        } else {
            self.auto.decide(ctx, rng)
        }
    }

    fn needs_equity(&self, ctx: &TurnContext) -> bool {
        if ctx.is_human {
            self.human.needs_equity(ctx)
        } else {
            self.auto.needs_equity(ctx)
        }
    }
}

/// Checks a raise of `amount` over `bet_level` against the raiser's
/// stack. The raiser must be able to cover the call plus at least one
/// raised chip.
pub fn validate_raise(
    amount: Chips,
    bet_level: Chips,
    posted: Chips,
    chips: Chips,
) -> Result<(), Rejection> {
    let to_call = bet_level.saturating_sub(posted);
    if to_call >= chips {
        return Err(Rejection::NothingBehind);
    }
    if amount == 0 {
        return Err(Rejection::NonPositiveRaise);
    }
    let available = chips - to_call;
    if amount > available {
        return Err(Rejection::RaiseExceedsStack { available });
    }
    Ok(())
}

impl<D: DecisionProvider, S: EventSink> HoldemGame<D, S> {
    /// Runs one betting street to completion.
    ///
    /// The turn starts two seats before the big blind (who sits at
    /// the end of the seating order) and walks backwards with
    /// wraparound. The street ends when the turn lands on a player
    /// who has already checked; a raise clears everyone else's
    /// checked flag, reopening the action.
    pub(crate) fn run_street(&mut self, street: Street) {
        if self.active_players <= 1 {
            return;
        }
        let seats = self.players.len();
        let mut index = (seats * 2 - 2) % seats;
        let mut bet_level = if street == Street::PreFlop {
            self.blinds.big
        } else {
            0
        };
        self.events.notify(PokerEvent::BetAmountChanged { amount: bet_level });

        while !self.players[index].checked && self.active_players > 1 {
            if self.players[index].chips == 0 {
                self.players[index].checked = true;
            }
            if !self.players[index].folded && self.players[index].chips > 0 {
                self.events.notify(PokerEvent::ActivePlayer {
                    name: Some(self.players[index].name.clone()),
                });
                let decision = if self.pots.auto_advance() {
                    // Nobody left who can bet against them.
                    Decision::Call
                } else {
                    self.prompt(index, street, bet_level)
                };
                debug!(
                    "{} ({street}, bet ${bet_level}): {decision:?}",
                    self.players[index].name
                );
                match decision {
                    Decision::Call => {
                        let diff = bet_level - self.players[index].posted;
                        if diff > 0 {
                            let to_add = self.players[index].chips.min(diff);
                            self.players[index].chips -= to_add;
                            self.players[index].posted += to_add;
                            self.events.notify(PokerEvent::ChipsAdded {
                                name: self.players[index].name.clone(),
                                amount: to_add,
                            });
                        }
                        self.players[index].checked = true;
                    }
                    Decision::Raise(amount) => {
                        bet_level += amount;
                        self.events
                            .notify(PokerEvent::BetAmountChanged { amount: bet_level });
                        let to_add = bet_level - self.players[index].posted;
                        self.players[index].chips -= to_add;
                        self.players[index].posted = bet_level;
                        for player in &mut self.players {
                            if !player.folded {
                                player.checked = false;
                            }
                        }
                        self.players[index].checked = true;
                        self.players[index].raised = true;
                        self.events.notify(PokerEvent::ChipsAdded {
                            name: self.players[index].name.clone(),
                            amount: to_add,
                        });
                    }
                    Decision::Fold => {
                        self.players[index].folded = true;
                        self.events.notify(PokerEvent::Fold {
                            hand: self.players[index].hole.clone(),
                            was_human: self.players[index].human,
                        });
                        if let Some((pot, payout)) =
                            self.pots.resolve_lone_claimant(&mut self.players)
                        {
                            self.events.notify(PokerEvent::PotsUpdated {
                                pots: self.pots.pots().to_vec(),
                            });
                            self.events.notify(PokerEvent::PotAwarded {
                                pot,
                                winners: vec![self.players[payout.seat].name.clone()],
                                category: String::new(),
                            });
                        }
                        self.active_players -= 1;
                    }
                    // `prompt` loops on Info and rejected raises, so
                    // neither reaches this point.
                    Decision::Info => {}
                }
            }
            index = if index == 0 { seats - 1 } else { index - 1 };
        }

        self.pots.collect(&mut self.players);
        self.events.notify(PokerEvent::PotsUpdated {
            pots: self.pots.pots().to_vec(),
        });
        for player in &mut self.players {
            player.reset_for_street();
        }
    }

    /// Prompts one seat until it produces an actionable decision.
    /// Rejected raises and `Info` requests re-prompt with the context
    /// updated; the turn does not advance.
    fn prompt(&mut self, seat: SeatIndex, street: Street, bet_level: Chips) -> Decision {
        let pot_total =
            self.pots.total() + self.players.iter().map(|p| p.posted).sum::<Chips>();

        let mut rejection = None;
        loop {
            let player = &self.players[seat];
            let ctx = TurnContext {
                seat,
                name: &player.name,
                hole: &player.hole,
                board: &self.board,
                street,
                bet_level,
                posted: player.posted,
                chips: player.chips,
                has_raised: player.raised,
                is_human: player.human,
                pot_total,
                equity: player.equity,
                rejection,
            };
            if street != Street::PreFlop
                && ctx.equity.is_none()
                && self.decider.needs_equity(&ctx)
            {
                let equity = self
                    .estimator
                    .equity(&self.players[seat].hole, &self.board);
                self.players[seat].equity = Some(equity);
                continue;
            }
            match self.decider.decide(&ctx, &mut self.rng) {
                Decision::Raise(amount) => {
                    match validate_raise(amount, bet_level, ctx.posted, ctx.chips) {
                        Ok(()) => return Decision::Raise(amount),
                        Err(why) => rejection = Some(why),
                    }
                }
                Decision::Info => rejection = None,
                decision => return decision,
            }
        }
    }
}
