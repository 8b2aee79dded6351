//! Main and side pot accounting.
//!
//! Posted chips are collected at the end of every betting street. When
//! an all-in player caps their contribution, a side pot opens for the
//! players still able to bet; pots that end up with identical eligible
//! sets are merged, and pots reduced to a single claimant pay out
//! immediately rather than waiting for the showdown.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::entities::{Chips, Player, SeatIndex};

/// One pot of collected chips.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pot {
    pub value: Chips,
    /// Seats still able to win this pot.
    pub eligible: BTreeSet<SeatIndex>,
    /// Per-seat amounts from the most recent collection. Display
    /// data only; awards go by `value` and `eligible`.
    pub contributions: BTreeMap<SeatIndex, Chips>,
}

/// Chips handed back to a player outside the showdown: an immediately
/// awarded side pot or a stranded-blind refund.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Payout {
    pub seat: SeatIndex,
    pub amount: Chips,
}

#[derive(Debug)]
pub struct PotManager {
    pots: Vec<Pot>,
    auto_advance: bool,
}

impl Default for PotManager {
    fn default() -> Self {
        Self {
            pots: vec![Pot::default()],
            auto_advance: false,
        }
    }
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.pots.clear();
        self.pots.push(Pot::default());
        self.auto_advance = false;
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Chips sitting in pots, not counting uncollected posts.
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|pot| pot.value).sum()
    }

    /// Set once at most one unfolded player still has chips; the
    /// remaining streets then run without prompting anyone.
    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    fn active_pot(&mut self) -> &mut Pot {
        let last = self.pots.len() - 1;
        &mut self.pots[last]
    }

    /// Collects every posted chip into pots at the end of a street.
    ///
    /// Posters are processed in (stack, posted) ascending order so
    /// all-in players cap each pot before the players still holding
    /// chips spill into a side pot. Returns chips paid straight back
    /// out: stranded-blind refunds and pots reduced to one claimant.
    pub fn collect(&mut self, players: &mut [Player]) -> Vec<Payout> {
        let mut payouts = Vec::new();
        self.active_pot().contributions.clear();

        let mut order: Vec<SeatIndex> = (0..players.len())
            .filter(|&seat| players[seat].posted > 0)
            .collect();
        order.sort_by_key(|&seat| (players[seat].chips, players[seat].posted));

        for idx in 0..order.len() {
            let seat = order[idx];
            let post_amount = players[seat].posted;
            if post_amount == 0 {
                continue;
            }

            // A player who exactly called all-in on an earlier street
            // left the active pot capped without a side pot opening.
            // Open one now before collecting more.
            let capped = self
                .active_pot()
                .eligible
                .iter()
                .any(|&member| players[member].chips == 0);
            if capped {
                self.pots.push(Pot::default());
            }

            if players[seat].chips == 0 {
                // All-in: every remaining poster matches up to the
                // all-in player's post, then a side pot opens.
                let pot = self.active_pot();
                for &other in &order[idx..] {
                    let poster = &mut players[other];
                    let contribution = post_amount.min(poster.posted);
                    pot.value += contribution;
                    pot.contributions.insert(other, contribution);
                    poster.posted -= contribution;
                    if !poster.folded {
                        pot.eligible.insert(other);
                    }
                }
                self.pots.push(Pot::default());
            } else {
                // No cap in play: everything still posted goes into
                // the active pot.
                let pot = self.active_pot();
                for &other in &order[idx..] {
                    let poster = &mut players[other];
                    pot.value += poster.posted;
                    pot.contributions.insert(other, poster.posted);
                    poster.posted = 0;
                    if !poster.folded {
                        pot.eligible.insert(other);
                    }
                }

                // Stranded blind: a short all-in big blind can leave
                // the active pot holding only folded players' chips.
                // Nobody can win it, so it goes back where it came
                // from.
                let stranded = self.active_pot().eligible.is_empty() && self.pots.len() > 1;
                if stranded {
                    if let Some(pot) = self.pots.pop() {
                        for (&contributor, &amount) in &pot.contributions {
                            players[contributor].chips += amount;
                            payouts.push(Payout {
                                seat: contributor,
                                amount,
                            });
                        }
                    }
                }
                break;
            }
        }

        // Folds can leave adjacent pots with identical eligible sets.
        let mut i = 0;
        while i + 1 < self.pots.len() {
            if self.pots[i].eligible == self.pots[i + 1].eligible {
                let merged = self.pots.remove(i + 1);
                self.pots[i].value += merged.value;
                for (seat, amount) in merged.contributions {
                    *self.pots[i].contributions.entry(seat).or_default() += amount;
                }
                i += 2;
            } else {
                i += 1;
            }
        }

        for pot in &mut self.pots {
            pot.eligible.retain(|&member| !players[member].folded);
        }

        // A side pot down to one claimant pays out now instead of at
        // the showdown.
        if self.pots.len() > 1 {
            for pot in &mut self.pots {
                if pot.eligible.len() == 1 && pot.value > 0 {
                    if let Some(&seat) = pot.eligible.first() {
                        players[seat].chips += pot.value;
                        payouts.push(Payout {
                            seat,
                            amount: pot.value,
                        });
                        pot.value = 0;
                    }
                }
            }
        }
        self.pots.retain(|pot| pot.value > 0);
        if self.pots.is_empty() {
            self.pots.push(Pot::default());
        }

        let live = players
            .iter()
            .filter(|player| player.chips != 0 && !player.folded)
            .count();
        if live <= 1 {
            self.auto_advance = true;
        }

        payouts
    }

    /// Mid-street fold handling when side pots exist: if the active
    /// pot is down to one unfolded member, everyone in it sweeps in
    /// their posted chips and the survivor takes the pot immediately.
    /// Returns the awarded pot alongside the payout.
    pub fn resolve_lone_claimant(&mut self, players: &mut [Player]) -> Option<(Pot, Payout)> {
        if self.pots.len() <= 1 {
            return None;
        }
        let last = self.pots.len() - 1;
        let mut unfolded = self.pots[last]
            .eligible
            .iter()
            .copied()
            .filter(|&member| !players[member].folded);
        let claimant = unfolded.next()?;
        if unfolded.next().is_some() {
            return None;
        }

        let members: Vec<SeatIndex> = self.pots[last].eligible.iter().copied().collect();
        for member in members {
            self.pots[last].value += players[member].posted;
            players[member].posted = 0;
        }
        let pot = self.pots.pop()?;
        let amount = pot.value;
        players[claimant].chips += amount;
        Some((
            pot,
            Payout {
                seat: claimant,
                amount,
            },
        ))
    }
}
