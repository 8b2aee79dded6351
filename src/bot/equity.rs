//! Hand strength and hand potential estimation.
//!
//! Follows the Billings et al. formulation: strength enumerates every
//! two-card holding an opponent could have; potential plays each of
//! those holdings forward through every board completion and tracks
//! the ahead/tied/behind transitions in a 3x3 matrix. Comparisons are
//! at hand-category level throughout.

use log::debug;

use crate::game::constants::BOARD_SIZE;
use crate::game::entities::{Card, Equity, Rank, Suit};
use crate::game::eval::Evaluator;

const AHEAD: usize = 0;
const TIED: usize = 1;
const BEHIND: usize = 2;

/// Exhaustive equity enumeration with reusable card buffers. One
/// instance serves a whole game; nothing here allocates per call once
/// the buffers are warm.
#[derive(Debug, Default)]
pub struct EquityEstimator {
    evaluator: Evaluator,
    unseen: Vec<Card>,
    mine: Vec<Card>,
    theirs: Vec<Card>,
}

impl EquityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full equity picture for one player on the current street.
    pub fn equity(&mut self, hole: &[Card], board: &[Card]) -> Equity {
        let strength = self.hand_strength(hole, board);
        let (ppot, npot) = self.hand_potential(hole, board);
        let effective = strength + (1.0 - strength) * ppot;
        debug!("equity: strength {strength:.4} ppot {ppot:.4} npot {npot:.4}");
        Equity {
            strength,
            ppot,
            npot,
            effective,
        }
    }

    /// Fraction of opponent holdings this hand beats right now, ties
    /// counting half. Both sides are evaluated with the board.
    pub fn hand_strength(&mut self, hole: &[Card], board: &[Card]) -> f64 {
        self.refill_unseen(hole, board);
        self.mine.clear();
        self.mine.extend_from_slice(hole);
        self.mine.extend_from_slice(board);
        let my_category = self.evaluator.category(&self.mine);

        let (mut ahead, mut tied, mut behind) = (0u64, 0u64, 0u64);
        for k in 0..self.unseen.len() {
            for l in (k + 1)..self.unseen.len() {
                self.theirs.clear();
                self.theirs.push(self.unseen[k]);
                self.theirs.push(self.unseen[l]);
                self.theirs.extend_from_slice(board);
                let opp_category = self.evaluator.category(&self.theirs);
                if my_category > opp_category {
                    ahead += 1;
                } else if my_category == opp_category {
                    tied += 1;
                } else {
                    behind += 1;
                }
            }
        }
        let total = ahead + tied + behind;
        if total == 0 {
            return 0.0;
        }
        (ahead as f64 + 0.5 * tied as f64) / total as f64
    }

    /// Positive and negative potential: the chance of pulling ahead,
    /// and of falling behind, once the board runs out. On the flop
    /// both turn and river are enumerated; on the turn just the
    /// river. A full board has no potential left in either direction.
    pub fn hand_potential(&mut self, hole: &[Card], board: &[Card]) -> (f64, f64) {
        if board.is_empty() || board.len() >= BOARD_SIZE {
            return (0.0, 0.0);
        }
        self.refill_unseen(hole, board);
        self.mine.clear();
        self.mine.extend_from_slice(hole);
        self.mine.extend_from_slice(board);
        let my_now = self.evaluator.category(&self.mine);
        let base_mine = self.mine.len();

        let mut matrix = [[0u64; 3]; 3];
        let mut totals = [0u64; 3];
        let pool = self.unseen.len();
        let on_flop = board.len() < BOARD_SIZE - 1;

        for k in 0..pool {
            for l in (k + 1)..pool {
                self.theirs.clear();
                self.theirs.push(self.unseen[k]);
                self.theirs.push(self.unseen[l]);
                self.theirs.extend_from_slice(board);
                let opp_now = self.evaluator.category(&self.theirs);
                let index = if my_now > opp_now {
                    AHEAD
                } else if my_now == opp_now {
                    TIED
                } else {
                    BEHIND
                };
                let base_theirs = self.theirs.len();

                for m in 0..pool {
                    if m == k || m == l {
                        continue;
                    }
                    if on_flop {
                        for q in (m + 1)..pool {
                            if q == k || q == l {
                                continue;
                            }
                            totals[index] += 1;
                            self.mine.truncate(base_mine);
                            self.mine.push(self.unseen[m]);
                            self.mine.push(self.unseen[q]);
                            self.theirs.truncate(base_theirs);
                            self.theirs.push(self.unseen[m]);
                            self.theirs.push(self.unseen[q]);
                            let best = self.evaluator.category(&self.mine);
                            let opp_best = self.evaluator.category(&self.theirs);
                            let outcome = if best > opp_best {
                                AHEAD
                            } else if best == opp_best {
                                TIED
                            } else {
                                BEHIND
                            };
                            matrix[index][outcome] += 1;
                        }
                    } else {
                        totals[index] += 1;
                        self.mine.truncate(base_mine);
                        self.mine.push(self.unseen[m]);
                        self.theirs.truncate(base_theirs);
                        self.theirs.push(self.unseen[m]);
                        let best = self.evaluator.category(&self.mine);
                        let opp_best = self.evaluator.category(&self.theirs);
                        let outcome = if best > opp_best {
                            AHEAD
                        } else if best == opp_best {
                            TIED
                        } else {
                            BEHIND
                        };
                        matrix[index][outcome] += 1;
                    }
                }
            }
        }

        let ppot_denom = totals[BEHIND] as f64 + totals[TIED] as f64 / 2.0;
        let ppot = if ppot_denom > 0.0 {
            (matrix[BEHIND][AHEAD] as f64
                + matrix[BEHIND][TIED] as f64 / 2.0
                + matrix[TIED][AHEAD] as f64 / 2.0)
                / ppot_denom
        } else {
            0.0
        };
        let npot_denom = totals[AHEAD] as f64 + totals[TIED] as f64 / 2.0;
        let npot = if npot_denom > 0.0 {
            (matrix[AHEAD][BEHIND] as f64
                + matrix[TIED][BEHIND] as f64 / 2.0
                + matrix[AHEAD][TIED] as f64 / 2.0)
                / npot_denom
        } else {
            0.0
        };
        (ppot, npot)
    }

    fn refill_unseen(&mut self, hole: &[Card], board: &[Card]) {
        self.unseen.clear();
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let card = Card::new(rank, suit);
                if !hole.contains(&card) && !board.contains(&card) {
                    self.unseen.push(card);
                }
            }
        }
    }
}
