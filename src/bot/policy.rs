//! The built-in betting policy.
//!
//! Pre-flop decisions come from a Chen-style hole card score pushed
//! through fold/raise thresholds shifted by the cost of calling.
//! Post-flop decisions use effective hand strength and positive
//! potential from the equity estimator. The policy holds no generator
//! of its own; all jitter draws from the round's rng, so a seeded game
//! replays exactly.

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use crate::game::entities::{Card, Chips};
use crate::game::{Decision, DecisionProvider, Street, TurnContext};

#[derive(Clone, Copy, Debug, Default)]
pub struct AutoPolicy;

impl AutoPolicy {
    pub fn new() -> Self {
        Self
    }

    fn preflop(&self, ctx: &TurnContext, rng: &mut StdRng) -> Decision {
        let score = hole_score(ctx.hole);
        let mut fold_line = 0.0;
        let mut raise_line = 0.92;
        if score >= 10 {
            raise_line -= (score - 5) as f64 * 0.05;
        } else if score <= 8 {
            fold_line = -0.1 * score as f64 + 0.9;
        }

        // Shift the fold threshold by how much of the stack a call
        // costs; free checks never fold.
        let ratio = ctx.to_call() as f64 / ctx.chips as f64;
        if ratio < 1e-6 {
            fold_line = 0.0;
        } else if ratio > 0.5 {
            fold_line += 0.5;
        } else if ratio > 0.3 {
            fold_line += 0.4;
        } else if ratio > 0.2 {
            fold_line += 0.3;
        } else if ratio > 0.1 {
            fold_line += 0.2;
        } else if ratio > 0.05 {
            fold_line += 0.1;
        }

        let roll: f64 = rng.random();
        debug!(
            "{} pre-flop: score {score}, fold {fold_line:.2}, raise {raise_line:.2}, roll {roll:.2}",
            ctx.name
        );
        if roll < fold_line {
            Decision::Fold
        } else if roll > raise_line {
            self.raise_or_call(ctx, rng)
        } else {
            Decision::Call
        }
    }

    fn postflop(&self, ctx: &TurnContext, rng: &mut StdRng) -> Decision {
        let Some(equity) = ctx.equity else {
            return Decision::Call;
        };
        let ehs = equity.effective;
        let mut ppot = equity.ppot;

        let fold_limit = 0.66;
        let mut raise_line = 0.95;
        let mut fold_line = (ctx.to_call() as f64 / ctx.chips as f64 * fold_limit).min(fold_limit);

        let adjusted = if ehs < 0.6 {
            ehs - ppot
        } else {
            // Strong made hands raise more, and keep raising once
            // they have opened up.
            ppot = ppot.min(0.5);
            raise_line -= ppot * 0.75;
            if ctx.has_raised {
                raise_line += (1.0 - raise_line) * 2.0 / 3.0;
            }
            0.5 - ppot
        };
        raise_line = fold_line + (1.0 - fold_line) * raise_line;
        fold_line = fold_line + (1.0 - fold_line) * adjusted;

        let roll: f64 = rng.random();
        debug!(
            "{} {}: ehs {ehs:.4}, fold {fold_line:.2}, raise {raise_line:.2}, roll {roll:.2}",
            ctx.name, ctx.street
        );
        if roll < fold_line {
            Decision::Fold
        } else if roll > raise_line {
            self.raise_or_call(ctx, rng)
        } else {
            Decision::Call
        }
    }

    fn raise_or_call(&self, ctx: &TurnContext, rng: &mut StdRng) -> Decision {
        let to_call = ctx.to_call();
        if to_call >= ctx.chips {
            return Decision::Call;
        }
        let headroom = ctx.chips - to_call;
        // Mostly small raises, occasionally a big one.
        let tier = rng.random_range(0..100);
        let cap = if tier < 65 {
            (headroom / 5).max(1)
        } else if tier < 90 {
            ((headroom as f64 / 1.5) as Chips).max(1)
        } else {
            headroom
        };
        Decision::Raise(rng.random_range(1..=cap))
    }
}

impl DecisionProvider for AutoPolicy {
    fn decide(&mut self, ctx: &TurnContext, rng: &mut StdRng) -> Decision {
        // A rejected raise means the stack can't cover it; calling is
        // always legal.
        if ctx.rejection.is_some() {
            return Decision::Call;
        }
        match ctx.street {
            Street::PreFlop => self.preflop(ctx, rng),
            _ => self.postflop(ctx, rng),
        }
    }

    fn needs_equity(&self, ctx: &TurnContext) -> bool {
        ctx.street != Street::PreFlop
    }
}

/// Chen-style score for two hole cards: high card base, doubled for
/// pairs, a suited bonus, gap penalties, and a bonus for low
/// connectors that can still make straights both ways. Anything other
/// than exactly two cards scores zero.
pub fn hole_score(hole: &[Card]) -> i32 {
    let [first, second] = hole else {
        return 0;
    };
    let a = first.rank.value() as i32;
    let b = second.rank.value() as i32;
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    let mut score = match high {
        14 => 10.0,
        13 => 8.0,
        12 => 7.0,
        11 => 6.0,
        v => v as f64 / 2.0,
    };
    if low == high {
        score *= 2.0;
        if score < 5.0 {
            score = 5.0;
        }
    }
    if first.suit == second.suit {
        score += 2.0;
    }
    let gap = high - low;
    if gap == 2 {
        score -= 1.0;
    } else if gap == 3 {
        score -= 2.0;
    } else if gap == 4 {
        score -= 4.0;
    } else if gap >= 5 {
        score -= 5.0;
    }
    if (gap == 1 || gap == 2) && low <= 11 && high <= 11 {
        score += 1.0;
    }
    (score + 0.1).round() as i32
}
