//! Table limits and defaults.

use super::entities::Chips;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

/// Hole cards dealt to each player.
pub const HOLE_CARDS: usize = 2;
/// Community cards on a full board.
pub const BOARD_SIZE: usize = 5;

pub const DEFAULT_STARTING_STACK: Chips = 500;
pub const DEFAULT_BIG_BLIND: Chips = 10;
