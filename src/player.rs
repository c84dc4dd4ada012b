//! Single-side board state: a 14-bit occupancy bitboard plus a count of
//! pieces waiting to enter.

use once_cell::sync::Lazy;

use crate::rules::{self, PIECE_COUNT, SPACE_COUNT};

/// A move for the side to play. `from < 0` enters a piece from the waiting
/// pool; `to == SPACE_COUNT` exits a piece from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: i8,
    pub to: i8,
}

impl Move {
    pub fn new(from: i8, to: i8) -> Self {
        Move { from, to }
    }

    /// Entering move from the waiting pool.
    pub fn enter(to: i8) -> Self {
        Move { from: -1, to }
    }

    pub fn is_entry(&self) -> bool {
        self.from < 0
    }

    pub fn is_exit(&self) -> bool {
        self.to as usize == SPACE_COUNT
    }
}

/// One player's half of a game position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerPosition {
    bitboard: u16,
    wait_count: i8,
}

impl Default for PlayerPosition {
    /// At the start of the game every piece is waiting to enter.
    fn default() -> Self {
        PlayerPosition::new(0, PIECE_COUNT as i8)
    }
}

impl PlayerPosition {
    pub fn new(bitboard: u16, wait_count: i8) -> Self {
        PlayerPosition {
            bitboard,
            wait_count,
        }
    }

    pub fn bitboard(&self) -> u16 {
        self.bitboard
    }

    /// Pieces on the board.
    pub fn board_count(&self) -> usize {
        self.bitboard.count_ones() as usize
    }

    /// Pieces waiting to enter.
    pub fn wait_count(&self) -> usize {
        self.wait_count as usize
    }

    /// Pieces that have left the board.
    pub fn exited_count(&self) -> usize {
        PIECE_COUNT - self.board_count() - self.wait_count()
    }

    /// A position is structurally valid if it doesn't use more than the
    /// allotted pieces.
    pub fn is_valid(&self) -> bool {
        self.wait_count >= 0 && self.board_count() + self.wait_count() <= PIECE_COUNT
    }

    /// True once every piece has exited the board.
    pub fn is_terminal(&self) -> bool {
        self.bitboard == 0 && self.wait_count == 0
    }

    /// Pieces that have exited or reached the final two private spaces.
    /// This count never decreases during a game, which is what makes the
    /// metastate partition sound.
    pub fn safe_count(&self) -> usize {
        PIECE_COUNT - (self.bitboard & 0x0fff).count_ones() as usize - self.wait_count()
    }

    /// True if both sides have a piece on the same shared space.
    pub fn intersects(&self, other: PlayerPosition) -> bool {
        self.bitboard & other.bitboard & 0x0ff0 != 0
    }

    pub fn occupies(&self, space: i8) -> bool {
        debug_assert!((0..SPACE_COUNT as i8).contains(&space) || space == SPACE_COUNT as i8);
        self.bitboard & (1u16 << space) != 0
    }

    /// Send the piece on `space` back to the waiting pool.
    pub fn capture(&mut self, space: i8) {
        debug_assert!(rules::is_shared(space) && !rules::is_sanctuary(space));
        debug_assert!(self.occupies(space));
        self.remove(space);
        self.wait_count += 1;
    }

    /// Execute a move for this side. Capture handling lives at the
    /// game-position level since it affects the opponent.
    pub fn apply(&mut self, mv: Move) {
        if mv.is_entry() {
            debug_assert!(self.wait_count > 0);
            self.wait_count -= 1;
        } else {
            debug_assert!(self.occupies(mv.from));
            self.remove(mv.from);
        }
        if !mv.is_exit() {
            self.place(mv.to);
        }
    }

    fn remove(&mut self, space: i8) {
        self.bitboard &= !(1u16 << space);
    }

    fn place(&mut self, space: i8) {
        self.bitboard |= 1u16 << space;
    }

    /// Every valid single-side position, enumerated once.
    pub fn all() -> &'static [PlayerPosition] {
        &ALL_PLAYER_POSITIONS
    }
}

// Walking all 2^14 bitboards and discarding the overfull ones is simpler
// than enumerating piece placements combinatorially.
static ALL_PLAYER_POSITIONS: Lazy<Vec<PlayerPosition>> = Lazy::new(|| {
    let mut result = Vec::new();
    for bitboard in 0u16..(1 << SPACE_COUNT) {
        let board_count = bitboard.count_ones() as usize;
        if board_count > PIECE_COUNT {
            continue;
        }
        for wait_count in 0..=(PIECE_COUNT - board_count) {
            result.push(PlayerPosition::new(bitboard, wait_count as i8));
        }
    }
    result
});
