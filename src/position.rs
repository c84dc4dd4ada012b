//! Two-sided game positions and the 31-bit position id codec.
//!
//! Ur is symmetric in color, so a position is always stored from the
//! perspective of the side to move ("attacker") against the side waiting
//! ("defender"). The id packs both sides into 31 bits by merging the two
//! shared-space bitboards into a single base-3 field: 2^13 > 3^8, so the
//! eight shared spaces (empty / attacker / defender each) fit in 13 bits.

use once_cell::sync::Lazy;

use crate::player::{Move, PlayerPosition};
use crate::rules::{self, SPACE_COUNT};

impl PlayerPosition {
    /// The eight spaces shared with the opponent (spaces 4-11).
    pub(crate) fn bitboard_shared(&self) -> u8 {
        ((self.bitboard() >> 4) & 0xff) as u8
    }

    /// The six spaces unique to this player (0-3 and 12-13).
    pub(crate) fn bitboard_unique(&self) -> u8 {
        (((self.bitboard() >> 8) & 0x30) | (self.bitboard() & 0x0f)) as u8
    }
}

/// A full board configuration from the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GamePosition {
    attacker: PlayerPosition,
    defender: PlayerPosition,
}

impl GamePosition {
    pub fn new(attacker: PlayerPosition, defender: PlayerPosition) -> Self {
        GamePosition { attacker, defender }
    }

    pub fn attacker(&self) -> PlayerPosition {
        self.attacker
    }

    pub fn defender(&self) -> PlayerPosition {
        self.defender
    }

    /// Dense 31-bit id uniquely identifying this position.
    ///
    /// Field layout, low to high:
    ///   0 -  2: defender wait count
    ///   3 -  8: defender unique spaces
    ///   9 - 21: merged ternary shared spaces
    ///  22 - 24: attacker wait count
    ///  25 - 30: attacker unique spaces
    pub fn id(&self) -> i32 {
        let a_unique = self.attacker.bitboard_unique() as i32;
        let a_wait = self.attacker.wait_count() as i32;
        let d_unique = self.defender.bitboard_unique() as i32;
        let d_wait = self.defender.wait_count() as i32;

        let key = ((self.attacker.bitboard_shared() as usize) << 8)
            | self.defender.bitboard_shared() as usize;
        let shared = SHARED_IDS[key] as i32;

        d_wait | (d_unique << 3) | (shared << 9) | (a_wait << 22) | (a_unique << 25)
    }

    /// Decode an id back into a position. Inverse of [`GamePosition::id`]
    /// for all valid positions; an arbitrary id may decode to a position
    /// that fails [`GamePosition::is_valid`].
    pub fn from_id(id: i32) -> Self {
        let d_wait = id & 0x0007;
        let d_unique = (id >> 3) & 0x003f;
        let mut shared = (id >> 9) & 0x1fff;
        let a_wait = (id >> 22) & 0x0007;
        let a_unique = (id >> 25) & 0x003f;

        let mut a_shared: i32 = 0;
        let mut d_shared: i32 = 0;
        let mut mask: i32 = 1;
        while shared != 0 {
            match shared % 3 {
                2 => a_shared |= mask,
                1 => d_shared |= mask,
                _ => (),
            }
            shared /= 3;
            mask <<= 1;
        }

        let a_bitboard = ((a_unique & 0x30) << 8) | (a_shared << 4) | (a_unique & 0x0f);
        let d_bitboard = ((d_unique & 0x30) << 8) | (d_shared << 4) | (d_unique & 0x0f);

        GamePosition {
            attacker: PlayerPosition::new(a_bitboard as u16, a_wait as i8),
            defender: PlayerPosition::new(d_bitboard as u16, d_wait as i8),
        }
    }

    /// True if both sides are structurally valid and don't collide on a
    /// shared space.
    pub fn is_valid(&self) -> bool {
        self.attacker.is_valid()
            && self.defender.is_valid()
            && !self.attacker.intersects(self.defender)
    }

    /// The same board with the roles swapped.
    pub fn reversed(&self) -> Self {
        GamePosition {
            attacker: self.defender,
            defender: self.attacker,
        }
    }

    /// The game is over once either side has exited all its pieces.
    pub fn is_terminal(&self) -> bool {
        self.attacker.is_terminal() || self.defender.is_terminal()
    }

    /// All legal moves for the side to play. A roll of zero never has any.
    pub fn moves(&self, roll: usize) -> Vec<Move> {
        if roll == 0 {
            return Vec::new();
        }
        let roll = roll as i8;

        // Pieces exit by exact count, so nothing beyond this space can move.
        let max_from = SPACE_COUNT as i8 - roll;

        let mut moves: Vec<Move> = (0..=max_from)
            .filter_map(|from| {
                if !self.attacker.occupies(from) {
                    return None;
                }
                let to = from + roll;
                // Always blocked by your own pieces.
                if self.attacker.occupies(to) {
                    return None;
                }
                // Blocked by an opponent holding the sanctuary.
                if rules::is_sanctuary(to) && self.defender.occupies(to) {
                    return None;
                }
                Some(Move::new(from, to))
            })
            .collect();

        // A waiting piece can enter if its entry space is free.
        if self.attacker.wait_count() > 0 && !self.attacker.occupies(roll - 1) {
            moves.push(Move::enter(roll - 1));
        }

        moves
    }

    /// Apply a move in place; returns true if the turn passes to the other
    /// player. Presenting an illegal move is a caller bug, checked only in
    /// debug builds.
    pub fn apply(&mut self, mv: Move) -> bool {
        self.attacker.apply(mv);
        if rules::is_shared(mv.to) && self.defender.occupies(mv.to) {
            self.defender.capture(mv.to);
        }

        // Landing on a rosette keeps the turn.
        if rules::is_rosette(mv.to) {
            false
        } else {
            *self = self.reversed();
            true
        }
    }

    /// Apply a move to a copy; returns the resulting position and whether
    /// the turn passes.
    pub fn with_move(&self, mv: Move) -> (GamePosition, bool) {
        let mut next = *self;
        let passes = next.apply(mv);
        (next, passes)
    }

    /// Visit every valid game position exactly once.
    pub fn for_each(mut visit: impl FnMut(GamePosition)) {
        let all = PlayerPosition::all();
        for &attacker in all {
            for &defender in all.iter().filter(|d| !d.intersects(attacker)) {
                visit(GamePosition::new(attacker, defender));
            }
        }
    }
}

// Ternary encodings for every (attacker, defender) shared-bitboard pair.
// Colliding pairs never occur in play; they get a dummy entry so the table
// stays a flat array instead of a map.
static SHARED_IDS: Lazy<Vec<i16>> = Lazy::new(|| {
    (0usize..=0xffff)
        .map(|key| {
            let lhs = (key >> 8) as u8;
            let rhs = (key & 0xff) as u8;
            if lhs & rhs != 0 {
                return 0;
            }

            let mut shared: i16 = 0;
            let mut mask: u8 = 0x80;
            while mask != 0 {
                shared *= 3;
                if lhs & mask != 0 {
                    shared += 2;
                } else if rhs & mask != 0 {
                    shared += 1;
                }
                mask >>= 1;
            }
            shared
        })
        .collect()
});
