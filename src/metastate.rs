//! Metastate partition of the state space by safe counts.
//!
//! A side's safe count never decreases, so grouping positions by the
//! unordered pair of safe counts yields a partition the solver can process
//! in dependency order: every transition out of a metastate lands in the
//! same metastate or a later one. Attacker and defender aren't
//! distinguished here since a zero roll trivially swaps them.

use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;

use crate::player::PlayerPosition;
use crate::position::GamePosition;
use crate::rules::PIECE_COUNT;

/// The unordered pair of side safe counts identifying one metastate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SafeCounts {
    hi: usize,
    lo: usize,
}

impl SafeCounts {
    pub fn new(hi: usize, lo: usize) -> Self {
        assert!(hi >= lo && hi <= PIECE_COUNT);
        SafeCounts { hi, lo }
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    /// True if both sides have the same safe count.
    pub fn is_symmetric(&self) -> bool {
        self.hi == self.lo
    }

    pub fn total(&self) -> usize {
        self.hi + self.lo
    }

    /// Every metastate, unordered. 36 for a seven-piece game.
    pub fn all() -> Vec<SafeCounts> {
        (0..=PIECE_COUNT)
            .flat_map(|hi| (0..=hi).map(move |lo| SafeCounts::new(hi, lo)))
            .collect()
    }

    /// Every non-terminal game position belonging to this metastate. For
    /// asymmetric metastates each pairing is emitted in both orientations,
    /// covering both assignments of which side holds which safe count.
    pub fn positions(&self) -> Vec<GamePosition> {
        let all_hi = Self::player_positions(self.hi);
        let all_lo = if self.is_symmetric() {
            all_hi.clone()
        } else {
            Self::player_positions(self.lo)
        };

        let mut result = Vec::new();
        for &attacker in &all_hi {
            for &defender in all_lo.iter().filter(|d| !d.intersects(attacker)) {
                let pos = GamePosition::new(attacker, defender);
                result.push(pos);
                if !self.is_symmetric() {
                    result.push(pos.reversed());
                }
            }
        }
        result
    }

    fn player_positions(safe_count: usize) -> Vec<PlayerPosition> {
        PlayerPosition::all()
            .iter()
            .copied()
            .filter(|p| p.safe_count() == safe_count && !p.is_terminal())
            .collect()
    }

    /// The metastate a position belongs to.
    pub fn of(position: GamePosition) -> SafeCounts {
        let a = position.attacker().safe_count();
        let d = position.defender().safe_count();
        SafeCounts::new(a.max(d), a.min(d))
    }
}

impl Ord for SafeCounts {
    // Ordered by (total, hi): total can only grow during a game, so this
    // order never moves backwards along any line of play.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.total(), self.hi).cmp(&(other.total(), other.hi))
    }
}

impl PartialOrd for SafeCounts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SafeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.hi, self.lo)
    }
}

/// All metastates in retrograde solving order: fully-safe endgames first,
/// the empty opening board last.
pub fn solve_order() -> Vec<SafeCounts> {
    SafeCounts::all()
        .into_iter()
        .sorted()
        .rev()
        .collect()
}
