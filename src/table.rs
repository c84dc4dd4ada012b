//! Double-buffered value table shared by all solver workers.
//!
//! The table keeps two value buffers and a single-bit phase selector.
//! During a sweep every worker reads from `buffers[phase]` and writes to
//! `buffers[1 - phase]`; the phase flips only at the barrier between
//! sweeps. No reader can ever observe a write from the sweep in flight, so
//! no locking is needed. Values are stored as f64 bit patterns in atomics
//! with relaxed ordering: workers never race on the same index (their
//! position ranges are disjoint), and the rayon join provides the
//! happens-before edge for the next sweep.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::position::GamePosition;
use crate::values::{PositionValue, PositionValues};

pub struct ValueTable {
    ids: Vec<i32>,
    buffers: [Vec<AtomicU64>; 2],
    phase: usize,
}

impl ValueTable {
    /// Build the table over every valid game position. Terminal positions
    /// start at 0.0 (the side to move has already lost); everything else
    /// starts at the uninformative 0.5, which converges faster than zero.
    pub fn new() -> Self {
        let mut entries = Vec::new();
        GamePosition::for_each(|pos| {
            let init = if pos.is_terminal() { 0.0 } else { 0.5 };
            entries.push((pos.id(), init));
        });
        Self::from_entries(entries)
    }

    /// Build a table over an explicit set of positions. The set must be
    /// closed under the moves of whatever graph is solved against it.
    pub fn with_positions(positions: &[GamePosition]) -> Self {
        let entries = positions
            .iter()
            .map(|pos| (pos.id(), if pos.is_terminal() { 0.0 } else { 0.5 }))
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(mut entries: Vec<(i32, f64)>) -> Self {
        entries.sort_unstable_by_key(|e| e.0);
        entries.dedup_by_key(|e| e.0);

        let ids = entries.iter().map(|e| e.0).collect();
        let buffers = [
            entries.iter().map(|e| AtomicU64::new(e.1.to_bits())).collect(),
            entries.iter().map(|e| AtomicU64::new(e.1.to_bits())).collect(),
        ];
        ValueTable {
            ids,
            buffers,
            phase: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Table index of a position. The enumeration is exhaustive by
    /// construction, so a miss is an encoding bug, not a runtime condition.
    pub fn index_of(&self, position: GamePosition) -> usize {
        let id = position.id();
        self.ids
            .binary_search(&id)
            .unwrap_or_else(|_| panic!("position id {id} missing from value table"))
    }

    /// Read the current value at an index (the side finalized by the
    /// previous sweep).
    pub fn read(&self, index: usize) -> f64 {
        f64::from_bits(self.buffers[self.phase][index].load(Ordering::Relaxed))
    }

    /// Write the next value at an index (always the side opposite the one
    /// being read).
    pub fn write(&self, index: usize, value: f64) {
        self.buffers[1 - self.phase][index].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Flip which buffer is readable. Requires exclusive access, which
    /// guarantees no sweep is in flight.
    pub fn toggle(&mut self) {
        self.phase = 1 - self.phase;
    }

    /// Snapshot the readable side into the final immutable artifact.
    pub fn into_values(self) -> PositionValues {
        let entries = self
            .ids
            .iter()
            .enumerate()
            .map(|(i, &id)| PositionValue {
                id,
                value: self.read(i) as f32,
            })
            .collect();
        PositionValues::new(entries)
    }
}
