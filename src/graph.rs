//! Flattened adjacency graphs for one worker's chunk of a metastate.
//!
//! Instead of materializing per-node move lists, the children of every
//! position are appended to a single contiguous stream: for each position,
//! for each roll 0..=4, the resolved child table indices followed by an
//! explicit terminator. Rolls with no legal move contribute exactly one
//! child, the side-swapped position. Each link carries its own turn-passes
//! flag, so a legitimate child at table index 0 can never be confused with
//! the end of a roll's list.
//!
//! A graph is owned by exactly one worker and is rebuilt per metastate;
//! within a metastate its structure is fixed and it is swept many times.

use crate::position::GamePosition;
use crate::rules::ROLL_WEIGHTS;
use crate::table::ValueTable;

/// One element of the flattened child stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// A reachable child; `passes` is false when the move lands on a
    /// rosette and the mover keeps the turn.
    Child { index: u32, passes: bool },
    /// End of the current roll's child list.
    End,
}

/// Flattened game graph for a contiguous range of positions.
pub struct ChunkGraph {
    /// Value-table index of each position, in enumeration order.
    nodes: Vec<u32>,
    /// Child stream: per node, per roll, children then `Link::End`.
    links: Vec<Link>,
}

impl ChunkGraph {
    pub fn new() -> Self {
        ChunkGraph {
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Build the graph for a chunk of positions, resolving every child to
    /// its table index.
    pub fn build(positions: &[GamePosition], table: &ValueTable) -> Self {
        let mut graph = ChunkGraph::new();
        for &position in positions {
            graph.append(position, table);
        }
        graph
    }

    /// Clear for reuse on the next metastate.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn append(&mut self, position: GamePosition, table: &ValueTable) {
        self.nodes.push(table.index_of(position) as u32);

        // The no-move child: the same board with the turn passed. Used at
        // least once per position since a roll of zero never has a move.
        let no_move = table.index_of(position.reversed()) as u32;

        for roll in 0..ROLL_WEIGHTS.len() {
            let moves = position.moves(roll);
            if moves.is_empty() {
                self.links.push(Link::Child {
                    index: no_move,
                    passes: true,
                });
            } else {
                for mv in moves {
                    let (next, passes) = position.with_move(mv);
                    self.links.push(Link::Child {
                        index: table.index_of(next) as u32,
                        passes,
                    });
                }
            }
            self.links.push(Link::End);
        }
    }

    /// Update every node once from its children's previous-sweep values
    /// and return the maximum absolute change.
    pub fn sweep(&self, table: &ValueTable) -> f64 {
        let mut cursor = 0;
        let mut max_delta = 0.0f64;

        for &node in &self.nodes {
            let before = table.read(node as usize);

            // Value of the node is the value of the best move for each
            // roll, weighted by the roll's probability.
            let mut value = 0.0;
            for &weight in &ROLL_WEIGHTS {
                value += weight * self.best_child(table, &mut cursor);
            }

            table.write(node as usize, value);
            max_delta = max_delta.max((value - before).abs());
        }

        debug_assert_eq!(cursor, self.links.len());
        max_delta
    }

    /// Value of the best child for the roll starting at `cursor`. Every
    /// roll has at least one child.
    fn best_child(&self, table: &ValueTable, cursor: &mut usize) -> f64 {
        // Values are win probabilities, so the best is never below zero.
        let mut best = 0.0f64;
        loop {
            match self.links[*cursor] {
                Link::End => {
                    *cursor += 1;
                    return best;
                }
                Link::Child { index, passes } => {
                    *cursor += 1;
                    let mut value = table.read(index as usize);
                    // The opponent's win is our loss.
                    if passes {
                        value = 1.0 - value;
                    }
                    best = best.max(value);
                }
            }
        }
    }
}

impl Default for ChunkGraph {
    fn default() -> Self {
        ChunkGraph::new()
    }
}
