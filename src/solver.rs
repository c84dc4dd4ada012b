//! Parallel retrograde value-iteration solver.
//!
//! Metastates are processed from the fully-safe endgames down to the empty
//! opening board, so every value a metastate depends on is already solved
//! or belongs to the metastate itself. Within a metastate the positions
//! are split into contiguous ranges, one per worker; each worker builds a
//! flattened graph for its range and the whole group is swept repeatedly
//! until the largest value change drops below the convergence threshold.

use rayon::prelude::*;

use crate::graph::ChunkGraph;
use crate::metastate::{self, SafeCounts};
use crate::table::ValueTable;
use crate::values::PositionValues;

/// Convergence threshold: 2^-25. The exported values are f32s confined to
/// [0.5, 1.0), where the representable precision is 2^-24; solving one bit
/// further keeps the residual iteration error below the export format's
/// own resolution.
pub const CONVERGENCE_THRESHOLD: f64 = 1.0 / ((1u64 << 25) as f64);

/// Progress events reported while solving.
#[derive(Debug, Clone, Copy)]
pub enum Progress {
    /// Starting to build the flattened graphs for a metastate.
    BuildingGraph { state: SafeCounts },
    /// A full sweep over the current metastate finished.
    Optimizing { iteration: usize, delta: f64 },
}

pub struct Solver {
    workers: usize,
}

impl Solver {
    /// Solver sized to the rayon thread pool.
    pub fn new() -> Self {
        Self::with_workers(rayon::current_num_threads())
    }

    pub fn with_workers(workers: usize) -> Self {
        assert!(workers > 0);
        Solver { workers }
    }

    /// Solve the entire game and return the final value artifact. Runs to
    /// completion; this is an offline batch computation with no partial
    /// results.
    pub fn solve(&self, mut report: impl FnMut(Progress)) -> PositionValues {
        let mut table = ValueTable::new();
        for state in metastate::solve_order() {
            self.solve_metastate(state, &mut table, &mut report);
        }
        table.into_values()
    }

    fn solve_metastate(
        &self,
        state: SafeCounts,
        table: &mut ValueTable,
        report: &mut impl FnMut(Progress),
    ) {
        report(Progress::BuildingGraph { state });

        let positions = state.positions();
        if positions.is_empty() {
            return;
        }

        // Build one graph per worker over its contiguous range. The ranges
        // stay fixed for every sweep of this metastate, so no two workers
        // ever write the same table index.
        let graphs: Vec<ChunkGraph> = chunk_ranges(positions.len(), self.workers)
            .into_par_iter()
            .map(|range| ChunkGraph::build(&positions[range], table))
            .collect();

        let mut iteration = 0;
        loop {
            let delta = graphs
                .par_iter()
                .map(|graph| graph.sweep(table))
                .reduce(|| 0.0, f64::max);

            // All workers have joined; flipping the phase here is the
            // barrier that publishes this sweep's writes.
            table.toggle();

            iteration += 1;
            report(Progress::Optimizing { iteration, delta });
            if delta <= CONVERGENCE_THRESHOLD {
                break;
            }
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new()
    }
}

/// Split `len` items into `workers` contiguous, near-equal ranges.
fn chunk_ranges(len: usize, workers: usize) -> Vec<std::ops::Range<usize>> {
    (0..workers)
        .map(|i| (i * len / workers)..((i + 1) * len / workers))
        .filter(|r| !r.is_empty())
        .collect()
}
