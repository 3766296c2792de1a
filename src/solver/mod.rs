//! Common search scaffolding shared by every strategy: per-call statistics,
//! variable-selection heuristics (first-empty, MRV, MRV+Degree), and
//! value ordering (LCV). Each concrete strategy lives in its own module,
//! mirroring the teacher's one-file-per-algorithm layout (`dfs.rs` next
//! to `dlx.rs`).

pub mod ac3;
pub mod ac4;
pub mod backtracking;
pub mod forward_checking;
pub mod heuristic;
pub mod mac;

use std::time::Instant;

use crate::cell::{Cell, Domain};
use crate::constraint::{degree, possible_values};
use crate::grid::Grid;
use crate::state::State;

/// Per-call search statistics. Reset at the top of every `solve_with_timing`.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub nodes_explored: u64,
    pub backtrack_count: u64,
    pub solving_time_ms: u128,
    pub solution_found: bool,
}

/// A CSP search strategy over a Binairo `State`.
pub trait Solver {
    fn name(&self) -> &'static str;
    fn stats(&self) -> &Stats;
    fn stats_mut(&mut self) -> &mut Stats;

    /// Strategy-specific entry point. Pure: on success returns a completed
    /// state; on failure returns `None`. Never panics on an unsatisfiable
    /// input -- absence of a solution is a normal result.
    fn solve(&mut self, state: &State) -> Option<State>;

    /// Resets statistics, times the call, and records whether it succeeded.
    fn solve_with_timing(&mut self, state: &State) -> Option<State> {
        *self.stats_mut() = Stats::default();
        let start = Instant::now();
        let result = self.solve(state);
        let elapsed = start.elapsed().as_millis();
        let stats = self.stats_mut();
        stats.solving_time_ms = elapsed;
        stats.solution_found = result.is_some();
        result
    }

    fn nodes_explored(&self) -> u64 {
        self.stats().nodes_explored
    }

    fn backtrack_count(&self) -> u64 {
        self.stats().backtrack_count
    }

    fn solving_time_ms(&self) -> u128 {
        self.stats().solving_time_ms
    }

    fn is_solution_found(&self) -> bool {
        self.stats().solution_found
    }
}

/// Empty cell with the smallest domain. If any empty cell has an empty
/// domain, that dead-end cell is returned immediately without finishing
/// the scan, so the caller can detect failure at once.
pub fn mrv(grid: &mut Grid) -> Option<(usize, usize)> {
    let candidates: Vec<(usize, usize)> = grid.iter_empty().collect();
    let mut best: Option<((usize, usize), usize)> = None;
    for (r, c) in candidates {
        let domain = possible_values(grid, r, c);
        if domain.is_empty() {
            return Some((r, c));
        }
        let len = domain.len();
        let better = match best {
            None => true,
            Some((_, blen)) => len < blen,
        };
        if better {
            best = Some(((r, c), len));
        }
    }
    best.map(|(pos, _)| pos)
}

/// MRV with ties broken by preferring the larger degree.
pub fn mrv_with_degree(grid: &mut Grid) -> Option<(usize, usize)> {
    let candidates: Vec<(usize, usize)> = grid.iter_empty().collect();
    let mut best: Option<((usize, usize), usize, usize)> = None;
    for (r, c) in candidates {
        let domain = possible_values(grid, r, c);
        if domain.is_empty() {
            return Some((r, c));
        }
        let len = domain.len();
        let deg = degree(grid, r, c);
        let better = match best {
            None => true,
            Some((_, blen, bdeg)) => len < blen || (len == blen && deg > bdeg),
        };
        if better {
            best = Some(((r, c), len, deg));
        }
    }
    best.map(|(pos, _, _)| pos)
}

/// Orders `domain`'s candidate values ascending by how many choices they
/// eliminate in row/column neighbors (least constraining first).
pub fn order_lcv(grid: &mut Grid, r: usize, c: usize, domain: Domain) -> Vec<u8> {
    let original = grid.get(r, c);
    let n = grid.size();
    let mut scored: Vec<(u8, usize)> = domain
        .values()
        .map(|v| {
            grid.set(r, c, Cell::from_digit(v));
            let mut score = 0usize;
            for j in 0..n {
                if j != c && grid.is_empty_cell(r, j) {
                    score += 2 - possible_values(grid, r, j).len();
                }
            }
            for i in 0..n {
                if i != r && grid.is_empty_cell(i, c) {
                    score += 2 - possible_values(grid, i, c).len();
                }
            }
            (v, score)
        })
        .collect();
    grid.set(r, c, original);
    scored.sort_by_key(|&(_, score)| score);
    scored.into_iter().map(|(v, _)| v).collect()
}

/// Runs `forward_check` after a tentative assignment at `(r, c)`: every
/// empty cell sharing its row or column must still have a non-empty
/// domain, or the value is rejected without recursing.
pub fn forward_check(grid: &mut Grid, r: usize, c: usize) -> bool {
    let n = grid.size();
    for j in 0..n {
        if j != c && grid.is_empty_cell(r, j) && possible_values(grid, r, j).is_empty() {
            return false;
        }
    }
    for i in 0..n {
        if i != r && grid.is_empty_cell(i, c) && possible_values(grid, i, c).is_empty() {
            return false;
        }
    }
    true
}

/// Builds the default solver used by the validator and generator.
pub fn default_solver() -> heuristic::HeuristicSolver {
    heuristic::HeuristicSolver::new()
}
